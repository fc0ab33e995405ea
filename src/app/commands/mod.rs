pub mod assemble;
pub mod content;
pub mod generate;
pub mod inspect;
pub mod plan;
pub mod review;
