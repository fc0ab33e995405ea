//! slidegen: turn free text into a PowerPoint deck built on a template's own layouts.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    GenerateOptions, GenerateOutcome, InspectOutcome, OutlineOptions, OutlineOutcome,
    ReviewOptions, ReviewOutcome, generate, inspect, outline, review,
};
pub use domain::AppError;
