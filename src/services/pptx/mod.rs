//! OOXML presentation package adapter.

mod content_types;
mod deck;
mod layouts;
mod package;
mod relationships;
mod slide_xml;
mod xml;

pub use deck::PptxDeck;
