//! Data module - CSV loading and cleaning

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{BoundingBox, DataProcessor, ProcessorError, UK_BOUNDS};
