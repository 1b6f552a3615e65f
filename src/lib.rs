//! Grow Map - plots GROW sensor locations onto a static UK map.
//!
//! The pipeline is linear: load the CSV, clean it (drop incomplete rows,
//! correct the Latitude/Longitude column swap, coerce to numeric, filter
//! to the UK bounding box), then render one marker per surviving record
//! over the map backdrop.

pub mod charts;
pub mod data;
