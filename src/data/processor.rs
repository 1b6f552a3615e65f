//! Data Processor Module
//! Cleaning pipeline for grow-location records: corrects the known
//! Latitude/Longitude column swap, coerces both coordinates to numeric,
//! and filters to the UK bounding box.
//!
//! The swap correction is unconditional. Every GrowLocations export seen
//! so far stores latitude under the "Longitude" header and vice versa;
//! a future export with correctly labeled columns would be re-corrupted
//! by this step.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' contains non-numeric coordinate values")]
    NonNumericCoordinate(String),
}

/// Rectangular geographic filter region, inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.lat_min <= lat && lat <= self.lat_max && self.lon_min <= lon && lon <= self.lon_max
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }
}

/// Approximate extent of the United Kingdom.
pub const UK_BOUNDS: BoundingBox = BoundingBox {
    lat_min: 50.681,
    lat_max: 57.985,
    lon_min: -10.592,
    lon_max: 1.6848,
};

/// Handles cleaning and transformation of the loaded records.
pub struct DataProcessor;

impl DataProcessor {
    /// Full cleaning pipeline: swap correction, numeric coercion, then
    /// the bounding-box filter. Deterministic for a given input frame.
    pub fn clean(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let df = Self::correct_coordinate_swap(df)?;
        let df = Self::coerce_coordinates(df)?;
        Self::filter_bounding_box(df, &UK_BOUNDS)
    }

    /// Swap the semantic labels of the "Latitude" and "Longitude"
    /// columns. Both series are cloned up front so this is a true
    /// transposition, never an overwrite of one side by the other.
    pub fn correct_coordinate_swap(mut df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let lat_raw = df.column("Latitude")?.as_materialized_series().clone();
        let lon_raw = df.column("Longitude")?.as_materialized_series().clone();

        df.with_column(lon_raw.with_name("Latitude".into()))?;
        df.with_column(lat_raw.with_name("Longitude".into()))?;

        Ok(df)
    }

    /// Cast both coordinate columns to Float64. A value that is present
    /// but not numeric fails the whole load; only values already missing
    /// before the cast are tolerated (and those were dropped at load).
    pub fn coerce_coordinates(mut df: DataFrame) -> Result<DataFrame, ProcessorError> {
        for name in ["Latitude", "Longitude"] {
            let nulls_before = df.column(name)?.null_count();
            let coerced = df.column(name)?.cast(&DataType::Float64)?;
            if coerced.null_count() > nulls_before {
                return Err(ProcessorError::NonNumericCoordinate(name.to_string()));
            }
            df.with_column(coerced)?;
        }
        Ok(df)
    }

    /// Keep only rows whose coordinates fall inside the bounding box,
    /// boundaries inclusive.
    pub fn filter_bounding_box(
        df: DataFrame,
        bbox: &BoundingBox,
    ) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .lazy()
            .filter(
                col("Latitude")
                    .gt_eq(lit(bbox.lat_min))
                    .and(col("Latitude").lt_eq(lit(bbox.lat_max)))
                    .and(col("Longitude").gt_eq(lit(bbox.lon_min)))
                    .and(col("Longitude").lt_eq(lit(bbox.lon_max))),
            )
            .collect()?;
        Ok(filtered)
    }

    /// Extract (longitude, latitude) pairs for rendering.
    pub fn coordinates(df: &DataFrame) -> Result<Vec<(f64, f64)>, ProcessorError> {
        let lat_ca = df.column("Latitude")?.f64()?;
        let lon_ca = df.column("Longitude")?.f64()?;

        let mut points = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            if let (Some(lon), Some(lat)) = (lon_ca.get(i), lat_ca.get(i)) {
                points.push((lon, lat));
            }
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame(lat: &[&str], lon: &[&str]) -> DataFrame {
        df!(
            "Serial" => vec!["s"; lat.len()],
            "Latitude" => lat,
            "Longitude" => lon,
        )
        .unwrap()
    }

    #[test]
    fn swap_is_a_true_transposition() {
        let df = raw_frame(&["1.5"], &["52.0"]);
        let swapped = DataProcessor::correct_coordinate_swap(df).unwrap();

        let lat = swapped.column("Latitude").unwrap().str().unwrap().get(0);
        let lon = swapped.column("Longitude").unwrap().str().unwrap().get(0);
        assert_eq!(lat, Some("52.0"));
        assert_eq!(lon, Some("1.5"));
    }

    #[test]
    fn coercion_parses_numeric_text() {
        let df = raw_frame(&["52.0"], &["1.5"]);
        let coerced = DataProcessor::coerce_coordinates(df).unwrap();

        let lat = coerced.column("Latitude").unwrap().f64().unwrap().get(0);
        assert_eq!(lat, Some(52.0));
    }

    #[test]
    fn coercion_fails_on_non_numeric_text() {
        let df = raw_frame(&["52.0", "not-a-number"], &["1.5", "1.5"]);
        let err = DataProcessor::coerce_coordinates(df).unwrap_err();
        assert!(matches!(err, ProcessorError::NonNumericCoordinate(ref c) if c == "Latitude"));
    }

    #[test]
    fn bounding_box_boundaries_are_inclusive() {
        assert!(UK_BOUNDS.contains(50.681, 1.6848));
        assert!(UK_BOUNDS.contains(57.985, -10.592));
        assert!(!UK_BOUNDS.contains(50.680, 0.0));
        assert!(!UK_BOUNDS.contains(58.0, 0.0));
        assert!(!UK_BOUNDS.contains(52.0, 1.685));
    }

    #[test]
    fn filter_keeps_boundary_rows_and_drops_just_outside() {
        let df = df!(
            "Latitude" => &[50.681, 50.680, 57.985, 52.0],
            "Longitude" => &[0.0, 0.0, -10.592, -11.0],
        )
        .unwrap();

        let filtered = DataProcessor::filter_bounding_box(df, &UK_BOUNDS).unwrap();
        assert_eq!(filtered.height(), 2);

        let lats = DataProcessor::coordinates(&filtered)
            .unwrap()
            .iter()
            .map(|&(_, lat)| lat)
            .collect::<Vec<_>>();
        assert_eq!(lats, vec![50.681, 57.985]);
    }

    #[test]
    fn clean_runs_swap_coercion_and_filter_in_order() {
        // Stored as (Latitude=1.5, Longitude=52.0): only after the swap
        // does the row land inside the UK box.
        let df = raw_frame(&["1.5", "120.0"], &["52.0", "45.0"]);
        let cleaned = DataProcessor::clean(df).unwrap();

        assert_eq!(cleaned.height(), 1);
        let points = DataProcessor::coordinates(&cleaned).unwrap();
        assert_eq!(points, vec![(1.5, 52.0)]);
    }

    #[test]
    fn clean_with_no_rows_in_box_yields_empty_frame() {
        let df = raw_frame(&["30.0"], &["10.0"]);
        let cleaned = DataProcessor::clean(df).unwrap();

        assert_eq!(cleaned.height(), 0);
        assert!(DataProcessor::coordinates(&cleaned).unwrap().is_empty());
    }
}
