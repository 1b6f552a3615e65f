//! Static Map Renderer
//! Composes the UK map backdrop with one marker per grow location and
//! writes the figure to a PNG.
//!
//! The backdrop is assumed to be pre-aligned to the UK bounding box; it
//! is stretched over the full plotting area with a linear extent
//! mapping, longitude on the x-axis and latitude on the y-axis.

use std::path::Path;

use image::imageops::FilterType;
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use thiserror::Error;

use crate::data::{BoundingBox, UK_BOUNDS};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load map image: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("Drawing error: {0}")]
    DrawingError(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::DrawingError(err.to_string())
    }
}

const CANVAS_SIZE: (u32, u32) = (800, 800);
const TITLE: &str = "Grow Dataset Plot";

/// Marker radius in longitude/latitude units.
const MARKER_RADIUS: f64 = 0.05;

/// Renders the grow-location figure as a static raster image.
pub struct MapRenderer;

impl MapRenderer {
    /// Compose the figure and write it to `output_path` as PNG.
    ///
    /// `points` are (longitude, latitude) pairs; an empty slice renders
    /// the backdrop without markers.
    pub fn render(
        points: &[(f64, f64)],
        map_image_path: &Path,
        output_path: &Path,
    ) -> Result<(), RenderError> {
        let map = image::open(map_image_path)?;

        let root = BitMapBackend::new(output_path, CANVAS_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let bbox = UK_BOUNDS;
        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(32)
            .y_label_area_size(42)
            .build_cartesian_2d(
                bbox.lon_min..bbox.lon_max,
                LatitudeCoord {
                    inner: RangedCoordf64::from(bbox.lat_min..bbox.lat_max),
                    ticks: Self::latitude_ticks(&bbox),
                },
            )?;

        // Axis labels only; latitude ticks are pinned to whole degrees.
        chart
            .configure_mesh()
            .disable_mesh()
            .y_label_formatter(&|lat| format!("{lat:.0}"))
            .draw()?;

        // Stretch the backdrop over the full bounding-box extent.
        let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
        let map = map.resize_exact(plot_w, plot_h, FilterType::Triangle);
        let backdrop: BitMapElement<_> = ((bbox.lon_min, bbox.lat_max), map).into();
        chart.draw_series(std::iter::once(backdrop))?;

        let radius = Self::marker_radius_px(&bbox, plot_w);
        chart.draw_series(
            points
                .iter()
                .map(|&(lon, lat)| Circle::new((lon, lat), radius, RED.filled())),
        )?;

        root.present()?;
        log::info!(
            "Saved figure with {} marker(s) to {}",
            points.len(),
            output_path.display()
        );
        Ok(())
    }

    /// Render, then open the saved figure with the system viewer. The
    /// saved file is the primary artifact; a viewer that fails to launch
    /// only logs a warning.
    pub fn render_and_show(
        points: &[(f64, f64)],
        map_image_path: &Path,
        output_path: &Path,
    ) -> Result<(), RenderError> {
        Self::render(points, map_image_path, output_path)?;

        if let Err(err) = open::that(output_path) {
            log::warn!(
                "Could not open {} in a viewer: {err}",
                output_path.display()
            );
        }
        Ok(())
    }

    /// Tick positions at every whole-degree latitude inside the box.
    fn latitude_ticks(bbox: &BoundingBox) -> Vec<f64> {
        (bbox.lat_min.ceil() as i64..=bbox.lat_max.floor() as i64)
            .map(|lat| lat as f64)
            .collect()
    }

    /// Convert the fixed marker radius from longitude units to pixels
    /// for the plotting area width.
    fn marker_radius_px(bbox: &BoundingBox, plot_w: u32) -> i32 {
        let px = MARKER_RADIUS / bbox.lon_span() * plot_w as f64;
        (px.round() as i32).max(1)
    }
}

/// `RangedCoordf64` with pinned bold key points. Local stand-in for
/// plotters' `WithKeyPoints` combinator, which lacks the
/// `ValueFormatter<f64>` impl that `configure_mesh` requires; every
/// other method delegates to the inner coord.
struct LatitudeCoord {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl Ranged for LatitudeCoord {
    type ValueType = f64;
    type FormatOption = NoDefaultFormatting;

    fn range(&self) -> std::ops::Range<f64> {
        self.inner.range()
    }

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> std::ops::Range<i32> {
        self.inner.axis_pixel_range(limit)
    }
}

impl ValueFormatter<f64> for LatitudeCoord {
    fn format(value: &f64) -> String {
        <RangedCoordf64 as ValueFormatter<f64>>::format(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn write_map(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("map.png");
        RgbImage::new(40, 40).save(&path).unwrap();
        path
    }

    #[test]
    fn renders_markers_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let map = write_map(&dir);
        let out = dir.path().join("figure.png");

        MapRenderer::render(&[(1.5, 52.0), (-5.0, 55.0)], &map, &out).unwrap();

        let saved = image::open(&out).unwrap();
        assert_eq!(saved.width(), CANVAS_SIZE.0);
        assert_eq!(saved.height(), CANVAS_SIZE.1);
    }

    #[test]
    fn renders_backdrop_with_zero_points() {
        let dir = tempfile::tempdir().unwrap();
        let map = write_map(&dir);
        let out = dir.path().join("figure.png");

        MapRenderer::render(&[], &map, &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn missing_map_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("figure.png");

        let err =
            MapRenderer::render(&[], Path::new("no-such-map.png"), &out).unwrap_err();
        assert!(matches!(err, RenderError::ImageError(_)));
    }

    #[test]
    fn latitude_ticks_land_on_whole_degrees() {
        assert_eq!(
            MapRenderer::latitude_ticks(&UK_BOUNDS),
            vec![51.0, 52.0, 53.0, 54.0, 55.0, 56.0, 57.0]
        );
    }

    #[test]
    fn marker_radius_scales_with_plot_width() {
        let r = MapRenderer::marker_radius_px(&UK_BOUNDS, 720);
        // 0.05 of a 12.2768-degree span across 720px is ~3px.
        assert_eq!(r, 3);
        assert_eq!(MapRenderer::marker_radius_px(&UK_BOUNDS, 10), 1);
    }
}
