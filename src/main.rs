//! Grow Map - plots GROW sensor locations from CSV onto a static UK map.
//!
//! Fixed-path pipeline: load and clean the grow-locations CSV, then
//! render the surviving records over the UK map backdrop and open the
//! saved figure.

use std::path::Path;

use anyhow::Context;
use log::info;

use grow_map::charts::MapRenderer;
use grow_map::data::{DataLoader, DataProcessor};

const DATA_FILE: &str = "GrowLocations.csv";
const MAP_IMAGE: &str = "map7.png";
const OUTPUT_IMAGE: &str = "GrowDataVisualisation.png";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let raw = DataLoader::load_csv(Path::new(DATA_FILE))
        .with_context(|| format!("loading {DATA_FILE}"))?;
    info!("Loaded {} complete record(s) from {DATA_FILE}", raw.height());

    let cleaned = DataProcessor::clean(raw).context("cleaning grow-location records")?;
    info!("{} record(s) inside the UK bounding box", cleaned.height());

    let points = DataProcessor::coordinates(&cleaned)?;
    MapRenderer::render_and_show(&points, Path::new(MAP_IMAGE), Path::new(OUTPUT_IMAGE))
        .with_context(|| format!("rendering {OUTPUT_IMAGE}"))?;

    Ok(())
}
