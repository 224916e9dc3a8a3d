//! Debug script to dump a fixed-seed cave and its locator walk as ASCII

use std::error::Error;
use std::fs::File;
use std::io::Write;

use cave_generator::ascii::{render_composite, render_layer, tile_counts, tile_legend};
use cave_generator::logging::init_logging;
use cave_generator::{BiomeLocator, CaveConfig, CaveGenerator, CellLayer};

fn main() -> Result<(), Box<dyn Error>> {
    init_logging("debug");

    let generator = CaveGenerator::new(CaveConfig::default().with_seed(12345))?;
    let config = generator.config();
    let cave = generator.generate()?;

    let mut file = File::create("cave_debug.txt")?;

    writeln!(file, "=== CAVE DEBUG MAP ({}x{}) seed={} ===", config.width, config.height, config.seed)?;
    writeln!(file, "{}", generator.seeds())?;
    writeln!(file, "{:#?}", cave.report)?;
    writeln!(file)?;

    for layer in CellLayer::all() {
        writeln!(file, "=== LAYER {} ===", layer)?;
        write!(file, "{}", render_layer(&cave.grid, *layer))?;
        let mut counts: Vec<_> = tile_counts(&cave.grid, *layer).into_iter().collect();
        counts.sort();
        for (tile, n) in counts {
            writeln!(file, "  {:?}: {}", tile, n)?;
        }
        writeln!(file)?;
    }

    writeln!(file, "=== COMPOSITE ===")?;
    write!(file, "{}", render_composite(&cave.grid))?;
    write!(file, "{}", tile_legend())?;
    writeln!(file)?;

    // Walk the middle row left to right.
    writeln!(file, "=== LOCATOR WALK (y = {}) ===", config.height / 2)?;
    let mut locator = BiomeLocator::new();
    let y = (config.height / 2) as f32;
    for x in 0..config.width {
        if let Some(t) = locator.update(&cave.registry, (x as f32, y)) {
            writeln!(file, "  x={:3}: {:?} -> {:?}", x, t.from, t.to)?;
        }
    }

    // Then the middle column bottom to top, starting from no biome.
    writeln!(file, "=== LOCATOR WALK (x = {}) ===", config.width / 2)?;
    locator.reset();
    let x = (config.width / 2) as f32;
    for y in 0..config.height {
        if let Some(t) = locator.update(&cave.registry, (x, y as f32)) {
            writeln!(file, "  y={:3}: {:?} -> {:?}", y, t.from, t.to)?;
        }
    }

    println!("Wrote cave_debug.txt");
    Ok(())
}
