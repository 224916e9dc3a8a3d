use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use cave_generator::ascii;
use cave_generator::export;
use cave_generator::logging::init_logging;
use cave_generator::{
    BiomeLocator, BorderStyle, CarveMode, CaveConfig, CaveGenerator, CellLayer, FallbackRule,
    OverlaySet, Tile,
};

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate procedural cave maps with noise-carved biomes")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the map in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of biomes including the fallback biome (at least 4)
    #[arg(short, long)]
    biomes: Option<usize>,

    /// Carve biomes with a distance-attenuated threshold
    #[arg(long)]
    attenuated: bool,

    /// Fill stone where noise falls below the threshold instead of above
    #[arg(long)]
    fallback_below: bool,

    /// Grow the border outside the map bounds
    #[arg(long)]
    outward_border: bool,

    /// Print the composite map to stdout
    #[arg(long)]
    ascii: bool,

    /// Export the map and stats to a text file
    #[arg(long)]
    export_txt: Option<String>,

    /// Export the composite map to a PNG file
    #[arg(long)]
    export_png: Option<PathBuf>,

    /// Pixels per cell in PNG export
    #[arg(long, default_value = "4")]
    png_scale: u32,

    /// Walk an agent diagonally across the map and print biome transitions
    #[arg(long)]
    walk: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn build_config(args: &Args) -> Result<CaveConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => CaveConfig::load(path)?,
        None => CaveConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(biomes) = args.biomes {
        config.biome_count = biomes;
    }
    config.seed = args.seed.unwrap_or_else(|| {
        if args.config.is_some() { config.seed } else { rand::random() }
    });
    if args.attenuated {
        config.carve_mode = CarveMode::DistanceAttenuated;
    }
    if args.fallback_below {
        config.fallback_rule = FallbackRule::BelowThreshold;
    }
    if args.outward_border {
        config.border_style = BorderStyle::OutwardExtend;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging("info");
    let args = Args::parse();
    let config = build_config(&args)?;

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    println!("Generating cave with seed: {}", config.seed);
    println!("Map size: {}x{}", config.width, config.height);

    let generator = CaveGenerator::new(config.clone())?;
    let cave = generator.generate()?;
    let report = &cave.report;

    println!(
        "Placed {} of {} biomes (fallback index {})",
        report.placed_biomes(),
        report.requested_biomes(),
        cave.fallback_index
    );
    if report.is_degraded() {
        println!("  skipped biome indices: {:?}", report.placement.skipped);
    }
    for (index, cells) in &report.carved {
        println!("  biome {}: {} cells", index, cells);
    }
    let total = (config.width * config.height) as f64;
    println!(
        "Stone: {} cells ({:.1}%)",
        report.fallback.filled,
        100.0 * report.fallback.filled as f64 / total
    );
    println!("Ore: {} clusters, {} cells", report.ore.clusters, report.ore.written);
    println!(
        "Border: {} cells, {} outside the map",
        cave.grid.count_where(CellLayer::Floor, |t| *t == Tile::Border),
        cave.outer_border.len()
    );
    println!("Outline: {} cells, decorations: {}", report.outline_cells, report.decorations);

    if args.ascii {
        println!();
        ascii::print_ascii_map(&cave.grid);
    }

    if let Some(path) = &args.export_txt {
        println!("Exporting map to {}...", path);
        ascii::export_cave_file(&cave, &config, path)?;
    }

    if let Some(path) = &args.export_png {
        println!("Exporting PNG to {}...", path.display());
        export::export_png(&cave, path, args.png_scale)?;
    }

    if args.walk {
        println!("Walking agent from (0, 0) to ({}, {})...", config.width - 1, config.height - 1);
        let mut locator = BiomeLocator::new();
        let mut overlays = OverlaySet::new(cave.fallback_index);
        let steps = config.width.max(config.height);
        for step in 0..steps {
            let t = step as f32 / (steps.max(2) - 1) as f32;
            let position = (t * (config.width - 1) as f32, t * (config.height - 1) as f32);
            if let Some(transition) = locator.update(&cave.registry, position) {
                overlays.apply(&transition);
                println!(
                    "  ({:.1}, {:.1}): {:?} -> {:?}, active overlay {:?}",
                    position.0,
                    position.1,
                    transition.from,
                    transition.to,
                    overlays.active_slot()
                );
            }
        }
    }

    Ok(())
}
