//! The generation pass
//!
//! Stages run strictly in order, all writing into one grid:
//! placement, carving (ascending biome index), gap fill, ore, border, then the
//! background, radius, outline and decoration layers.

use tracing::info;

use crate::biome::BiomeRegistry;
use crate::border::{BorderFader, OuterBorder};
use crate::carve::RegionCarver;
use crate::config::CaveConfig;
use crate::decoration::spawn_decorations;
use crate::error::Result;
use crate::fill::{fill_background, fill_radius_squares, FillStats, GapFiller};
use crate::grid::Grid;
use crate::ore::{OreScatterer, OreStats};
use crate::outline::trace_outline;
use crate::placement::{BiomePlacer, PlacementReport};
use crate::seeds::CaveSeeds;

/// Per-stage results of one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationReport {
    pub placement: PlacementReport,
    /// `(biome index, cells carved)` in carving order
    pub carved: Vec<(usize, usize)>,
    pub fallback: FillStats,
    pub ore: OreStats,
    pub border_cells: usize,
    pub background_cells: usize,
    pub radius_cells: usize,
    pub outline_cells: usize,
    pub decorations: usize,
}

impl GenerationReport {
    pub fn requested_biomes(&self) -> usize {
        self.placement.requested
    }

    pub fn placed_biomes(&self) -> usize {
        self.placement.placed
    }

    pub fn is_degraded(&self) -> bool {
        self.placement.is_degraded()
    }
}

/// Output of a pass: the grid, the biome registry and what happened.
#[derive(Clone, Debug)]
pub struct GeneratedCave {
    pub grid: Grid,
    pub registry: BiomeRegistry,
    pub outer_border: OuterBorder,
    pub report: GenerationReport,
    pub seed: u64,
    pub fallback_index: usize,
}

/// Runs generation passes for one validated configuration.
#[derive(Clone, Debug)]
pub struct CaveGenerator {
    config: CaveConfig,
    seeds: CaveSeeds,
}

impl CaveGenerator {
    pub fn new(config: CaveConfig) -> Result<Self> {
        config.validate()?;
        let seeds = CaveSeeds::from_master(config.seed);
        Ok(Self { config, seeds })
    }

    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    pub fn seeds(&self) -> &CaveSeeds {
        &self.seeds
    }

    /// Generate into a freshly allocated grid.
    pub fn generate(&self) -> Result<GeneratedCave> {
        let mut cave = GeneratedCave {
            grid: Grid::new(self.config.width, self.config.height),
            registry: BiomeRegistry::new(),
            outer_border: OuterBorder::default(),
            report: GenerationReport::default(),
            seed: self.config.seed,
            fallback_index: self.config.fallback_index(),
        };
        self.regenerate(&mut cave)?;
        Ok(cave)
    }

    /// Clear `cave` and rebuild it in place. Gives the same result as [`generate`]
    /// when the dimensions match the configuration.
    ///
    /// [`generate`]: CaveGenerator::generate
    pub fn regenerate(&self, cave: &mut GeneratedCave) -> Result<()> {
        let config = &self.config;
        if cave.grid.width != config.width || cave.grid.height != config.height {
            cave.grid = Grid::new(config.width, config.height);
        } else {
            cave.grid.clear_all();
        }
        cave.registry.clear();
        cave.seed = config.seed;
        cave.fallback_index = config.fallback_index();

        info!(
            seed = config.seed,
            width = config.width,
            height = config.height,
            biomes = config.biome_count,
            "generating cave"
        );

        let grid = &mut cave.grid;
        let mut report = GenerationReport::default();

        let mut placement_rng = CaveSeeds::rng(self.seeds.placement);
        let (registry, placement) =
            BiomePlacer::from_config(config).place(config.biome_count, &mut placement_rng)?;
        report.placement = placement;

        let shape_noise = CaveSeeds::noise(self.seeds.shape, &config.shape_noise);
        report.carved = RegionCarver::new(config.shape_noise, config.carve_mode)
            .carve_all(grid, &registry, &shape_noise)?;

        let fallback_noise = CaveSeeds::noise(self.seeds.fallback, &config.fallback_noise);
        report.fallback = GapFiller::new(config.fallback_noise, config.fallback_rule)
            .fill(grid, &registry, &fallback_noise)?;

        let mut ore_rng = CaveSeeds::rng(self.seeds.ore);
        report.ore = OreScatterer::from_config(config).scatter(grid, &mut ore_rng)?;

        let border_noise = CaveSeeds::noise(self.seeds.border, &config.border_noise);
        let (border_cells, outer_border) = BorderFader::from_config(config).apply(grid, &border_noise)?;
        report.border_cells = border_cells;

        report.background_cells = fill_background(grid, &registry)?;
        report.radius_cells = fill_radius_squares(grid, &registry, config.radius_size)?;
        report.outline_cells = trace_outline(grid)?;

        let mut decoration_rng = CaveSeeds::rng(self.seeds.decoration);
        report.decorations = spawn_decorations(
            grid,
            &registry,
            config.decorations_per_biome,
            config.decoration_variants,
            &mut decoration_rng,
        )?;

        info!(
            requested = report.requested_biomes(),
            placed = report.placed_biomes(),
            degraded = report.is_degraded(),
            "cave generated"
        );

        cave.registry = registry;
        cave.outer_border = outer_border;
        cave.report = report;
        Ok(())
    }
}
