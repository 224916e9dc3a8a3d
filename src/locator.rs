//! Runtime biome membership for a moving agent
//!
//! The locator keeps the "current biome" between ticks and reports a transition only
//! when the nearest containing biome changes, so an agent standing still never
//! causes overlay flicker.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::biome::BiomeRegistry;

/// Change of current biome: deactivate `from`, activate `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeTransition {
    pub from: Option<usize>,
    pub to: Option<usize>,
}

/// Tracks which biome a world position is in.
///
/// Not owned by the generator: the current biome survives regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BiomeLocator {
    current: Option<usize>,
}

impl BiomeLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Nearest biome whose radius contains `position` (inclusive), or `None`.
    /// Equal distances resolve to the lower index.
    pub fn locate(registry: &BiomeRegistry, position: (f32, f32)) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for biome in registry.iter() {
            let distance = biome.center.distance_to_point(position.0, position.1);
            if distance > biome.radius {
                continue;
            }
            // Ascending iteration plus strict `<` keeps the lower index on ties.
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((biome.index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// One query tick. Returns the transition when the current biome changes.
    pub fn update(
        &mut self,
        registry: &BiomeRegistry,
        position: (f32, f32),
    ) -> Option<BiomeTransition> {
        let nearest = Self::locate(registry, position);
        if nearest == self.current {
            return None;
        }
        let transition = BiomeTransition { from: self.current, to: nearest };
        trace!(from = ?transition.from, to = ?transition.to, "biome transition");
        self.current = nearest;
        Some(transition)
    }

    /// Forget the current biome, e.g. when the agent is teleported.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Active flags for the ambient overlays, one slot per biome index.
///
/// The fallback biome has no overlay, so transitions into it or into an index past
/// the last slot leave every overlay inactive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlaySet {
    active: Vec<bool>,
}

impl OverlaySet {
    pub fn new(slots: usize) -> Self {
        Self { active: vec![false; slots] }
    }

    pub fn deactivate_all(&mut self) {
        self.active.fill(false);
    }

    /// Deactivate everything, then activate the overlay for `transition.to`.
    pub fn apply(&mut self, transition: &BiomeTransition) {
        self.deactivate_all();
        if let Some(slot) = transition.to.and_then(|i| self.active.get_mut(i)) {
            *slot = true;
        }
    }

    pub fn is_active(&self, slot: usize) -> bool {
        self.active.get(slot).copied().unwrap_or(false)
    }

    /// The single active slot, if any.
    pub fn active_slot(&self) -> Option<usize> {
        self.active.iter().position(|&on| on)
    }
}
