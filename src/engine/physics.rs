// Collider overlap queries over the ECS world.
//
// A sparse hash grid on the XZ plane. Each collider is bucketed into every
// cell its bounding box touches, so a sphere query only has to visit the cells
// under the sphere's own bounding box and then distance-check the candidates.
// Only occupied cells are stored, so memory follows the collider count rather
// than how far apart the colliders are. Rebuilt from the World whenever
// colliders move; walls in the demo never do.

use std::collections::HashMap;

use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2, Vec3, Vec3Swizzles};

use super::components::{ColliderShape, Layer, Name, Transform};
use crate::detector::{Collider, LayerMask, SpatialIndex};

/// Default cell side length in world units.
pub const DEFAULT_CELL_SIZE: f32 = 2.0;

/// Colliders whose bounds cover more cells than this skip the grid and are
/// checked on every query instead.
const MAX_CELLS_PER_ENTRY: u64 = 1024;

/// Snapshot of one collider as the grid sees it.
#[derive(Debug, Clone)]
pub struct GridEntry {
    pub entity: Entity,
    pub name: String,
    pub position: Vec3,
    pub shape: ColliderShape,
    pub layer: Layer,
}

// ============================================================================
// SPATIAL GRID
// ============================================================================

pub struct SpatialGrid {
    entries: Vec<GridEntry>,
    cells: HashMap<IVec2, Vec<usize>>,
    // Entries too large to bucket
    oversized: Vec<usize>,
    cell_size: f32,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            entries: Vec::new(),
            cells: HashMap::new(),
            oversized: Vec::new(),
            cell_size,
        }
    }

    /// Build a grid over every entity that has both a `Transform` and a `ColliderShape`.
    ///
    /// Missing `Layer` means layer 0; missing `Name` falls back to the entity id.
    pub fn from_world(world: &World, cell_size: f32) -> Self {
        let mut grid = Self::new(cell_size);
        for entity in world.iter_entities() {
            let (Some(transform), Some(shape)) =
                (entity.get::<Transform>(), entity.get::<ColliderShape>())
            else {
                continue;
            };
            let name = entity
                .get::<Name>()
                .map(|n| n.0.clone())
                .unwrap_or_else(|| format!("Entity {}", entity.id().index()));
            grid.insert(GridEntry {
                entity: entity.id(),
                name,
                position: transform.position,
                shape: *shape,
                layer: entity.get::<Layer>().copied().unwrap_or_default(),
            });
        }
        log::debug!(
            "spatial grid: {} colliders in {} cells, {} oversized",
            grid.len(),
            grid.cells.len(),
            grid.oversized.len()
        );
        grid
    }

    pub fn insert(&mut self, entry: GridEntry) {
        let half = entry.shape.half_extents().xz();
        let (lo, hi) = self.cell_range(entry.position.xz() - half, entry.position.xz() + half);
        let idx = self.entries.len();
        if cell_count(lo, hi) > MAX_CELLS_PER_ENTRY {
            self.oversized.push(idx);
        } else {
            for cy in lo.y..=hi.y {
                for cx in lo.x..=hi.x {
                    self.cells.entry(IVec2::new(cx, cy)).or_default().push(idx);
                }
            }
        }
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Inclusive cell range covering the XZ rectangle [min, max].
    fn cell_range(&self, min: Vec2, max: Vec2) -> (IVec2, IVec2) {
        // Float-to-int casts saturate, so far-off coordinates pin to the i32 range.
        let to_cell = |p: Vec2| (p / self.cell_size).floor().as_ivec2();
        (to_cell(min), to_cell(max))
    }

    fn candidates(&self, lo: IVec2, hi: IVec2) -> Vec<usize> {
        let mut candidates = self.oversized.clone();
        if cell_count(lo, hi) > self.cells.len() as u64 {
            // Cheaper to walk what is stored than every cell in range.
            for (cell, bucket) in &self.cells {
                if cell.cmpge(lo).all() && cell.cmple(hi).all() {
                    candidates.extend_from_slice(bucket);
                }
            }
        } else {
            for cy in lo.y..=hi.y {
                for cx in lo.x..=hi.x {
                    if let Some(bucket) = self.cells.get(&IVec2::new(cx, cy)) {
                        candidates.extend_from_slice(bucket);
                    }
                }
            }
        }
        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }
}

fn cell_count(lo: IVec2, hi: IVec2) -> u64 {
    let span = |a: i32, b: i32| (i64::from(b) - i64::from(a) + 1).max(0) as u64;
    span(lo.x, hi.x).saturating_mul(span(lo.y, hi.y))
}

impl SpatialIndex for SpatialGrid {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Collider> {
        let reach = Vec2::splat(radius.max(0.0));
        let (lo, hi) = self.cell_range(center.xz() - reach, center.xz() + reach);

        self.candidates(lo, hi)
            .into_iter()
            .map(|idx| &self.entries[idx])
            .filter(|e| mask.contains(e.layer.0))
            .filter(|e| e.shape.distance_to(e.position, center) <= radius)
            .map(|e| Collider {
                entity: e.entity,
                name: e.name.clone(),
                position: e.position,
            })
            .collect()
    }
}
