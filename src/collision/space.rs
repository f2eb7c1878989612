//! The set of active obstacles and the closest-collision query

use std::fmt;

use super::surface::SharedSurface;
use crate::geometry::{Point, Segment};

/// Identifier handed out when a surface joins a space
pub type SurfaceId = u32;

/// Where a trajectory first meets an obstacle
#[derive(Clone)]
pub struct CollisionReport {
    pub point: Point,
    pub surface_id: SurfaceId,
    pub surface: SharedSurface,
}

impl fmt::Debug for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionReport")
            .field("point", &self.point)
            .field("surface_id", &self.surface_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct Entry {
    id: SurfaceId,
    surface: SharedSurface,
}

/// Obstacles in insertion order
pub struct CollisionSpace {
    entries: Vec<Entry>,
    next_id: SurfaceId,
}

impl Default for CollisionSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionSpace {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a surface; ids are never reused
    pub fn add(&mut self, surface: SharedSurface) -> SurfaceId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, surface });
        id
    }

    /// Remove a surface, returning whether it was present
    pub fn remove(&mut self, id: SurfaceId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: SurfaceId) -> Option<SharedSurface> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.surface.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Surface ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Copy of the current membership
    ///
    /// Querying a snapshot needs no borrow of the space, so surfaces and
    /// listeners may add or remove members while a query result is handled.
    pub fn snapshot(&self) -> SpaceSnapshot {
        SpaceSnapshot {
            entries: self.entries.clone(),
        }
    }

    /// Nearest collision along `trajectory` across every surface
    pub fn closest_collision(&self, trajectory: &Segment) -> Option<CollisionReport> {
        self.snapshot().closest_collision(trajectory)
    }
}

/// Frozen membership of a [`CollisionSpace`]
pub struct SpaceSnapshot {
    entries: Vec<Entry>,
}

impl SpaceSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest collision to the trajectory's start
    ///
    /// Equal distances resolve to the surface that was added first.
    pub fn closest_collision(&self, trajectory: &Segment) -> Option<CollisionReport> {
        let mut closest: Option<(CollisionReport, f64)> = None;

        for entry in &self.entries {
            let rect = match entry.surface.try_borrow() {
                Ok(surface) => surface.bounding_rectangle(),
                Err(_) => {
                    log::warn!("Surface {} is being mutated, skipped in query", entry.id);
                    continue;
                }
            };

            let Some(point) = trajectory.closest_intersection_to_start(&rect) else {
                continue;
            };
            let distance = point.distance(trajectory.start);
            if closest.as_ref().is_some_and(|(_, best)| *best <= distance) {
                continue;
            }

            closest = Some((
                CollisionReport {
                    point,
                    surface_id: entry.id,
                    surface: entry.surface.clone(),
                },
                distance,
            ));
        }

        if let Some((report, distance)) = &closest {
            log::debug!(
                "Closest collision: surface {} at ({:.3}, {:.3}), distance {:.3}",
                report.surface_id,
                report.point.x,
                report.point.y,
                distance
            );
        }

        closest.map(|(report, _)| report)
    }
}
