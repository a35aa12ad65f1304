//! Per-frame collision resolution
//!
//! One broad AABB pass per frame producing a single authoritative outcome.
//! Obstacles are tested first in spawn order and win over collectibles; a
//! collected pickup is removed right here - the only place one component
//! mutates another's collection, and it runs strictly after the spawner
//! updates.

use glam::Vec3;

use super::bounds::BoundingBox;
use super::collectibles::{CollectibleKind, CollectibleManager};
use super::obstacles::{ObstacleKind, ObstacleManager};
use crate::consts::COLLECTIBLE_HALF_EXTENT;
use crate::events::SceneBuffer;

/// The single outcome of a frame's collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    None,
    Obstacle(ObstacleKind),
    Collectible(CollectibleKind),
}

/// Test the player box against every active entity. First obstacle hit wins;
/// otherwise the first collectible hit is collected and returned.
pub fn resolve(
    player: &BoundingBox,
    obstacles: &ObstacleManager,
    collectibles: &mut CollectibleManager,
    scene: &mut SceneBuffer,
) -> CollisionOutcome {
    for obstacle in obstacles.active() {
        if player.intersects(&obstacle.bounds()) {
            return CollisionOutcome::Obstacle(obstacle.kind);
        }
    }

    let hit = collectibles.active().iter().position(|collectible| {
        let bounds = BoundingBox::new(collectible.position, Vec3::from(COLLECTIBLE_HALF_EXTENT));
        player.intersects(&bounds)
    });
    if let Some(index) = hit {
        let collected = collectibles.collect(index, scene);
        return CollisionOutcome::Collectible(collected.kind);
    }

    CollisionOutcome::None
}
