//! Obstacle spawning and lifecycle
//!
//! Obstacles arrive in rows at a spawn frontier that tightens as difficulty
//! rises. Row placement is lane-based with one hard rule: at least one lane
//! is always left clear, so the slope is never unwinnable.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bounds::BoundingBox;
use crate::consts::*;
use crate::events::{RenderHandle, SceneBuffer, SceneCommand};

/// Everything that ends a run on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    PineTree,
    Rock,
    Snowman,
    Cabin,
    JumpRamp,
}

/// An active obstacle on the slope
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub position: Vec3,
    pub kind: ObstacleKind,
    pub half_extent: Vec3,
    pub handle: RenderHandle,
}

impl Obstacle {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.position, self.half_extent)
    }
}

/// Spawns obstacle rows ahead of the player and retires them behind
#[derive(Debug)]
pub struct ObstacleManager {
    active: Vec<Obstacle>,
    next_spawn_z: f32,
    difficulty_factor: f32,
    obstacle_multiplier: f32,
    rng: Pcg32,
}

impl ObstacleManager {
    pub fn new(obstacle_multiplier: f32, seed: u64) -> Self {
        Self {
            active: Vec::new(),
            next_spawn_z: OBSTACLE_START_Z,
            difficulty_factor: 1.0,
            obstacle_multiplier,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn update(&mut self, player_z: f32, scene: &mut SceneBuffer) {
        // Density ramps with distance covered, capped
        self.difficulty_factor = (1.0 + player_z.abs() / 500.0).min(MAX_DIFFICULTY);

        while self.next_spawn_z > player_z - OBSTACLE_LOOK_AHEAD {
            let row_z = self.next_spawn_z;
            self.spawn_row(row_z, scene);
            self.next_spawn_z -=
                OBSTACLE_SPACING / (self.difficulty_factor * self.obstacle_multiplier);
        }

        self.active.retain(|obstacle| {
            if obstacle.position.z > player_z + OBSTACLE_CLEANUP_DISTANCE {
                scene.push(SceneCommand::Despawn(obstacle.handle));
                false
            } else {
                true
            }
        });
    }

    fn spawn_row(&mut self, z: f32, scene: &mut SceneBuffer) {
        let max_count = (self.difficulty_factor as usize + 1).min(3);
        let count = self.rng.random_range(1..=max_count);

        for lane in pick_lanes(&mut self.rng, count) {
            let x = lane_to_x(lane) + self.rng.random_range(-1.0..=1.0);
            let z_jitter = self.rng.random_range(-2.0..=2.0);
            let kind = random_kind(&mut self.rng);
            let (half_extent, scale) = kind_extent(&mut self.rng, kind);

            let position = Vec3::new(x, 0.0, z + z_jitter);
            let handle = scene.alloc();
            scene.push(SceneCommand::SpawnObstacle {
                handle,
                kind,
                position,
                scale,
            });
            self.active.push(Obstacle {
                position,
                kind,
                half_extent,
                handle,
            });
        }
    }

    pub fn remove_all(&mut self, scene: &mut SceneBuffer) {
        for obstacle in self.active.drain(..) {
            scene.push(SceneCommand::Despawn(obstacle.handle));
        }
        self.next_spawn_z = OBSTACLE_START_Z;
        self.difficulty_factor = 1.0;
    }

    pub fn active(&self) -> &[Obstacle] {
        &self.active
    }

    pub fn frontier(&self) -> f32 {
        self.next_spawn_z
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty_factor
    }

    #[cfg(test)]
    pub(crate) fn insert_for_test(&mut self, obstacle: Obstacle) {
        self.active.push(obstacle);
    }
}

/// Pick up to `count` distinct lanes, never blocking every lane.
/// Draws random lanes until the quota is met or only one lane remains open -
/// the fairness guarantee that keeps the slope passable.
pub fn pick_lanes(rng: &mut impl Rng, count: usize) -> Vec<usize> {
    let mut blocked = [false; LANE_COUNT];
    let mut lanes = Vec::with_capacity(count);

    for _ in 0..count {
        if lanes.len() >= LANE_COUNT - 1 {
            break;
        }
        let lane = loop {
            let candidate = rng.random_range(0..LANE_COUNT);
            if !blocked[candidate] {
                break candidate;
            }
        };
        blocked[lane] = true;
        lanes.push(lane);
    }

    lanes
}

/// Lane index to world X at lane center
fn lane_to_x(lane: usize) -> f32 {
    let lane_width = TERRAIN_WIDTH / LANE_COUNT as f32;
    let start_x = -TERRAIN_WIDTH / 2.0 + lane_width / 2.0;
    start_x + lane as f32 * lane_width
}

/// Cumulative-threshold draw: 40% tree, 25% rock, 15% snowman, 10% cabin,
/// 10% ramp
fn random_kind(rng: &mut impl Rng) -> ObstacleKind {
    let roll = rng.random::<f32>();
    if roll < 0.4 {
        ObstacleKind::PineTree
    } else if roll < 0.65 {
        ObstacleKind::Rock
    } else if roll < 0.8 {
        ObstacleKind::Snowman
    } else if roll < 0.9 {
        ObstacleKind::Cabin
    } else {
        ObstacleKind::JumpRamp
    }
}

/// Collision half-extent per kind, with the randomly scaled kinds rolling
/// their scale here so hitbox and visual stay in step
fn kind_extent(rng: &mut impl Rng, kind: ObstacleKind) -> (Vec3, f32) {
    match kind {
        ObstacleKind::PineTree => {
            let scale = rng.random_range(0.7..=1.3);
            (Vec3::new(0.8, 2.5, 0.8) * scale, scale)
        }
        ObstacleKind::Rock => {
            let size = rng.random_range(0.5..=1.5);
            (Vec3::new(0.8, 0.5, 0.8) * size, size)
        }
        ObstacleKind::Snowman => (Vec3::new(0.5, 1.0, 0.5), 1.0),
        ObstacleKind::Cabin => (Vec3::new(1.5, 1.5, 1.25), 1.0),
        ObstacleKind::JumpRamp => (Vec3::new(1.5, 0.4, 1.0), 1.0),
    }
}
