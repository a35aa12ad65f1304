//! Collectible spawning, animation, and lifecycle
//!
//! Spawns either a line of coins down one lane or a lone power-up at each
//! frontier step. The spin/bob animation is cosmetic state the renderer
//! reads; collision always uses the logical `position`, never the animated
//! offset.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::events::{RenderHandle, SceneBuffer, SceneCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    Coin,
    SpeedBoost,
    Shield,
    ScoreMultiplier,
}

/// An active collectible
#[derive(Debug, Clone)]
pub struct Collectible {
    /// Logical position - the one collision sees
    pub position: Vec3,
    pub kind: CollectibleKind,
    pub handle: RenderHandle,
    /// Cosmetic rotation, radians
    pub spin: f32,
    /// Cosmetic vertical bob offset
    pub bob_offset: f32,
}

impl Collectible {
    /// Where the renderer should draw it (logical position + bob)
    pub fn display_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.bob_offset, 0.0)
    }
}

/// Spawns and animates collectibles ahead of the player
#[derive(Debug)]
pub struct CollectibleManager {
    active: Vec<Collectible>,
    next_spawn_z: f32,
    clock: f32,
    rng: Pcg32,
}

impl CollectibleManager {
    pub fn new(seed: u64) -> Self {
        Self {
            active: Vec::new(),
            next_spawn_z: COLLECTIBLE_START_Z,
            clock: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn update(&mut self, player_z: f32, dt: f32, scene: &mut SceneBuffer) {
        while self.next_spawn_z > player_z - COLLECTIBLE_LOOK_AHEAD {
            let z = self.next_spawn_z;
            self.spawn_at(z, scene);
            self.next_spawn_z -= COLLECTIBLE_SPACING;
        }

        // Cosmetic animation only; never touches `position`
        self.clock += dt;
        for collectible in &mut self.active {
            collectible.spin += COLLECTIBLE_ROTATE_SPEED * dt;
            collectible.bob_offset = (self.clock * 3.0 + collectible.position.z).sin() * 0.15;
        }

        self.active.retain(|collectible| {
            if collectible.position.z > player_z + COLLECTIBLE_CLEANUP_DISTANCE {
                scene.push(SceneCommand::Despawn(collectible.handle));
                false
            } else {
                true
            }
        });
    }

    fn spawn_at(&mut self, z: f32, scene: &mut SceneBuffer) {
        if self.rng.random::<f32>() < 0.7 {
            self.spawn_coin_line(z, scene);
        } else {
            self.spawn_power_up(z, scene);
        }
    }

    /// 3-7 coins down a single lane at fixed spacing
    fn spawn_coin_line(&mut self, z: f32, scene: &mut SceneBuffer) {
        let count = self.rng.random_range(3..=7);
        let x = self.rng.random_range(-MAX_LANE_OFFSET..=MAX_LANE_OFFSET);
        let spacing = 1.5;

        for i in 0..count {
            let position = Vec3::new(x, COIN_HEIGHT, z - i as f32 * spacing);
            self.spawn_one(CollectibleKind::Coin, position, scene);
        }
    }

    /// 50% speed boost, 30% score multiplier, 20% shield
    fn spawn_power_up(&mut self, z: f32, scene: &mut SceneBuffer) {
        let roll = self.rng.random::<f32>();
        let kind = if roll < 0.5 {
            CollectibleKind::SpeedBoost
        } else if roll < 0.8 {
            CollectibleKind::ScoreMultiplier
        } else {
            CollectibleKind::Shield
        };

        let x = self.rng.random_range(-MAX_LANE_OFFSET..=MAX_LANE_OFFSET);
        let position = Vec3::new(x, POWER_UP_HEIGHT, z);
        self.spawn_one(kind, position, scene);
    }

    fn spawn_one(&mut self, kind: CollectibleKind, position: Vec3, scene: &mut SceneBuffer) {
        let handle = scene.alloc();
        scene.push(SceneCommand::SpawnCollectible {
            handle,
            kind,
            position,
        });
        self.active.push(Collectible {
            position,
            kind,
            handle,
            spin: 0.0,
            bob_offset: 0.0,
        });
    }

    /// Remove one collected item (the collision resolver's pickup path)
    pub fn collect(&mut self, index: usize, scene: &mut SceneBuffer) -> Collectible {
        let collectible = self.active.remove(index);
        scene.push(SceneCommand::Despawn(collectible.handle));
        collectible
    }

    pub fn remove_all(&mut self, scene: &mut SceneBuffer) {
        for collectible in self.active.drain(..) {
            scene.push(SceneCommand::Despawn(collectible.handle));
        }
        self.next_spawn_z = COLLECTIBLE_START_Z;
        self.clock = 0.0;
    }

    pub fn active(&self) -> &[Collectible] {
        &self.active
    }

    pub fn frontier(&self) -> f32 {
        self.next_spawn_z
    }

    #[cfg(test)]
    pub(crate) fn insert_for_test(&mut self, kind: CollectibleKind, position: Vec3) {
        let handle = RenderHandle(u32::MAX - self.active.len() as u32);
        self.active.push(Collectible {
            position,
            kind,
            handle,
            spin: 0.0,
            bob_offset: 0.0,
        });
    }

    #[cfg(test)]
    pub(crate) fn set_bob_for_test(&mut self, index: usize, bob: f32) {
        self.active[index].bob_offset = bob;
    }
}
