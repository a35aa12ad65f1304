//! Procedural slope streaming
//!
//! Keeps a sliding window of terrain chunks ahead of the player (downhill is
//! -Z) and retires chunks once their far edge falls behind. Chunk creation
//! cannot fail; one frame of movement generates at most
//! O(distance / chunk_length) chunks.

use crate::consts::*;
use crate::events::{RenderHandle, SceneBuffer, SceneCommand};

/// One strip of slope, ordered by decreasing Z
#[derive(Debug, Clone, Copy)]
pub struct TerrainChunk {
    pub start_z: f32,
    pub end_z: f32,
    /// Slope angle in radians, varies smoothly chunk to chunk
    pub slope: f32,
    pub handle: RenderHandle,
}

/// Streams terrain chunks around the player
#[derive(Debug)]
pub struct TerrainGenerator {
    chunks: Vec<TerrainChunk>,
    next_chunk_z: f32,
    chunk_width: f32,
    noise_offset: f32,
}

impl TerrainGenerator {
    pub fn new(width_multiplier: f32) -> Self {
        Self {
            chunks: Vec::new(),
            next_chunk_z: TERRAIN_START_Z,
            chunk_width: TERRAIN_WIDTH * width_multiplier,
            noise_offset: 0.0,
        }
    }

    /// Seed the slope with the initial window of chunks
    pub fn generate_initial(&mut self, scene: &mut SceneBuffer) {
        for _ in 0..INITIAL_CHUNK_COUNT {
            self.add_chunk(scene);
        }
    }

    pub fn update(&mut self, player_z: f32, scene: &mut SceneBuffer) {
        // Fill the whole look-ahead window, however far the player moved
        while self.next_chunk_z > player_z - TERRAIN_LOOK_AHEAD {
            self.add_chunk(scene);
        }

        // Retire chunks whose far edge has fallen behind the player
        self.chunks.retain(|chunk| {
            if chunk.end_z > player_z + TERRAIN_CLEANUP_DISTANCE {
                scene.push(SceneCommand::Despawn(chunk.handle));
                false
            } else {
                true
            }
        });
    }

    fn add_chunk(&mut self, scene: &mut SceneBuffer) {
        let start_z = self.next_chunk_z;
        let end_z = start_z - CHUNK_LENGTH;

        // The offset persists across chunks so the variation is continuous,
        // not re-rolled per chunk
        self.noise_offset += 0.3;
        let slope = BASE_SLOPE_ANGLE + self.noise_offset.sin() * 0.02;

        let handle = scene.alloc();
        scene.push(SceneCommand::SpawnChunk {
            handle,
            start_z,
            end_z,
            width: self.chunk_width,
            slope,
        });
        self.chunks.push(TerrainChunk {
            start_z,
            end_z,
            slope,
            handle,
        });
        self.next_chunk_z = end_z;

        log::trace!("terrain chunk spawned: z {start_z}..{end_z}");
    }

    pub fn reset(&mut self, scene: &mut SceneBuffer) {
        for chunk in self.chunks.drain(..) {
            scene.push(SceneCommand::Despawn(chunk.handle));
        }
        self.next_chunk_z = TERRAIN_START_Z;
        self.noise_offset = 0.0;
        self.generate_initial(scene);
    }

    pub fn chunks(&self) -> &[TerrainChunk] {
        &self.chunks
    }

    /// The Z the next chunk will start at (spawn frontier)
    pub fn frontier(&self) -> f32 {
        self.next_chunk_z
    }
}
