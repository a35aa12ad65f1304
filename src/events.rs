//! Outbound queues toward the scene, HUD, and audio collaborators
//!
//! The core never calls into rendering or audio. Each frame it pushes
//! commands/events here; the host drains both queues once per frame and
//! dispatches them. All notifications are one-way.

use glam::Vec3;

use crate::sim::{CollectibleKind, ObstacleKind};

/// Opaque identifier tying a simulation entity to whatever the renderer
/// built for it. The core only ever allocates and despawns handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u32);

/// Creation/destruction requests for the render collaborator
#[derive(Debug, Clone)]
pub enum SceneCommand {
    SpawnChunk {
        handle: RenderHandle,
        start_z: f32,
        end_z: f32,
        width: f32,
        slope: f32,
    },
    SpawnObstacle {
        handle: RenderHandle,
        kind: ObstacleKind,
        position: Vec3,
        scale: f32,
    },
    SpawnCollectible {
        handle: RenderHandle,
        kind: CollectibleKind,
        position: Vec3,
    },
    Despawn(RenderHandle),
    /// Player transform for this frame. `lean` is the lateral carve angle,
    /// `tuck` the remaining tuck animation time; both purely cosmetic.
    PlayerTransform { position: Vec3, lean: f32, tuck: f32 },
}

/// Fire-and-forget audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Coin,
    PowerUp,
    Jump,
    TrickLand,
    Crash,
    Select,
}

/// Push notifications for the HUD and game-over collaborators
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Display score (post-multiplier)
    ScoreChanged(i64),
    CoinsChanged(u32),
    MultiplierChanged(u32),
    SpeedChanged(f32),
    /// Trick points just awarded (popup delta, not a total)
    TrickScored(i64),
    Sound(SoundCue),
    /// Exactly one per completed run
    GameOver {
        score: i64,
        distance: i64,
        coins: u32,
        high_score: bool,
    },
}

/// Handle allocator plus the per-frame scene command queue
#[derive(Debug, Default)]
pub struct SceneBuffer {
    next_handle: u32,
    commands: Vec<SceneCommand>,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh render handle (monotonic, never reused)
    pub fn alloc(&mut self) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    pub fn push(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }

    /// Take everything queued since the last drain
    pub fn drain(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn pending(&self) -> &[SceneCommand] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut scene = SceneBuffer::new();
        let a = scene.alloc();
        let b = scene.alloc();
        assert_ne!(a, b);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut scene = SceneBuffer::new();
        let handle = scene.alloc();
        scene.push(SceneCommand::Despawn(handle));
        assert_eq!(scene.drain().len(), 1);
        assert!(scene.pending().is_empty());
        assert!(scene.drain().is_empty());
    }
}
