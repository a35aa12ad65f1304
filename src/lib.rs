//! Powder Run - simulation core for an endless downhill snow-sports runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world streaming, locomotion, collisions, session)
//! - `catalog`: Equipment, resort, and character data tables
//! - `progression`: Score board and per-resort leaderboard aggregation
//! - `events`: Outbound queues for the scene, HUD, and audio collaborators
//!
//! Rendering, audio playback, input capture, and storage are collaborators:
//! the core emits commands/events and exposes serde-ready records, nothing more.

pub mod catalog;
pub mod events;
pub mod progression;
pub mod sim;

pub use events::{GameEvent, RenderHandle, SceneCommand, SoundCue};
pub use progression::{Leaderboard, ScoreBoard};
pub use sim::{GamePhase, GameSession, SessionConfig};

/// Game configuration constants
pub mod consts {
    /// Nominal timestep used for the first frame after a reset (60 Hz)
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;
    /// Frame delta clamp - a stalled frame never integrates more than this
    pub const MAX_FRAME_DT: f64 = 1.0 / 30.0;

    /// Player
    pub const GROUND_HEIGHT: f32 = 0.3;
    pub const PLAYER_HALF_EXTENT: [f32; 3] = [0.3, 0.6, 0.5];
    pub const LATERAL_SPEED: f32 = 8.0;
    pub const LANE_WIDTH: f32 = 3.0;
    pub const MAX_LANE_OFFSET: f32 = 8.0;
    pub const TILT_SENSITIVITY: f32 = 15.0;
    pub const TILT_DEADZONE: f32 = 0.05;

    /// Movement
    pub const INITIAL_SPEED: f32 = 8.0;
    pub const MAX_SPEED: f32 = 35.0;
    pub const ACCELERATION: f32 = 0.3;
    pub const GRAVITY: f32 = 25.0;
    pub const JUMP_FORCE: f32 = 10.0;
    pub const SLAM_DOWN_SPEED: f32 = 15.0;
    pub const SPEED_BOOST_AMOUNT: f32 = 5.0;
    /// Lateral speed above which a jump turns into a grab trick
    pub const TRICK_ENTRY_SPEED: f32 = 2.0;

    /// Terrain streaming
    pub const TERRAIN_WIDTH: f32 = 20.0;
    pub const CHUNK_LENGTH: f32 = 30.0;
    pub const TERRAIN_START_Z: f32 = 10.0;
    pub const TERRAIN_LOOK_AHEAD: f32 = 120.0;
    pub const TERRAIN_CLEANUP_DISTANCE: f32 = 30.0;
    pub const INITIAL_CHUNK_COUNT: usize = 8;
    pub const BASE_SLOPE_ANGLE: f32 = 0.15;

    /// Obstacles
    pub const OBSTACLE_START_Z: f32 = -30.0;
    pub const OBSTACLE_LOOK_AHEAD: f32 = 100.0;
    pub const OBSTACLE_CLEANUP_DISTANCE: f32 = 20.0;
    pub const OBSTACLE_SPACING: f32 = 12.0;
    pub const LANE_COUNT: usize = 5;
    pub const MAX_DIFFICULTY: f32 = 3.0;

    /// Collectibles
    pub const COLLECTIBLE_START_Z: f32 = -20.0;
    pub const COLLECTIBLE_LOOK_AHEAD: f32 = 80.0;
    pub const COLLECTIBLE_CLEANUP_DISTANCE: f32 = 15.0;
    pub const COLLECTIBLE_SPACING: f32 = 15.0;
    pub const COLLECTIBLE_HALF_EXTENT: [f32; 3] = [0.4, 0.4, 0.4];
    pub const COLLECTIBLE_ROTATE_SPEED: f32 = 3.0;
    pub const COIN_HEIGHT: f32 = 1.0;
    pub const POWER_UP_HEIGHT: f32 = 1.5;

    /// Scoring
    pub const COIN_VALUE: i64 = 10;
    pub const BASE_TRICK_SCORE: i64 = 50;
    pub const MAX_MULTIPLIER: u32 = 5;

    /// Tricks
    pub const TRICK_SPIN_SPEED: f32 = 8.0;
    pub const GRAB_ROCK_SPEED: f32 = 4.0;
}
