//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame from the host's clock, nothing blocks
//! - Seeded RNG only
//! - Entity collections owned exclusively by their manager
//! - No rendering, audio, or platform dependencies

pub mod bounds;
pub mod collectibles;
pub mod collision;
pub mod obstacles;
pub mod player;
pub mod session;
pub mod terrain;

pub use bounds::BoundingBox;
pub use collectibles::{Collectible, CollectibleKind, CollectibleManager};
pub use collision::CollisionOutcome;
pub use obstacles::{Obstacle, ObstacleKind, ObstacleManager};
pub use player::{PlayerController, SteerCommand, TrickKind};
pub use session::{GamePhase, GameSession, GameWorld, SessionConfig};
pub use terrain::{TerrainChunk, TerrainGenerator};
