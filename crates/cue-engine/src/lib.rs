pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::config::{PhysicsConfig, COLLISION_THRESHOLD};
pub use api::error::EngineError;
pub use api::types::{BallId, CaptureEvent, Shot};
pub use components::ball::{Ball, BallColor, BallType, BALL_PALETTE, CUE_NUMBER};
pub use components::table::{Pocket, Table, HEAD_SPOT, STANDARD_POCKETS, TABLE_SIZE};
pub use core::session::{GameMode, GolfSession};
pub use core::simulation::{step, Simulation, TickOutcome};
pub use core::time::TickClock;
pub use bridge::buffer::{BallInstance, CaptureRecord, FrameBuffers, PredictionRecord};

// Per-tick stages, leaf first
pub use systems::integrator::integrate;
pub use systems::walls::resolve_walls;
pub use systems::pockets::{capture_pockets, CaptureOutcome};
pub use systems::collisions::resolve_ball_collisions;
pub use systems::rack::{build_rack, rack_numbers, rack_positions, RackLayout};
pub use systems::spawn::{random_position, random_velocity};
pub use systems::prediction::{
    aim_line, predict_collisions, PredictedCollision, PredictionParams, Segment, Struck,
};
