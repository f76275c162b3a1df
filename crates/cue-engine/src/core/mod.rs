pub mod session;
pub mod simulation;
pub mod time;
