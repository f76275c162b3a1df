pub mod integrator;
pub mod walls;
pub mod pockets;
pub mod collisions;
pub mod rack;
pub mod spawn;
pub mod prediction;
