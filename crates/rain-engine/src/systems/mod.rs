pub mod grab;
pub mod render;
pub mod rng;
