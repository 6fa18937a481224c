pub mod pool;
pub mod schedule;
pub mod spawner;
pub mod time;
