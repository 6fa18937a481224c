pub mod landmarks;
pub mod processor;
