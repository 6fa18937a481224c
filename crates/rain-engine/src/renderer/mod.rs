pub mod instance;
pub mod traits;

pub use traits::FrameRenderer;
