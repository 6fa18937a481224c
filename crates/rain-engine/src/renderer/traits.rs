//! Seam to the external renderer.
//!
//! Scene setup, textures and the draw pipeline live outside the core. The
//! renderer reads the packed `RenderBuffer` itself; the core only says when.

/// The external "draw the current frame" hook, called once per tick after the
/// render buffer is rebuilt. The core never inspects renderer internals.
pub trait FrameRenderer {
    fn render_frame(&mut self);
}
