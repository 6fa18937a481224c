use bytemuck::{Pod, Zeroable};

/// Per-packet render data read by the external renderer.
/// Must match the JS side: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in scene space.
    pub x: f32,
    /// Y position in scene space (y up).
    pub y: f32,
    /// Depth used for draw ordering.
    pub z: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale (1.3 for lucky packets).
    pub scale: f32,
    /// Packet value, for labels.
    pub amount: f32,
    /// 1.0 for a lucky packet.
    pub special: f32,
    /// Packet id, stable across recycling.
    pub id: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all visible packet instances.
pub struct RenderBuffer {
    /// Regular packets first, lucky packets from `lucky_split` on, so the
    /// renderer can give them their own pass.
    pub instances: Vec<RenderInstance>,
    pub lucky_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            lucky_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.lucky_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_lucky_split(&mut self, split: u32) {
        self.lucky_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance { x: 3.0, ..Default::default() });
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 16);
        assert_eq!(buf.as_floats()[8], 3.0);
    }
}
