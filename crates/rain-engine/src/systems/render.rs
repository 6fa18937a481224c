use crate::components::packet::Packet;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from the packet pool.
/// Regular packets first, then lucky ones; sets `lucky_split` at the boundary.
/// Hidden (collected) packets are skipped.
pub fn build_render_buffer<'a>(packets: impl Iterator<Item = &'a Packet>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut lucky: Vec<RenderInstance> = Vec::new();

    for packet in packets {
        if !packet.visible {
            continue;
        }

        let instance = RenderInstance {
            x: packet.pos.x,
            y: packet.pos.y,
            z: packet.pos.z,
            rotation: packet.rotation,
            scale: packet.scale,
            amount: packet.amount as f32,
            special: if packet.special { 1.0 } else { 0.0 },
            id: packet.id.0 as f32,
        };

        if packet.special {
            lucky.push(instance);
        } else {
            buffer.push(instance);
        }
    }

    let split = buffer.instance_count();
    buffer.set_lucky_split(split);
    for inst in lucky {
        buffer.push(inst);
    }
}
