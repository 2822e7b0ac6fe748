//! Draw lists produced by the toolkit and the math needed to submit them.

use std::fmt;
use std::rc::Rc;

use glam::{Mat4, UVec2, Vec3};

/// Engine handle of a texture referenced by draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// A single UI vertex, laid out the way the toolkit emits it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    /// Packed RGBA8.
    pub col: u32,
}

/// Index type of the toolkit's index buffers.
pub type DrawIdx = u16;

/// A user callback replacing the built-in draw of one command.
pub type DrawCallback = Rc<dyn Fn(&DrawList, &DrawCmd)>;

/// One draw call within a [`DrawList`].
#[derive(Clone, Default)]
pub struct DrawCmd {
    /// Number of indices consumed by this command.
    pub elem_count: u32,
    /// Clip rectangle as `[x1, y1, x2, y2]` in pixels.
    pub clip_rect: [f32; 4],
    pub texture: Option<TextureId>,
    pub callback: Option<DrawCallback>,
}

impl DrawCmd {
    pub fn new(elem_count: u32, clip_rect: [f32; 4], texture: Option<TextureId>) -> Self {
        Self {
            elem_count,
            clip_rect,
            texture,
            callback: None,
        }
    }

    /// A command that runs `callback` instead of drawing.
    pub fn with_callback(callback: impl Fn(&DrawList, &DrawCmd) + 'static) -> Self {
        Self {
            callback: Some(Rc::new(callback)),
            ..Self::default()
        }
    }
}

impl fmt::Debug for DrawCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCmd")
            .field("elem_count", &self.elem_count)
            .field("clip_rect", &self.clip_rect)
            .field("texture", &self.texture)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Vertices, indices and commands of one toolkit window layer.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub vertices: Vec<DrawVert>,
    pub indices: Vec<DrawIdx>,
    pub commands: Vec<DrawCmd>,
}

/// Everything the toolkit wants drawn this frame.
#[derive(Debug, Clone, Default)]
pub struct DrawData {
    pub lists: Vec<DrawList>,
}

impl DrawData {
    pub fn total_vtx_count(&self) -> usize {
        self.lists.iter().map(|list| list.vertices.len()).sum()
    }

    pub fn total_idx_count(&self) -> usize {
        self.lists.iter().map(|list| list.indices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Orthographic projection mapping pixel coordinates to clip space.
///
/// `(0, 0)` lands on the top-left corner and `display` on the bottom-right.
pub fn projection(display: UVec2) -> Mat4 {
    let size = display.as_vec2().max(glam::Vec2::ONE);
    Mat4::from_translation(Vec3::new(-1.0, 1.0, 0.0))
        * Mat4::from_scale(Vec3::new(2.0 / size.x, -2.0 / size.y, 1.0))
}

/// Integer scissor rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Truncates a toolkit clip rectangle to whole pixels.
    pub fn from_clip_rect(clip: [f32; 4]) -> Self {
        Self::new(clip[0] as i32, clip[1] as i32, clip[2] as i32, clip[3] as i32)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Returns the new capacity of a dynamic buffer, or `None` to keep it.
///
/// A buffer is reallocated when it is too small for `required` elements or
/// more than twice as large as needed, and then sized to `required + headroom`.
/// A buffer that already has exactly that size is kept.
pub fn buffer_capacity(current: usize, required: usize, headroom: usize) -> Option<usize> {
    let target = required + headroom;
    let misfit = current < required || current > required.saturating_mul(2);
    (misfit && target != current).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use proptest::prelude::*;

    #[test]
    fn test_draw_vert_layout() {
        assert_eq!(std::mem::size_of::<DrawVert>(), 20);
        let vert = DrawVert {
            pos: [1.0, 2.0],
            uv: [0.5, 0.5],
            col: 0xFFFF_FFFF,
        };
        let bytes: &[u8] = bytemuck::bytes_of(&vert);
        assert_eq!(bytes.len(), 20);
        assert_eq!(&bytes[16..], &[0xFF; 4]);
    }

    #[test]
    fn test_projection_corners() {
        let proj = projection(UVec2::new(800, 600));

        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = proj * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_rect_truncates() {
        let rect = IntRect::from_clip_rect([10.9, 20.2, 110.5, 220.99]);
        assert_eq!(rect, IntRect::new(10, 20, 110, 220));
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 200);
    }

    #[test]
    fn test_buffer_capacity() {
        assert_eq!(buffer_capacity(0, 10, 1000), Some(1010));
        assert_eq!(buffer_capacity(1010, 600, 1000), None);
        assert_eq!(buffer_capacity(1010, 400, 1000), Some(1400));
        assert_eq!(buffer_capacity(20, 10, 1000), None);
        assert_eq!(buffer_capacity(1004, 4, 1000), None);
    }

    #[test]
    fn test_draw_data_totals() {
        let list = DrawList {
            vertices: vec![DrawVert::default(); 4],
            indices: vec![0, 1, 2, 0, 2, 3],
            commands: vec![DrawCmd::new(6, [0.0; 4], None)],
        };
        let data = DrawData {
            lists: vec![list.clone(), list],
        };
        assert_eq!(data.total_vtx_count(), 8);
        assert_eq!(data.total_idx_count(), 12);
    }

    #[test]
    fn test_callback_command_debug() {
        let cmd = DrawCmd::with_callback(|_, _| {});
        assert!(format!("{cmd:?}").contains("callback: true"));
    }

    proptest! {
        #[test]
        fn buffer_capacity_always_fits(current in 0usize..100_000, required in 0usize..50_000) {
            let capacity = buffer_capacity(current, required, 1000).unwrap_or(current);
            prop_assert!(capacity >= required);
            prop_assert!(capacity <= 2 * required + 1000);
        }
    }
}
