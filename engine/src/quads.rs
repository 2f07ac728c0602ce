use glium::implement_vertex;
use math::Rect;

pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteVertex {
    pub a_pos: [f32; 2],
    pub a_tex_coords: [f32; 2],
}

implement_vertex! {
    SpriteVertex,
    a_pos,
    a_tex_coords,
}

/// CPU-side vertices and indices for a list of clips.
///
/// Clip `i` owns vertices `4i..4i + 4` (top-left, top-right, bottom-right, bottom-left) with
/// positions in pixels relative to where the sprite is drawn, and `indices[i]` holds the two
/// triangles covering them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadBatch {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<[u32; INDICES_PER_QUAD]>,
}

impl QuadBatch {
    pub fn build(clips: &[Rect], texture_width: u32, texture_height: u32) -> Self {
        let mut batch = QuadBatch {
            vertices: Vec::with_capacity(clips.len() * VERTICES_PER_QUAD),
            indices: Vec::with_capacity(clips.len()),
        };
        for (index, clip) in clips.iter().enumerate() {
            batch.push_clip(index, clip, texture_width, texture_height);
        }
        batch
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The four vertices of clip `index`, if it exists.
    pub fn quad(&self, index: usize) -> Option<&[SpriteVertex]> {
        let start = index.checked_mul(VERTICES_PER_QUAD)?;
        self.vertices.get(start..start.checked_add(VERTICES_PER_QUAD)?)
    }

    fn push_clip(&mut self, index: usize, clip: &Rect, texture_width: u32, texture_height: u32) {
        let (w, h) = (clip.w as f32, clip.h as f32);
        let left = normalize(i64::from(clip.x), texture_width);
        let right = normalize(clip.right(), texture_width);
        let top = normalize(i64::from(clip.y), texture_height);
        let bottom = normalize(clip.bottom(), texture_height);

        self.vertices.extend_from_slice(&[
            SpriteVertex {
                a_pos: [0.0, 0.0],
                a_tex_coords: [left, top],
            },
            SpriteVertex {
                a_pos: [w, 0.0],
                a_tex_coords: [right, top],
            },
            SpriteVertex {
                a_pos: [w, h],
                a_tex_coords: [right, bottom],
            },
            SpriteVertex {
                a_pos: [0.0, h],
                a_tex_coords: [left, bottom],
            },
        ]);

        let first = (index * VERTICES_PER_QUAD) as u32;
        self.indices.push([
            first,
            first + 1,
            first + 2,
            first + 2,
            first + 3,
            first,
        ]);
    }
}

fn normalize(pixel: i64, size: u32) -> f32 {
    if size == 0 {
        0.0
    } else {
        pixel as f32 / size as f32
    }
}
