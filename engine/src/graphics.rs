use super::errors::Result;
use super::quads::SpriteVertex;
use math::Vec2f;

/// A texture which can back a spritesheet.
pub trait SheetTexture {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// The graphics context a spritesheet allocates its buffers from and draws with.
///
/// Implementations are expected to be used from the thread which owns the underlying context.
/// Resources are released by dropping them.
pub trait Graphics {
    type Texture: SheetTexture;
    type VertexBuffer;
    type IndexBuffer;

    /// What draw calls render into, typically a frame.
    type Target: ?Sized;

    fn create_vertex_buffer(
        &self,
        vertices: &[SpriteVertex],
        needed_by: &str,
    ) -> Result<Self::VertexBuffer>;

    fn create_index_buffer(&self, indices: &[u32], needed_by: &str) -> Result<Self::IndexBuffer>;

    /// Draws the triangles in `indices`, offsetting every vertex by `position`.
    fn draw_indexed(
        &self,
        target: &mut Self::Target,
        texture: &Self::Texture,
        vertices: &Self::VertexBuffer,
        indices: &Self::IndexBuffer,
        position: Vec2f,
    ) -> Result<()>;
}
