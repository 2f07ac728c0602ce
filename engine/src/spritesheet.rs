use super::errors::{ErrorKind, Result};
use super::graphics::{Graphics, SheetTexture};
use super::quads::{QuadBatch, VERTICES_PER_QUAD};
use failchain::{bail, ensure};
use log::{debug, warn};
use math::{vec2, Rect};
use std::borrow::Cow;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SheetState {
    /// No clips were added yet.
    Empty,
    /// Clips exist but there are no buffers to draw them with.
    Building,
    /// Buffers exist for (at least) the first `generated_clips()` clips.
    Generated,
}

/// A texture, the clips cut out of it and the GPU buffers used to draw them.
///
/// Clips are added one at a time and identified by the index `add_clip` returns. `generate`
/// then uploads a single vertex buffer holding one quad per clip plus one index buffer per clip,
/// after which any clip can be drawn with `render_sprite`.
///
/// The sheet owns its texture and buffers: they are released when it is destroyed or dropped.
/// All calls must happen on the thread which owns the graphics context; a sheet shared between
/// threads needs external synchronisation.
///
/// Example
/// ---
///
/// ```ignore
/// let mut sheet = Spritesheet::<TestGraphics>::named("hero", graphics.load_texture("hero.png")?);
/// let idle = sheet.add_clip(Rect::new(0, 0, 32, 32));
/// let walk = sheet.add_clip(Rect::new(32, 0, 32, 32));
/// sheet.generate(&graphics)?;
///
/// let mut frame = display.draw();
/// sheet.render_sprite(&graphics, &mut frame, idle, 100.0, 100.0)?;
/// sheet.render_sprite(&graphics, &mut frame, walk, 140.0, 100.0)?;
/// frame.finish()?;
/// ```
pub struct Spritesheet<GraphicsT: Graphics> {
    // Field order matters: buffers are released before the texture.
    buffers: Option<SheetBuffers<GraphicsT>>,
    texture: GraphicsT::Texture,
    clips: Vec<Rect>,
    name: Cow<'static, str>,
}

struct SheetBuffers<GraphicsT: Graphics> {
    vertices: GraphicsT::VertexBuffer,
    indices: Vec<GraphicsT::IndexBuffer>,
}

impl<GraphicsT: Graphics> Spritesheet<GraphicsT> {
    /// Creates an empty sheet taking ownership of `texture`. No GPU calls are made.
    pub fn new(texture: GraphicsT::Texture) -> Self {
        Self::named("spritesheet", texture)
    }

    /// Like `new`, with a name used in logs and errors.
    pub fn named<NameT: Into<Cow<'static, str>>>(name: NameT, texture: GraphicsT::Texture) -> Self {
        let name = name.into();
        debug!(
            "Created spritesheet {:?} with {}x{} texture.",
            name,
            texture.width(),
            texture.height()
        );
        Spritesheet {
            buffers: None,
            texture,
            clips: Vec::new(),
            name,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn texture(&self) -> &GraphicsT::Texture {
        &self.texture
    }

    #[inline]
    pub fn clips(&self) -> &[Rect] {
        &self.clips
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn state(&self) -> SheetState {
        if self.buffers.is_some() {
            SheetState::Generated
        } else if self.clips.is_empty() {
            SheetState::Empty
        } else {
            SheetState::Building
        }
    }

    /// Number of clips covered by the current buffers, zero if there are none.
    pub fn generated_clips(&self) -> usize {
        self.buffers
            .as_ref()
            .map_or(0, |buffers| buffers.indices.len())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.generated_clips() * VERTICES_PER_QUAD
    }

    #[inline]
    pub fn index_buffer_count(&self) -> usize {
        self.generated_clips()
    }

    /// Appends a clip and returns its index.
    ///
    /// The rectangle is not checked against the texture; clips which stick out of it sample
    /// garbage when drawn. Clips added after `generate` are only drawable after the next call to
    /// `generate`.
    pub fn add_clip(&mut self, clip: Rect) -> usize {
        self.clips.push(clip);
        self.clips.len() - 1
    }

    pub fn get_clip(&self, index: usize) -> Result<Rect> {
        match self.clips.get(index) {
            Some(&clip) => Ok(clip),
            None => {
                bail!(ErrorKind::out_of_range(
                    index,
                    self.clips.len(),
                    self.name()
                ));
            }
        }
    }

    /// Indices of the clips which do not lie entirely inside the texture.
    pub fn out_of_bounds_clips(&self) -> impl Iterator<Item = usize> + '_ {
        let (width, height) = (self.texture.width(), self.texture.height());
        self.clips
            .iter()
            .enumerate()
            .filter(move |(_, clip)| !clip.fits_within(width, height))
            .map(|(index, _)| index)
    }

    /// Uploads the vertex buffer and per-clip index buffers for all current clips.
    ///
    /// Any previously generated buffers are released first, so calling this again rebuilds the
    /// buffers from scratch. On failure nothing allocated by this call is kept and the sheet is
    /// left without buffers.
    pub fn generate(&mut self, graphics: &GraphicsT) -> Result<()> {
        if let Some(old) = self.buffers.take() {
            debug!(
                "Released {} clip buffers of {:?} before regenerating.",
                old.indices.len(),
                self.name
            );
        }
        ensure!(
            !self.clips.is_empty(),
            ErrorKind::NoClips {
                needed_by: self.name.to_string(),
            }
        );

        for index in self.out_of_bounds_clips() {
            warn!(
                "Clip {} {:?} of {:?} lies outside its {}x{} texture.",
                index,
                self.clips[index],
                self.name,
                self.texture.width(),
                self.texture.height()
            );
        }

        let batch = QuadBatch::build(&self.clips, self.texture.width(), self.texture.height());
        let vertices = graphics.create_vertex_buffer(&batch.vertices, &self.name)?;
        let indices = batch
            .indices
            .iter()
            .map(|indices| graphics.create_index_buffer(indices, &self.name))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Generated buffers for {:?}: {} vertices, {} index buffers.",
            self.name,
            batch.vertices.len(),
            indices.len()
        );
        self.buffers = Some(SheetBuffers { vertices, indices });
        Ok(())
    }

    /// Releases the GPU buffers, keeping the texture and clips so the sheet can be regenerated.
    pub fn free_sheet(&mut self) -> Result<()> {
        match self.buffers.take() {
            Some(buffers) => {
                debug!(
                    "Freed buffers of {:?} ({} clips).",
                    self.name,
                    buffers.indices.len()
                );
                Ok(())
            }
            None => {
                bail!(ErrorKind::not_generated(self.name()));
            }
        }
    }

    /// Draws clip `index` with its top-left corner at `(x, y)`.
    pub fn render_sprite(
        &self,
        graphics: &GraphicsT,
        target: &mut GraphicsT::Target,
        index: usize,
        x: f32,
        y: f32,
    ) -> Result<()> {
        ensure!(
            index < self.clips.len(),
            ErrorKind::out_of_range(index, self.clips.len(), self.name())
        );
        let buffers = match self.buffers {
            Some(ref buffers) => buffers,
            None => {
                bail!(ErrorKind::not_generated(self.name()));
            }
        };
        let indices = match buffers.indices.get(index) {
            Some(indices) => indices,
            None => {
                bail!(ErrorKind::not_generated(format!(
                    "{} (clip {} added after generate)",
                    self.name, index
                )));
            }
        };
        graphics.draw_indexed(
            target,
            &self.texture,
            &buffers.vertices,
            indices,
            vec2(x, y),
        )
    }

    /// Releases the buffers, the texture and the clips.
    ///
    /// Dropping the sheet does the same; this only makes the end of its life explicit.
    pub fn destroy(self) {
        debug!("Destroying spritesheet {:?}.", self.name);
    }
}

impl<GraphicsT: Graphics> Drop for Spritesheet<GraphicsT> {
    fn drop(&mut self) {
        if let Some(buffers) = self.buffers.take() {
            debug!(
                "Released {} clip buffers of {:?}.",
                buffers.indices.len(),
                self.name
            );
        }
        debug!(
            "Released texture and {} clips of {:?}.",
            self.clips.len(),
            self.name
        );
    }
}
