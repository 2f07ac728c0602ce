use super::errors::{ErrorKind, Result};
use super::graphics::{Graphics, SheetTexture};
use super::quads::SpriteVertex;
use failchain::ResultExt;
use glium::backend::{Context, Facade};
use glium::index::PrimitiveType;
use glium::texture::{RawImage2d, Texture2d};
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter};
use glium::{uniform, Blend, DrawParameters, Frame, IndexBuffer, Program, Surface, VertexBuffer};
use log::debug;
use math::{Mat4, Vec2f};
use std::path::Path;
use std::rc::Rc;

#[cfg(target_os = "linux")]
const GLSL_VERSION_STRING: &str = "140";

#[cfg(not(target_os = "linux"))]
const GLSL_VERSION_STRING: &str = "330 core";

const VERTEX_SOURCE: &str = include_str!("shaders/sprite.vert");
const FRAGMENT_SOURCE: &str = include_str!("shaders/sprite.frag");

/// `Graphics` on top of an OpenGL context owned by glium.
///
/// Sprites are drawn alpha blended with nearest-neighbour sampling, in pixel coordinates with the
/// origin at the top-left corner of the frame and y pointing down.
pub struct GliumGraphics {
    context: Rc<Context>,
    program: Program,
    draw_parameters: DrawParameters<'static>,
}

impl GliumGraphics {
    pub fn new<FacadeT: Facade + ?Sized>(facade: &FacadeT) -> Result<Self> {
        let context = facade.get_context().clone();
        let version = format!("#version {}\n", GLSL_VERSION_STRING);
        let vertex_source = version.clone() + VERTEX_SOURCE;
        let fragment_source = version + FRAGMENT_SOURCE;

        debug!("Compiling sprite shader (GLSL {})...", GLSL_VERSION_STRING);
        let program = Program::from_source(&context, &vertex_source, &fragment_source, None)
            .map_err(ErrorKind::glium("sprite shader"))?;

        Ok(GliumGraphics {
            context,
            program,
            draw_parameters: DrawParameters {
                blend: Blend::alpha_blending(),
                ..DrawParameters::default()
            },
        })
    }

    /// Uploads tightly packed RGBA8 pixels, first row at the top.
    pub fn create_texture(&self, rgba: Vec<u8>, width: u32, height: u32) -> Result<Texture2d> {
        let image = RawImage2d::from_raw_rgba(rgba, (width, height));
        Texture2d::new(&self.context, image).map_err(ErrorKind::glium("spritesheet texture"))
    }

    pub fn load_texture<PathT: AsRef<Path>>(&self, path: PathT) -> Result<Texture2d> {
        let path = path.as_ref();
        let image = image::open(path)
            .chain_err(|| ErrorKind::ResourceIo {
                what: "texture",
                path: path.display().to_string(),
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        debug!("Loaded {}x{} texture from {:?}.", width, height, path);
        self.create_texture(image.into_raw(), width, height)
    }
}

impl SheetTexture for Texture2d {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }
}

impl Graphics for GliumGraphics {
    type Texture = Texture2d;
    type VertexBuffer = VertexBuffer<SpriteVertex>;
    type IndexBuffer = IndexBuffer<u32>;
    type Target = Frame;

    fn create_vertex_buffer(
        &self,
        vertices: &[SpriteVertex],
        needed_by: &str,
    ) -> Result<VertexBuffer<SpriteVertex>> {
        VertexBuffer::immutable(&self.context, vertices).map_err(ErrorKind::glium(needed_by))
    }

    fn create_index_buffer(&self, indices: &[u32], needed_by: &str) -> Result<IndexBuffer<u32>> {
        IndexBuffer::immutable(&self.context, PrimitiveType::TrianglesList, indices)
            .map_err(ErrorKind::glium(needed_by))
    }

    fn draw_indexed(
        &self,
        target: &mut Frame,
        texture: &Texture2d,
        vertices: &VertexBuffer<SpriteVertex>,
        indices: &IndexBuffer<u32>,
        position: Vec2f,
    ) -> Result<()> {
        let (width, height) = target.get_dimensions();
        let projection: [[f32; 4]; 4] = pixel_projection(width, height).into();
        let uniforms = uniform! {
            u_projection: projection,
            u_position: [position.x, position.y],
            u_texture: texture
                .sampled()
                .magnify_filter(MagnifySamplerFilter::Nearest)
                .minify_filter(MinifySamplerFilter::Nearest),
        };
        target
            .draw(
                vertices,
                indices,
                &self.program,
                &uniforms,
                &self.draw_parameters,
            )
            .map_err(ErrorKind::glium("sprite draw"))
    }
}

/// Orthographic projection mapping pixels to clip space, origin top-left, y down.
fn pixel_projection(width: u32, height: u32) -> Mat4 {
    cgmath::ortho(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
}
