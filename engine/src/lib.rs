mod backtrace;
mod errors;
mod glium_graphics;
mod graphics;
mod meta;
mod quads;
mod spritesheet;
mod timer;

pub use self::backtrace::{log_backtrace, write_backtrace};
pub use self::errors::{Error, ErrorKind, Result};
pub use self::glium_graphics::GliumGraphics;
pub use self::graphics::{Graphics, SheetTexture};
pub use self::meta::{ClipMetadata, SheetMetadata};
pub use self::quads::{QuadBatch, SpriteVertex, INDICES_PER_QUAD, VERTICES_PER_QUAD};
pub use self::spritesheet::{SheetState, Spritesheet};
pub use self::timer::Timer;
