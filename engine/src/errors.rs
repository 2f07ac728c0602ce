use failchain::ChainErrorKind;
use failure::{Backtrace, Context, Fail};
use glium;
use std::fmt;
use std::result::Result as StdResult;

pub type Result<T> = StdResult<T, Error>;

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(
        display = "Clip index {} out of range for `{}` with {} clips.",
        index, needed_by, len
    )]
    OutOfRange {
        index: usize,
        len: usize,
        needed_by: String,
    },

    #[fail(display = "Buffers for `{}` have not been generated.", needed_by)]
    NotGenerated { needed_by: String },

    #[fail(display = "No clips to generate buffers for `{}`.", needed_by)]
    NoClips { needed_by: String },

    #[fail(display = "Failed to allocate GPU resource for `{}`.", needed_by)]
    AllocationFailure { needed_by: String },

    #[fail(
        display = "Linking/compiling shader for `{}` failed with:\n{}",
        needed_by, log
    )]
    Shader { log: String, needed_by: String },

    #[fail(display = "Draw call for `{}` failed: {}", needed_by, log)]
    Draw { log: String, needed_by: String },

    #[fail(display = "I/O error when accessing {} `{}`.", what, path)]
    ResourceIo { what: &'static str, path: String },

    #[fail(display = "Corrupt clip metadata: {}", 0)]
    CorruptMetadata(String),
}

impl ChainErrorKind for ErrorKind {
    type Error = Error;
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }
}

impl ErrorKind {
    pub(crate) fn out_of_range<NeededByT: Into<String>>(
        index: usize,
        len: usize,
        needed_by: NeededByT,
    ) -> Self {
        ErrorKind::OutOfRange {
            index,
            len,
            needed_by: needed_by.into(),
        }
    }

    pub(crate) fn not_generated<NeededByT: Into<String>>(needed_by: NeededByT) -> Self {
        ErrorKind::NotGenerated {
            needed_by: needed_by.into(),
        }
    }

    pub(crate) fn allocation_failure<NeededByT: Into<String>>(needed_by: NeededByT) -> Self {
        ErrorKind::AllocationFailure {
            needed_by: needed_by.into(),
        }
    }

    pub(crate) fn corrupt_metadata<MessageT: Into<String>>(message: MessageT) -> Self {
        ErrorKind::CorruptMetadata(message.into())
    }

    pub(crate) fn glium<NeededByT: Into<String>, ErrorT: ConvertGlium>(
        needed_by: NeededByT,
    ) -> (impl FnOnce(ErrorT) -> Error) {
        move |error| {
            let kind = error.convert_glium(needed_by.into());
            Error::from(error.context(kind))
        }
    }
}

pub(crate) trait ConvertGlium: Fail + Sized {
    fn convert_glium(&self, needed_by: String) -> ErrorKind;
}

pub(crate) trait AllocationError: Fail + Sized {}

impl<T: AllocationError> ConvertGlium for T {
    fn convert_glium(&self, needed_by: String) -> ErrorKind {
        ErrorKind::AllocationFailure { needed_by }
    }
}

impl AllocationError for glium::vertex::BufferCreationError {}
impl AllocationError for glium::index::BufferCreationError {}
impl AllocationError for glium::texture::TextureCreationError {}

impl ConvertGlium for glium::ProgramCreationError {
    fn convert_glium(&self, needed_by: String) -> ErrorKind {
        ErrorKind::Shader {
            log: self.to_string(),
            needed_by,
        }
    }
}

impl ConvertGlium for glium::DrawError {
    fn convert_glium(&self, needed_by: String) -> ErrorKind {
        ErrorKind::Draw {
            log: self.to_string(),
            needed_by,
        }
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from(Context::new(kind))
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Self {
        Error { inner }
    }
}
