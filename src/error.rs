/// Everything that can go wrong in the engine.
///
/// Geometry that falls outside a target is not an error; it is clipped away.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A callback asked to stop. Callers should treat this as a clean stop.
    #[error("operation canceled")]
    Canceled,

    #[error("invalid argument")]
    InvalidArgument,

    /// The target doesn't implement the operation, or there is no conversion
    /// between two pixel formats.
    #[error("operation not supported")]
    NotSupported,

    #[error("I/O error")]
    IoError,

    #[error("device error")]
    DeviceError,

    #[error("out of memory")]
    OutOfMemory,

    #[error("invalid format")]
    InvalidFormat,

    /// An indexed format was used without a palette to resolve it.
    #[error("no palette")]
    NoPalette,

    #[error("invalid state")]
    InvalidState,

    #[error("unknown error")]
    Unknown,
}

impl Error {
    pub fn is_canceled(&self) -> bool {
        *self == Error::Canceled
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::InvalidData => {
                Error::InvalidFormat
            }
            std::io::ErrorKind::OutOfMemory => Error::OutOfMemory,
            _ => Error::IoError,
        }
    }
}
