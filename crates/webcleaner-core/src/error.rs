use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The buffer handed to an enumeration call was too small. This is the
    /// growth signal, not a fault: retry with `required` bytes.
    #[error("buffer too small: {required} bytes required")]
    InsufficientBuffer { required: u32 },
    /// The enumeration has nothing (more) to yield.
    #[error("no more items")]
    NoMoreItems,
    #[error("os error {0}")]
    Os(u32),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unsupported platform")]
    UnsupportedPlatform,
}
