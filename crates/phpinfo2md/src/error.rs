use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input is empty")]
    EmptyInput,

    #[error("no phpinfo() content found")]
    NoContent,

    #[error("failed to parse markup: {0}")]
    Parse(#[from] io::Error),
}

impl ConvertError {
    /// Whether the failure means "nothing to write" rather than a broken run.
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::NoContent)
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
