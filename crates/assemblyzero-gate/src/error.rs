use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("unsupported language for file: {0}")]
    UnsupportedLanguage(String),

    #[error("parse failed for file: {0}")]
    ParseFailed(String),
}
