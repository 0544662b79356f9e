use thiserror::Error;

/// Fatal errors raised while constructing the guard.
///
/// Per-request validation failures are not errors; they are ordinary outcomes
/// reported through [`crate::Verdict`] and the response status.
#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("CSRF configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, CsrfError>;
