//! Form definitions backing the admin routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod upload;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Validation failed: no file provided")]
    MissingFile,

    #[error("could not read uploaded file: {0}")]
    Upload(#[from] std::io::Error),
}
