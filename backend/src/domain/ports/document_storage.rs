//! Port for storing uploaded files.

use async_trait::async_trait;

use crate::domain::{Error, UploadedFile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document storage adapters.
    pub enum DocumentStorageError {
        /// The storage root could not be opened or created.
        Unavailable { message: String } => "document storage unavailable: {message}",
        /// Writing the file failed.
        Write { message: String } => "failed to store upload: {message}",
    }
}

impl From<DocumentStorageError> for Error {
    fn from(value: DocumentStorageError) -> Self {
        match value {
            DocumentStorageError::Unavailable { message } => Error::service_unavailable(message),
            DocumentStorageError::Write { .. } => Error::internal(value.to_string()),
        }
    }
}

/// Persists uploaded files and returns their storage reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Store `file` under the folder chosen by its field name and return the
    /// path clients use to refer to it.
    async fn store(&self, file: &UploadedFile) -> Result<String, DocumentStorageError>;
}
