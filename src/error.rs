/// Error types shared by the store and its consumers
use thiserror::Error;

/// Failure reported by a key/value backend
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct BackendError(pub String);

/// Coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Duplicate,
    Storage,
}

/// Every message starts with "Error" so JS callers can keep sniffing the prefix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Error: Bookmark must have a URL and Title.")]
    MissingBookmarkFields,

    #[error("Error: URL already saved as a bookmark.")]
    DuplicateUrl(String),

    #[error("Error: ID and update data required for modification.")]
    MissingUpdate,

    #[error("Error: No ID provided for deletion.")]
    MissingId,

    #[error("Error: Bookmark not found.")]
    BookmarkNotFound(String),

    #[error("Error: Folder name is required.")]
    FolderNameRequired,

    #[error("Error: A folder named \"{0}\" already exists.")]
    DuplicateFolderName(String),

    #[error("Error: Cannot modify the default Inbox folder or missing ID.")]
    ProtectedFolder,

    #[error("Error: Folder not found.")]
    FolderNotFound(String),

    #[error("Error: Invalid import data. {0}")]
    InvalidImport(String),

    #[error("Error: Failed to {action}. {source}")]
    Storage {
        action: &'static str,
        source: BackendError,
    },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::MissingBookmarkFields
            | StoreError::MissingUpdate
            | StoreError::MissingId
            | StoreError::FolderNameRequired
            | StoreError::ProtectedFolder
            | StoreError::InvalidImport(_) => ErrorKind::Validation,
            StoreError::BookmarkNotFound(_) | StoreError::FolderNotFound(_) => ErrorKind::NotFound,
            StoreError::DuplicateUrl(_) | StoreError::DuplicateFolderName(_) => ErrorKind::Duplicate,
            StoreError::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub(crate) fn storage(action: &'static str, source: BackendError) -> Self {
        StoreError::Storage { action, source }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
