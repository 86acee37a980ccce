//! Unified application error types for DocVault.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Domain failures additionally carry an
//! [`ErrorCode`] so that callers can react to the exact condition instead of
//! parsing messages.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (unknown or deactivated user, wrong password).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// The mutation is inadmissible given the current state.
    Conflict,
    /// The entity store failed.
    Store,
    /// A blob storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Store => write!(f, "STORE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Precise domain error conditions.
///
/// Every code belongs to exactly one [`ErrorKind`]; the display string is
/// the message reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // -- Validation --
    #[error("required folder id")]
    RequiredFolderId,
    #[error("required folder name")]
    RequiredFolderName,
    #[error("required parent folder id")]
    MissingParent,
    #[error("required file id")]
    RequiredFileId,
    #[error("required file name")]
    RequiredFileName,
    #[error("required user id")]
    RequiredUserId,
    #[error("required username")]
    RequiredUsername,
    #[error("required display name")]
    RequiredDisplayName,
    #[error("required password")]
    RequiredPassword,
    #[error("required user role id")]
    RequiredUserRoleId,
    #[error("required user role name")]
    RequiredUserRoleName,
    #[error("required access role id")]
    RequiredAccessRoleId,
    #[error("required access level")]
    RequiredAccessLevel,
    #[error("invalid access level")]
    InvalidAccessLevel,
    #[error("file data exceeds the upload size limit")]
    UploadTooLarge,

    // -- Not found --
    #[error("folder not found")]
    FolderNotFound,
    #[error("parent folder not found")]
    ParentNotFound,
    #[error("file not found")]
    FileNotFound,
    #[error("file data not found")]
    FileDataNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("user role not found")]
    UserRoleNotFound,
    #[error("access role not found")]
    AccessRoleNotFound,

    // -- Conflict --
    #[error("folder already exists")]
    DuplicateName,
    #[error("file already exists")]
    FileAlreadyExists,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user role already exists")]
    UserRoleAlreadyExists,
    #[error("access role already exists")]
    AccessRoleAlreadyExists,
    #[error("user role already assigned")]
    UserRoleAlreadyAssigned,
    #[error("user role not assigned")]
    UserRoleNotAssigned,
    #[error("invalid parent folder id: cyclic reference")]
    CyclicReference,
    #[error("cannot delete non-empty folder")]
    FolderNotEmpty,
    #[error("user is already active")]
    UserAlreadyActive,
    #[error("root folder cannot be modified")]
    RootFolderImmutable,

    // -- Authentication / authorization --
    #[error("unauthorized")]
    Unauthorized,
    #[error("incorrect password")]
    IncorrectPassword,
    #[error("forbidden")]
    Forbidden,
}

impl ErrorCode {
    /// The coarse category this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            RequiredFolderId | RequiredFolderName | MissingParent | RequiredFileId
            | RequiredFileName | RequiredUserId | RequiredUsername | RequiredDisplayName
            | RequiredPassword | RequiredUserRoleId | RequiredUserRoleName
            | RequiredAccessRoleId | RequiredAccessLevel | InvalidAccessLevel
            | UploadTooLarge => ErrorKind::Validation,
            FolderNotFound | ParentNotFound | FileNotFound | FileDataNotFound | UserNotFound
            | UserRoleNotFound | AccessRoleNotFound => ErrorKind::NotFound,
            DuplicateName | FileAlreadyExists | UserAlreadyExists | UserRoleAlreadyExists
            | AccessRoleAlreadyExists | UserRoleAlreadyAssigned | UserRoleNotAssigned
            | CyclicReference | FolderNotEmpty | UserAlreadyActive | RootFolderImmutable => {
                ErrorKind::Conflict
            }
            Unauthorized | IncorrectPassword => ErrorKind::Authentication,
            Forbidden => ErrorKind::Authorization,
        }
    }
}

/// The unified application error used throughout DocVault.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// The precise domain condition, when there is one.
    pub code: Option<ErrorCode>,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` if this error carries the given domain code.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == Some(code)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create an entity store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create a blob storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        Self {
            kind: code.kind(),
            code: Some(code),
            message: code.to_string(),
            source: None,
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            code: self.code,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
