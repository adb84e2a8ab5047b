use std::path::PathBuf;

use thiserror::Error;

use super::types::RecordId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} '{key}' referenced but not found")]
    ReferenceNotFound { entity: &'static str, key: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn missing_reference(entity: &'static str, id: RecordId) -> Self {
        Self::ReferenceNotFound {
            entity,
            key: id.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable code, used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::ReferenceNotFound { .. } => "reference_not_found",
        }
    }

    /// True for failures of the storage layer rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_names_the_id() {
        let err = CatalogError::missing_reference("tour", 42);
        assert_eq!(err.to_string(), "tour '42' referenced but not found");
        assert_eq!(err.code(), "reference_not_found");
        assert!(!err.is_storage());
    }

    #[test]
    fn io_errors_are_storage_failures() {
        let err = CatalogError::io(
            "pdi.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_storage());
        assert_eq!(err.code(), "io");
        assert!(err.to_string().contains("pdi.json"));
    }
}
