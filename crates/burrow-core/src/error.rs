use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by a durable store adapter.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(String),
    #[error("store serialization failed: {0}")]
    Serialization(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortcode(String),
    #[error("short code already taken: {0}")]
    ShortcodeTaken(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("persistence failed: {0}")]
    PersistenceFailure(#[from] StoreError),
    #[error("no unused short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    #[error("short code not found: {0}")]
    NotFound(String),
}

impl RegistryError {
    /// Whether the error stems from caller input rather than a service fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_)
                | Self::InvalidShortcode(_)
                | Self::ShortcodeTaken(_)
                | Self::InvalidValidity(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_are_validation() {
        assert!(RegistryError::InvalidUrl("x".into()).is_validation());
        assert!(RegistryError::ShortcodeTaken("abc".into()).is_validation());
        assert!(RegistryError::InvalidValidity("0".into()).is_validation());
    }

    #[test]
    fn service_faults_are_not_validation() {
        let persistence = RegistryError::from(StoreError::Unavailable("down".into()));
        assert!(!persistence.is_validation());
        assert!(!RegistryError::GenerationExhausted { attempts: 3 }.is_validation());
        assert!(!RegistryError::NotFound("abc".into()).is_validation());
    }
}
