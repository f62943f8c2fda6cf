use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Authentication required: {message}")]
    Unauthenticated { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Tenant already initialized: {message}")]
    AlreadyInitialized { message: String },

    #[error("Tenant not initialized: {message}")]
    TenantNotInitialized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },
}

impl DomainError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn already_initialized(message: impl Into<String>) -> Self {
        Self::AlreadyInitialized {
            message: message.into(),
        }
    }

    pub fn tenant_not_initialized(message: impl Into<String>) -> Self {
        Self::TenantNotInitialized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
        }
    }

    /// Message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthenticated { message }
            | Self::InvalidArgument { message }
            | Self::AlreadyInitialized { message }
            | Self::TenantNotInitialized { message }
            | Self::NotFound { message }
            | Self::OperationFailed { message } => message,
        }
    }

    /// Collapse any error raised while talking to the store into
    /// `OperationFailed`, keeping its message
    pub fn into_operation_failed(self) -> Self {
        if matches!(self, Self::OperationFailed { .. }) {
            self
        } else {
            Self::operation_failed(self.message())
        }
    }
}
