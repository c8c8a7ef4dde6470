//! Helper functions for creating specific error types

use super::types::ProviderError;

/// Helper functions for creating specific errors
impl ProviderError {
    pub fn unhandled_input<S: Into<String>>(description: S) -> Self {
        Self::UnhandledInput(description.into())
    }

    pub fn invalid_mount<S: Into<String>>(prefix: S) -> Self {
        Self::InvalidMount(prefix.into())
    }

    pub fn duplicate_mount<S: Into<String>>(prefix: S) -> Self {
        Self::DuplicateMount(prefix.into())
    }

    pub fn invalid_header<S: Into<String>>(header: S) -> Self {
        Self::InvalidHeader(header.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(path: S) -> Self {
        Self::NotFound(path.into())
    }

    pub fn method_not_allowed<S: Into<String>>(method: S) -> Self {
        Self::MethodNotAllowed(method.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn bind<S: Into<String>>(addr: S, source: std::io::Error) -> Self {
        Self::Bind {
            addr: addr.into(),
            source,
        }
    }

    /// Caller mistakes are never retried; the caller has to change its input.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::UnhandledInput(_)
                | Self::InvalidMount(_)
                | Self::DuplicateMount(_)
                | Self::InvalidHeader(_)
                | Self::Config(_)
                | Self::NotRunning
        )
    }
}
