//! Error handling for the content server
//!
//! This module defines the error taxonomy used by registration, lifecycle and
//! request serving, and how each error maps onto an HTTP response.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{ProviderError, Result};
