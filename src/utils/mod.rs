//! Utility modules for the content server
//!
//! - **error**: Error taxonomy and HTTP mapping
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
