//! Common test utilities for bgserve
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{client, fixtures::FixtureTree};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let tree = FixtureTree::new();
//!     let provider = bgserve::Provider::with_defaults().unwrap();
//!     let handle = provider.create(tree.path("hello.txt")).unwrap();
//!     let body = client().get(handle.url()).send().await.unwrap();
//!     // ...
//! }
//! ```


pub use fixtures::FixtureTree;
pub use http::{client, raw_get};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
