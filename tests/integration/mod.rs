//! Integration tests for bgserve
//!
//! These tests run real background servers on ephemeral loopback ports and
//! talk to them over HTTP.

pub mod provider_tests;
