//! Helpers shared by the integration test binaries.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

pub mod cluster_skip;
pub mod database;
