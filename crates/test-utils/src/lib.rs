//! Shared fixtures for the tests of the deposit reclaim crates.

pub mod reclaim;
