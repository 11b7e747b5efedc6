//! Common test utilities
#![allow(unused_imports)] // Re-exports may not be used in all test files
#![allow(dead_code)]

pub mod harness;

pub use harness::{MemoryRig, TestHarness};
