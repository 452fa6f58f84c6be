// file: src/utils/mod.rs
// version: 1.0.0
// guid: 2a9c47e5-6b18-4d03-9f72-c84e50b1d6a3

//! Utility modules

pub mod prompt;
pub mod system;
