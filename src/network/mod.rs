// file: src/network/mod.rs
// version: 1.0.0
// guid: 6c3e80a1-d752-4f9b-b046-21a8e59d0c74

//! Network operations for the bootstrap orchestrator

pub mod keys;

pub use keys::KeyFetcher;
