// file: src/logging/mod.rs
// version: 1.0.0
// guid: 4b8f26d1-a903-4e57-bc14-78d05e3a9f62

//! Logging infrastructure

pub mod logger;
