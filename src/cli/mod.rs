// file: src/cli/mod.rs
// version: 1.0.0
// guid: 0d7c51b4-9e28-4a63-bf05-42a1d86c3e90

//! Command line interface module

pub mod args;
pub mod commands;
