//! Command line interface

pub mod commands;
pub mod display;
pub mod k8s;
pub mod manifest;
pub mod serve;

pub use commands::{CliArgs, Commands};
