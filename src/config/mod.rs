//! Configuration model for git-mgr.
//!
//! This module defines the Config struct that represents
//! `<config dir>/git-mgr/config.yaml`. It supports forward-compatible YAML
//! parsing (unknown fields are ignored), defaults for every field, and
//! validation of config values.

mod model;
mod operations;
mod types;


pub use model::Config;
