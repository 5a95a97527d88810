//! Linkrotator - backup link pool rotation service
//!
//! This library generates fixed-size pools of obfuscated backup links per
//! project and serves them in round-robin order through a persisted cursor.
//!
//! # Architecture
//! - `generator`: obfuscated URL construction with injected clock/randomness
//! - `storages`: key-value storage backends (file, memory)
//! - `rotation`: pool lifecycle, cursor advancement, import/export
//! - `config`: environment-driven configuration
//! - `cli` / `commands`: command-line interface

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod generator;
pub mod logging;
pub mod rotation;
pub mod storages;
pub mod structs;
pub mod utils;
