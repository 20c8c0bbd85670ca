//! Configuration module for Tandem
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Application settings persistence

pub mod paths;
pub mod settings;

pub use paths::TandemPaths;
pub use settings::Settings;
