//! Shared utilities for the globetalk workspace.

pub mod logger;
pub mod time;
