// src/config/mod.rs

pub mod calc_config;

// Re-export main types for convenience
pub use calc_config::CalcConfig;
