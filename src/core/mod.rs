// src/core/mod.rs

pub mod directory_location;
pub mod result_output;
