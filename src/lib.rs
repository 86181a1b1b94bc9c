//! Consensus matrix validation and heatmap rendering.

pub mod cli;
pub mod config;
pub mod core;
pub mod seed;
