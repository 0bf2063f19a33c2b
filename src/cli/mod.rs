//! Command-line interface: interactive play, evaluation runs and store statistics

pub mod commands;
pub mod config;
pub mod output;
