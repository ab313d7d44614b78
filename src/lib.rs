pub mod cli;
pub mod config;
pub mod forest;
pub mod simulation;
