pub mod forest;
pub mod simulation;
