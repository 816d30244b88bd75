pub mod simulation;
pub mod tax;
