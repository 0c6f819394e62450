//! Physics-driven layout.

pub mod force;

pub use force::Simulation;
