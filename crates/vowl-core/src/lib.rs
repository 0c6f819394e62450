//! VOWL Core Types and Definitions
//!
//! This crate provides the foundational types for the VOWL graph
//! visualization engine. It includes:
//!
//! - **Geometry**: points, sizes, and the pure link-geometry functions
//!   used for curved edge paths ([`geometry`] module)
//! - **Elements**: the node/property/link data model ([`elements`] module)
//! - **Draw**: retained scene-graph primitives and the draw contracts that
//!   concrete node and property shapes implement ([`draw`] module)

pub mod draw;
pub mod elements;
pub mod geometry;
