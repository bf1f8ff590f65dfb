//! Domain layer: pure types and computations, no I/O.
pub mod aggregates;
pub mod events;
pub mod pricing;
pub mod value_objects;
pub mod variations;
