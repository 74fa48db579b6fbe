//! Command implementations.

pub mod events;
