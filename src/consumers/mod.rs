//! Consumers that end a grouping pipeline.

/// Consumer that collects every item.
pub mod vec;

pub use vec::VecConsumer;
