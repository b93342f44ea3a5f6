//! Group-array transformer module.
//!
//! This module provides a transformer that collects a whole stream, groups it by a
//! key, and re-emits the result according to [`crate::options::GroupOptions`].

/// The `Open`/`Closed` buffer driven by the transformer.
pub mod buffer;
/// The group-array transformer implementation.
pub mod group_array_transformer;
/// Input types for the group-array transformer.
pub mod input;
/// Output types for the group-array transformer.
pub mod output;
/// Transformer trait implementation for group-array.
pub mod transformer;

pub use group_array_transformer::GroupArrayTransformer;
