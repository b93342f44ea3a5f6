//! # Transformers Module
//!
//! Transformer implementations. Transformers sit between a producer and a
//! consumer and turn one item stream into another.
//!
//! ## Available Transformers
//!
//! - [`GroupArrayTransformer`]: Buffers every item, groups the buffer by key on
//!   end of input, and re-emits a group item and/or the original items

/// Buffer-then-group transformer.
pub mod group_array;

pub use group_array::GroupArrayTransformer;
pub use group_array::buffer::GroupBuffer;
