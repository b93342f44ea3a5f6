//! # group-array-stream
//!
//! Buffer a stream of file items, group them by key, and re-emit the result.
//!
//! The crate is built around one transformer,
//! [`GroupArrayTransformer`](transformers::GroupArrayTransformer), that sits in a
//! producer → transformer → consumer pipeline. It accepts every item it is given,
//! and only when its input ends does it group the buffer and decide what to send
//! downstream:
//!
//! - an optional callback receives the groups (`group_fn`)
//! - an optional synthetic group item is emitted first (`group_file`)
//! - the original items follow in arrival order unless `flush` is `false`
//!
//! ## Quick Start
//!
//! ```rust
//! use group_array_stream::consumers::VecConsumer;
//! use group_array_stream::file::File;
//! use group_array_stream::options::GroupOptions;
//! use group_array_stream::pipeline::PipelineBuilder;
//! use group_array_stream::producers::VecProducer;
//! use group_array_stream::transformers::GroupArrayTransformer;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), group_array_stream::error::StreamError> {
//! let files = vec![
//!     File::new("one.hbs").with_attribute("data", json!({"tags": ["foo"]})),
//!     File::new("two.hbs").with_attribute("data", json!({"tags": ["foo", "bar"]})),
//! ];
//!
//! let emitted = PipelineBuilder::new()
//!     .producer(VecProducer::new(files))
//!     .transformer(GroupArrayTransformer::new(
//!         GroupOptions::new("data.tags").with_group_file(true),
//!     )?)
//!     .consumer(VecConsumer::new())
//!     .run()
//!     .await?
//!     .into_vec();
//!
//! let group = emitted[0].group().unwrap();
//! assert_eq!(group.get("foo").unwrap().len(), 2);
//! assert_eq!(emitted.len(), 3);
//! # Ok(())
//! # }
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Consumer trait and configuration.
pub mod consumer;
/// Built-in consumers.
pub mod consumers;
/// Error types.
pub mod error;
/// The file item model.
pub mod file;
/// Group keys, group results and the grouping algorithm.
pub mod group;
/// Input trait for components that consume streams.
pub mod input;
/// Options for the grouping transformer.
pub mod options;
/// Output trait for components that produce streams.
pub mod output;
/// Typestate pipeline builder.
pub mod pipeline;
/// Producer trait and configuration.
pub mod producer;
/// Built-in producers.
pub mod producers;
/// Transformer trait and configuration.
pub mod transformer;
/// Built-in transformers.
pub mod transformers;

pub use consumer::{Consumer, ConsumerConfig};
pub use error::StreamError;
pub use file::File;
pub use group::{GroupArray, GroupKey, GroupResult, Grouper};
pub use input::Input;
pub use options::{GroupOptions, GroupSettings};
pub use output::{ItemStream, Output};
pub use producer::{Producer, ProducerConfig};
pub use transformer::{Transformer, TransformerConfig};

#[cfg(test)]
mod pipeline_test;
