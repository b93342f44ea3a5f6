//! Output trait for components that produce output streams.
//!
//! This module defines the [`Output`] trait for components that produce output streams.
//! It is implemented by producers and transformers that generate data for downstream
//! components.
//!
//! # Quick Start
//!
//! ```rust
//! use group_array_stream::output::Output;
//! use group_array_stream::error::StreamError;
//! use group_array_stream::file::File;
//! use futures::Stream;
//! use std::pin::Pin;
//!
//! struct MyProducer;
//!
//! impl Output for MyProducer {
//!     type Output = File;
//!     type OutputStream = Pin<Box<dyn Stream<Item = Result<File, StreamError>> + Send>>;
//! }
//! ```

// Import for rustdoc links
#[allow(unused_imports)]
use crate::input::Input;

use crate::error::StreamError;
use futures::Stream;
use std::pin::Pin;

/// The boxed stream type every built-in component uses on its ports.
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T, StreamError>> + Send>>;

/// Trait for components that can produce output streams.
///
/// This trait defines the interface for components that generate data streams.
/// It is implemented by producers and transformers that output data; its item type
/// must match the [`Input`] of whatever consumes it.
pub trait Output {
  /// The type of items produced by this output stream.
  type Output: Send + 'static;
  /// The output stream type that yields items of type `Self::Output`.
  type OutputStream: Stream<Item = Result<Self::Output, StreamError>> + Send + 'static;
}
