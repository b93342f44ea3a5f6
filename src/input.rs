//! Input trait for components that consume input streams.
//!
//! This module defines the [`Input`] trait for components that consume input streams.
//! It is implemented by transformers and consumers that receive data from upstream
//! components.
//!
//! # Key Concepts
//!
//! - **Input Type**: `Input::Input` is the item type, e.g. [`crate::file::File`]
//! - **InputStream**: A pinned, boxed async stream yielding `Result<Input, StreamError>`
//! - **Failure Channel**: An `Err` item is an upstream failure, forwarded unchanged
//!
//! # Quick Start
//!
//! ```rust
//! use group_array_stream::input::Input;
//! use group_array_stream::error::StreamError;
//! use group_array_stream::file::File;
//! use futures::Stream;
//! use std::pin::Pin;
//!
//! struct MyConsumer;
//!
//! impl Input for MyConsumer {
//!     type Input = File;
//!     type InputStream = Pin<Box<dyn Stream<Item = Result<File, StreamError>> + Send>>;
//! }
//! ```

use crate::error::StreamError;
use futures::Stream;
// Import for rustdoc link
#[allow(unused_imports)]
use crate::output::Output;

/// Trait for components that consume input streams.
///
/// Works together with [`Output`]: a pipeline only connects an output to an input
/// when their item types match.
pub trait Input {
  /// The type of items consumed from the input stream.
  type Input: Send + 'static;
  /// The input stream type that yields items of type `Self::Input`.
  type InputStream: Stream<Item = Result<Self::Input, StreamError>> + Send + 'static;
}
