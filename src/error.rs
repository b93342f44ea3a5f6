//! # Error Handling
//!
//! Error types shared by every component of a grouping pipeline.
//!
//! ## Overview
//!
//! All streams in this crate yield `Result<T, StreamError>`. A component that
//! receives an `Err` item forwards it unchanged and stops; nothing in the crate
//! retries or swallows failures.
//!
//! ## Core Types
//!
//! - **StreamError**: Every failure a pipeline can report
//! - **ComponentInfo**: Component name and type information for error reporting
//! - **BoxError**: The error type returned by user callbacks
//!
//! ## Example
//!
//! ```rust
//! use group_array_stream::error::StreamError;
//!
//! let error = StreamError::InvalidArgument("expected a group key".to_string());
//! assert_eq!(error.to_string(), "invalid argument: expected a group key");
//! ```

use std::fmt;

/// Error type returned by user-supplied callbacks such as `group_fn`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error that occurred while building or running a pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StreamError {
  /// A component was constructed with a missing or unusable argument.
  ///
  /// Raised synchronously; no component instance is produced.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  /// Settings could not be parsed.
  #[error("invalid configuration: {0}")]
  Config(String),

  /// The configured `group_fn` callback returned an error.
  ///
  /// Remaining completion steps are aborted and nothing further is emitted.
  #[error("group callback failed in {component}: {message}")]
  Callback {
    /// The component whose callback failed.
    component: ComponentInfo,
    /// The callback's error message.
    message: String,
  },

  /// The grouping algorithm rejected its input.
  #[error("grouping failed: {0}")]
  Grouping(String),

  /// An error produced upstream of the component reporting it.
  #[error("upstream failure: {0}")]
  Upstream(String),

  /// An operation was attempted on a component that already completed.
  #[error("{component} is closed, cannot {operation}")]
  Closed {
    /// The component that rejected the operation.
    component: ComponentInfo,
    /// The rejected operation.
    operation: &'static str,
  },
}

impl StreamError {
  /// Wraps any error raised by a producer as an upstream failure.
  pub fn upstream(error: impl fmt::Display) -> Self {
    Self::Upstream(error.to_string())
  }

  /// Returns `true` for errors that surface at construction time.
  pub fn is_construction_error(&self) -> bool {
    matches!(self, Self::InvalidArgument(_) | Self::Config(_))
  }
}

impl From<serde_json::Error> for StreamError {
  fn from(error: serde_json::Error) -> Self {
    Self::Config(error.to_string())
  }
}

/// Information about a pipeline component.
///
/// This struct provides identifying information about a component,
/// including its name and type, which is useful for logging and error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl Default for ComponentInfo {
  fn default() -> Self {
    Self {
      name: "default".to_string(),
      type_name: "default".to_string(),
    }
  }
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}

impl fmt::Display for ComponentInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.type_name)
  }
}
