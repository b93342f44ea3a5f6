//! # Transformer Trait
//!
//! This module defines the `Transformer` trait for components that sit between a
//! producer and a consumer and turn one stream into another.
//!
//! ## Overview
//!
//! The Transformer trait provides:
//!
//! - **Stream Transformation**: Async transformation of input streams into output streams
//! - **Component Information**: Name and type information for logs and errors
//! - **Configuration**: `TransformerConfig` for naming
//!
//! ## Example
//!
//! ```rust
//! use group_array_stream::transformer::Transformer;
//! use group_array_stream::transformers::GroupArrayTransformer;
//! use group_array_stream::options::GroupOptions;
//! use group_array_stream::file::File;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut transformer = GroupArrayTransformer::new(GroupOptions::new("data.tags"))?;
//! let input = Box::pin(stream::iter(vec![Ok(File::new("one.hbs"))]));
//!
//! let mut output = transformer.transform(input).await;
//! while let Some(file) = output.next().await {
//!     println!("emitted: {:?}", file?.path());
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::ComponentInfo;
use crate::{input::Input, output::Output};
use async_trait::async_trait;

/// Configuration shared by all transformers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformerConfig {
  /// Optional name for identifying this transformer in logs and errors.
  pub name: Option<String>,
}

impl TransformerConfig {
  /// Sets the name for this transformer configuration.
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that transform data streams.
///
/// `transform` is called once per stream. Implementations own whatever per-stream
/// state they need; nothing is shared between two calls.
#[async_trait]
pub trait Transformer: Input + Output {
  /// Transforms a stream of input items into a stream of output items.
  ///
  /// An `Err` item in the input is an upstream failure and must be forwarded
  /// unchanged.
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream;

  /// Sets the configuration for this transformer.
  fn set_config(&mut self, config: TransformerConfig) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the transformer's configuration.
  fn config(&self) -> &TransformerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the transformer's configuration.
  fn config_mut(&mut self) -> &mut TransformerConfig {
    self.get_config_mut_impl()
  }

  /// Sets the name for this transformer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    self.config_mut().name = Some(name);
    self
  }

  /// Returns information about the component for logs and error reporting.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration.
  fn set_config_impl(&mut self, config: TransformerConfig);

  /// Returns the stored configuration.
  fn get_config_impl(&self) -> &TransformerConfig;

  /// Returns the stored configuration mutably.
  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig;
}
