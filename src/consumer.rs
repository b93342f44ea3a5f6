//! # Consumer Trait
//!
//! Consumers terminate a pipeline. They drain the stream they are given and
//! report the first failure they see.
//!
//! ## Example
//!
//! ```rust
//! use group_array_stream::consumer::Consumer;
//! use group_array_stream::consumers::VecConsumer;
//! use group_array_stream::file::File;
//! use futures::stream;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut consumer = VecConsumer::<File>::new();
//! consumer
//!     .consume(Box::pin(stream::iter(vec![Ok(File::new("a.hbs"))])))
//!     .await?;
//! assert_eq!(consumer.into_vec().len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::error::{ComponentInfo, StreamError};
use crate::input::Input;
use async_trait::async_trait;

/// Configuration for a consumer component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumerConfig {
  /// Name for identifying this consumer in logs and errors; empty means unnamed.
  pub name: String,
}

impl ConsumerConfig {
  /// Sets the name for this consumer configuration.
  pub fn with_name(mut self, name: String) -> Self {
    self.name = name;
    self
  }

  /// Returns the current name.
  pub fn name(&self) -> &str {
    &self.name
  }
}

/// Trait for components that end a stream.
#[async_trait]
pub trait Consumer: Input {
  /// Drains the stream.
  ///
  /// Returns the first `Err` item seen; items after it are not read.
  async fn consume(&mut self, stream: Self::InputStream) -> Result<(), StreamError>;

  /// Sets the configuration for this consumer.
  fn set_config(&mut self, config: ConsumerConfig) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the consumer's configuration.
  fn config(&self) -> &ConsumerConfig {
    self.get_config_impl()
  }

  /// Sets the name for this consumer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    let config = self.get_config_impl().clone().with_name(name);
    self.set_config(config);
    self
  }

  /// Returns information about the component for logs and error reporting.
  fn component_info(&self) -> ComponentInfo {
    let name = self.config().name();
    ComponentInfo {
      name: if name.is_empty() {
        "consumer".to_string()
      } else {
        name.to_string()
      },
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration.
  fn set_config_impl(&mut self, config: ConsumerConfig);

  /// Returns the stored configuration.
  fn get_config_impl(&self) -> &ConsumerConfig;
}
