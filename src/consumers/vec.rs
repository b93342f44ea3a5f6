use crate::consumer::{Consumer, ConsumerConfig};
use crate::error::StreamError;
use crate::input::Input;
use crate::output::ItemStream;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::warn;

/// Collects items into a vector.
#[derive(Debug, Clone)]
pub struct VecConsumer<T> {
  vec: Vec<T>,
  config: ConsumerConfig,
}

impl<T: Send + 'static> Default for VecConsumer<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Send + 'static> VecConsumer<T> {
  /// Creates an empty consumer.
  pub fn new() -> Self {
    Self {
      vec: Vec::new(),
      config: ConsumerConfig::default(),
    }
  }

  /// Creates an empty consumer with room for `capacity` items.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      vec: Vec::with_capacity(capacity),
      config: ConsumerConfig::default(),
    }
  }

  /// Items collected so far.
  pub fn items(&self) -> &[T] {
    &self.vec
  }

  /// Consumes the consumer and returns the collected items.
  pub fn into_vec(self) -> Vec<T> {
    self.vec
  }
}

impl<T: Send + 'static> Input for VecConsumer<T> {
  type Input = T;
  type InputStream = ItemStream<T>;
}

#[async_trait]
impl<T: Send + 'static> Consumer for VecConsumer<T> {
  async fn consume(&mut self, mut stream: Self::InputStream) -> Result<(), StreamError> {
    while let Some(item) = stream.next().await {
      match item {
        Ok(value) => self.vec.push(value),
        Err(error) => {
          warn!(
            component = %self.component_info().name,
            collected = self.vec.len(),
            error = %error,
            "stream failed"
          );
          return Err(error);
        }
      }
    }
    Ok(())
  }

  fn set_config_impl(&mut self, config: ConsumerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ConsumerConfig {
    &self.config
  }
}
