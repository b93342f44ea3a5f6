//! # Producer Trait
//!
//! Producers sit at the start of a pipeline and emit the items a transformer
//! will see. A producer's stream ending is the end-of-input signal downstream.

use crate::error::ComponentInfo;
use crate::output::Output;

/// Configuration for a producer component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProducerConfig {
  /// Optional name for identifying this producer in logs and errors.
  pub name: Option<String>,
}

impl ProducerConfig {
  /// Sets the name for this producer configuration.
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that start a stream.
pub trait Producer: Output {
  /// Produces the output stream. The stream ending signals end of input.
  fn produce(&mut self) -> Self::OutputStream;

  /// Sets the configuration for this producer.
  fn set_config(&mut self, config: ProducerConfig) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the producer's configuration.
  fn config(&self) -> &ProducerConfig {
    self.get_config_impl()
  }

  /// Sets the name for this producer.
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
    ComponentInfo {
      name: self.config().name().unwrap_or_else(|| "producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration.
  fn set_config_impl(&mut self, config: ProducerConfig);

  /// Returns the stored configuration.
  fn get_config_impl(&self) -> &ProducerConfig;
}
