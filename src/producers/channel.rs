use crate::error::StreamError;
use crate::output::{ItemStream, Output};
use crate::producer::{Producer, ProducerConfig};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Push-based producer.
///
/// Upstream code sends `Ok(item)` for each item or `Err(error)` to fail the
/// pipeline. Dropping every sender ends the stream, which is the end-of-input
/// signal for whatever consumes it.
#[derive(Debug)]
pub struct ChannelProducer<T> {
  rx: Option<mpsc::Receiver<Result<T, StreamError>>>,
  config: ProducerConfig,
}

impl<T: Send + 'static> ChannelProducer<T> {
  /// Creates a producer reading from `rx`.
  pub fn new(rx: mpsc::Receiver<Result<T, StreamError>>) -> Self {
    Self {
      rx: Some(rx),
      config: ProducerConfig::default(),
    }
  }

  /// Creates a bounded channel and the producer reading from it.
  pub fn channel(capacity: usize) -> (mpsc::Sender<Result<T, StreamError>>, Self) {
    let (tx, rx) = mpsc::channel(capacity);
    (tx, Self::new(rx))
  }
}

impl<T: Send + 'static> Output for ChannelProducer<T> {
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<T: Send + 'static> Producer for ChannelProducer<T> {
  /// Takes the receiver; later calls yield an empty stream.
  fn produce(&mut self) -> Self::OutputStream {
    match self.rx.take() {
      Some(rx) => Box::pin(ReceiverStream::new(rx)),
      None => Box::pin(futures::stream::empty()),
    }
  }

  fn set_config_impl(&mut self, config: ProducerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig {
    &self.config
  }
}
