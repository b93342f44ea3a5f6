use crate::output::{ItemStream, Output};
use crate::producer::{Producer, ProducerConfig};

/// Emits a fixed list of items, then ends.
///
/// Every call to `produce` replays the whole list.
#[derive(Debug, Clone)]
pub struct VecProducer<T> {
  data: Vec<T>,
  config: ProducerConfig,
}

impl<T: Clone + Send + 'static> VecProducer<T> {
  /// Creates a producer over `data`.
  pub fn new(data: Vec<T>) -> Self {
    Self {
      data,
      config: ProducerConfig::default(),
    }
  }
}

impl<T: Clone + Send + 'static> Output for VecProducer<T> {
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<T: Clone + Send + 'static> Producer for VecProducer<T> {
  fn produce(&mut self) -> Self::OutputStream {
    let stream = futures::stream::iter(self.data.clone().into_iter().map(Ok));
    Box::pin(stream)
  }

  fn set_config_impl(&mut self, config: ProducerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig {
    &self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::file::File;
  use futures::StreamExt;

  #[tokio::test]
  async fn test_vec_producer_replays_files() {
    let files = vec![File::new("a.hbs").with_contents("a"), File::new("b.hbs")];
    let mut producer = VecProducer::new(files.clone());

    let first: Vec<File> = producer.produce().map(|r| r.unwrap()).collect().await;
    let second: Vec<File> = producer.produce().map(|r| r.unwrap()).collect().await;

    assert_eq!(first, files);
    assert_eq!(second, files);
  }

  #[test]
  fn test_vec_producer_name() {
    let producer = VecProducer::<i32>::new(vec![]).with_name("templates".to_string());
    assert_eq!(producer.component_info().name, "templates");
  }
}
