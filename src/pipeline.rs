//! # Pipeline
//!
//! Typestate builder wiring one producer, one transformer and one consumer.
//! Item types are checked at compile time: the transformer's input must match
//! the producer's output, and the consumer's input the transformer's output.
//!
//! ## Example
//!
//! ```rust
//! use group_array_stream::consumers::VecConsumer;
//! use group_array_stream::file::File;
//! use group_array_stream::options::GroupOptions;
//! use group_array_stream::pipeline::PipelineBuilder;
//! use group_array_stream::producers::VecProducer;
//! use group_array_stream::transformers::GroupArrayTransformer;
//!
//! # async fn example() -> Result<(), group_array_stream::error::StreamError> {
//! let consumer = PipelineBuilder::new()
//!     .producer(VecProducer::new(vec![File::new("one.hbs")]))
//!     .transformer(GroupArrayTransformer::new(GroupOptions::new("data.tags"))?)
//!     .consumer(VecConsumer::new())
//!     .run()
//!     .await?;
//! assert_eq!(consumer.into_vec().len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::error::StreamError;
use crate::{consumer::Consumer, producer::Producer, transformer::Transformer};
use tracing::{info, warn};

/// Builder state: nothing added yet.
pub struct Empty;
/// Builder state: a producer has been added.
pub struct HasProducer<P>(P);
/// Builder state: a producer and a transformer have been added.
pub struct HasTransformer<P, T>(P, T);

/// Builds a [`Pipeline`] one stage at a time.
pub struct PipelineBuilder<State> {
  state: State,
}

impl PipelineBuilder<Empty> {
  /// Starts an empty pipeline.
  pub fn new() -> Self {
    PipelineBuilder { state: Empty }
  }

  /// Adds the producer.
  pub fn producer<P>(self, producer: P) -> PipelineBuilder<HasProducer<P>>
  where
    P: Producer,
  {
    PipelineBuilder {
      state: HasProducer(producer),
    }
  }
}

impl Default for PipelineBuilder<Empty> {
  fn default() -> Self {
    Self::new()
  }
}

impl<P> PipelineBuilder<HasProducer<P>>
where
  P: Producer,
{
  /// Adds the transformer.
  pub fn transformer<T>(self, transformer: T) -> PipelineBuilder<HasTransformer<P, T>>
  where
    T: Transformer<Input = P::Output>,
    T::InputStream: From<P::OutputStream>,
  {
    let HasProducer(producer) = self.state;
    PipelineBuilder {
      state: HasTransformer(producer, transformer),
    }
  }
}

impl<P, T> PipelineBuilder<HasTransformer<P, T>>
where
  P: Producer,
  T: Transformer<Input = P::Output>,
  T::InputStream: From<P::OutputStream>,
{
  /// Adds the consumer and finishes the pipeline.
  pub fn consumer<C>(self, consumer: C) -> Pipeline<P, T, C>
  where
    C: Consumer<Input = T::Output>,
    C::InputStream: From<T::OutputStream>,
  {
    let HasTransformer(producer, transformer) = self.state;
    Pipeline {
      producer,
      transformer,
      consumer,
    }
  }
}

/// A complete producer → transformer → consumer pipeline.
pub struct Pipeline<P, T, C> {
  producer: P,
  transformer: T,
  consumer: C,
}

impl<P, T, C> Pipeline<P, T, C>
where
  P: Producer,
  T: Transformer<Input = P::Output>,
  T::InputStream: From<P::OutputStream>,
  C: Consumer<Input = T::Output>,
  C::InputStream: From<T::OutputStream>,
{
  /// Runs the pipeline to completion and returns the consumer.
  ///
  /// The first failure from any stage is returned instead.
  pub async fn run(mut self) -> Result<C, StreamError> {
    let producer = self.producer.component_info();
    let transformer = self.transformer.component_info();
    let consumer = self.consumer.component_info();
    info!(
      producer = %producer.name,
      transformer = %transformer.name,
      consumer = %consumer.name,
      "pipeline started"
    );

    let produced = self.producer.produce();
    let transformed = self.transformer.transform(produced.into()).await;

    match self.consumer.consume(transformed.into()).await {
      Ok(()) => {
        info!(consumer = %consumer.name, "pipeline finished");
        Ok(self.consumer)
      }
      Err(error) => {
        warn!(consumer = %consumer.name, error = %error, "pipeline failed");
        Err(error)
      }
    }
  }
}
