//! # Pipeline Test Suite
//!
//! End-to-end runs of producer → `GroupArrayTransformer` → consumer, for both
//! the replaying and the push-based producer.

use crate::consumers::VecConsumer;
use crate::error::StreamError;
use crate::file::File;
use crate::options::GroupOptions;
use crate::pipeline::PipelineBuilder;
use crate::producers::{ChannelProducer, VecProducer};
use crate::transformers::GroupArrayTransformer;
use serde_json::json;

fn tagged(path: &str, tag: &str) -> File {
  File::new(path).with_attribute("data", json!({ "tags": [tag] }))
}

#[tokio::test]
async fn test_vec_pipeline_with_group_file() {
  let files = vec![tagged("a.hbs", "foo"), tagged("b.hbs", "bar")];
  let transformer =
    GroupArrayTransformer::new(GroupOptions::new("data.tags").with_group_file(true)).unwrap();

  let emitted = PipelineBuilder::new()
    .producer(VecProducer::new(files.clone()))
    .transformer(transformer)
    .consumer(VecConsumer::new())
    .run()
    .await
    .unwrap()
    .into_vec();

  assert_eq!(emitted.len(), 3);
  assert_eq!(
    emitted[0].group().unwrap().keys().collect::<Vec<_>>(),
    vec!["foo", "bar"]
  );
  assert_eq!(&emitted[1..], &files[..]);
}

#[tokio::test]
async fn test_channel_pipeline_groups_after_sender_drops() {
  let (tx, producer) = ChannelProducer::channel(2);
  let transformer = GroupArrayTransformer::new(
    GroupOptions::new("data.tags")
      .with_group_file(true)
      .with_flush(false),
  )
  .unwrap();

  let pipeline = PipelineBuilder::new()
    .producer(producer)
    .transformer(transformer)
    .consumer(VecConsumer::new());
  let running = tokio::spawn(pipeline.run());

  for i in 0..5 {
    tx.send(Ok(tagged(&format!("file-{i}.hbs"), "foo")))
      .await
      .unwrap();
  }
  drop(tx);

  let emitted = running.await.unwrap().unwrap().into_vec();

  assert_eq!(emitted.len(), 1);
  assert_eq!(emitted[0].group().unwrap().get("foo").unwrap().len(), 5);
}

#[tokio::test]
async fn test_channel_pipeline_upstream_failure() {
  let (tx, producer) = ChannelProducer::channel(2);
  let transformer = GroupArrayTransformer::new(GroupOptions::new("data.tags")).unwrap();
  let running = tokio::spawn(
    PipelineBuilder::new()
      .producer(producer)
      .transformer(transformer)
      .consumer(VecConsumer::<File>::new())
      .run(),
  );

  tx.send(Ok(tagged("a.hbs", "foo"))).await.unwrap();
  tx.send(Err(StreamError::Upstream("front matter".to_string())))
    .await
    .unwrap();
  drop(tx);

  let result = running.await.unwrap();
  assert!(matches!(result, Err(StreamError::Upstream(ref m)) if m == "front matter"));
}

#[tokio::test]
async fn test_pipeline_callback_failure() {
  let transformer = GroupArrayTransformer::new(
    GroupOptions::new("data.tags").with_group_fn(|_| Err("no cache".into())),
  )
  .unwrap();

  let result = PipelineBuilder::new()
    .producer(VecProducer::new(vec![tagged("a.hbs", "foo")]))
    .transformer(transformer)
    .consumer(VecConsumer::new())
    .run()
    .await;

  assert!(matches!(result, Err(StreamError::Callback { .. })));
}
