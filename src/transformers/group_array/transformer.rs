use crate::error::ComponentInfo;
use crate::transformer::{Transformer, TransformerConfig};
use crate::transformers::group_array::buffer::GroupBuffer;
use crate::transformers::group_array::group_array_transformer::GroupArrayTransformer;
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use tracing::warn;

#[async_trait]
impl Transformer for GroupArrayTransformer {
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let component = self.component_info();
    let mut buffer = GroupBuffer::new(Arc::clone(&self.options), component.clone());

    Box::pin(async_stream::stream! {
        let mut input = input;

        while let Some(item) = input.next().await {
            match item {
                Ok(file) => {
                    if let Err(error) = buffer.push(file) {
                        yield Err(error);
                        return;
                    }
                }
                Err(error) => {
                    let discarded = buffer.abort();
                    warn!(
                        component = %component.name,
                        discarded,
                        error = %error,
                        "upstream failed, dropping buffered items"
                    );
                    yield Err(error);
                    return;
                }
            }
        }

        match buffer.finish() {
            Ok(files) => {
                for file in files {
                    yield Ok(file);
                }
            }
            Err(error) => yield Err(error),
        }
    })
  }

  fn set_config_impl(&mut self, config: TransformerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| "group_array_transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::StreamError;
  use crate::file::File;
  use crate::group::{GroupKey, GroupResult, Grouper};
  use crate::options::GroupOptions;
  use futures::TryStreamExt;
  use futures::stream;
  use proptest::prelude::*;
  use serde_json::{Value, json};
  use std::sync::Mutex;

  fn tagged(path: &str, tags: Value) -> File {
    File::new(path)
      .with_contents("")
      .with_attribute("data", json!({ "tags": tags }))
  }

  async fn run(options: GroupOptions, files: Vec<File>) -> Result<Vec<File>, StreamError> {
    let mut transformer = GroupArrayTransformer::new(options)?;
    let input = Box::pin(stream::iter(files.into_iter().map(Ok)));
    transformer.transform(input).await.try_collect().await
  }

  fn capture() -> (Arc<Mutex<Option<GroupResult>>>, GroupOptions) {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let options = GroupOptions::new("data.tags").with_group_fn(move |group| {
      *sink.lock().unwrap() = Some(group.clone());
      Ok(())
    });
    (seen, options)
  }

  #[tokio::test]
  async fn test_group_single_file() {
    let (seen, options) = capture();
    let file = tagged("one.hbs", json!(["foo"]));

    let emitted = run(options, vec![file.clone()]).await.unwrap();

    let group = seen.lock().unwrap().take().unwrap();
    assert_eq!(group.keys().collect::<Vec<_>>(), vec!["foo"]);
    assert_eq!(group.get("foo").unwrap()[0].basename(), Some("one.hbs"));
    assert_eq!(emitted, vec![file]);
  }

  #[tokio::test]
  async fn test_array_keys_place_item_in_every_group() {
    let (seen, options) = capture();
    let files: Vec<File> = (0..10)
      .map(|i| tagged(&format!("file-{i}.hbs"), json!(["foo", "bar"])))
      .collect();

    run(options, files).await.unwrap();

    let group = seen.lock().unwrap().take().unwrap();
    assert_eq!(group.keys().collect::<Vec<_>>(), vec!["foo", "bar"]);
    for key in ["foo", "bar"] {
      let members = group.get(key).unwrap();
      assert_eq!(members.len(), 10);
      for (i, file) in members.iter().enumerate() {
        assert_eq!(file.basename(), Some(format!("file-{i}.hbs").as_str()));
      }
    }
  }

  #[tokio::test]
  async fn test_files_with_different_data() {
    let (seen, options) = capture();
    let files: Vec<File> = (0..10)
      .map(|i| {
        let file = File::new(format!("file-{i}.hbs"));
        if i % 2 == 0 {
          file.with_attribute("data", json!({ "tags": ["foo"] }))
        } else if i % 3 == 0 {
          file.with_attribute("data", json!({ "tags": ["bar"] }))
        } else {
          file
        }
      })
      .collect();

    let emitted = run(options, files).await.unwrap();

    let group = seen.lock().unwrap().take().unwrap();
    assert_eq!(group.keys().collect::<Vec<_>>(), vec!["foo", "bar"]);
    let foo: Vec<_> = group.get("foo").unwrap().iter().map(|f| f.basename()).collect();
    let bar: Vec<_> = group.get("bar").unwrap().iter().map(|f| f.basename()).collect();
    assert_eq!(
      foo,
      vec![
        Some("file-0.hbs"),
        Some("file-2.hbs"),
        Some("file-4.hbs"),
        Some("file-6.hbs"),
        Some("file-8.hbs")
      ]
    );
    assert_eq!(bar, vec![Some("file-3.hbs"), Some("file-9.hbs")]);
    assert_eq!(emitted.len(), 10);
  }

  #[tokio::test]
  async fn test_group_by_custom_function() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let by_dir = GroupKey::func(|file: &File| {
      file
        .dirname()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
    });
    let options = GroupOptions::new(by_dir).with_group_fn(move |group| {
      *sink.lock().unwrap() = Some(group.clone());
      Ok(())
    });
    let mut files: Vec<File> = (0..10)
      .map(|i| File::new(format!("/site/foo/file-{i}.hbs")))
      .collect();
    files.extend((0..10).map(|i| File::new(format!("/site/bar/file-{i}.hbs"))));

    run(options, files).await.unwrap();

    let group = seen.lock().unwrap().take().unwrap();
    assert_eq!(group.keys().collect::<Vec<_>>(), vec!["foo", "bar"]);
    for i in 0..10 {
      let foo = &group.get("foo").unwrap()[i];
      let bar = &group.get("bar").unwrap()[i];
      assert_eq!(foo.basename(), Some(format!("file-{i}.hbs").as_str()));
      assert_eq!(foo.dirname(), Some(std::path::Path::new("/site/foo")));
      assert_eq!(bar.dirname(), Some(std::path::Path::new("/site/bar")));
    }
  }

  #[tokio::test]
  async fn test_group_file_precedes_flushed_files() {
    let file = tagged("one.hbs", json!(["foo"]));
    let options = GroupOptions::new("data.tags").with_group_file(true);

    let emitted = run(options, vec![file.clone()]).await.unwrap();

    assert_eq!(emitted.len(), 2);
    let group = emitted[0].group().unwrap();
    assert_eq!(group.keys().collect::<Vec<_>>(), vec!["foo"]);
    assert_eq!(group.get("foo").unwrap(), &[file.clone()]);
    assert_eq!(emitted[0].path(), None);
    assert_eq!(emitted[0].contents(), None);
    assert_eq!(emitted[1], file);
  }

  #[tokio::test]
  async fn test_no_flush_emits_nothing() {
    let (seen, options) = capture();
    let options = options.with_flush(false);

    let emitted = run(options, vec![tagged("one.hbs", json!(["foo"]))])
      .await
      .unwrap();

    assert!(emitted.is_empty());
    let group = seen.lock().unwrap().take().unwrap();
    assert_eq!(group.get("foo").unwrap()[0].basename(), Some("one.hbs"));
  }

  #[tokio::test]
  async fn test_group_file_without_flush_emits_only_group() {
    let options = GroupOptions::new("data.tags")
      .with_group_file(true)
      .with_flush(false);

    let emitted = run(options, vec![tagged("one.hbs", json!(["foo"]))])
      .await
      .unwrap();

    assert_eq!(emitted.len(), 1);
    let group = emitted[0].group().unwrap();
    assert_eq!(group.get("foo").unwrap()[0].basename(), Some("one.hbs"));
  }

  #[tokio::test]
  async fn test_unmatched_files_pass_through_unchanged() {
    let (seen, options) = capture();
    let files = vec![
      File::new("a.hbs").with_contents("alpha"),
      File::new("b.hbs").with_attribute("data", json!({ "title": "B" })),
      File::new("c.hbs").with_attribute("data", json!({ "tags": null })),
    ];

    let emitted = run(options, files.clone()).await.unwrap();

    assert!(seen.lock().unwrap().take().unwrap().is_empty());
    assert_eq!(emitted, files);
  }

  #[tokio::test]
  async fn test_empty_stream_still_completes() {
    let options = GroupOptions::new("data.tags").with_group_file(true);

    let emitted = run(options, Vec::new()).await.unwrap();

    assert_eq!(emitted.len(), 1);
    assert!(emitted[0].group().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_callback_failure_aborts_emission() {
    let options = GroupOptions::new("data.tags")
      .with_group_file(true)
      .with_group_fn(|_| Err("boom".into()));
    let mut transformer = GroupArrayTransformer::new(options)
      .unwrap()
      .with_name("tags".to_string());
    let input = Box::pin(stream::iter(vec![Ok(tagged("one.hbs", json!(["foo"])))]));

    let output: Vec<_> = transformer.transform(input).await.collect().await;

    assert_eq!(output.len(), 1);
    match &output[0] {
      Err(StreamError::Callback { component, message }) => {
        assert_eq!(component.name, "tags");
        assert_eq!(message, "boom");
      }
      other => panic!("expected callback failure, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_upstream_failure_passes_through() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let options = GroupOptions::new("data.tags")
      .with_group_file(true)
      .with_group_fn(move |_| {
        *counter.lock().unwrap() += 1;
        Ok(())
      });
    let mut transformer = GroupArrayTransformer::new(options).unwrap();
    let upstream = StreamError::Upstream("read failed".to_string());
    let input = Box::pin(stream::iter(vec![
      Ok(tagged("one.hbs", json!(["foo"]))),
      Err(upstream.clone()),
      Ok(tagged("two.hbs", json!(["foo"]))),
    ]));

    let output: Vec<_> = transformer.transform(input).await.collect().await;

    assert_eq!(output, vec![Err(upstream)]);
    assert_eq!(*calls.lock().unwrap(), 0);
  }

  #[derive(Debug)]
  struct FailingGrouper;

  impl Grouper for FailingGrouper {
    fn group(&self, _: &[File], _: &GroupKey, _: &[Value]) -> Result<GroupResult, StreamError> {
      Err(StreamError::Grouping("index unavailable".to_string()))
    }
  }

  #[tokio::test]
  async fn test_grouper_failure_propagates() {
    let options = GroupOptions::new("data.tags").with_grouper(FailingGrouper);

    let error = run(options, vec![tagged("one.hbs", json!(["foo"]))])
      .await
      .unwrap_err();

    assert_eq!(error, StreamError::Grouping("index unavailable".to_string()));
  }

  #[tokio::test]
  async fn test_extra_args_group_by_two_levels() {
    let options = GroupOptions::new("data.tag")
      .with_extra_arg(json!("data.year"))
      .with_group_file(true);
    let files = vec![
      File::new("a.hbs").with_attribute("data", json!({ "tag": "foo", "year": 2015 })),
      File::new("b.hbs").with_attribute("data", json!({ "tag": "foo", "year": 2016 })),
    ];

    let emitted = run(options, files.clone()).await.unwrap();

    let group = emitted[0].group().unwrap();
    assert_eq!(group.get_path(&["foo", "2015"]).unwrap(), &files[..1]);
    assert_eq!(group.get_path(&["foo", "2016"]).unwrap(), &files[1..]);
    assert_eq!(&emitted[1..], &files[..]);
  }

  #[test]
  fn test_non_path_extra_arg_fails_at_construction() {
    let options = GroupOptions::new("data.tag").with_extra_arg(json!({ "depth": 2 }));

    let error = GroupArrayTransformer::new(options).unwrap_err();

    assert!(matches!(error, StreamError::InvalidArgument(_)));
  }

  #[derive(Debug)]
  struct FirstTagOnly;

  impl Grouper for FirstTagOnly {
    fn group(
      &self,
      files: &[File],
      key: &GroupKey,
      extra_args: &[Value],
    ) -> Result<GroupResult, StreamError> {
      let limit = extra_args
        .first()
        .and_then(Value::as_u64)
        .ok_or_else(|| StreamError::Grouping("expected a key limit".to_string()))?;
      let mut result = GroupResult::new();
      for file in files {
        for tag in key.keys_for(file).into_iter().take(limit as usize) {
          result.insert(tag, file.clone());
        }
      }
      Ok(result)
    }
  }

  #[tokio::test]
  async fn test_extra_args_reach_custom_grouper() {
    let options = GroupOptions::new("data.tags")
      .with_grouper(FirstTagOnly)
      .with_extra_arg(json!(1))
      .with_group_file(true)
      .with_flush(false);

    let emitted = run(options, vec![tagged("one.hbs", json!(["foo", "bar"]))])
      .await
      .unwrap();

    let group = emitted[0].group().unwrap();
    assert_eq!(group.keys().collect::<Vec<_>>(), vec!["foo"]);
  }

  #[tokio::test]
  async fn test_each_transform_call_has_its_own_buffer() {
    let options = GroupOptions::new("data.tags").with_group_file(true);
    let mut transformer = GroupArrayTransformer::new(options).unwrap();

    let first: Vec<File> = transformer
      .transform(Box::pin(stream::iter(vec![Ok(tagged("a.hbs", json!("x")))])))
      .await
      .try_collect()
      .await
      .unwrap();
    let second: Vec<File> = transformer
      .transform(Box::pin(stream::iter(vec![Ok(tagged("b.hbs", json!("y")))])))
      .await
      .try_collect()
      .await
      .unwrap();

    assert_eq!(first[0].group().unwrap().keys().collect::<Vec<_>>(), vec!["x"]);
    assert_eq!(second[0].group().unwrap().keys().collect::<Vec<_>>(), vec!["y"]);
  }

  #[test]
  fn test_missing_group_key_is_invalid() {
    let error = GroupArrayTransformer::new(GroupOptions::default()).unwrap_err();
    assert_eq!(
      error,
      StreamError::InvalidArgument("expected a group key".to_string())
    );
  }

  #[test]
  fn test_blank_group_key_is_invalid() {
    assert!(matches!(
      GroupArrayTransformer::new(GroupOptions::new("  ")),
      Err(StreamError::InvalidArgument(_))
    ));
    assert!(matches!(
      GroupArrayTransformer::new(GroupOptions::new("data..tags")),
      Err(StreamError::InvalidArgument(_))
    ));
  }

  #[test]
  fn test_component_info_uses_name() {
    let transformer = GroupArrayTransformer::new(GroupOptions::new("data.tags")).unwrap();
    assert_eq!(transformer.component_info().name, "group_array_transformer");

    let named = transformer.with_name("tags".to_string());
    assert_eq!(named.component_info().name, "tags");
    assert!(named.component_info().type_name.contains("GroupArrayTransformer"));
  }

  proptest! {
    #[test]
    fn prop_flush_preserves_arrival_order(tags in prop::collection::vec(
      prop::option::of(prop::collection::vec("[a-c]", 0..3)),
      0..20,
    )) {
      let files: Vec<File> = tags
        .iter()
        .enumerate()
        .map(|(i, tags)| match tags {
          Some(tags) => tagged(&format!("file-{i}.hbs"), json!(tags)),
          None => File::new(format!("file-{i}.hbs")),
        })
        .collect();

      let emitted = futures::executor::block_on(run(GroupOptions::new("data.tags"), files.clone()))
        .unwrap();

      prop_assert_eq!(emitted, files);
    }
  }
}
