//! Groups a handful of posts by their `data.tags` front matter and renders each
//! post with a list of related posts taken from the group item.
//!
//! ```text
//! cargo run --example tag_index
//! ```

use async_trait::async_trait;
use futures::StreamExt;
use group_array_stream::consumer::{Consumer, ConsumerConfig};
use group_array_stream::error::StreamError;
use group_array_stream::file::File;
use group_array_stream::group::GroupResult;
use group_array_stream::input::Input;
use group_array_stream::options::GroupOptions;
use group_array_stream::output::ItemStream;
use group_array_stream::pipeline::PipelineBuilder;
use group_array_stream::producers::VecProducer;
use group_array_stream::transformers::GroupArrayTransformer;
use serde_json::json;

struct RenderConsumer {
  tags: Option<GroupResult>,
  pages: Vec<(String, String)>,
  config: ConsumerConfig,
}

impl Input for RenderConsumer {
  type Input = File;
  type InputStream = ItemStream<File>;
}

#[async_trait]
impl Consumer for RenderConsumer {
  async fn consume(&mut self, mut stream: Self::InputStream) -> Result<(), StreamError> {
    while let Some(file) = stream.next().await {
      let file = file?;
      if let Some(group) = file.group() {
        self.tags = Some(group.clone());
        continue;
      }

      let template = file
        .contents()
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .unwrap_or_default();
      let title = file
        .lookup("data.title")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
      let mut index = String::new();
      if let Some(tags) = &self.tags {
        for (tag, members) in tags.iter() {
          let titles: Vec<String> = members
            .iter()
            .filter_map(|m| m.lookup("data.title"))
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
          index.push_str(&format!("  {tag}: {}\n", titles.join(", ")));
        }
      }

      let page = template
        .replace("{{title}}", &title)
        .replace("{{tags}}", &index);
      let name = format!("{}.html", file.stem().unwrap_or("index"));
      self.pages.push((name, page));
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

fn post(name: &str, title: &str, tags: &[&str]) -> File {
  File::new(format!("templates/{name}.hbs"))
    .with_contents("# {{title}}\n\nAll tags:\n{{tags}}")
    .with_attribute("data", json!({ "title": title, "tags": tags }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let posts = vec![
    post("intro", "Introduction", &["rust"]),
    post("streams", "Async streams", &["rust", "async"]),
    post("tokio", "Tokio tasks", &["async"]),
  ];

  let renderer = RenderConsumer {
    tags: None,
    pages: Vec::new(),
    config: ConsumerConfig::default().with_name("render".to_string()),
  };

  let renderer = PipelineBuilder::new()
    .producer(VecProducer::new(posts))
    .transformer(GroupArrayTransformer::new(
      GroupOptions::new("data.tags").with_group_file(true),
    )?)
    .consumer(renderer)
    .run()
    .await?;

  for (name, page) in renderer.pages {
    println!("--- {name}\n{page}");
  }
  Ok(())
}
