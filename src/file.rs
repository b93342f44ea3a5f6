//! # File Items
//!
//! [`File`] is the item type that flows through a grouping pipeline: a path-like
//! identity, an opaque content buffer, and an open-ended bag of attributes that
//! upstream stages fill in (parsed front matter under `data`, for instance).
//!
//! Nothing in this crate reads `contents`. Attributes are only read through
//! [`File::lookup`], which is how path-based group keys are resolved.
//!
//! ## Example
//!
//! ```rust
//! use group_array_stream::file::File;
//! use serde_json::json;
//!
//! let file = File::new("templates/one.hbs")
//!     .with_contents("{{title}}")
//!     .with_attribute("data", json!({"tags": ["foo", "bar"]}));
//!
//! assert_eq!(file.lookup("data.tags.1"), Some(json!("bar")));
//! assert_eq!(file.lookup("basename"), Some(json!("one.hbs")));
//! ```

use crate::group::GroupResult;
use bytes::Bytes;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A unit of streaming data with identity, content and attributes.
///
/// Cloning is cheap: contents are reference counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
  path: Option<PathBuf>,
  contents: Option<Bytes>,
  attributes: Map<String, Value>,
  group: Option<GroupResult>,
}

impl File {
  /// Creates a file with the given path and no contents.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: Some(path.into()),
      ..Self::default()
    }
  }

  /// Creates a synthetic item whose only content is a group result.
  ///
  /// Group items have no path and no contents.
  pub fn group_file(group: GroupResult) -> Self {
    Self {
      group: Some(group),
      ..Self::default()
    }
  }

  /// Sets the contents.
  pub fn with_contents(mut self, contents: impl Into<Bytes>) -> Self {
    self.contents = Some(contents.into());
    self
  }

  /// Attaches an attribute, replacing any previous value under the same name.
  pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
    self.attributes.insert(name.into(), value);
    self
  }

  /// Attaches an attribute and returns the value it replaced.
  pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
    self.attributes.insert(name.into(), value)
  }

  /// Replaces the contents.
  pub fn set_contents(&mut self, contents: impl Into<Bytes>) {
    self.contents = Some(contents.into());
  }

  /// The file's path, if it has one.
  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  /// The file's contents, if any.
  pub fn contents(&self) -> Option<&Bytes> {
    self.contents.as_ref()
  }

  /// All attributes.
  pub fn attributes(&self) -> &Map<String, Value> {
    &self.attributes
  }

  /// A single top-level attribute.
  pub fn attribute(&self, name: &str) -> Option<&Value> {
    self.attributes.get(name)
  }

  /// The final path component, e.g. `one.hbs`.
  pub fn basename(&self) -> Option<&str> {
    self.path()?.file_name()?.to_str()
  }

  /// Everything but the final path component.
  pub fn dirname(&self) -> Option<&Path> {
    self.path()?.parent()
  }

  /// The basename without its extension.
  pub fn stem(&self) -> Option<&str> {
    self.path()?.file_stem()?.to_str()
  }

  /// The extension including the leading dot, e.g. `.hbs`.
  pub fn extname(&self) -> Option<String> {
    let ext = self.path()?.extension()?.to_str()?;
    Some(format!(".{ext}"))
  }

  /// The group result carried by a synthetic group item.
  pub fn group(&self) -> Option<&GroupResult> {
    self.group.as_ref()
  }

  /// Returns `true` if this is a synthetic group item.
  pub fn is_group_file(&self) -> bool {
    self.group.is_some()
  }

  /// Resolves a dotted path against the file.
  ///
  /// Object fields are matched by name and array elements by index. When the
  /// first segment is not an attribute, the path-derived properties `path`,
  /// `basename`, `dirname`, `stem` and `extname` are available as strings.
  pub fn lookup(&self, path: &str) -> Option<Value> {
    let (head, rest) = match path.split_once('.') {
      Some((head, rest)) => (head, Some(rest)),
      None => (path, None),
    };

    if let Some(value) = self.attribute(head) {
      return match rest {
        Some(rest) => resolve(value, rest).cloned(),
        None => Some(value.clone()),
      };
    }

    match rest {
      Some(_) => None,
      None => self.path_property(head).map(Value::String),
    }
  }

  fn path_property(&self, name: &str) -> Option<String> {
    match name {
      "path" => self.path().map(|p| p.to_string_lossy().into_owned()),
      "basename" => self.basename().map(str::to_string),
      "dirname" => self.dirname().map(|p| p.to_string_lossy().into_owned()),
      "stem" => self.stem().map(str::to_string),
      "extname" => self.extname(),
      _ => None,
    }
  }
}

fn resolve<'a>(mut value: &'a Value, path: &str) -> Option<&'a Value> {
  for segment in path.split('.') {
    value = match value {
      Value::Object(map) => map.get(segment)?,
      Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
      _ => return None,
    };
  }
  Some(value)
}
