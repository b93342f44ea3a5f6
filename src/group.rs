//! # Grouping
//!
//! Bucketing of items by key. A [`GroupKey`] selects the key(s) for an item, a
//! [`Grouper`] turns a buffered list of items into a [`GroupResult`], and
//! [`GroupArray`] is the grouper used unless another one is configured.
//!
//! ## Key semantics of `GroupArray`
//!
//! - A scalar value (string, number, bool) places the item in one bucket
//! - An array places the item in the bucket of every distinct scalar element
//! - Null, missing and object values leave the item out of the result
//! - Within each bucket, members keep their arrival order
//!
//! Extra arguments are further dotted paths. Each one adds a nesting level: the
//! members of every bucket are grouped again by the next path, so grouping by
//! `data.tag` then `data.year` gives `foo → 2015 → [...]`.

use crate::error::StreamError;
use crate::file::File;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A function that classifies an item. `None` leaves the item ungrouped.
pub type KeyFn = Arc<dyn Fn(&File) -> Option<String> + Send + Sync>;

/// Selects the group key(s) of an item.
#[derive(Clone)]
pub enum GroupKey {
  /// A dotted path resolved with [`File::lookup`].
  Path(String),
  /// A custom classifier.
  Func(KeyFn),
}

impl GroupKey {
  /// Wraps a classifier function.
  pub fn func<F>(f: F) -> Self
  where
    F: Fn(&File) -> Option<String> + Send + Sync + 'static,
  {
    Self::Func(Arc::new(f))
  }

  /// Checks that the key can be used to group anything.
  pub fn validate(&self) -> Result<(), StreamError> {
    match self {
      Self::Path(path) if path.trim().is_empty() => Err(StreamError::InvalidArgument(
        "group key path must not be empty".to_string(),
      )),
      Self::Path(path) if path.split('.').any(str::is_empty) => Err(StreamError::InvalidArgument(
        format!("group key path `{path}` has an empty segment"),
      )),
      _ => Ok(()),
    }
  }

  /// The distinct keys `file` belongs under, in the order they were found.
  pub fn keys_for(&self, file: &File) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    match self {
      Self::Path(path) => match file.lookup(path) {
        Some(Value::Array(items)) => {
          for key in items.iter().filter_map(scalar_key) {
            if !keys.contains(&key) {
              keys.push(key);
            }
          }
        }
        Some(value) => keys.extend(scalar_key(&value)),
        None => {}
      },
      Self::Func(f) => keys.extend(f(file)),
    }
    keys
  }
}

impl fmt::Debug for GroupKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Path(path) => write!(f, "GroupKey::Path({path:?})"),
      Self::Func(_) => write!(f, "GroupKey::Func"),
    }
  }
}

impl From<&str> for GroupKey {
  fn from(path: &str) -> Self {
    Self::Path(path.to_string())
  }
}

impl From<String> for GroupKey {
  fn from(path: String) -> Self {
    Self::Path(path)
  }
}

fn scalar_key(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => None,
  }
}

/// Mapping from group key to the items in that group.
///
/// Keys iterate in the order they were first seen. When grouped by more than one
/// key, each bucket also carries a nested result for the next key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupResult {
  keys: Vec<String>,
  buckets: HashMap<String, Vec<File>>,
  nested: HashMap<String, GroupResult>,
}

impl GroupResult {
  /// Creates an empty result.
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends `file` to the bucket for `key`, creating the bucket if needed.
  pub fn insert(&mut self, key: impl Into<String>, file: File) {
    let key = key.into();
    match self.buckets.get_mut(&key) {
      Some(bucket) => bucket.push(file),
      None => {
        self.keys.push(key.clone());
        self.buckets.insert(key, vec![file]);
      }
    }
  }

  /// Group keys in first-seen order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.keys.iter().map(String::as_str)
  }

  /// Members of one group.
  pub fn get(&self, key: &str) -> Option<&[File]> {
    self.buckets.get(key).map(Vec::as_slice)
  }

  /// Groups and their members in first-seen order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[File])> {
    self
      .keys
      .iter()
      .map(|key| (key.as_str(), self.buckets[key].as_slice()))
  }

  /// Number of groups.
  pub fn len(&self) -> usize {
    self.keys.len()
  }

  /// Returns `true` if no item was grouped.
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  /// The next grouping level below `key`, if one was requested.
  pub fn nested(&self, key: &str) -> Option<&GroupResult> {
    self.nested.get(key)
  }

  /// Members found by walking one key per level, e.g. `["foo", "2015"]`.
  pub fn get_path(&self, path: &[&str]) -> Option<&[File]> {
    match path {
      [] => None,
      [key] => self.get(key),
      [key, rest @ ..] => self.nested(key)?.get_path(rest),
    }
  }

  /// Total memberships across all groups. An item in two groups counts twice.
  pub fn member_count(&self) -> usize {
    self.buckets.values().map(Vec::len).sum()
  }
}

/// The grouping algorithm.
///
/// Receives the full buffered input, the key selector and any extra arguments
/// configured on the transformer, in that order.
pub trait Grouper: Send + Sync + fmt::Debug {
  /// Checks the key and extra arguments before any item is buffered.
  fn validate(&self, _key: &GroupKey, _extra_args: &[Value]) -> Result<(), StreamError> {
    Ok(())
  }

  /// Groups `files` by `key`.
  fn group(
    &self,
    files: &[File],
    key: &GroupKey,
    extra_args: &[Value],
  ) -> Result<GroupResult, StreamError>;
}

/// Default grouper. See the module docs for how keys are derived.
///
/// Extra arguments must be dotted paths; each adds one nesting level.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupArray;

impl GroupArray {
  fn nested_keys(extra_args: &[Value]) -> Result<Vec<GroupKey>, String> {
    extra_args
      .iter()
      .map(|arg| match arg {
        Value::String(path) => {
          let key = GroupKey::Path(path.clone());
          key.validate().map_err(|error| error.to_string())?;
          Ok(key)
        }
        other => Err(format!("extra argument {other} is not a group key path")),
      })
      .collect()
  }
}

impl Grouper for GroupArray {
  fn validate(&self, key: &GroupKey, extra_args: &[Value]) -> Result<(), StreamError> {
    key.validate()?;
    Self::nested_keys(extra_args)
      .map(|_| ())
      .map_err(StreamError::InvalidArgument)
  }

  fn group(
    &self,
    files: &[File],
    key: &GroupKey,
    extra_args: &[Value],
  ) -> Result<GroupResult, StreamError> {
    let nested = Self::nested_keys(extra_args).map_err(StreamError::Grouping)?;
    Ok(bucket(files, key, &nested))
  }
}

fn bucket(files: &[File], key: &GroupKey, rest: &[GroupKey]) -> GroupResult {
  let mut result = GroupResult::new();
  for file in files {
    for group in key.keys_for(file) {
      result.insert(group, file.clone());
    }
  }

  if let Some((next, rest)) = rest.split_first() {
    let nested = result
      .iter()
      .map(|(group, members)| (group.to_string(), bucket(members, next, rest)))
      .collect();
    result.nested = nested;
  }
  result
}
