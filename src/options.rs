//! # Grouping Options
//!
//! [`GroupOptions`] configures a [`crate::transformers::GroupArrayTransformer`].
//! It is built once, validated when the transformer is constructed, and never
//! changed afterwards.
//!
//! The serializable part of the options, [`GroupSettings`], can be loaded from
//! JSON using the camelCase field names `groupKey`, `extraArgs`, `flush` and
//! `groupFile`. Callbacks and classifier functions can only be set in code.
//!
//! ## Example
//!
//! ```rust
//! use group_array_stream::options::GroupOptions;
//!
//! let options = GroupOptions::from_json(r#"{"groupKey": "data.tags", "groupFile": true}"#)?;
//! assert!(options.flush);
//! assert!(options.group_file);
//! # Ok::<(), group_array_stream::error::StreamError>(())
//! ```

use crate::error::{BoxError, StreamError};
use crate::group::{GroupArray, GroupKey, GroupResult, Grouper};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Callback invoked once with the computed groups.
pub type GroupFn = Arc<dyn Fn(&GroupResult) -> Result<(), BoxError> + Send + Sync>;

/// Options for a grouping transformer.
#[derive(Clone)]
pub struct GroupOptions {
  /// What to group by. Required.
  pub group_key: Option<GroupKey>,
  /// Extra positional arguments handed to the grouper after the key.
  pub extra_args: Vec<Value>,
  /// Called synchronously with the groups before anything is emitted.
  pub group_fn: Option<GroupFn>,
  /// Re-emit the buffered items after grouping. Defaults to `true`.
  pub flush: bool,
  /// Emit a synthetic group item ahead of everything else. Defaults to `false`.
  pub group_file: bool,
  /// The grouping algorithm. Defaults to [`GroupArray`].
  pub grouper: Arc<dyn Grouper>,
}

impl Default for GroupOptions {
  fn default() -> Self {
    Self {
      group_key: None,
      extra_args: Vec::new(),
      group_fn: None,
      flush: true,
      group_file: false,
      grouper: Arc::new(GroupArray),
    }
  }
}

impl fmt::Debug for GroupOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GroupOptions")
      .field("group_key", &self.group_key)
      .field("extra_args", &self.extra_args)
      .field("group_fn", &self.group_fn.is_some())
      .field("flush", &self.flush)
      .field("group_file", &self.group_file)
      .field("grouper", &self.grouper)
      .finish()
  }
}

impl GroupOptions {
  /// Creates options grouping by `key` with every other option at its default.
  pub fn new(key: impl Into<GroupKey>) -> Self {
    Self {
      group_key: Some(key.into()),
      ..Self::default()
    }
  }

  /// Loads options from a JSON [`GroupSettings`] document.
  pub fn from_json(json: &str) -> Result<Self, StreamError> {
    let settings: GroupSettings = serde_json::from_str(json)?;
    Ok(settings.into())
  }

  /// Appends an extra argument for the grouper.
  pub fn with_extra_arg(mut self, arg: Value) -> Self {
    self.extra_args.push(arg);
    self
  }

  /// Sets the callback that receives the computed groups.
  pub fn with_group_fn<F>(mut self, f: F) -> Self
  where
    F: Fn(&GroupResult) -> Result<(), BoxError> + Send + Sync + 'static,
  {
    self.group_fn = Some(Arc::new(f));
    self
  }

  /// Sets whether buffered items are re-emitted.
  pub fn with_flush(mut self, flush: bool) -> Self {
    self.flush = flush;
    self
  }

  /// Sets whether a synthetic group item is emitted.
  pub fn with_group_file(mut self, group_file: bool) -> Self {
    self.group_file = group_file;
    self
  }

  /// Replaces the grouping algorithm.
  pub fn with_grouper(mut self, grouper: impl Grouper + 'static) -> Self {
    self.grouper = Arc::new(grouper);
    self
  }

  /// Returns the group key, failing if it is missing or unusable.
  pub fn group_key(&self) -> Result<&GroupKey, StreamError> {
    let key = self
      .group_key
      .as_ref()
      .ok_or_else(|| StreamError::InvalidArgument("expected a group key".to_string()))?;
    key.validate()?;
    Ok(key)
  }
}

/// The serializable subset of [`GroupOptions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSettings {
  /// Dotted path to group by.
  #[serde(default)]
  pub group_key: Option<String>,
  /// Extra arguments for the grouper.
  #[serde(default)]
  pub extra_args: Vec<Value>,
  /// Re-emit buffered items.
  #[serde(default = "default_flush")]
  pub flush: bool,
  /// Emit a synthetic group item.
  #[serde(default)]
  pub group_file: bool,
}

fn default_flush() -> bool {
  true
}

impl Default for GroupSettings {
  fn default() -> Self {
    Self {
      group_key: None,
      extra_args: Vec::new(),
      flush: default_flush(),
      group_file: false,
    }
  }
}

impl From<GroupSettings> for GroupOptions {
  fn from(settings: GroupSettings) -> Self {
    Self {
      group_key: settings.group_key.map(GroupKey::Path),
      extra_args: settings.extra_args,
      flush: settings.flush,
      group_file: settings.group_file,
      ..Self::default()
    }
  }
}
