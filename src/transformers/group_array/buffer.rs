//! The two-state buffer behind [`super::GroupArrayTransformer`].
//!
//! A buffer starts `Open` and accepts items. [`GroupBuffer::finish`] moves it to
//! `Closed` before doing any work, so completion runs at most once even when the
//! grouper or the callback fails. There is no way back to `Open`.

use crate::error::{ComponentInfo, StreamError};
use crate::file::File;
use crate::options::GroupOptions;
use std::sync::Arc;
use tracing::{debug, trace, warn};

#[derive(Debug)]
enum BufferState {
  Open(Vec<File>),
  Closed,
}

/// Buffers items for one stream and runs completion once.
#[derive(Debug)]
pub struct GroupBuffer {
  options: Arc<GroupOptions>,
  component: ComponentInfo,
  state: BufferState,
}

impl GroupBuffer {
  /// Creates an open, empty buffer.
  pub fn new(options: Arc<GroupOptions>, component: ComponentInfo) -> Self {
    Self {
      options,
      component,
      state: BufferState::Open(Vec::new()),
    }
  }

  /// Returns `true` until `finish` or `abort` has been called.
  pub fn is_open(&self) -> bool {
    matches!(self.state, BufferState::Open(_))
  }

  /// Number of buffered items. Always zero once closed.
  pub fn len(&self) -> usize {
    match &self.state {
      BufferState::Open(files) => files.len(),
      BufferState::Closed => 0,
    }
  }

  /// Returns `true` if nothing is buffered.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Appends an item. Fails with [`StreamError::Closed`] once closed.
  pub fn push(&mut self, file: File) -> Result<(), StreamError> {
    match &mut self.state {
      BufferState::Open(files) => {
        files.push(file);
        trace!(component = %self.component.name, buffered = files.len(), "buffered item");
        Ok(())
      }
      BufferState::Closed => Err(StreamError::Closed {
        component: self.component.clone(),
        operation: "push",
      }),
    }
  }

  /// Groups the buffer and returns the items to emit, in emission order.
  ///
  /// The group item, if enabled, comes first, followed by the buffered items in
  /// arrival order when flushing. A failing grouper or callback yields the error
  /// and nothing to emit.
  pub fn finish(&mut self) -> Result<Vec<File>, StreamError> {
    let files = match std::mem::replace(&mut self.state, BufferState::Closed) {
      BufferState::Open(files) => files,
      BufferState::Closed => {
        warn!(component = %self.component.name, "completion signalled twice");
        return Err(StreamError::Closed {
          component: self.component.clone(),
          operation: "finish",
        });
      }
    };

    let options = &self.options;
    let key = options.group_key()?;
    let group = options.grouper.group(&files, key, &options.extra_args)?;
    debug!(
      component = %self.component.name,
      items = files.len(),
      groups = group.len(),
      "grouped buffered items"
    );

    if let Some(group_fn) = &options.group_fn {
      group_fn(&group).map_err(|error| StreamError::Callback {
        component: self.component.clone(),
        message: error.to_string(),
      })?;
    }

    let mut emitted = Vec::with_capacity(files.len() + 1);
    if options.group_file {
      emitted.push(File::group_file(group));
    }
    if options.flush {
      emitted.extend(files);
    }
    debug!(component = %self.component.name, emitted = emitted.len(), "completion done");
    Ok(emitted)
  }

  /// Closes the buffer without grouping and returns how many items were dropped.
  pub fn abort(&mut self) -> usize {
    match std::mem::replace(&mut self.state, BufferState::Closed) {
      BufferState::Open(files) => files.len(),
      BufferState::Closed => 0,
    }
  }
}
