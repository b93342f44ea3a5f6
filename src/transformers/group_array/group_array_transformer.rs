use crate::error::StreamError;
use crate::options::GroupOptions;
use crate::transformer::TransformerConfig;
use std::sync::Arc;

/// Buffers a stream to completion, groups it, and re-emits the result.
///
/// On end of input the transformer:
///
/// 1. hands the buffered items, the group key and any extra arguments to the grouper
/// 2. calls `group_fn` with the groups, if configured
/// 3. emits a synthetic group item, if `group_file` is set
/// 4. re-emits every buffered item in arrival order, unless `flush` is `false`
#[derive(Debug, Clone)]
pub struct GroupArrayTransformer {
  /// Grouping options, shared with every buffer this transformer drives.
  pub options: Arc<GroupOptions>,
  /// Transformer configuration.
  pub config: TransformerConfig,
}

impl GroupArrayTransformer {
  /// Creates a transformer, failing with [`StreamError::InvalidArgument`] when
  /// the options carry no usable group key or the grouper rejects the extra
  /// arguments.
  pub fn new(options: GroupOptions) -> Result<Self, StreamError> {
    let key = options.group_key()?;
    options.grouper.validate(key, &options.extra_args)?;
    Ok(Self {
      options: Arc::new(options),
      config: TransformerConfig::default(),
    })
  }
}
