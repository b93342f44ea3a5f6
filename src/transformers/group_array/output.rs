use crate::file::File;
use crate::output::{ItemStream, Output};
use crate::transformers::group_array::group_array_transformer::GroupArrayTransformer;

impl Output for GroupArrayTransformer {
  type Output = File;
  type OutputStream = ItemStream<File>;
}
