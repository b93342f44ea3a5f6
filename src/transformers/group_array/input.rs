use crate::file::File;
use crate::input::Input;
use crate::output::ItemStream;
use crate::transformers::group_array::group_array_transformer::GroupArrayTransformer;

impl Input for GroupArrayTransformer {
  type Input = File;
  type InputStream = ItemStream<File>;
}
