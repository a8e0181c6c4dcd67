//! Dataset adapters - Implementations of the `DatasetSource` port.

mod json_dataset;

pub use json_dataset::{parse_dataset, JsonDatasetSource};
