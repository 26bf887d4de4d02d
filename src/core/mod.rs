pub mod definition;
pub mod display;
pub mod engine;
pub mod pipeline;
pub mod reader;
pub mod transform;

pub use crate::domain::model::{
    ColumnSpec, ColumnSpecSet, ColumnType, FieldValue, OutputRecord, RawRecord,
};
pub use crate::domain::ports::{
    ConfigProvider, LoadOutcome, OutputTarget, Pipeline, ReaderOptions, Storage,
};
pub use crate::utils::error::Result;
