pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, ConversionSettings, ParseArgs};

pub use core::{
    definition::parse_column_definitions,
    engine::ConversionEngine,
    pipeline::CsvJsonPipeline,
    transform::{apply_definitions, transform_record},
};
pub use utils::error::{CsvJsonError, Result};
