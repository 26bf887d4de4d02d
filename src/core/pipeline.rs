use crate::core::definition::parse_column_definitions;
use crate::core::display::render_table;
use crate::core::reader::read_records_with;
use crate::core::transform::transform_records;
use crate::core::{
    ConfigProvider, LoadOutcome, OutputRecord, OutputTarget, Pipeline, RawRecord, Storage,
};
use crate::utils::error::{CsvJsonError, Result};
use colored::Colorize;

const PROGRESS_INTERVAL: usize = 10_000;

/// Converts one CSV file to JSON records and writes or prints them.
pub struct CsvJsonPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvJsonPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn print_table(&self, records: &[OutputRecord]) -> LoadOutcome {
        let max_rows = self.config.max_table_rows();
        let shown = records.len().min(max_rows);

        if shown < records.len() {
            println!(
                "{}",
                format!("Only printed {} of {}", max_rows, records.len()).yellow()
            );
        }
        println!("{}", render_table(records, max_rows));

        LoadOutcome::Printed {
            shown,
            total: records.len(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvJsonPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        let input = self.config.input_file();
        tracing::debug!("Reading CSV from: {}", input);

        if !self.storage.exists(input).await {
            return Err(CsvJsonError::FileNotFound {
                path: input.to_string(),
            });
        }
        let data = self.storage.read_file(input).await?;
        tracing::debug!("Read {} bytes", data.len());

        let options = self.config.reader_options();
        read_records_with(&data, &options, |_, count| {
            if count % PROGRESS_INTERVAL == 0 {
                tracing::debug!("Parsing: {} records", count);
            }
        })
    }

    async fn transform(&self, records: Vec<RawRecord>) -> Result<Vec<OutputRecord>> {
        let specs = parse_column_definitions(self.config.column_definitions());
        match &specs {
            Some(specs) => tracing::debug!("Applying {} column definitions", specs.len()),
            None => tracing::debug!("No column definitions, passing records through"),
        }

        Ok(transform_records(&records, specs.as_ref()))
    }

    async fn load(&self, records: Vec<OutputRecord>) -> Result<LoadOutcome> {
        match self.config.output_target() {
            OutputTarget::Table => Ok(self.print_table(&records)),
            OutputTarget::File(path) => {
                let json = if self.config.pretty() {
                    serde_json::to_string_pretty(&records)?
                } else {
                    serde_json::to_string(&records)?
                };

                tracing::debug!("Writing {} bytes to {}", json.len(), path);
                self.storage.write_file(&path, json.as_bytes()).await?;

                Ok(LoadOutcome::Written {
                    path,
                    records: records.len(),
                })
            }
        }
    }
}
