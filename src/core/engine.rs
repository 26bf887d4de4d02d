use crate::core::{LoadOutcome, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::{format_elapsed, SystemMonitor};
use std::time::Instant;

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<LoadOutcome> {
        let started = Instant::now();
        tracing::info!("Parsing CSV");

        let raw_records = self.pipeline.extract().await?;
        println!("{}", parsed_summary(raw_records.len()));
        self.monitor.log_phase("Extract", raw_records.len());

        let records = self.pipeline.transform(raw_records).await?;
        tracing::debug!("Transformed {} records", records.len());
        self.monitor.log_phase("Transform", records.len());

        let outcome = self.pipeline.load(records).await?;
        match &outcome {
            LoadOutcome::Written { path, records } => {
                tracing::info!("Wrote {} records to {}", records, path)
            }
            LoadOutcome::Printed { shown, total } => {
                tracing::debug!("Printed {} of {} records", shown, total)
            }
        }

        self.monitor.log_final();
        tracing::info!("Finished in {}", format_elapsed(started.elapsed()));

        Ok(outcome)
    }
}

fn parsed_summary(count: usize) -> String {
    format!("Parsed: {}", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OutputRecord, RawRecord};
    use crate::domain::model::FieldValue;
    use crate::utils::error::CsvJsonError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPipeline {
        rows: usize,
        fail_load: bool,
        transformed: AtomicUsize,
    }

    impl StubPipeline {
        fn new(rows: usize, fail_load: bool) -> Self {
            Self {
                rows,
                fail_load,
                transformed: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<RawRecord>> {
            Ok((0..self.rows)
                .map(|i| [("n", i.to_string())].into_iter().collect::<RawRecord>())
                .collect())
        }

        async fn transform(&self, records: Vec<RawRecord>) -> Result<Vec<OutputRecord>> {
            self.transformed.store(records.len(), Ordering::SeqCst);
            Ok(records
                .iter()
                .map(|_| {
                    let mut builder = OutputRecord::builder();
                    builder.insert("ok", FieldValue::Boolean(true));
                    builder.build()
                })
                .collect())
        }

        async fn load(&self, records: Vec<OutputRecord>) -> Result<LoadOutcome> {
            if self.fail_load {
                return Err(CsvJsonError::MissingOutputTarget);
            }
            Ok(LoadOutcome::Written {
                path: "out.json".to_string(),
                records: records.len(),
            })
        }
    }

    #[test]
    fn test_run_passes_records_through_all_phases() {
        let engine = ConversionEngine::new(StubPipeline::new(4, false));

        let outcome = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(engine.pipeline().transformed.load(Ordering::SeqCst), 4);
        assert_eq!(
            outcome,
            LoadOutcome::Written {
                path: "out.json".to_string(),
                records: 4
            }
        );
    }

    #[test]
    fn test_run_propagates_load_error() {
        let engine = ConversionEngine::new_with_monitoring(StubPipeline::new(1, true), true);

        let result = tokio_test::block_on(engine.run());

        assert!(matches!(result, Err(CsvJsonError::MissingOutputTarget)));
    }

    #[test]
    fn test_parsed_summary() {
        assert_eq!(parsed_summary(0), "Parsed: 0");
        assert_eq!(parsed_summary(12_000), "Parsed: 12000");
    }
}
