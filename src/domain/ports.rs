use crate::domain::model::{OutputRecord, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where converted records end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(String),
    Table,
}

/// CSV tokenizer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    pub delimiter: u8,
    pub quote: u8,
    pub ignore_empty: bool,
    pub empty_as_null: bool,
    pub trim: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            ignore_empty: true,
            empty_as_null: false,
            trim: false,
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_target(&self) -> OutputTarget;
    fn column_definitions(&self) -> Option<&str>;
    fn reader_options(&self) -> ReaderOptions;
    fn max_table_rows(&self) -> usize;
    fn pretty(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Written { path: String, records: usize },
    Printed { shown: usize, total: usize },
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRecord>>;
    async fn transform(&self, records: Vec<RawRecord>) -> Result<Vec<OutputRecord>>;
    async fn load(&self, records: Vec<OutputRecord>) -> Result<LoadOutcome>;
}
