//! Export session state.
//!
//! One [`ExportSession`] holds everything a user edits between upload and
//! export. Handlers receive it by `&mut`; export regenerates records from
//! scratch every time.

use std::path::{Path, PathBuf};

use shop_ingest::{
    ColumnHint, CsvUpload, IngestError, build_column_hints, read_csv_upload, sample_values,
};
use shop_map::{MappingEngine, MappingError, MappingState};
use shop_model::{
    AdminConfig, CanonicalRecord, ExportFormat, HeaderCatalog, PricingParameters, RawRow, TagSet,
};
use shop_output::{OutputError, write_export};
use shop_transform::{
    TransformError, TransformStats, resolve_parameters, transform_records,
    transform_records_with_stats,
};
use thiserror::Error;
use tracing::{info, info_span, warn};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no file uploaded")]
    NoUpload,

    #[error("row {row} is out of range (upload has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("no pricing rule for category '{category}'")]
    UnknownCategory { category: String },

    #[error(transparent)]
    Pricing(#[from] TransformError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl SessionError {
    /// True when the export was refused for lack of records.
    pub fn is_empty_export(&self) -> bool {
        matches!(self, SessionError::Output(OutputError::EmptyExport))
    }
}

/// Result of a completed export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub records: usize,
    pub stats: TransformStats,
}

/// Pricing inputs gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingRequest {
    pub category: Option<String>,
    pub currency: Option<String>,
    pub margin_percent: Option<f64>,
    pub conversion_rate: Option<f64>,
}

impl PricingRequest {
    /// Resolves parameters: the category rule first, explicit values on top.
    ///
    /// Without a category the neutral parameters are the base.
    pub fn resolve(&self, config: &AdminConfig) -> Result<PricingParameters, SessionError> {
        let mut pricing = match self.category.as_deref() {
            Some(category) => {
                let rule = config
                    .rule_for(category)
                    .ok_or_else(|| SessionError::UnknownCategory {
                        category: category.to_string(),
                    })?;
                resolve_parameters(rule, self.currency.as_deref())?
            }
            None => PricingParameters::default(),
        };
        if let Some(margin) = self.margin_percent {
            pricing.margin_percent = margin;
        }
        if let Some(rate) = self.conversion_rate {
            pricing.conversion_rate = rate;
        }
        Ok(pricing)
    }
}

/// Column hint and sample values shown beside mapping suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub hint: ColumnHint,
    pub samples: Vec<String>,
}

/// Mutable state of one import/export session.
#[derive(Debug)]
pub struct ExportSession {
    engine: MappingEngine,
    output_dir: PathBuf,
    upload: Option<CsvUpload>,
    mapping: Option<MappingState>,
    pricing: PricingParameters,
    tags: TagSet,
    /// Zero-based row indices; `None` exports every row.
    selection: Option<Vec<usize>>,
}

impl ExportSession {
    pub fn new(catalog: HeaderCatalog, output_dir: impl Into<PathBuf>) -> Self {
        Self::with_engine(MappingEngine::new(catalog), output_dir)
    }

    pub fn with_engine(engine: MappingEngine, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            output_dir: output_dir.into(),
            upload: None,
            mapping: None,
            pricing: PricingParameters::default(),
            tags: TagSet::new(),
            selection: None,
        }
    }

    pub fn catalog(&self) -> &HeaderCatalog {
        self.engine.catalog()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn upload(&self) -> Option<&CsvUpload> {
        self.upload.as_ref()
    }

    pub fn mapping(&self) -> Option<&MappingState> {
        self.mapping.as_ref()
    }

    pub fn pricing(&self) -> &PricingParameters {
        &self.pricing
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Selected rows as 1-based numbers, if a selection is active.
    pub fn selected_rows(&self) -> Option<Vec<usize>> {
        self.selection
            .as_ref()
            .map(|rows| rows.iter().map(|index| index + 1).collect())
    }

    /// Hints and up to `sample_limit` distinct values per uploaded column.
    pub fn column_profiles(&self, sample_limit: usize) -> Vec<ColumnProfile> {
        let Some(upload) = &self.upload else {
            return Vec::new();
        };
        build_column_hints(upload)
            .into_iter()
            .map(|hint| {
                let samples = sample_values(upload, &hint.column, sample_limit)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                ColumnProfile { hint, samples }
            })
            .collect()
    }

    /// Replaces the current upload and builds a fresh automatic mapping.
    ///
    /// Any row selection is dropped; pricing and tags are kept.
    pub fn load_upload(&mut self, upload: CsvUpload) {
        let mapping = MappingState::from_columns(&self.engine, &upload.columns);
        let summary = mapping.summary();
        info!(
            columns = upload.columns.len(),
            rows = upload.rows.len(),
            mapped = summary.mapped,
            "upload loaded"
        );
        self.mapping = Some(mapping);
        self.upload = Some(upload);
        self.selection = None;
    }

    /// Reads a file and loads it. A failed read leaves no upload behind.
    pub fn load_file(&mut self, path: &Path) -> Result<(), SessionError> {
        match read_csv_upload(path) {
            Ok(upload) => {
                self.load_upload(upload);
                Ok(())
            }
            Err(error) => {
                self.reset();
                Err(error.into())
            }
        }
    }

    /// Discards the upload, mapping and selection.
    pub fn reset(&mut self) {
        self.upload = None;
        self.mapping = None;
        self.selection = None;
    }

    fn mapping_mut(&mut self) -> Result<&mut MappingState, SessionError> {
        self.mapping.as_mut().ok_or(SessionError::NoUpload)
    }

    /// Maps a column to a header; an empty header unmaps the column.
    pub fn set_override(&mut self, column: &str, header: &str) -> Result<(), SessionError> {
        self.mapping_mut()?.set_override(column, header)?;
        Ok(())
    }

    pub fn clear_mapping(&mut self, column: &str) -> Result<(), SessionError> {
        self.mapping_mut()?.clear(column)?;
        Ok(())
    }

    pub fn set_pricing(&mut self, pricing: PricingParameters) {
        self.pricing = pricing;
    }

    /// Adds tags to the session set. Returns how many were new.
    pub fn add_tags<I, S>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .filter(|tag| self.tags.insert(tag.as_ref()))
            .count()
    }

    /// Removes a tag from the session set. Returns false if it was absent.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Restricts export to the given 1-based row numbers.
    ///
    /// Duplicates collapse and rows export in upload order. An empty list is
    /// accepted; exporting it is refused.
    pub fn select_rows(&mut self, rows: &[usize]) -> Result<(), SessionError> {
        let total = self.upload.as_ref().ok_or(SessionError::NoUpload)?.len();
        let mut indices = Vec::with_capacity(rows.len());
        for &row in rows {
            if row == 0 || row > total {
                return Err(SessionError::RowOutOfRange { row, rows: total });
            }
            indices.push(row - 1);
        }
        indices.sort_unstable();
        indices.dedup();
        self.selection = Some(indices);
        Ok(())
    }

    /// Exports every row again.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Canonical records for the current state, without writing anything.
    pub fn records(&self) -> Vec<CanonicalRecord> {
        let (Some(upload), Some(mapping)) = (&self.upload, &self.mapping) else {
            return Vec::new();
        };
        let rows = self.selected(upload);
        transform_records(
            &rows,
            mapping.header_map(),
            self.catalog(),
            &self.pricing,
            &self.tags,
        )
    }

    fn selected(&self, upload: &CsvUpload) -> Vec<RawRow> {
        match &self.selection {
            None => upload.rows.clone(),
            Some(indices) => indices
                .iter()
                .filter_map(|&index| upload.rows.get(index).cloned())
                .collect(),
        }
    }

    /// Transforms the selected rows and writes the export file.
    ///
    /// Refused with [`OutputError::EmptyExport`] when there is no upload or
    /// nothing is selected; no file is written then.
    pub fn export(
        &mut self,
        format: ExportFormat,
        name: Option<&str>,
    ) -> Result<ExportOutcome, SessionError> {
        let span = info_span!("export", format = %format);
        let _guard = span.enter();

        let (Some(upload), Some(mapping)) = (&self.upload, &self.mapping) else {
            warn!("export requested without an upload");
            return Err(OutputError::EmptyExport.into());
        };
        for (header, columns) in mapping.conflicts() {
            warn!(
                header,
                columns = ?columns,
                "several columns mapped to one header; the first is exported"
            );
        }
        let rows = self.selected(upload);
        let (records, stats) = transform_records_with_stats(
            &rows,
            mapping.header_map(),
            self.catalog(),
            &self.pricing,
            &self.tags,
        );
        if stats.degraded_prices > 0 {
            warn!(
                cells = stats.degraded_prices,
                "price cells without a numeric value were exported empty"
            );
        }
        let path = write_export(&self.output_dir, name, format, self.catalog(), &records)?;
        Ok(ExportOutcome {
            path,
            format,
            records: records.len(),
            stats,
        })
    }
}
