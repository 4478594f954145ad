use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use shop_cli::config::load_config;
use shop_cli::registry::{InMemoryRegistry, RegistrationResponse, RegistrationService};
use shop_cli::session::{ColumnProfile, ExportOutcome, ExportSession, PricingRequest};
use shop_map::MappingState;
use shop_model::{AdminConfig, ExportFormat, HeaderCatalog, SellerRegistration};

use crate::cli::{ExportArgs, MapArgs, RegisterArgs};

pub fn load_admin_config(path: Option<&Path>) -> Result<AdminConfig> {
    load_config(path).context("load admin config")
}

pub fn run_headers(config: &AdminConfig) -> Result<HeaderCatalog> {
    config.effective_catalog().context("build header catalog")
}

/// Distinct sample values shown per column by `map`.
const SAMPLE_LIMIT: usize = 3;

pub struct MapReport {
    pub mapping: MappingState,
    pub profiles: Vec<ColumnProfile>,
}

pub fn run_map(args: &MapArgs, config: &AdminConfig) -> Result<MapReport> {
    let span = info_span!("map", file = %args.file.display());
    let _guard = span.enter();
    let session = open_session(args, config, PathBuf::from("."))?;
    let mapping = session
        .mapping()
        .cloned()
        .context("upload produced no mapping")?;
    Ok(MapReport {
        mapping,
        profiles: session.column_profiles(SAMPLE_LIMIT),
    })
}

pub fn run_export(args: &ExportArgs, config: &AdminConfig) -> Result<ExportOutcome> {
    let span = info_span!("export_command", file = %args.mapping.file.display());
    let _guard = span.enter();

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.export.output_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let mut session = open_session(&args.mapping, config, output_dir)?;

    let request = PricingRequest {
        category: args.category.clone(),
        currency: args.currency.clone(),
        margin_percent: args.margin,
        conversion_rate: args.rate,
    };
    let pricing = request.resolve(config).context("resolve pricing")?;
    info!(
        margin_percent = pricing.margin_percent,
        conversion_rate = pricing.conversion_rate,
        "pricing"
    );
    session.set_pricing(pricing);
    session.add_tags(&args.tags);
    if let Some(rows) = &args.rows {
        session.select_rows(rows).context("select rows")?;
    }

    let format = args
        .format
        .map(ExportFormat::from)
        .or(config.export.default_format)
        .unwrap_or_default();
    let name = args
        .name
        .as_deref()
        .or(config.export.default_name.as_deref());
    let outcome = session.export(format, name).context("export")?;
    Ok(outcome)
}

pub fn run_register(args: &RegisterArgs) -> Result<RegistrationResponse> {
    let contents = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("read {}", args.payload.display()))?;
    let payload: SellerRegistration = serde_json::from_str(&contents)
        .with_context(|| format!("parse registration payload {}", args.payload.display()))?;
    let mut registry = InMemoryRegistry::new();
    Ok(registry.register(&payload))
}

fn open_session(args: &MapArgs, config: &AdminConfig, output_dir: PathBuf) -> Result<ExportSession> {
    let catalog = config.effective_catalog().context("build header catalog")?;
    let mut session = ExportSession::new(catalog, output_dir);
    session
        .load_file(&args.file)
        .with_context(|| format!("load {}", args.file.display()))?;
    for (column, header) in &args.overrides {
        session
            .set_override(column, header)
            .with_context(|| format!("map column '{column}'"))?;
    }
    Ok(session)
}
