//! `shopcsv`: product CSV mapping and export.

use clap::{ColorChoice, Parser};
use shop_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{load_admin_config, run_export, run_headers, run_map, run_register};
use crate::summary::{print_export, print_headers, print_mapping, print_registration, print_rules};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = run(&cli);
    let exit_code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Runs the selected command. `Ok(false)` reports a handled failure.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Command::Headers => print_headers(&run_headers(&load_admin_config(config_path)?)?),
        Command::Map(args) => print_mapping(&run_map(args, &load_admin_config(config_path)?)?),
        Command::Export(args) => {
            print_export(&run_export(args, &load_admin_config(config_path)?)?);
        }
        Command::Rules => print_rules(&load_admin_config(config_path)?),
        Command::Register(args) => {
            let response = run_register(args)?;
            print_registration(&response);
            return Ok(response.success);
        }
    }
    Ok(true)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
