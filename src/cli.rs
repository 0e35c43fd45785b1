//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_hedge_adapter::CsvHedgeAdapter;
use crate::adapters::csv_template_sink::CsvTemplateSink;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::{EtlConfig, SourceBackend};
use crate::domain::error::EtlError;
use crate::domain::record::SourceKind;
use crate::domain::template::build_template;
use crate::domain::greeks;
use crate::ports::data_port::HedgeSource;
use crate::ports::sink_port::TemplateSink;

#[derive(Parser, Debug)]
#[command(name = "templateur", about = "Hedge template ETL")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the hedge template from both sources
    Build {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show row counts and date ranges per source
    Info {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print Black-Scholes-Merton call Greeks
    Greeks {
        #[arg(long)]
        spot: f64,
        #[arg(long)]
        strike: f64,
        /// Maturity in years
        #[arg(long)]
        maturity: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        volatility: f64,
        /// Valuation date in years, before maturity
        #[arg(long, default_value_t = 0.0)]
        t: f64,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Build {
            config,
            output,
            dry_run,
        } => run_build(&config, output.as_deref(), dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config } => run_info(&config),
        Command::Greeks {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            t,
        } => run_greeks(spot, strike, maturity, rate, volatility, t),
    }
}

fn load_config(path: &Path) -> Result<(FileConfigAdapter, EtlConfig), EtlError> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| EtlError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let config = EtlConfig::from_port(&adapter)?;
    Ok((adapter, config))
}

/// Full extract-transform-load run over an already-resolved source and sink.
///
/// Split out from [`run_build`] so integration tests can drive the pipeline
/// with a mock source. Returns the number of rows written.
pub fn run_pipeline(
    source: &dyn HedgeSource,
    sink: &dyn TemplateSink,
    config: &EtlConfig,
    output: &Path,
) -> Result<usize, EtlError> {
    let vmr_rows = source.fetch(SourceKind::Vmr)?;
    eprintln!("  vmr: {} rows", vmr_rows.len());
    let planif_rows = source.fetch(SourceKind::Planif)?;
    eprintln!("  planif: {} rows", planif_rows.len());

    let template = build_template(
        &vmr_rows,
        &planif_rows,
        &config.vmr_overrides,
        &config.planif_overrides,
    );

    sink.write(&template, output)?;
    Ok(template.len())
}

fn run_build(config_path: &Path, output_override: Option<&Path>, dry_run: bool) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let (adapter, config) = match load_config(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let output = output_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_path());

    if dry_run {
        eprintln!("Plan:");
        eprintln!("  vmr:    {}", config.vmr_path.display());
        eprintln!("  planif: {}", config.planif_path.display());
        eprintln!("  output: {}", output.display());
        eprintln!(
            "  PPA overrides: {} vmr, {} planif",
            config.vmr_overrides.ppa_projects.len(),
            config.planif_overrides.ppa_projects.len()
        );
        eprintln!("Dry run complete: configuration is valid");
        return ExitCode::SUCCESS;
    }

    let sink = CsvTemplateSink::new();
    eprintln!("Extracting sources...");

    let result = match config.backend {
        SourceBackend::Csv => {
            let source = CsvHedgeAdapter::from_config(&config);
            run_pipeline(&source, &sink, &config, &output)
        }
        SourceBackend::Postgres => {
            #[cfg(feature = "postgres")]
            {
                use crate::adapters::postgres_adapter::PostgresHedgeAdapter;

                match PostgresHedgeAdapter::from_config(&adapter) {
                    Ok(source) => run_pipeline(&source, &sink, &config, &output),
                    Err(e) => Err(e),
                }
            }

            #[cfg(not(feature = "postgres"))]
            {
                let _ = &adapter;
                eprintln!("error: postgres feature is required for the postgres backend");
                return ExitCode::from(2);
            }
        }
    };

    match result {
        Ok(count) => {
            eprintln!("Template written to {} ({} rows)", output.display(), count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    match load_config(config_path) {
        Ok((_, config)) => {
            eprintln!("  vmr:    {}", config.vmr_path.display());
            eprintln!("  planif: {}", config.planif_path.display());
            eprintln!("  output: {}", config.output_path().display());
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &Path) -> ExitCode {
    let (adapter, config) = match load_config(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match config.backend {
        SourceBackend::Csv => {
            let source = CsvHedgeAdapter::from_config(&config);
            print_source_info(&source)
        }
        SourceBackend::Postgres => {
            #[cfg(feature = "postgres")]
            {
                use crate::adapters::postgres_adapter::PostgresHedgeAdapter;

                match PostgresHedgeAdapter::from_config(&adapter) {
                    Ok(source) => print_source_info(&source),
                    Err(e) => {
                        eprintln!("error: {e}");
                        (&e).into()
                    }
                }
            }

            #[cfg(not(feature = "postgres"))]
            {
                let _ = &adapter;
                eprintln!("error: postgres feature is required for the postgres backend");
                ExitCode::from(2)
            }
        }
    }
}

fn print_source_info(source: &dyn HedgeSource) -> ExitCode {
    for kind in [SourceKind::Vmr, SourceKind::Planif] {
        match source.fetch(kind) {
            Ok(rows) => {
                let range = rows
                    .iter()
                    .map(|r| r.date_debut)
                    .min()
                    .zip(rows.iter().map(|r| r.date_fin).max());
                match range {
                    Some((min, max)) => {
                        println!("{}: {} rows, {} to {}", kind, rows.len(), min, max)
                    }
                    None => println!("{}: 0 rows", kind),
                }
            }
            Err(e) => {
                eprintln!("error querying {}: {}", kind, e);
                return (&e).into();
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_greeks(spot: f64, strike: f64, maturity: f64, rate: f64, sigma: f64, t: f64) -> ExitCode {
    if maturity <= t {
        eprintln!("error: maturity must be after the valuation date");
        return ExitCode::from(4);
    }
    if spot <= 0.0 || strike <= 0.0 || sigma <= 0.0 {
        eprintln!("error: spot, strike and volatility must be positive");
        return ExitCode::from(4);
    }

    println!("value  {:>12.6}", greeks::call_value(spot, strike, t, maturity, rate, sigma));
    println!("delta  {:>12.6}", greeks::call_delta(spot, strike, t, maturity, rate, sigma));
    println!("gamma  {:>12.6}", greeks::call_gamma(spot, strike, t, maturity, rate, sigma));
    println!("theta  {:>12.6}", greeks::call_theta(spot, strike, t, maturity, rate, sigma));
    println!("vega   {:>12.6}", greeks::call_vega(spot, strike, t, maturity, rate, sigma));
    println!("rho    {:>12.6}", greeks::call_rho(spot, strike, t, maturity, rate, sigma));
    ExitCode::SUCCESS
}
