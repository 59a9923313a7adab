use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use uc_convert::{
    ConvertError, ConverterConfig, Direction, NamingStrategy, UniformNoise, UnitConverter,
    add_noise_slice, load_config,
};
use uc_table::{Region, TableError};

#[derive(Parser)]
#[command(name = "uc-cli")]
#[command(about = "Table-driven engineering/physical unit conversion", long_about = None)]
struct Cli {
    /// Converter configuration YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding conversion tables (overrides the config file)
    #[arg(long, global = true)]
    table_dir: Option<PathBuf>,

    /// How table names are derived from identifiers (overrides the config file)
    #[arg(long, global = true, value_enum)]
    naming: Option<NamingArg>,

    /// Seed for reproducible noise (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert values through the table selected by a record identifier
    Convert {
        /// Record identifier, e.g. CONV-SI-QFA-RB
        identifier: String,
        /// Values to convert
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
        /// Conversion direction
        #[arg(short, long, value_enum, default_value_t = DirectionArg::EngToPhys)]
        direction: DirectionArg,
        /// Amplitude of uniform noise added to each converted value
        #[arg(long)]
        noise: Option<f64>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the rows of a conversion table
    Inspect {
        /// Table resource name inside the table directory
        resource: String,
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Perturb samples by up to level * 1e-3
    Noise {
        /// Noise level
        level: f64,
        /// Samples to perturb
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NamingArg {
    FixedAffix,
    Delimiter,
    Auto,
}

impl From<NamingArg> for NamingStrategy {
    fn from(arg: NamingArg) -> Self {
        match arg {
            NamingArg::FixedAffix => Self::FixedAffix,
            NamingArg::Delimiter => Self::Delimiter,
            NamingArg::Auto => Self::Auto,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    EngToPhys,
    PhysToEng,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::EngToPhys => Self::EngineeringToPhysical,
            DirectionArg::PhysToEng => Self::PhysicalToEngineering,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConvertError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Serialize)]
struct ConvertedValue {
    input: f64,
    output: f64,
    region: Option<Region>,
}

#[derive(Serialize)]
struct ConvertReport<'a> {
    identifier: &'a str,
    resource: Option<&'a str>,
    has_table: bool,
    direction: Direction,
    values: Vec<ConvertedValue>,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Convert {
            identifier,
            values,
            direction,
            noise,
            json,
        } => cmd_convert(&config, &identifier, &values, direction.into(), noise, json),
        Commands::Inspect { resource, json } => cmd_inspect(&config, &resource, json),
        Commands::Noise { level, values } => cmd_noise(&config, level, values),
    }
}

fn resolve_config(cli: &Cli) -> CliResult<ConverterConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(dir) = &cli.table_dir {
        config.table_dir = dir.clone();
    }
    if let Some(naming) = cli.naming {
        config.naming = naming.into();
    }
    if cli.seed.is_some() {
        config.noise_seed = cli.seed;
    }
    tracing::debug!(table_dir = %config.table_dir.display(), naming = ?config.naming, "configuration");
    Ok(config)
}

fn cmd_convert(
    config: &ConverterConfig,
    identifier: &str,
    values: &[f64],
    direction: Direction,
    noise_amplitude: Option<f64>,
    json: bool,
) -> CliResult<()> {
    let converter = UnitConverter::from_identifier(identifier, config);
    let mut noise = UniformNoise::from_seed_option(config.noise_seed);

    let values = values
        .iter()
        .map(|&input| {
            let output = match noise_amplitude {
                Some(amplitude) => {
                    converter.convert_with_noise(input, direction, amplitude, &mut noise)
                }
                None => converter.convert(input, direction),
            };
            ConvertedValue {
                input,
                output,
                region: converter.region(input, direction),
            }
        })
        .collect();

    let report = ConvertReport {
        identifier,
        resource: converter.resource(),
        has_table: converter.has_table(),
        direction,
        values,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match (report.resource, report.has_table) {
        (Some(resource), true) => println!("Table: {}", resource),
        (Some(resource), false) => println!("Table: {} (unavailable, identity)", resource),
        (None, _) => println!("Table: none (identity)"),
    }
    for v in &report.values {
        match v.region {
            Some(region) => println!("{:>14.6} -> {:>14.6}  [{:?}]", v.input, v.output, region),
            None => println!("{:>14.6} -> {:>14.6}", v.input, v.output),
        }
    }
    Ok(())
}

fn cmd_inspect(config: &ConverterConfig, resource: &str, json: bool) -> CliResult<()> {
    let loader = config.loader();
    let table = loader.load(resource)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Table: {}", loader.resolve(resource)?.display());
    println!(
        "Rows: {} (declared {}, skipped {})",
        table.row_count(),
        table.declared_rows(),
        table.skipped_rows()
    );
    println!("{:>14} {:>14}", "engineering", "physical");
    for row in table.rows() {
        println!("{:>14.6} {:>14.6}", row.engineering, row.physical);
    }
    Ok(())
}

fn cmd_noise(config: &ConverterConfig, level: f64, mut values: Vec<f64>) -> CliResult<()> {
    let mut noise = UniformNoise::from_seed_option(config.noise_seed);
    add_noise_slice(&mut values, level, &mut noise);
    for v in values {
        println!("{}", v);
    }
    Ok(())
}
