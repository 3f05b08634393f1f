use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};

mod output;
mod settings;
mod table;

/// The most passwords one `generate` invocation will produce.
const MAX_COUNT: usize = 10_000;

/// pwgen - Generate random passwords from letters, and optionally digits and symbols.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
#[command(propagate_version = true)]
struct Args {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate one or more random passwords.
    Generate(GenerateArgs),
    /// Print the characters a password would be drawn from.
    Alphabet(ShapeArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    #[command(flatten)]
    shape: ShapeArgs,

    /// The number of characters in each password [default: 16]
    #[arg(short, long, env = "PWGEN_LENGTH", allow_negative_numbers = true)]
    length: Option<i64>,

    /// How many passwords to generate (at most 10000).
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// How to print the passwords.
    #[arg(short, long, value_enum, default_value_t = output::Format::Plain)]
    format: output::Format,
}

/// Arguments deciding which characters a password may contain.
#[derive(clap::Args)]
pub(crate) struct ShapeArgs {
    /// YAML preset file with defaults for the other options.
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Include the digits 0-9 [default: true]
    #[arg(
        short,
        long,
        env = "PWGEN_DIGITS",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub(crate) digits: Option<bool>,

    /// Include symbols [default: false]
    #[arg(
        short,
        long,
        env = "PWGEN_SYMBOLS",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub(crate) symbols: Option<bool>,

    /// The symbols to use when symbols are included [default: !@#$%^&*()_+-=[]{}~]
    #[arg(long, env = "PWGEN_SYMBOL_SET", allow_hyphen_values = true)]
    pub(crate) symbol_set: Option<String>,
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Generate(generate_args) => generate(generate_args)?,
        Command::Alphabet(shape) => alphabet(shape)?,
    }

    Ok(())
}

fn generate(args: GenerateArgs) -> Result<(), ProgError> {
    let settings = settings::resolve(&args.shape, args.length)?;
    if args.count > MAX_COUNT {
        return Err(ProgError::TooManyPasswords(args.count));
    }
    info!(
        "generating {} password(s) of length {}",
        args.count, settings.config.length
    );
    let alphabet = settings.generator.alphabet(&settings.config);
    let generated = (0..args.count)
        .map(|_| -> Result<output::Generated, ProgError> {
            let password = settings.generator.generate(&settings.config)?;
            Ok(output::Generated::new(password, &alphabet))
        })
        .collect::<Result<Vec<_>, _>>()?;
    output::write_passwords(args.format, &generated, io::stdout().lock())
        .context("failed to write passwords to stdout")?;
    Ok(())
}

fn alphabet(shape: ShapeArgs) -> Result<(), ProgError> {
    let settings = settings::resolve(&shape, None)?;
    let alphabet = settings.generator.alphabet(&settings.config);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{alphabet}")
        .and_then(|()| writeln!(stdout, "{} characters", alphabet.len()))
        .context("failed to write alphabet to stdout")?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProgError {
    #[error("Invalid configuration: {}", .0.problem())]
    InvalidConfig(pwgen::InvalidConfig),
    #[error("Too many passwords requested: {} (at most {} per run).", .0, MAX_COUNT)]
    TooManyPasswords(usize),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<pwgen::InvalidConfig> for ProgError {
    fn from(err: pwgen::InvalidConfig) -> ProgError {
        ProgError::InvalidConfig(err)
    }
}
