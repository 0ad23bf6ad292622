use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process,
    str::FromStr,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use sqlfront::{
    errors::errors::Error, lexer::lexer::tokenize, parse_with, render_caret_in, Charset,
    ParserConfig, SqlMode,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented tree, one node or token per line
    Tree,
    /// Tree as nested JSON objects
    Json,
    /// Lexer output, one token per line
    Tokens,
    /// One S-expression per statement
    Sexp,
}

#[derive(Parser)]
#[command(name = "sqlfront", about = "Parses a batch of MySQL-dialect SQL statements", version)]
struct Cli {
    /// File holding the batch; standard input when absent
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Comma separated sql_mode, e.g. ANSI_QUOTES,PIPES_AS_CONCAT
    #[arg(long)]
    sql_mode: Option<String>,

    /// Charset the input is encoded in
    #[arg(long)]
    charset: Option<String>,

    /// JSON parser configuration; --sql-mode and --charset override it
    #[arg(long, value_name = "FILE.json")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(2);
        }
    };

    let input = match read_input(&cli) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("Error: cannot read input: {}", err);
            process::exit(2);
        }
    };

    if cli.format == OutputFormat::Tokens {
        let stream = tokenize(&input, &config);
        for token in &stream.tokens {
            println!("{} {} {:?}", token.position, token.kind, token.value);
        }
        report(&input, config.charset, &stream.errors);
        return;
    }

    let start = Instant::now();
    let result = parse_with(&input, &config);
    info!(
        "parsed {} statement(s) in {:?}",
        result.statements().count(),
        start.elapsed()
    );

    match cli.format {
        OutputFormat::Tree => print!("{}", result.tree().dump()),
        OutputFormat::Json => match result.tree().to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Error: cannot serialize tree: {}", err);
                process::exit(2);
            }
        },
        OutputFormat::Sexp => {
            for statement in result.statements() {
                println!("{}", statement.to_sexp());
            }
        }
        OutputFormat::Tokens => {}
    }

    report(&input, config.charset, result.errors());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<ParserConfig, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|err| format!("cannot read '{}': {}", path.display(), err))?;
            ParserConfig::from_json(&json).map_err(|err| err.to_string())?
        }
        None => ParserConfig::default(),
    };

    if let Some(mode) = &cli.sql_mode {
        config = config.with_sql_mode(SqlMode::from_str(mode).map_err(|err| err.to_string())?);
    }
    if let Some(name) = &cli.charset {
        let charset =
            Charset::from_name(name).ok_or_else(|| format!("unknown charset '{}'", name))?;
        config = config.with_charset(charset);
    }

    debug!("sql_mode={} charset={}", config.sql_mode, config.charset.name());
    Ok(config)
}

fn read_input(cli: &Cli) -> io::Result<Vec<u8>> {
    match &cli.file {
        Some(path) => fs::read(path),
        None => {
            let mut input = vec![];
            io::stdin().read_to_end(&mut input)?;
            Ok(input)
        }
    }
}

/// Prints every error under its source line and exits with status 1 when
/// there were any.
fn report(input: &[u8], charset: Charset, errors: &[Error]) {
    if errors.is_empty() {
        return;
    }

    for error in errors {
        eprint!("{}", render_caret_in(input, charset, error));
    }
    process::exit(1);
}
