/*!
CBOR Tools - A CLI for checking CBOR data

# Commands

- `validate`: Walk every item of a CBOR sequence and report where it breaks
- `inspect`: Display CBOR data in diagnostic notation

# Examples

```bash
# Check a file holds well-formed CBOR
cbor validate bundle.cbor

# Check hex text from stdin
echo '83010203' | cbor validate --hex -

# Inspect a file, allowing deeper nesting than the default
cbor inspect --max-recursion 32 data.cbor
```
*/

use clap::{Parser, Subcommand, ValueEnum};

mod inspect;
mod io;
mod validate;

/// A CLI tool for checking CBOR data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logging level
    #[arg(long, global = true, default_value = "warn")]
    log_level: Verbosity,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the input is a well-formed CBOR sequence
    Validate(validate::Command),

    /// Display CBOR data in diagnostic notation
    Inspect(inspect::Command),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    #[value(name = "trace")]
    Trace,
    #[value(name = "debug")]
    Debug,
    #[value(name = "info")]
    Info,
    #[value(name = "warn")]
    Warn,
    #[value(name = "error")]
    Error,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Trace => tracing::Level::TRACE,
            Verbosity::Debug => tracing::Level::DEBUG,
            Verbosity::Info => tracing::Level::INFO,
            Verbosity::Warn => tracing::Level::WARN,
            Verbosity::Error => tracing::Level::ERROR,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = tracing::Level::from(cli.log_level);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(level > tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global default subscriber: {e}"))?;

    match cli.command {
        Commands::Validate(args) => args.exec(),
        Commands::Inspect(args) => args.exec(),
    }
}
