//! tarsh entry point.
//!
//! Launch the shell over an archive:
//! ```bash
//! tarsh fs.tar
//! tarsh --config tarsh.toml
//! ```

use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tarsh_repl::Options;

fn parse_args() -> Result<Options> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => opts.config_path = Some(PathBuf::from(path)),
                None => bail!("--config requires a path"),
            },
            "--help" | "-h" => {
                println!("Usage: tarsh [--config <file>] [archive.tar]");
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => bail!("unknown flag: {arg}"),
            _ => opts.archive = Some(PathBuf::from(arg)),
        }
    }
    Ok(opts)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let opts = parse_args()?;
    tarsh_repl::run(opts).await
}
