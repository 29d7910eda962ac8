//! tarsh REPL — the interactive front-end.
//!
//! Owns everything the kernel deliberately doesn't: the event loop, the
//! prompt, the display (including clearing it), config bootstrap, and
//! readline history. One line in, one [`Reply`] rendered, repeat until the
//! kernel signals termination.

mod config;

pub use config::ReplConfig;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing::warn;

use tarsh_kernel::audit::AuditLog;
use tarsh_kernel::commands::{Effect, Reply};
use tarsh_kernel::mount::Mount;
use tarsh_kernel::session::Session;
use tarsh_kernel::shell::Shell;

/// Command-line options, parsed in `main`.
#[derive(Debug, Default)]
pub struct Options {
    /// Settings file; created with defaults if missing.
    pub config_path: Option<PathBuf>,
    /// Archive to mount, overriding the config file.
    pub archive: Option<PathBuf>,
}

/// Run the interactive shell until `exit` or EOF.
pub async fn run(opts: Options) -> Result<()> {
    let config_path = opts
        .config_path
        .unwrap_or_else(|| PathBuf::from("tarsh.toml"));
    let config = ReplConfig::load_or_init(&config_path)?;

    let archive = opts.archive.or(config.archive).context(
        "no archive to mount: pass one on the command line or set `archive` in the config",
    )?;

    let mount = if config.in_memory {
        Mount::in_memory(&archive).await?
    } else {
        Mount::extracted(&archive).await?
    };

    let session = Session::new(
        mount.filesystem(),
        &config.actor,
        &config.host,
        AuditLog::new(&config.log_file),
    );
    let mut shell = Shell::new(session);

    println!("tarsh v{} — {}", env!("CARGO_PKG_VERSION"), archive.display());
    println!("Commands: ls, cd, cat, tail, clear, exit\n");

    let mut rl: Editor<(), DefaultHistory> = Editor::new().context("Failed to create editor")?;

    // Load history if it exists
    let history_path = directories::BaseDirs::new()
        .map(|d| d.data_dir().join("tarsh").join("history.txt"));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = format!(
            "{}@{}:{}> ",
            shell.session().actor(),
            shell.session().host(),
            shell.session().cwd().display()
        );

        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());

                let reply = shell.execute(&line).await;
                if render(&mut rl, &reply) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                // The audit log must reach disk even without an explicit exit.
                if let Err(e) = shell.session().audit().flush().await {
                    warn!(error = %e, "audit flush on EOF failed");
                    eprintln!("Warning: failed to write audit log: {e}");
                }
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Show one reply and apply its display effect. Returns true on terminate.
fn render(rl: &mut Editor<(), DefaultHistory>, reply: &Reply) -> bool {
    match reply.effect {
        Effect::ClearScreen => {
            let _ = rl.clear_screen();
        }
        Effect::None | Effect::Terminate => {}
    }
    if !reply.text.is_empty() {
        println!("{}", reply.text);
    }
    reply.effect == Effect::Terminate
}
