//! Choreboard interactive shell entry point.
//!
//! # Responsibility
//! - Parse startup flags and bootstrap core logging.
//! - Open the task store and hand control to the shell session loop.

mod shell;

use choreboard_core::{default_log_level, init_logging, FileTaskRepository, TaskStore};
use clap::Parser;
use log::info;
use shell::Session;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "choreboard", about = "Owner-aware task list manager", version)]
struct Cli {
    /// Task file to load and save
    #[arg(long, default_value = "tasks.txt")]
    file: PathBuf,

    /// Absolute directory for rolling log files (logging is off without it)
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(message) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    let repo = FileTaskRepository::new(&cli.file);
    let store = match TaskStore::open(repo) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: cannot open task file: {err}");
            std::process::exit(1);
        }
    };

    info!(
        "event=shell_start module=cli status=ok file={} tasks={}",
        cli.file.display(),
        store.tasks().len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store);
    if let Err(err) = session.run(stdin.lock(), stdout.lock()) {
        eprintln!("error: terminal I/O failed: {err}");
        std::process::exit(1);
    }
}
