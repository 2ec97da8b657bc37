//! EstateFlow CLI - Main entry point

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use estateflow_console::{commands, split_line, AppContext, ConsoleCommand, ConsoleConfig, SessionLine};

#[derive(Parser)]
#[command(name = "estateflow")]
#[command(about = "EstateFlow - crowd-lending request ledger and yield console", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands line by line from stdin against one in-memory state
    Session,

    #[command(flatten)]
    Console(ConsoleCommand),
}

fn main() -> anyhow::Result<()> {
    // stdout carries command output (`list --json`), logs go to stderr
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConsoleConfig::from_file(path)?,
        None => ConsoleConfig::default(),
    };
    let mut ctx = AppContext::new(config);

    match cli.command {
        Commands::Session => run_session(&mut ctx)?,
        Commands::Console(command) => commands::execute(&mut ctx, command)?,
    }

    Ok(())
}

/// Line-oriented session; errors are reported and the session continues
fn run_session(ctx: &mut AppContext) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("EstateFlow session {} (type 'help', 'quit' to exit)", ctx.session_id());
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let words = split_line(&line?);

        match words.first().map(String::as_str) {
            None => {}
            Some("quit") | Some("exit") => break,
            Some(_) => match SessionLine::try_parse_from(&words) {
                Ok(parsed) => {
                    if let Err(e) = commands::execute(ctx, parsed.command) {
                        eprintln!("❌ {e}");
                    }
                }
                // Also covers `help` and `--help`
                Err(e) => {
                    e.print()?;
                }
            },
        }

        print!("> ");
        stdout.flush()?;
    }

    tracing::info!(session_id = %ctx.session_id(), "Console session ended");
    Ok(())
}
