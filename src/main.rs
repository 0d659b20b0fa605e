use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lispy::{
    repl::{Repl, PROMPT},
    Env,
};

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LISPY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let app = App::parse();
    if app.no_color {
        colored::control::set_override(false);
    }

    let mut repl = Repl::new(Env::with_builtins(), io::stdout()).colored(!app.no_color);
    if !app.quiet {
        repl.banner()?;
    }

    match app.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let stdin = io::stdin();
            repl.prompt(PROMPT).run(stdin.lock().lines())?;
        }
        Command::Run { file } => {
            let reader = File::open(&file)
                .map(BufReader::new)
                .with_context(|| format!("failed to open {}", file.display()))?;
            repl.run(reader.lines())?;
        }
    }
    Ok(())
}

/// A small Lisp with quoted lists
#[derive(Parser)]
#[clap(version)]
struct App {
    #[clap(subcommand)]
    command: Option<Command>,
    /// Do not colour error results
    #[clap(long)]
    no_color: bool,
    /// Do not print the banner
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Read expressions from stdin interactively
    #[clap(alias = "i")]
    Repl,
    /// Evaluate each line of a file
    #[clap(alias = "r")]
    Run { file: PathBuf },
}
