mod debug_report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hotfix::{RuleSet, espanso, lint};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Hotstring autocorrect rule-file tool.
#[derive(Parser, Debug)]
#[command(name = "hotfix", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run words through the matcher and show which rule fired.
    Check(CheckArgs),
    /// Report duplicate, redundant and suspicious rules.
    Lint {
        /// Rule file (.ahk).
        file: PathBuf,
        /// Suffix trigger that needs no whitelist rule (repeatable).
        #[arg(long = "whitelist-exception", value_name = "SUFFIX")]
        whitelist_exceptions: Vec<String>,
        #[command(flatten)]
        color: ColorArgs,
    },
    /// Convert a rule file to an Espanso match file.
    Export {
        /// Rule file (.ahk).
        file: PathBuf,
        /// Write YAML here instead of stdout.
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Rule file (.ahk).
    file: PathBuf,
    /// Words as typed; a trailing end char (e.g. `teh.`) counts as finishing the word.
    #[arg(required = true)]
    words: Vec<String>,
    /// Treat every word as unfinished, even with a trailing end char.
    #[arg(long)]
    no_end_char: bool,
    #[command(flatten)]
    color: ColorArgs,
}

#[derive(Args, Debug)]
struct ColorArgs {
    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,
    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,
}

impl ColorArgs {
    fn enabled(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            io::stdout().is_terminal()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_env("HOTFIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Check(args) => {
            let rules = load(&args.file)?;
            let palette_on = args.color.enabled();
            for word in &args.words {
                let (token, end) = rules.end_chars().split_token(word);
                let (token, end) = if args.no_end_char { (word.as_str(), None) } else { (token, end) };
                let (matched, stats) = rules.find_verbose(token, end.is_some());
                debug_report::print_check(token, end, &matched, &stats, palette_on);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Lint { file, whitelist_exceptions, color } => {
            let source = read(&file)?;
            let rules = RuleSet::parse(&source).with_context(|| format!("failed to parse {}", file.display()))?;
            let options = lint::LintOptions::with_exceptions(whitelist_exceptions);
            let report = lint::lint_source_with(&source, &rules, &options);
            debug_report::print_lint(&file, rules.len(), &report, color.enabled());
            Ok(if report.has_errors() { ExitCode::from(1) } else { ExitCode::SUCCESS })
        }
        Command::Export { file, output } => {
            let rules = load(&file)?;
            let yaml = espanso::to_yaml(&rules);
            match output {
                Some(out) => fs::write(&out, yaml).with_context(|| format!("failed to write {}", out.display()))?,
                None => print!("{yaml}"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load(path: &Path) -> Result<RuleSet> {
    let source = read(path)?;
    RuleSet::parse(&source).with_context(|| format!("failed to parse {}", path.display()))
}
