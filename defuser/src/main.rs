//! Operator-side rule engine for defusing a device module by module.
//!
//! `defuser play` drives a whole device interactively; `defuser solve`
//! answers a single module encounter and exits.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use defuser::core::error::SolveError;
use defuser::core::state::{Outcome, Phase};
use defuser::dispatch::{ModuleKind, resolve};
use defuser::exit_codes;
use defuser::io::config::{DEFAULT_CONFIG_FILE, load_config};
use defuser::io::setup::{build_state, load_setup};
use defuser::logging;
use defuser::session::{Session, SessionEnd, prompt_setup};

#[derive(Parser)]
#[command(
    name = "defuser",
    version,
    about = "Rule engine for defusing a device module by module"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive session for one device.
    Play {
        /// Device setup TOML. Prompts for the device facts when omitted.
        #[arg(long)]
        setup: Option<PathBuf>,
        /// Config TOML.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Resolve a single module against a device setup.
    Solve {
        /// Device setup TOML.
        #[arg(long)]
        setup: PathBuf,
        /// Config TOML.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Strikes already on the device.
        #[arg(long, default_value_t = 0)]
        strikes: u32,
        /// Print the resolution as JSON.
        #[arg(long)]
        json: bool,
        /// Module kind (see `defuser modules`).
        module: ModuleKind,
        /// Module input tokens.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// List module kinds and their expected input.
    Modules,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Play { setup, config } => cmd_play(setup.as_deref(), &config),
        Command::Solve {
            setup,
            config,
            strikes,
            json,
            module,
            tokens,
        } => cmd_solve(&setup, &config, strikes, json, module, &tokens),
        Command::Modules => cmd_modules(),
    }
}

fn cmd_play(setup_path: Option<&Path>, config_path: &Path) -> Result<i32> {
    let cfg = load_config(config_path)?;
    logging::init(&cfg.log_filter);

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let setup = match setup_path {
        Some(path) => load_setup(path)?,
        None => prompt_setup(&mut input, &mut output)?,
    };
    let state = build_state(&setup, &cfg)?;

    let mut session = Session::new(state, input, output).with_prompt(cfg.prompt);
    let end = session.run()?;
    info!(?end, strikes = session.state().strike_count(), "session over");
    Ok(match end {
        SessionEnd::Resolved(Outcome::Defused) | SessionEnd::Abandoned => exit_codes::OK,
        SessionEnd::Resolved(Outcome::ExplodedOnStrikes | Outcome::TimedOut) => {
            exit_codes::EXPLODED
        }
    })
}

fn cmd_solve(
    setup_path: &Path,
    config_path: &Path,
    strikes: u32,
    json: bool,
    module: ModuleKind,
    tokens: &[String],
) -> Result<i32> {
    let cfg = load_config(config_path)?;
    logging::init(&cfg.log_filter);

    let setup = load_setup(setup_path)?;
    let mut state = build_state(&setup, &cfg)?;
    state.begin().context("start device")?;
    for _ in 0..strikes {
        if let Phase::Resolved(_) = state.record_strike()? {
            bail!(
                "--strikes {strikes} reaches the strike limit of {}",
                state.max_strikes()
            );
        }
    }

    let raw = tokens.join(" ");
    let resolution = match resolve(module, &raw, &state) {
        Ok(resolution) => resolution,
        Err(err) => {
            eprintln!("error: {err}");
            if err.is_retryable() {
                eprintln!("usage: {} {}", module, module.usage());
            }
            return Ok(solve_error_code(&err));
        }
    };

    let mut stdout = io::stdout().lock();
    if json {
        let payload = serde_json::to_string_pretty(&resolution).context("serialize json")?;
        writeln!(stdout, "{payload}").context("write resolution")?;
    } else {
        writeln!(stdout, "{}", resolution.action).context("write resolution")?;
    }
    Ok(exit_codes::OK)
}

fn cmd_modules() -> Result<i32> {
    let mut stdout = io::stdout().lock();
    for kind in ModuleKind::ALL {
        writeln!(stdout, "{:<22} {}", kind.as_str(), kind.usage()).context("write modules")?;
    }
    Ok(exit_codes::OK)
}

fn solve_error_code(err: &SolveError) -> i32 {
    match err {
        SolveError::UnknownConfiguration { .. } => exit_codes::UNRESOLVED,
        SolveError::MalformedInput { .. } | SolveError::SessionNotAccepting { .. } => {
            exit_codes::INVALID
        }
    }
}
