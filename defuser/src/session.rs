//! Line-oriented session driver for one device.
//!
//! Reads operator lines, feeds module input through [`resolve`], commits the
//! returned memory, and applies strikes and session-ending events. All I/O
//! goes through the supplied reader and writer so tests can script a session.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::complex_keypad::COMPLEX_KEYPAD_LEGEND;
use crate::core::error::SolveError;
use crate::core::keypad::KEYPAD_LEGEND;
use crate::core::maze::MazeRouter;
use crate::core::state::{DeviceSetup, DeviceState, LIGHTABLE_INDICATORS, Outcome, Phase};
use crate::core::types::{Action, Cell};
use crate::dispatch::{ModuleKind, resolve};

const LEGEND_REQUEST: &str = "?";
const LIT_USAGE: &str = "lit <indicator> on|off";

/// How a driven session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Resolved(Outcome),
    /// The operator quit or input ran out before the device was resolved.
    Abandoned,
}

/// Ask the operator for the device facts the rules consult.
pub fn prompt_setup<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<DeviceSetup> {
    let counts = ask(reader, writer, "Batteries and holders, separated by a space:")?;
    let mut numbers = counts.split_whitespace().map(str::parse::<u32>);
    let batteries = numbers
        .next()
        .transpose()
        .context("parse battery count")?
        .unwrap_or(0);
    let holders = numbers
        .next()
        .transpose()
        .context("parse holder count")?
        .unwrap_or(0);

    let indicators: Vec<String> = ask(
        reader,
        writer,
        "Indicators and ports present (FRK CAR BOB NSA PARALLEL DVI-D), space separated:",
    )?
    .split_whitespace()
    .map(str::to_ascii_uppercase)
    .collect();

    let lightable: Vec<&str> = LIGHTABLE_INDICATORS
        .iter()
        .copied()
        .filter(|label| indicators.iter().any(|present| present == label))
        .collect();
    let lit = if lightable.is_empty() {
        Vec::new()
    } else {
        let question = format!("Which of these are lit? ({})", lightable.join(" "));
        let mut lit = Vec::new();
        for label in ask(reader, writer, &question)?.split_whitespace() {
            let label = label.to_ascii_uppercase();
            if lightable.contains(&label.as_str()) {
                lit.push(label);
            } else {
                warn!(label = %label, "ignoring lit answer for an indicator that cannot light");
            }
        }
        lit
    };

    let serial = ask(reader, writer, "Serial number:")?;
    Ok(DeviceSetup {
        serial,
        batteries,
        holders,
        indicators,
        lit,
    })
}

fn ask<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, question: &str) -> Result<String> {
    writeln!(writer, "{question}").context("write prompt")?;
    writer.flush().context("flush prompt")?;
    let mut line = String::new();
    reader.read_line(&mut line).context("read answer")?;
    Ok(line.trim().to_string())
}

pub struct Session<'a, R, W> {
    state: DeviceState,
    reader: R,
    writer: W,
    router: Option<&'a dyn MazeRouter>,
    prompt: bool,
    /// Set while the last button answer was to hold it.
    holding: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(state: DeviceState, reader: R, writer: W) -> Self {
        Self {
            state,
            reader,
            writer,
            router: None,
            prompt: true,
            holding: false,
        }
    }

    /// Route maze resolutions through `router` instead of only naming the maze.
    pub fn with_router(mut self, router: &'a dyn MazeRouter) -> Self {
        self.router = Some(router);
        self
    }

    /// Toggle the status block and prompt printed before each command.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Drive the session until the device is resolved or input ends.
    pub fn run(&mut self) -> Result<SessionEnd> {
        self.state
            .begin()
            .context("start session: device already resolved")?;
        info!(
            serial = self.state.serial(),
            batteries = self.state.battery_count(),
            holders = self.state.holder_count(),
            "session started"
        );

        loop {
            if self.prompt {
                self.write_status()?;
                writeln!(self.writer, "Choose a module to defuse (help for commands)")
                    .context("write prompt")?;
                self.writer.flush().context("flush prompt")?;
            }
            let mut line = String::new();
            let read = self.reader.read_line(&mut line).context("read command")?;
            if read == 0 {
                info!("input ended before the device was resolved");
                return Ok(SessionEnd::Abandoned);
            }
            if let Some(end) = self.handle_line(line.trim())? {
                return Ok(end);
            }
        }
    }

    /// Apply one operator line. Returns `Some` once the session is over.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<SessionEnd>> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "x" | "strike" => self.strike(),
            "defused" => {
                self.state.defuse()?;
                info!(strikes = self.state.strike_count(), "device defused");
                writeln!(
                    self.writer,
                    "Good job!\n{} strike(s)!",
                    self.state.strike_count()
                )?;
                Ok(Some(SessionEnd::Resolved(Outcome::Defused)))
            }
            "timeout" | "time" => {
                self.state.time_out()?;
                info!("device exploded: no time remaining");
                writeln!(
                    self.writer,
                    "I thought you were supposed to be faster...\n{} strike(s)!",
                    self.state.strike_count()
                )?;
                Ok(Some(SessionEnd::Resolved(Outcome::TimedOut)))
            }
            "status" => {
                self.write_status()?;
                Ok(None)
            }
            "help" => {
                self.write_help()?;
                Ok(None)
            }
            "lit" => {
                self.lit(rest)?;
                Ok(None)
            }
            "quit" | "q" => Ok(Some(SessionEnd::Abandoned)),
            _ => {
                self.module(command, rest)?;
                Ok(None)
            }
        }
    }

    fn strike(&mut self) -> Result<Option<SessionEnd>> {
        let phase = self.state.record_strike()?;
        info!(strikes = self.state.strike_count(), "strike recorded");
        if let Phase::Resolved(outcome) = phase {
            info!("device exploded: strike limit reached");
            writeln!(self.writer, "Not my fault")?;
            return Ok(Some(SessionEnd::Resolved(outcome)));
        }
        let marks = "X".repeat(self.strike_marks());
        writeln!(self.writer, "{marks}")?;
        Ok(None)
    }

    fn lit(&mut self, rest: &str) -> Result<()> {
        let mut args = rest.split_whitespace();
        let switch = match (args.next(), args.next(), args.next()) {
            (Some(label), Some("on"), None) => self.state.set_lit(label, true),
            (Some(label), Some("off"), None) => self.state.set_lit(label, false),
            _ => Err(SolveError::malformed(LIT_USAGE, format!("'lit {rest}'"))),
        };
        match switch {
            Ok(()) => {
                let lit: Vec<&str> = self.state.lit_indicators().collect();
                info!(lit = ?lit, "lit indicators changed");
                writeln!(self.writer, "Lit indicators: {}", or_none(&lit))?;
            }
            Err(err) => {
                warn!(input = rest, error = %err, "lit change rejected");
                writeln!(self.writer, "error: {err}")?;
                writeln!(self.writer, "usage: {LIT_USAGE}")?;
            }
        }
        Ok(())
    }

    fn module(&mut self, command: &str, rest: &str) -> Result<()> {
        let kind = match command.parse::<ModuleKind>() {
            Ok(kind) => kind,
            Err(err) => {
                writeln!(self.writer, "error: {err}")?;
                return Ok(());
            }
        };

        if rest == LEGEND_REQUEST {
            return self.write_legend(kind);
        }

        let resolved = if kind == ModuleKind::ButtonRelease && !self.holding {
            Err(SolveError::malformed("a held button first", "no button held"))
        } else {
            resolve(kind, rest, &self.state)
        };

        match resolved {
            Ok(resolution) => {
                self.state.commit(&resolution);
                match kind {
                    ModuleKind::Button => self.holding = resolution.action == Action::HoldButton,
                    ModuleKind::ButtonRelease => self.holding = false,
                    _ => {}
                }
                if kind.is_stateful() {
                    info!(memory = ?self.state.memory(), "cross-module memory updated");
                }
                writeln!(self.writer, "<<< {}", resolution.action)?;
                if let Action::NavigateMaze { maze, start, end } = resolution.action {
                    self.route_maze(maze, start, end)?;
                }
            }
            Err(err) => {
                warn!(module = %kind, input = rest, error = %err, "module input rejected");
                writeln!(self.writer, "error: {err}")?;
                if err.is_retryable() {
                    writeln!(self.writer, "usage: {} {}", kind, kind.usage())?;
                }
            }
        }
        Ok(())
    }

    fn route_maze(&mut self, maze: u8, start: Cell, end: Cell) -> Result<()> {
        let Some(router) = self.router else {
            return Ok(());
        };
        match router
            .find_path(maze, start, end)
            .with_context(|| format!("route maze {maze}"))
        {
            Ok(route) => {
                writeln!(self.writer, "Maze:\n{}", route.grid)?;
                writeln!(self.writer, "Path: {}", route.moves.join(" "))?;
            }
            Err(err) => {
                warn!(module = "maze", error = %err, "maze routing failed");
                writeln!(self.writer, "error: {err:#}")?;
            }
        }
        Ok(())
    }

    fn write_status(&mut self) -> Result<()> {
        let marks = "X".repeat(self.strike_marks());
        let state = &self.state;
        let indicators: Vec<&str> = state.indicators().collect();
        let lit: Vec<&str> = state.lit_indicators().collect();
        writeln!(self.writer, "Status: {}", state.phase())?;
        writeln!(self.writer, "Indicators: {}", or_none(&indicators))?;
        writeln!(self.writer, "Lit indicators: {}", or_none(&lit))?;
        writeln!(
            self.writer,
            "Batteries: {} (holders: {})",
            state.battery_count(),
            state.holder_count()
        )?;
        writeln!(
            self.writer,
            "Serial#: {} ({}, {})",
            state.serial(),
            if state.is_odd() { "odd" } else { "even" },
            if state.has_vowel() { "vowel" } else { "no vowel" },
        )?;
        writeln!(self.writer, "Strikes: {marks}").context("write status")
    }

    fn write_help(&mut self) -> Result<()> {
        writeln!(self.writer, "Modules:")?;
        for kind in ModuleKind::ALL {
            writeln!(self.writer, "  {:<22} {}", kind.as_str(), kind.usage())?;
        }
        writeln!(
            self.writer,
            "Session: strike (x), {LIT_USAGE}, defused, timeout, status, quit"
        )?;
        Ok(())
    }

    fn write_legend(&mut self, kind: ModuleKind) -> Result<()> {
        let legend = match kind {
            ModuleKind::Keypad => KEYPAD_LEGEND,
            ModuleKind::ComplexKeypad => COMPLEX_KEYPAD_LEGEND,
            other => {
                writeln!(self.writer, "usage: {} {}", other, other.usage())?;
                return Ok(());
            }
        };
        for (token, description) in legend {
            writeln!(self.writer, "{token:<3}| {description}")?;
        }
        Ok(())
    }

    fn strike_marks(&self) -> usize {
        usize::try_from(self.state.strike_count()).unwrap_or(usize::MAX)
    }
}

fn or_none(labels: &[&str]) -> String {
    if labels.is_empty() {
        "none significant".to_string()
    } else {
        labels.join(", ")
    }
}
