//! Console command - line-oriented grid editor
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: Console::run_lines() - read, execute, print loop
//! - Level 3: parse_command(), Console::execute()
//! - Level 4: render(), formatting utilities
//!
//! Pointer commands take pixel coordinates and go through the same
//! click-vs-drag classifier a graphical front end would use.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use hexgrid_core::{Gesture, Grid, Hex, InputClassifier, Pixel, TileChange, TileType};

use crate::grid_args::GridArgs;

const HELP: &str = "\
Commands:
  down X Y            press the pointer at pixel (X, Y)
  up X Y              release the pointer at pixel (X, Y)
  click X Y           press and release at the same pixel
  drag X1 Y1 X2 Y2    press at one pixel, release at another
  select N | N        select a tile type (1-4)
  set Q R TYPE        set tile (Q, R) directly
  swap Q1 R1 Q2 R2    swap two tiles directly
  show                print the grid
  clear               reset every tile to EMPTY
  help                print this help
  quit                exit";

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Do not print the grid after each change
    #[arg(long)]
    pub quiet: bool,
}

/// One parsed console line
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Down(Pixel),
    Up(Pixel),
    Click(Pixel),
    Drag(Pixel, Pixel),
    Select(TileType),
    Set(Hex, TileType),
    Swap(Hex, Hex),
    Show,
    Clear,
    Help,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run console command
///
/// 1. Resolve the grid configuration
/// 2. Build the grid and classifier
/// 3. Run the read-execute-print loop until EOF or `quit`
pub fn run(args: ConsoleArgs) -> Result<()> {
    let config = args.grid.resolve()?;
    let (grid, input) = config.build()?;

    tracing::info!(
        "Console on a {}x{} grid (radius {}, drag threshold {})",
        config.width,
        config.height,
        config.hex_radius,
        config.drag_threshold
    );

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut console = Console::new(grid, input, !args.quiet);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", render(&console.grid, &console.input))?;
    console.run_lines(reader, &mut out)
}

// ============================================================================
// LEVEL 2 - LOOP
// ============================================================================

pub struct Console {
    grid: Grid,
    input: InputClassifier,
    show_after_change: bool,
}

impl Console {
    pub fn new(grid: Grid, input: InputClassifier, show_after_change: bool) -> Self {
        Self {
            grid: grid.with_change_log(),
            input,
            show_after_change,
        }
    }

    /// Execute lines until EOF or `quit`. Bad lines are reported and skipped.
    pub fn run_lines<R: BufRead, W: Write>(&mut self, reader: R, out: &mut W) -> Result<()> {
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!("line {}: {}", number + 1, e);
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };

            match self.execute(command) {
                ControlFlow::Continue(output) => {
                    if !output.is_empty() {
                        writeln!(out, "{}", output)?;
                    }
                }
                ControlFlow::Break(()) => break,
            }
        }
        Ok(())
    }

    // ========================================================================
    // LEVEL 3 - EXECUTION
    // ========================================================================

    /// Apply one command, returning what to print
    pub fn execute(&mut self, command: Command) -> ControlFlow<(), String> {
        let mut lines = Vec::new();

        match command {
            Command::Down(p) => self.input.pointer_down(&self.grid, p),
            Command::Up(p) => {
                if let Some(gesture) = self.input.pointer_up(&mut self.grid, p) {
                    lines.push(format_gesture(gesture));
                }
            }
            Command::Click(p) => {
                self.input.pointer_down(&self.grid, p);
                if let Some(gesture) = self.input.pointer_up(&mut self.grid, p) {
                    lines.push(format_gesture(gesture));
                }
            }
            Command::Drag(from, to) => {
                self.input.pointer_down(&self.grid, from);
                if let Some(gesture) = self.input.pointer_up(&mut self.grid, to) {
                    lines.push(format_gesture(gesture));
                }
            }
            Command::Select(tile) => {
                self.input.select(tile);
                lines.push(selection_line(&self.input));
            }
            Command::Set(hex, tile) => {
                if !self.grid.contains(hex) {
                    lines.push(format!("({}, {}) is off the grid", hex.q, hex.r));
                }
                self.grid.set(hex, tile);
            }
            Command::Swap(a, b) => self.grid.swap(a, b),
            Command::Clear => self.grid.clear(),
            Command::Show => lines.push(render(&self.grid, &self.input)),
            Command::Help => lines.push(HELP.to_string()),
            Command::Quit => return ControlFlow::Break(()),
        }

        let changes = self.grid.take_changes();
        lines.extend(changes.iter().map(format_change));
        if self.show_after_change && !changes.is_empty() {
            lines.push(render(&self.grid, &self.input));
        }

        ControlFlow::Continue(lines.join("\n"))
    }
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "down" => Command::Down(pixel_arg(&args, 0, word)?),
        "up" => Command::Up(pixel_arg(&args, 0, word)?),
        "click" => Command::Click(pixel_arg(&args, 0, word)?),
        "drag" => Command::Drag(pixel_arg(&args, 0, word)?, pixel_arg(&args, 2, word)?),
        "select" => Command::Select(tile_arg(&args, 0, word)?),
        "set" => Command::Set(hex_arg(&args, 0, word)?, tile_arg(&args, 2, word)?),
        "swap" => Command::Swap(hex_arg(&args, 0, word)?, hex_arg(&args, 2, word)?),
        "show" => Command::Show,
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match other.chars().next().and_then(TileType::from_key) {
            Some(tile) if other.len() == 1 => Command::Select(tile),
            _ => bail!("unknown command: {} (try `help`)", other),
        },
    };

    Ok(Some(command))
}

// ============================================================================
// LEVEL 4 - FORMATTING UTILITIES
// ============================================================================

/// Text view of the grid: one line per row, odd rows indented half a cell
pub fn render(grid: &Grid, input: &InputClassifier) -> String {
    let mut text = String::new();
    for r in 0..grid.height() as i32 {
        if r % 2 == 1 {
            text.push(' ');
        }
        let row: Vec<String> = (0..grid.width() as i32)
            .map(|q| grid.get((q, r)).unwrap_or_default().glyph().to_string())
            .collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text.push_str(&selection_line(input));
    text
}

fn selection_line(input: &InputClassifier) -> String {
    format!("Selected: {} (1-4)", input.selected())
}

fn format_gesture(gesture: Gesture) -> String {
    match gesture {
        Gesture::Click { hex } => format!("click at ({}, {})", hex.q, hex.r),
        Gesture::Drag { from, to } => format!(
            "drag ({}, {}) -> ({}, {})",
            from.q, from.r, to.q, to.r
        ),
    }
}

fn format_change(change: &TileChange) -> String {
    format!(
        "({}, {}): {} -> {}",
        change.hex.q, change.hex.r, change.from, change.to
    )
}

fn number_arg<T: std::str::FromStr>(args: &[&str], index: usize, command: &str) -> Result<T> {
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("{}: missing argument {}", command, index + 1))?;
    raw.parse()
        .map_err(|_| anyhow!("{}: not a number: {}", command, raw))
}

fn pixel_arg(args: &[&str], index: usize, command: &str) -> Result<Pixel> {
    let x: f32 = number_arg(args, index, command)?;
    let y: f32 = number_arg(args, index + 1, command)?;
    if !x.is_finite() || !y.is_finite() {
        bail!("{}: pixel coordinates must be finite, got ({}, {})", command, x, y);
    }
    Ok(Pixel::new(x, y))
}

fn hex_arg(args: &[&str], index: usize, command: &str) -> Result<Hex> {
    Ok(Hex::new(
        number_arg(args, index, command)?,
        number_arg(args, index + 1, command)?,
    ))
}

fn tile_arg(args: &[&str], index: usize, command: &str) -> Result<TileType> {
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("{}: missing tile type", command))?;
    Ok(raw.parse()?)
}

// ============================================================================
// TESTS
// ============================================================================
