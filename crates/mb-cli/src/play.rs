//! Interactive terminal loop
//!
//! Reads one command per line and redraws the status after each one. Only the
//! engine's public operations are used; the engine decides whether a pull is
//! accepted.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use mb_lab::{DrawSource, Phase, Preset, SamplingEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Choose(Preset),
    Pull,
    Reset,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "p" | "pull" => Command::Pull,
            "r" | "reset" | "again" => Command::Reset,
            "q" | "quit" | "exit" => Command::Quit,
            other => Preset::from_str(other)
                .map(Command::Choose)
                .unwrap_or_else(|_| Command::Unknown(other.to_string())),
        }
    }
}

/// Run the game loop until `q` or end of input
pub fn run<S: DrawSource>(
    engine: &mut SamplingEngine<S>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    render(engine, &mut output)?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Choose(preset) => engine.choose_configuration(preset),
            Command::Pull => {
                let result = engine.draw();
                if let Some(diagnostic) = result.diagnostic {
                    log::debug!("Pull reported {:?}", diagnostic);
                }
            }
            Command::Reset => engine.reset(),
            Command::Unknown(text) => writeln!(output, "Unknown command: {text}")?,
        }
        render(engine, &mut output)?;
    }

    writeln!(output, "Goodbye!")?;
    output.flush()?;
    Ok(())
}

fn render<S: DrawSource>(engine: &SamplingEngine<S>, out: &mut impl Write) -> io::Result<()> {
    let state = engine.display_state();

    if state.phase == Phase::Selecting {
        writeln!(out, "Choose a game:")?;
        for (i, preset) in Preset::ALL.iter().enumerate() {
            writeln!(out, "  [{}] {}", i + 1, preset.menu_label())?;
        }
        writeln!(out, "  [q] Quit")?;
        return out.flush();
    }

    writeln!(out)?;
    if let Some(preset) = state.preset {
        writeln!(out, "{}", preset.menu_label())?;
    }
    writeln!(out, "{}", state.bag_label())?;
    writeln!(out, "{}", state.pulled_label())?;
    writeln!(out, "{}", state.draws_label())?;
    writeln!(out, "{}", state.red_label())?;

    if let Some(message) = &state.outcome_message {
        writeln!(out, "{message}")?;
        writeln!(out, "[r] Play again  [q] Quit")?;
    } else if state.can_draw {
        writeln!(out, "[p] Pull a marble  [q] Quit")?;
    }
    out.flush()
}
