//! src/control.rs
//!
//! UI control events and the two ways they arrive: key presses and text
//! command lines from the remote control server.
//!
//! Every control maps 1:1 to a configuration mutation or a one-shot action on
//! `LiveChart`; see `LiveChart::apply`.

use std::path::PathBuf;

use clap::ValueEnum;
use crossterm::event::KeyCode;
use thiserror::Error;

use crate::chart::config::{ChartType, Theme};

/// Interval step for `+`/`-`, in milliseconds.
pub const INTERVAL_STEP_MS: i64 = 100;
/// Value range step for `[`/`]` and `{`/`}`.
pub const RANGE_STEP: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    TogglePlay,
    Play,
    Pause,
    Reset,
    /// Export the canvas; `None` uses the configured path.
    Export(Option<PathBuf>),
    SetInterval(u64),
    AdjustInterval(i64),
    SetMin(f64),
    SetMax(f64),
    AdjustMin(f64),
    AdjustMax(f64),
    SetChartType(ChartType),
    NextChartType,
    SetTheme(Theme),
    NextTheme,
    SetGrid(bool),
    ToggleGrid,
    SetSmoothing(bool),
    ToggleSmoothing,
}

/// A parsed input: either a chart control or a request to stop.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Apply(Control),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("empty")]
    Empty,
    #[error("unknown {0}")]
    Unknown(String),
    #[error("val {0}")]
    BadValue(String),
}

/// Keyboard binding for the interactive UI.
pub fn from_key(code: KeyCode) -> Option<Command> {
    let control = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') => Control::TogglePlay,
        KeyCode::Char('r') => Control::Reset,
        KeyCode::Char('e') => Control::Export(None),
        KeyCode::Char('t') => Control::NextChartType,
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as u8 - b'1') as usize;
            Control::SetChartType(ChartType::ALL[idx])
        }
        KeyCode::Char('h') => Control::NextTheme,
        KeyCode::Char('g') => Control::ToggleGrid,
        KeyCode::Char('s') => Control::ToggleSmoothing,
        KeyCode::Char('+') | KeyCode::Char('=') => Control::AdjustInterval(INTERVAL_STEP_MS),
        KeyCode::Char('-') => Control::AdjustInterval(-INTERVAL_STEP_MS),
        KeyCode::Char('[') => Control::AdjustMin(-RANGE_STEP),
        KeyCode::Char(']') => Control::AdjustMin(RANGE_STEP),
        KeyCode::Char('{') => Control::AdjustMax(-RANGE_STEP),
        KeyCode::Char('}') => Control::AdjustMax(RANGE_STEP),
        _ => return None,
    };
    Some(Command::Apply(control))
}

/// Parse one remote command line.
///
/// Commands:
/// - `play` | `pause` | `reset` | `quit`
/// - `toggle play|grid|smoothing`
/// - `export [path]`
/// - `set interval <ms>` | `set min <v>` | `set max <v>`
/// - `set type <line|bar|area|scatter>` | `set theme <light|dark|high-contrast>`
/// - `set grid <on|off>` | `set smoothing <on|off>`
pub fn parse_command(line: &str) -> Result<Command, ControlError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(head) = parts.first() else {
        return Err(ControlError::Empty);
    };
    let head = head.to_lowercase();
    let args = &parts[1..];

    let control = match (head.as_str(), args) {
        ("play", []) => Control::Play,
        ("pause", []) => Control::Pause,
        ("reset", []) => Control::Reset,
        ("quit", []) => return Ok(Command::Quit),
        ("toggle", [what]) => match what.to_lowercase().as_str() {
            "play" => Control::TogglePlay,
            "grid" => Control::ToggleGrid,
            "smoothing" => Control::ToggleSmoothing,
            _ => return Err(ControlError::Unknown(parts.join(" "))),
        },
        ("export", []) => Control::Export(None),
        ("export", path) => Control::Export(Some(PathBuf::from(path.join(" ")))),
        ("set", [key, value]) => parse_set(key, value)
            .ok_or_else(|| ControlError::BadValue((*value).to_string()))?,
        _ => return Err(ControlError::Unknown(parts.join(" "))),
    };
    Ok(Command::Apply(control))
}

fn parse_set(key: &str, value: &str) -> Option<Control> {
    let control = match key.to_lowercase().as_str() {
        "interval" => Control::SetInterval(value.parse().ok()?),
        "min" => Control::SetMin(parse_finite(value)?),
        "max" => Control::SetMax(parse_finite(value)?),
        "type" => Control::SetChartType(<ChartType as ValueEnum>::from_str(value, true).ok()?),
        "theme" => Control::SetTheme(<Theme as ValueEnum>::from_str(value, true).ok()?),
        "grid" => Control::SetGrid(parse_switch(value)?),
        "smoothing" => Control::SetSmoothing(parse_switch(value)?),
        _ => return None,
    };
    Some(control)
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(line: &str) -> Control {
        match parse_command(line) {
            Ok(Command::Apply(c)) => c,
            other => panic!("unexpected {other:?} for {line:?}"),
        }
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(apply("play"), Control::Play);
        assert_eq!(apply("  PAUSE "), Control::Pause);
        assert_eq!(apply("reset"), Control::Reset);
        assert_eq!(apply("toggle grid"), Control::ToggleGrid);
        assert_eq!(apply("toggle Smoothing"), Control::ToggleSmoothing);
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parses_set_commands() {
        assert_eq!(apply("set interval 250"), Control::SetInterval(250));
        assert_eq!(apply("set min -20.5"), Control::SetMin(-20.5));
        assert_eq!(apply("set max 80"), Control::SetMax(80.0));
        assert_eq!(apply("set type scatter"), Control::SetChartType(ChartType::Scatter));
        assert_eq!(apply("set theme high-contrast"), Control::SetTheme(Theme::HighContrast));
        assert_eq!(apply("set grid off"), Control::SetGrid(false));
        assert_eq!(apply("set smoothing on"), Control::SetSmoothing(true));
    }

    #[test]
    fn parses_export_paths() {
        assert_eq!(apply("export"), Control::Export(None));
        assert_eq!(
            apply("export /tmp/out.png"),
            Control::Export(Some(PathBuf::from("/tmp/out.png")))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command("   "), Err(ControlError::Empty));
        assert_eq!(
            parse_command("jump now"),
            Err(ControlError::Unknown("jump now".into()))
        );
        assert_eq!(
            parse_command("set interval fast"),
            Err(ControlError::BadValue("fast".into()))
        );
        assert_eq!(
            parse_command("set min NaN"),
            Err(ControlError::BadValue("NaN".into()))
        );
        assert_eq!(
            parse_command("set type pie"),
            Err(ControlError::BadValue("pie".into()))
        );
        assert!(parse_command("toggle everything").is_err());
        assert!(parse_command("play now").is_err());
    }

    #[test]
    fn key_bindings() {
        assert_eq!(from_key(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(from_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(
            from_key(KeyCode::Char(' ')),
            Some(Command::Apply(Control::TogglePlay))
        );
        assert_eq!(
            from_key(KeyCode::Char('3')),
            Some(Command::Apply(Control::SetChartType(ChartType::Area)))
        );
        assert_eq!(
            from_key(KeyCode::Char('-')),
            Some(Command::Apply(Control::AdjustInterval(-100)))
        );
        assert_eq!(from_key(KeyCode::Char('x')), None);
    }
}
