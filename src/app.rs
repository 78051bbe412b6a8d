//! src/app.rs
//!
//! Live multi-series chart in the terminal.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Builds the `LiveChart`, starts the remote control thread, and runs the
//! single-threaded UI loop: draw, wait for input until the next frame or data
//! tick, apply controls, advance the data when the timer fires.
//!
//! # Keyboard Controls (Interactive)
//!
//! - **Space** / **p**: Play / pause data updates (the timer keeps running).
//! - **r**: Reset every series with fresh random samples.
//! - **e**: Export the current canvas as PNG (`--export-path`, default `chart.png`).
//! - **t**: Cycle chart type; **1**-**4** pick line, bar, area, scatter.
//! - **h**: Cycle theme (light, dark, high-contrast).
//! - **g**: Toggle grid. **s**: Toggle smoothing.
//! - **+** / **-**: Interval +/- 100 ms (restarts the timer).
//! - **[** / **]**: Lower bound -/+ 10. **{** / **}**: Upper bound -/+ 10.
//! - **q** / **Esc**: Quit and restore terminal state.
//!
//! Moving the mouse over the plot shows the hovered sample index and each
//! series' value there.
//!
//! # Remote TCP Protocol (ASCII, Line-Based)
//!
//! **Default bind address:** `127.0.0.1:4000` (`--remote`, or `--no-remote`).
//! Each line is one command, answered by `OK` or `ERR <reason>`:
//!
//! ```text
//! $ nc 127.0.0.1 4000
//! set type area
//! OK
//! set interval 200
//! OK
//! export /tmp/chart.png
//! OK
//! quit
//! OK bye
//! ```
//!
//! Commands are queued to the UI loop and applied before the next frame.

use std::cell::Cell;
use std::io;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Rect},
    style::{Color, Style},
};

use crate::chart::LiveChart;
use crate::chart::state::Action;
use crate::cli::Cli;
use crate::control::{Command, Control, from_key};
use crate::net::remote_server;
use crate::panels::{
    ChartPanel, ParagraphPanel, SettingsPanel, StatsPanel, TitlePanel, TooltipPanel,
};
use crate::panels::chart::{surface_cell, surface_point};
use crate::render::{Scene, export, render};
use crate::timer::Ticker;
use crate::ui::{Panel, group, leaf, popup_at};

/// Redraw period, independent of the data interval.
const FRAME_TIME: Duration = Duration::from_millis(100);

const HELP: &str = "SPACE=Play/Pause  R=Reset  E=Export  T/1-4=Type  H=Theme  G=Grid  \
S=Smooth  +/-=Interval  [ ]=Min  { }=Max  Q=Quit";

/// Terminal-side state that is not part of the chart.
struct UiState {
    status: String,
    status_is_error: bool,
    /// Where the chart canvas was drawn last frame.
    canvas: Cell<Option<Rect>>,
}

impl UiState {
    fn new() -> Self {
        Self {
            status: "Ready".to_string(),
            status_is_error: false,
            canvas: Cell::new(None),
        }
    }

    fn report(&mut self, message: String, is_error: bool) {
        self.status = message;
        self.status_is_error = is_error;
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.chart_config();
    let mut chart = match cli.seed {
        Some(seed) => LiveChart::seeded(config, seed),
        None => LiveChart::new(config),
    };
    chart.export_path = cli.export_path.clone();

    if let Some(path) = &cli.snapshot {
        export::write_png(&render(&chart), path)?;
        tracing::info!(path = %path.display(), "snapshot written");
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    if cli.no_remote {
        drop(tx);
    } else {
        let addr = cli.remote.clone();
        thread::spawn(move || remote_server(&addr, tx));
    }

    let mut terminal = ratatui::init();
    // FocusLost hides the tooltip when the pointer leaves the window
    let result = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(Into::into)
        .and_then(|()| event_loop(&mut terminal, &mut chart, &rx));

    if let Err(e) = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture) {
        tracing::warn!(error = %e, "could not disable mouse capture");
    }
    ratatui::restore();
    tracing::info!(ticks = chart.ticks, "livechart exiting");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    chart: &mut LiveChart,
    remote: &Receiver<Control>,
) -> Result<()> {
    let mut ui = UiState::new();
    let mut ticker = Ticker::new(chart.config.interval, Instant::now());

    loop {
        let scene = render(chart);
        terminal.draw(|f| draw_frame(f, chart, &scene, &ui))?;

        // wait for input until the next frame or data tick, whichever is first
        let timeout = ticker.remaining(Instant::now()).min(FRAME_TIME);
        if event::poll(timeout)? {
            loop {
                let event = event::read()?;
                if handle_event(event, chart, &scene, &mut ticker, &mut ui) == Flow::Quit {
                    return Ok(());
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        while let Ok(control) = remote.try_recv() {
            apply(chart, control, &mut ticker, &mut ui);
        }

        if ticker.fire(Instant::now()) {
            chart.tick();
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// React to one terminal event: keys become controls, pointer moves drive hover.
fn handle_event(
    event: Event,
    chart: &mut LiveChart,
    scene: &Scene,
    ticker: &mut Ticker,
    ui: &mut UiState,
) -> Flow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match from_key(key.code) {
            Some(Command::Quit) => return Flow::Quit,
            Some(Command::Apply(control)) => apply(chart, control, ticker, ui),
            None => {}
        },
        Event::Mouse(m) => {
            if let MouseEventKind::Moved | MouseEventKind::Drag(_) = m.kind {
                let pointer = ui
                    .canvas
                    .get()
                    .and_then(|canvas| surface_point(canvas, scene, m.column, m.row));
                chart.hover(pointer);
            }
        }
        Event::FocusLost => chart.hover(None),
        _ => {}
    }
    Flow::Continue
}

/// Apply one control and carry out the follow-up it requests.
fn apply(chart: &mut LiveChart, control: Control, ticker: &mut Ticker, ui: &mut UiState) {
    match chart.apply(control) {
        Some(Action::RestartTimer(interval)) => {
            ticker.restart(interval, Instant::now());
            let ms = ticker.interval().as_millis();
            tracing::info!(interval_ms = ms as u64, "timer restarted");
            ui.report(format!("Interval {ms} ms"), false);
        }
        Some(Action::Export(path)) => export_to(chart, &path, ui),
        None => {}
    }
}

fn export_to(chart: &LiveChart, path: &Path, ui: &mut UiState) {
    match export::write_png(&render(chart), path) {
        Ok(()) => ui.report(format!("Exported {}", path.display()), false),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "export failed");
            ui.report(format!("Export failed: {e}"), true);
        }
    }
}

fn draw_frame(f: &mut Frame<'_>, chart: &LiveChart, scene: &Scene, ui: &UiState) {
    let title = format!("Live Series ({})", chart.config.chart_type.label());
    let footer_style = if ui.status_is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let root = group(
        Direction::Vertical,
        vec![
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ],
        vec![
            leaf(TitlePanel::new("Live Series Renderer", chart.config.playing)),
            group(
                Direction::Horizontal,
                vec![Constraint::Percentage(72), Constraint::Percentage(28)],
                vec![
                    leaf(ChartPanel::new(scene, title, &ui.canvas)),
                    group(
                        Direction::Vertical,
                        vec![
                            Constraint::Length(9),
                            Constraint::Length(6),
                            Constraint::Min(3),
                        ],
                        vec![
                            leaf(StatsPanel::new(chart)),
                            leaf(SettingsPanel::new(chart)),
                            leaf(ParagraphPanel::new(HELP, "Controls")),
                        ],
                    ),
                ],
            ),
            leaf(ParagraphPanel::new(ui.status.as_str(), "Status").styled(footer_style)),
        ],
    );

    root.draw(f, f.area());

    let Some(tooltip) = chart.tooltip() else {
        return;
    };
    if let Some(anchor) = ui
        .canvas
        .get()
        .and_then(|canvas| surface_cell(canvas, scene, tooltip.pointer))
    {
        let panel = TooltipPanel::new(&tooltip);
        let (w, h) = panel.size();
        panel.draw(f, popup_at(anchor, w, h, f.area()));
    }
}
