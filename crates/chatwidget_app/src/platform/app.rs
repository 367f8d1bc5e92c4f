use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chatwidget_core::{update, Msg, WidgetState};
use clap::Parser;
use widget_logging::{level_for_verbosity, widget_debug, widget_info};

use super::cli::Cli;
use super::config::ChatConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, InputAction};
use super::logging::{self, LogDestination};
use super::ui::layout;
use super::ui::render::{render, RenderCursor};
use super::ui::surface::Surface;
use super::ui::terminal::TerminalSurface;

const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let destination = if cli.log_file {
        LogDestination::File
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, level_for_verbosity(cli.verbose));

    let config = ChatConfig::from_cli(&cli)?;
    let runner = EffectRunner::new(config.to_settings(), config.prime_session)?;
    let mut session = Session::new(runner, TerminalSurface::new(io::stdout()));
    session.surface.apply_all(layout::initial_commands())?;
    session.render()?;
    // Open the widget right away; a terminal has nothing else to show.
    session.dispatch(Msg::OpenRequested)?;

    let input_rx = spawn_stdin_reader();
    let mut input_open = true;
    loop {
        while let Some(msg) = session.runner.poll() {
            session.dispatch(msg)?;
        }

        if !input_open {
            // Stdin is gone; stay only long enough to show the last reply.
            if !session.state.is_pending() {
                break;
            }
            thread::sleep(TICK);
            continue;
        }

        match input_rx.recv_timeout(TICK) {
            Ok(InputAction::Dispatch(msgs)) => {
                for msg in msgs {
                    session.dispatch(msg)?;
                }
            }
            Ok(InputAction::Quit) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => session.dispatch(Msg::Tick)?,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                widget_debug!("stdin closed");
                input_open = false;
            }
        }
    }

    widget_info!(
        "Exiting with {} transcript entries",
        session.state.transcript().len()
    );
    Ok(())
}

/// One widget instance bound to its surface and engine.
struct Session<W: Write> {
    state: WidgetState,
    cursor: RenderCursor,
    surface: TerminalSurface<W>,
    runner: EffectRunner,
}

impl<W: Write> Session<W> {
    fn new(runner: EffectRunner, surface: TerminalSurface<W>) -> Self {
        Self {
            state: WidgetState::new(),
            cursor: RenderCursor::default(),
            surface,
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let followups = self.runner.enqueue(effects);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            self.render()?;
        }
        self.surface.apply_all(followups)
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        let commands = render(&mut self.cursor, &view);
        self.surface.apply_all(commands)
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<InputAction> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(parse_line(&line)).is_err() {
                break;
            }
        }
    });
    rx
}
