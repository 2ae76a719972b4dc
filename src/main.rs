use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use situation_monitor::actions::{self, Action};
use situation_monitor::cli::Cli;
use situation_monitor::drivers::ConsoleInput;
use situation_monitor::event_loop::{ControlFlow, EventLoop};
use situation_monitor::interact::{HandleMap, InteractionController};
use situation_monitor::persist::{self, FileStorage};
use situation_monitor::store::LayoutStore;
use situation_monitor::ui::{UiFrame, render_dashboard};
use situation_monitor::tracing_sub;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().or_else(|| {
        cli.state_dir
            .clone()
            .or_else(persist::default_state_dir)
            .map(|dir| dir.join("situation-monitor.log"))
    });
    tracing_sub::init_default(log_file);

    let storage = FileStorage::new(cli.state_dir.clone());
    let mut store = LayoutStore::new(storage);
    if cli.reset {
        store.reset_layout();
    }
    store.subscribe(|state| {
        tracing::trace!(panels = state.panels().len(), "layout changed");
    });

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(
        &mut terminal,
        &mut store,
        Duration::from_millis(cli.tick_ms.max(1)),
    );

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    store: &mut LayoutStore<FileStorage>,
    poll_interval: Duration,
) -> io::Result<()> {
    let mut event_loop = EventLoop::new(ConsoleInput::new(), poll_interval);
    let mut controller = InteractionController::new();
    let mut handles = HandleMap::default();
    let mut viewport_width = terminal
        .size()
        .map_err(|err| io::Error::other(err.to_string()))?
        .width;

    // the rendering surface exists now; layout application may begin
    store.init();

    event_loop.run(|event| {
        match event {
            Some(Event::Key(key)) => match actions::action_for_key(&key) {
                Some(Action::Quit) => return Ok(ControlFlow::Quit),
                Some(Action::ResetLayout) => store.reset_layout(),
                None => {}
            },
            Some(Event::Mouse(mouse)) => {
                controller.handle_mouse_event(&mouse, &handles, viewport_width, store);
            }
            Some(Event::Resize(width, _)) => {
                viewport_width = width;
            }
            Some(_) => {}
            None => {
                store.tick(Instant::now());
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        render_dashboard(
                            &mut ui,
                            store.state(),
                            &mut handles,
                            controller.active_panel(),
                        );
                    })
                    .map_err(|err| io::Error::other(err.to_string()))?;
            }
        }
        Ok(ControlFlow::Continue)
    })
}
