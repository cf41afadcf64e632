use crate::config::Config;
use crate::error::AppError;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::identity::FileStore;
use crate::logger::{self, LogBuffer};
use crate::nav::AddressablePath;
use crate::page::Site;
use crate::session::{LoadContext, Session};
use crate::state::State;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::time::Instant;

/// Oversees page loading, event processing, and terminal output.
///
/// Each page load builds a fresh [`Session`]; a navigation request from the
/// session drops it and loads the requested page in its place.
///
pub struct App {
    config: Config,
    site: Site,
    store: FileStore,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub fn start(config: Config) -> Result<()> {
        let logs = LogBuffer::default();
        logger::init(config.level_filter()?, &logs)?;

        info!("Starting application...");
        let app = App {
            site: Site::new(&config.site_dir),
            store: FileStore::new(config.storage_path()?),
            config,
        };
        debug!(
            "Serving pages from {} with identity slots in {}",
            app.site.root().display(),
            app.store.path().display()
        );
        app.start_ui(logs)?;

        info!("Exiting application...");
        Ok(())
    }

    /// Load the document at `address` and build its session.
    ///
    fn load_session(&self, address: AddressablePath, viewport_width: u32) -> Session {
        let page = self.site.load_or_not_found(&address);
        Session::load(
            page,
            LoadContext {
                address,
                viewport_width,
                suite_name: &self.config.suite_name,
                identity: &self.store,
            },
        )
    }

    /// Set up the terminal, run the render loop on the main thread, and
    /// restore the terminal afterwards even if the loop failed.
    ///
    fn start_ui(&self, logs: LogBuffer) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        terminal.hide_cursor()?;

        let result = self.run(&mut terminal, logs);

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn run<B: Backend>(&self, terminal: &mut Terminal<B>, logs: LogBuffer) -> Result<()> {
        let size = terminal.size()?;
        let theme = Theme::from_name(&self.config.theme_name).unwrap_or_else(|| {
            warn!(
                "Unknown theme '{}', using {}",
                self.config.theme_name,
                Theme::default().name
            );
            Theme::default()
        });
        let start = AddressablePath::parse(&self.config.start_page);
        let viewport_width = u32::from(size.width) * self.config.cell_width;
        let mut state = State::new(
            self.load_session(start, viewport_width),
            theme,
            self.config.hotkeys.clone(),
            self.config.cell_width,
            logs,
        );
        state.set_terminal_size(size);

        let terminal_event_handler = TerminalEventHandler::new();
        let mut last_tick = Instant::now();
        loop {
            let elapsed_ms = u64::try_from(last_tick.elapsed().as_millis()).unwrap_or(u64::MAX);
            last_tick = Instant::now();
            if let Some(address) = state.tick(elapsed_ms) {
                let width = state.session().viewport_width();
                let session = self.load_session(address, width);
                state.replace_session(session);
            }

            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
