use crate::config::Config;
use crate::error::AppError;
use crate::events::actions::{Action, Handler as ActionHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{self, LogBuffer};
use crate::modal::{bridge, Bridge, Orchestrator};
use crate::state::State;
use crate::ui::{ModalHost, Theme};
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type ActionSender = std::sync::mpsc::Sender<Action>;
type ActionReceiver = std::sync::mpsc::Receiver<Action>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    host: ModalHost,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_buffer = LogBuffer::default();
        logger::init(log_buffer.clone(), config.log_level)?;

        info!("Starting application...");
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!(
                "Unknown theme '{}', falling back to default. Available: {}",
                config.theme_name,
                Theme::available_themes().join(", ")
            );
            Theme::default()
        });

        let (tx, rx) = std::sync::mpsc::channel::<Action>();
        let state = Arc::new(Mutex::new(State::new(tx, log_buffer, theme)));

        let orchestrator = Orchestrator::new(config.modal.replace_policy);
        let modal_bridge = Bridge::new();
        let host = ModalHost::mount(orchestrator, &modal_bridge, config.modal);
        bridge::install(modal_bridge);

        let mut app = App { state, host };
        app.start_actions(rx);
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread that answers actions. Actions may wait on the
    /// user through modals, so they never run on the UI thread.
    ///
    fn start_actions(&self, receiver: ActionReceiver) {
        debug!("Creating new thread for user actions...");
        let cloned_state = Arc::clone(&self.state);
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("{}", AppError::RuntimeCreation(e.to_string()));
                    return;
                }
            };
            runtime.block_on(async {
                let action_handler = ActionHandler::new(&cloned_state);
                while let Ok(action) = receiver.recv() {
                    if let Err(e) = action_handler.handle(action.clone()).await {
                        error!("Failed to handle {:?}: {}", action, e);
                    }
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&mut self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            terminal
                .draw(|frame| crate::ui::render(frame, &mut state, &self.host))
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            if !terminal_event_handler.handle_next(&mut state, &self.host)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
