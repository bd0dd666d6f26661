use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use quotawatch_core::{client, UsageClient};

use crate::config::Settings;
use crate::monitor::{Poller, Ticker};
use crate::state::{AppMessage, AppState};

use super::components::{StatusBar, UsagePanel};
use super::Layout;

/// Main application
pub struct App {
    state: AppState,
    settings: Settings,
    client: Arc<UsageClient>,
    layout: Layout,
}

impl App {
    /// Create a new application
    pub fn new(settings: Settings) -> Self {
        let cache_path = if settings.cache_enabled {
            client::default_cache_path()
        } else {
            None
        };

        Self {
            state: AppState::new(),
            settings,
            client: Arc::new(UsageClient::with_cache_path(cache_path)),
            layout: Layout::new(),
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel(32);

        // Cache-first load, then a fresh fetch; both render through the
        // same message queue
        self.load_cache(&tx);
        self.spawn_fetch(&tx);

        // Background push updates and the countdown ticker
        Poller::new(
            self.client.clone(),
            Duration::from_secs(self.settings.poll_interval_secs),
        )
        .start(tx.clone());
        Ticker::new(Duration::from_secs(self.settings.tick_interval_secs)).start(tx.clone());

        // Main loop
        let result = self.main_loop(&mut terminal, &tx, &mut rx).await;

        // Restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tx: &mpsc::Sender<AppMessage>,
        rx: &mut mpsc::Receiver<AppMessage>,
    ) -> Result<()> {
        loop {
            if !self.state.running {
                break;
            }

            // Draw UI
            terminal.draw(|frame| {
                let areas = self.layout.calculate(frame.area());
                UsagePanel::render(frame, areas.usage, &self.state);
                StatusBar::render(frame, areas.status_bar, &self.state);
            })?;

            // Tick spinner animation
            self.state.tick_spinner();

            // Handle events with timeout
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers, tx);
                }
            }

            // Process queued messages in arrival order
            while let Ok(msg) = rx.try_recv() {
                self.state.handle(msg, chrono::Utc::now());
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, tx: &mpsc::Sender<AppMessage>) {
        match code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => self.state.quit(),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.state.quit(),

            // Manual refresh; stays available in every state, including
            // Error, and is not deduplicated while one is outstanding
            KeyCode::Char('r') => self.spawn_fetch(tx),

            _ => {}
        }
    }

    /// Best-effort cache read; a miss keeps the Loading state.
    fn load_cache(&self, tx: &mpsc::Sender<AppMessage>) {
        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let cached = client.get_cached_usage();
            let _ = tx.send(AppMessage::CacheLoaded(cached)).await;
        });
    }

    /// Spawn a fresh fetch. Completion is reported on both success and
    /// failure so the busy indicator always clears.
    fn spawn_fetch(&mut self, tx: &mpsc::Sender<AppMessage>) {
        self.state.fetch_started();
        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.get_usage().await;
            let _ = tx.send(AppMessage::FetchDone(result)).await;
        });
    }
}
