//! Dashboard TUI - terminal front end for creating dashboard projects
//!
//! Hosts the project creation form (empty project or from a template) and
//! the password reset page opened from a reset link.

mod api;
mod app;
mod config;
mod error;
mod flows;
mod state;
mod ui;

use anyhow::Result;
use api::{ActionDispatcher, ApiClient, TemplatePicker};
use app::App;
use clap::Parser;
use config::DashboardConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(name = "dashboard-tui", version, about)]
struct Args {
    /// Base URL of the dashboard API (overrides config and DASHBOARD_API_HOST)
    #[arg(long)]
    api_host: Option<String>,

    /// Team to create projects in
    #[arg(long)]
    team_id: Option<i64>,

    /// Password reset link or query string; opens the reset page
    #[arg(long, value_name = "LINK")]
    reset: Option<String>,

    /// Hide the Empty / From template selector
    #[arg(long)]
    hide_type: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = DashboardConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Ignoring unreadable config: {}", err);
        DashboardConfig::default()
    });
    if let Some(team_id) = args.team_id {
        config.team_id = Some(team_id);
    }
    let api_host = args.api_host.clone().unwrap_or_else(|| config.api_host());

    let client = Arc::new(ApiClient::new(
        api_host,
        config.auth_token.clone(),
        config.request_timeout(),
    )?);
    tracing::info!("Using API at {}", client.host());
    let dispatcher: Arc<dyn ActionDispatcher> = client.clone();
    let picker: Arc<dyn TemplatePicker> = client;

    let mut app = App::new(config, args.hide_type, dispatcher, picker);
    app.start(args.reset.as_deref());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key)?;
                }
            }
        }

        // Let request tasks and timers run, then apply what they reported
        tokio::task::yield_now().await;
        app.process_events();

        if app.should_quit() {
            return Ok(());
        }
    }
}
