mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::day_cursor::DayCursor;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use anyhow::{Context, bail};
use chrono::NaiveDate;
use football_data_api::client::FootballDataApi;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{debug, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, PartialEq)]
enum CliAction {
    Run { date: Option<NaiveDate> },
    Exit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let date = match handle_cli_args(std::env::args().skip(1))? {
        CliAction::Run { date } => date,
        CliAction::Exit => return Ok(()),
    };

    // Settings are resolved before the terminal is taken over so errors print normally.
    let settings = AppSettings::load()?;
    let client = FootballDataApi::new(settings.api.clone())?;

    better_panic::install();

    tui_logger::init_logger(settings.log_level)?;
    tui_logger::set_default_level(settings.log_level);

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let cursor = date.map(DayCursor::new).unwrap_or_default();
    let refresh_interval = settings.refresh_interval;
    info!("starting on {} (base url {})", cursor.key(), settings.api.base_url);

    let app = Arc::new(Mutex::new(App::new(settings, cursor)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic refresh of the day on screen
    let periodic_task = refresh_interval.map(|period| {
        let refresher = PeriodicRefresher::new(ui_event_tx.clone(), period);
        tokio::spawn(refresher.run())
    });

    // Trigger the first load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    if let Some(task) = periodic_task {
        task.abort();
    }

    Ok(())
}

fn handle_cli_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliAction> {
    let mut args = args.into_iter();
    let mut date = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return Ok(CliAction::Exit);
            }
            "-V" | "--version" => {
                println!("matchday {}", env!("CARGO_PKG_VERSION"));
                return Ok(CliAction::Exit);
            }
            "-d" | "--date" => {
                let Some(value) = args.next() else {
                    bail!("{arg} needs a value (YYYY-MM-DD)\n\n{}", usage_text());
                };
                let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))?;
                date = Some(parsed);
            }
            _ => bail!("Unknown argument: {arg}\n\n{}", usage_text()),
        }
    }

    Ok(CliAction::Run { date })
}

fn usage_text() -> &'static str {
    "matchday - football fixtures and live scores in your terminal

Usage:
  matchday [--date YYYY-MM-DD]
  matchday --help
  matchday --version

Environment (also read from .env):
  FOOTBALL_DATA_TOKEN      football-data.org API token (required)
  FOOTBALL_DATA_BASE_URL   API base URL (default https://api.football-data.org/v4)
  MATCHDAY_TIMEOUT_SECS    request timeout in seconds (default 10)
  MATCHDAY_REFRESH_SECS    auto refresh period in seconds, 0 disables (default 60)
  MATCHDAY_GROUP_BY        group matches by competition 'name' (default) or 'id'
  MATCHDAY_LOG             log level for the log panel (default info)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let tag = app.lock().await.load_current_day();
            let _ = network_requests.send(NetworkRequest::LoadMatches { tag }).await;
            true
        }
        UiEvent::RefreshTick => {
            let tag = app.lock().await.refresh();
            debug!("periodic refresh for {}", tag.date);
            let _ = network_requests.send(NetworkRequest::LoadMatches { tag }).await;
            false
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

/// Returns whether anything visible changed.
async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            true
        }
        NetworkResponse::MatchesLoaded { tag, matches } => {
            app.lock().await.on_matches_loaded(tag, matches)
        }
        NetworkResponse::MatchesFailed { tag, error } => {
            app.lock().await.on_matches_failed(tag, error)
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = tokio::task::spawn_blocking(crossterm_event::read).await;
        if let Ok(Ok(event)) = event {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
