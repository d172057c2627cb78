mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{StorageRequest, StorageResponse, UiEvent};
use crate::state::refresher::PeriodicRefresher;
use crate::state::storage::{LoadingState, StoreWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    // Read configuration before touching the terminal so errors print plainly.
    let settings = AppSettings::load()?;

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let store = settings.store.open();
    let user = settings.user.clone();
    let app = Arc::new(Mutex::new(App::new(settings)));
    info!("cuptable {} for {user}", env!("CARGO_PKG_VERSION"));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (storage_req_tx, storage_req_rx) = mpsc::channel::<StorageRequest>(100);
    let (storage_resp_tx, storage_resp_rx) = mpsc::channel::<StorageResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Storage thread
    let store_worker = StoreWorker::new(store, storage_req_rx, storage_resp_tx);
    let storage_task = tokio::spawn(store_worker.run());

    // Reload from the store every minute
    let periodic_updater = PeriodicRefresher::new(user, storage_req_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, storage_req_tx, storage_resp_rx).await;

    input_handler.abort();
    storage_task.abort();
    periodic_task.abort();
    cleanup_terminal();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("cuptable {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "cuptable - group-stage football tournament tracker

Usage:
  cuptable
  cuptable --help
  cuptable --version

Environment:
  CUPTABLE_USER        Key of the stored tournament (default $USER)
  CUPTABLE_STORE       memory, file or an http(s) document API URL (default file)
  CUPTABLE_DATA_DIR    Directory for the file store (default ~/.config/cuptable)
  CUPTABLE_SETUP_JSON  Group setup used for new tournaments (default 4 groups of 4)
  CUPTABLE_USERS_JSON  Login table; without it the session is a local admin
  CUPTABLE_LOG         Log level: error, warn, info, debug or trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    storage_requests: mpsc::Sender<StorageRequest>,
    mut storage_responses: mpsc::Receiver<StorageResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, &storage_requests).await;
            }

            Some(response) = storage_responses.recv() => {
                handle_storage_response(response, &app, &storage_requests, &mut loading).await;
            }

            else => break,
        }

        let mut app_guard = app.lock().await;
        // Quit is held back until every queued save has been acknowledged.
        if app_guard.ready_to_quit() {
            break;
        }
        draw::draw(&mut terminal, &mut app_guard, loading);
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    storage_requests: &mpsc::Sender<StorageRequest>,
) {
    match ui_event {
        UiEvent::AppStarted => {
            let request = app.lock().await.load_request();
            let _ = storage_requests.send(request).await;
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, storage_requests).await;
        }
        UiEvent::Resize => {}
    }
}

async fn handle_storage_response(
    response: StorageResponse,
    app: &Arc<Mutex<App>>,
    storage_requests: &mpsc::Sender<StorageRequest>,
    loading: &mut LoadingState,
) {
    match response {
        StorageResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        StorageResponse::DocumentLoaded { document } => {
            let follow_up = app.lock().await.on_document_loaded(document);
            if let Some(request) = follow_up {
                let _ = storage_requests.send(request).await;
            }
        }
        StorageResponse::DocumentSaved { at } => {
            app.lock().await.on_document_saved(at);
        }
        StorageResponse::Error { message, during_save } => {
            error!("Storage error: {message}");
            app.lock().await.on_error(message, during_save);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = tokio::task::spawn_blocking(crossterm_event::read).await;
        let Ok(Ok(event)) = event else {
            continue;
        };
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

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Restore the terminal. Failures are ignored; this also runs from the
/// panic hook.
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
