use crate::app::{App, MenuItem};
use crate::state::app_state::InputMode;
use crate::state::messages::StorageRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cuptable_engine::results::Side;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    storage_requests: &mpsc::Sender<StorageRequest>,
) {
    let mut guard = app.lock().await;

    if (key_event.code, key_event.modifiers) == (Char('c'), KeyModifiers::CONTROL) {
        // A second Ctrl-C while saves are still pending leaves without them.
        if guard.state.quit_requested {
            crate::cleanup_terminal();
            std::process::exit(1);
        }
        guard.request_quit();
        return;
    }

    let request = if guard.state.input == InputMode::Normal {
        handle_normal(&mut guard, key_event)
    } else {
        handle_text_entry(&mut guard, key_event)
    };

    drop(guard);
    if let Some(request) = request {
        let _ = storage_requests.send(request).await;
    }
}

/// Keys while a goals, rename, login or reset prompt is open.
fn handle_text_entry(app: &mut App, key_event: KeyEvent) -> Option<StorageRequest> {
    if app.state.input == InputMode::ConfirmReset {
        return match key_event.code {
            Char(c) => app.answer_reset(c),
            _ => app.answer_reset('n'),
        };
    }

    match key_event.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Enter | KeyCode::Tab => {
            return match app.state.input {
                InputMode::Goals { .. } => app.commit_goals(),
                InputMode::Rename { .. } => app.commit_rename(),
                InputMode::Login(_) => {
                    app.submit_login();
                    None
                }
                InputMode::Normal | InputMode::ConfirmReset => None,
            };
        }
        Char(c) => app.push_char(c),
        _ => {}
    }
    None
}

fn handle_normal(app: &mut App, key_event: KeyEvent) -> Option<StorageRequest> {
    match (app.state.active_tab, key_event.code) {
        (_, Char('q')) => {
            app.request_quit();
        }

        // Tab switching
        (tab, Char('1')) if tab != MenuItem::GroupStage => app.update_tab(MenuItem::GroupStage),
        (tab, Char('2')) if tab != MenuItem::GroupStage => app.update_tab(MenuItem::Standings),
        (tab, Char('3')) if tab != MenuItem::GroupStage => app.update_tab(MenuItem::Rankings),
        (_, Char('?')) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc) => app.exit_help(),

        // Group stage: digits are goals here, Tab/F2/F3 switch tabs
        (MenuItem::GroupStage, KeyCode::Tab | KeyCode::F(2)) => app.update_tab(MenuItem::Standings),
        (MenuItem::GroupStage, KeyCode::F(3)) => app.update_tab(MenuItem::Rankings),
        (MenuItem::GroupStage, Char('r')) => app.cycle_group(),
        (MenuItem::GroupStage, Char('j') | KeyCode::Down) => app.match_down(),
        (MenuItem::GroupStage, Char('k') | KeyCode::Up) => app.match_up(),
        (MenuItem::GroupStage, Char('h') | KeyCode::Left) => app.select_side(Side::A),
        (MenuItem::GroupStage, Char('l') | KeyCode::Right) => app.select_side(Side::B),
        (MenuItem::GroupStage, Char(c)) if c.is_ascii_digit() => app.begin_goal_input(c),
        (MenuItem::GroupStage, KeyCode::Backspace | KeyCode::Delete) => return app.clear_selected_goals(),
        (MenuItem::GroupStage, Char('n')) => app.begin_rename(),
        (MenuItem::GroupStage, Char('R')) => return app.randomize_results(&mut rand::thread_rng()),
        (MenuItem::GroupStage, Char('C')) => return app.reset_results(),
        (MenuItem::GroupStage, Char('D')) => app.begin_reset_tournament(),

        // Standings / rankings
        (MenuItem::Standings | MenuItem::Rankings, Char('j') | KeyCode::Down) => app.scroll_down(),
        (MenuItem::Standings | MenuItem::Rankings, Char('k') | KeyCode::Up) => app.scroll_up(),
        (MenuItem::Standings | MenuItem::Rankings, KeyCode::Esc) => app.update_tab(MenuItem::GroupStage),

        // Global
        (_, Char('L')) => app.begin_login(),
        (_, Char('f')) => app.toggle_full_screen(),
        (_, Char('"')) => app.toggle_show_logs(),
        (_, Char('g')) => return Some(app.load_request()),

        _ => {}
    }
    None
}
