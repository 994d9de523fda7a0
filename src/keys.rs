use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    let tag = match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => {
            guard.update_tab(MenuItem::Matches);
            None
        }
        (_, Char('?'), _) => {
            guard.update_tab(MenuItem::Help);
            None
        }
        (MenuItem::Help, KeyCode::Esc, _) => {
            guard.exit_help();
            None
        }

        // Day navigation
        (MenuItem::Matches, Char('h') | KeyCode::Left, _) => Some(guard.previous_day()),
        (MenuItem::Matches, Char('l') | KeyCode::Right, _) => Some(guard.next_day()),
        (MenuItem::Matches, Char('t'), _) => Some(guard.today()),
        (MenuItem::Matches, Char('r'), _) => Some(guard.refresh()),

        // Fixture list scrolling
        (MenuItem::Matches, Char('j') | KeyCode::Down, _) => {
            guard.scroll_down();
            None
        }
        (MenuItem::Matches, Char('k') | KeyCode::Up, _) => {
            guard.scroll_up();
            None
        }

        // Global
        (_, Char('f'), _) => {
            guard.toggle_full_screen();
            None
        }
        (_, Char('"'), _) => {
            guard.toggle_show_logs();
            None
        }

        _ => None,
    };

    if let Some(tag) = tag {
        drop(guard);
        let _ = network_requests
            .send(NetworkRequest::LoadMatches { tag })
            .await;
    }
}
