//! Keyboard Input Handling Module
//!
//! Translates key presses into `App` actions. Pending confirmations and open
//! messages take priority over everything else, then prompt input, then the
//! per-panel bindings of normal mode.

use crate::app::{App, ConfirmationState, DEFAULT_EXPORT_FILE, Focus, InputMode};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;

/// Main keyboard event handler. Returns `true` when the app should quit.
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.confirmation_state != ConfirmationState::None {
        handle_confirmation_keys(key, app);
        return false;
    }

    // Any key dismisses a message
    if app.has_message() {
        app.clear_messages();
        return false;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_keys(key, app),
        InputMode::EditNumber => {
            handle_number_input_keys(key, app);
            false
        }
        InputMode::HelpMenu => {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                app.input_mode = InputMode::Normal;
            }
            false
        }
        InputMode::SaveTemplate | InputMode::AddCategory | InputMode::ExportResults => {
            handle_prompt_keys(key, app);
            false
        }
    }
}

fn handle_confirmation_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending_action(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending_action(),
        _ => {}
    }
}

fn handle_normal_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('?') => app.input_mode = InputMode::HelpMenu,

        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.previous(),
        KeyCode::Down | KeyCode::Char('j') => app.next_item(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
        KeyCode::Right | KeyCode::Char('l') if app.focus == Focus::Templates => {
            app.next_category()
        }
        KeyCode::Left | KeyCode::Char('h') if app.focus == Focus::Templates => {
            app.previous_category()
        }

        KeyCode::Char('i') | KeyCode::Char('/') => app.input_mode = InputMode::EditNumber,
        KeyCode::Char('r') => app.track(),
        KeyCode::Enter => match app.focus {
            Focus::Templates => app.load_selected_template(),
            Focus::Countries => {
                app.insert_selected_country_code();
                app.input_mode = InputMode::EditNumber;
            }
            Focus::History => app.track_selected_history(),
            Focus::Results => app.track(),
        },

        KeyCode::Char('s') => open_prompt(app, InputMode::SaveTemplate, ""),
        KeyCode::Char('c') => open_prompt(app, InputMode::AddCategory, ""),
        KeyCode::Char('e') => open_prompt(app, InputMode::ExportResults, DEFAULT_EXPORT_FILE),
        KeyCode::Char('d') | KeyCode::Delete if app.focus == Focus::Templates => {
            app.request_delete_template()
        }
        KeyCode::Char('x') => app.request_clear_history(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
    false
}

fn open_prompt(app: &mut App, mode: InputMode, initial: &str) {
    app.input_buffer = initial.to_string();
    app.input_mode = mode;
}

fn handle_number_input_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.track();
        }
        KeyCode::Backspace => app.pop_number_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.set_number_input("")
        }
        KeyCode::Char(c) => app.push_number_char(c),
        _ => {}
    }
}

fn handle_prompt_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.input_buffer.clear();
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => app.input_buffer.push(c),
        KeyCode::Enter => {
            let input = app.input_buffer.trim().to_string();
            let mode = std::mem::replace(&mut app.input_mode, InputMode::Normal);
            app.input_buffer.clear();
            submit_prompt(app, mode, &input);
        }
        _ => {}
    }
}

fn submit_prompt(app: &mut App, mode: InputMode, input: &str) {
    let result = match mode {
        InputMode::SaveTemplate => app
            .save_template(input)
            .map(|_| "Template saved successfully!".to_string()),
        InputMode::AddCategory => app
            .add_category(input)
            .map(|_| format!("Category '{}' added", input)),
        InputMode::ExportResults => {
            if input.is_empty() {
                Err("Please enter a file name".to_string())
            } else {
                let path = PathBuf::from(input);
                app.export_results(&path)
                    .map(|_| format!("Results exported to {}", path.display()))
            }
        }
        _ => return,
    };

    match result {
        Ok(message) => app.set_success_message(message),
        Err(e) => app.set_error_message(e),
    }
}
