use crate::config::{AppConfig, Theme};
use crate::lookup::{FIELD_NAMES, LiveValidity, NumberReport, Tracker, regions};
use crate::models::{HistoryEntry, SearchHistory, StorageManager, TemplateBook, export_results_csv};
use crate::ui::colors::{Palette, RosePine};
use crate::ui::tracker;
use ratatui::Frame;
use std::path::{Path, PathBuf};

/// Default file name offered by the export prompt
pub const DEFAULT_EXPORT_FILE: &str = "phonetrack-results.csv";

/// Panels that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Templates,
    Countries,
    History,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Templates => Focus::Countries,
            Focus::Countries => Focus::History,
            Focus::History => Focus::Results,
            Focus::Results => Focus::Templates,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Templates => Focus::Results,
            Focus::Countries => Focus::Templates,
            Focus::History => Focus::Countries,
            Focus::Results => Focus::History,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EditNumber,
    SaveTemplate,
    AddCategory,
    ExportResults,
    HelpMenu,
}

/// Destructive actions waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationState {
    None,
    DeleteTemplate { category: String, name: String },
    ClearHistory,
}

/// Main Application State Container
///
/// Holds the loaded templates and history, the current input and results, and
/// the selection state of every panel. All mutations of persisted data go
/// through methods here so each one is written to disk immediately.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub config_path: Option<PathBuf>,
    pub storage: StorageManager,
    pub tracker: Tracker,
    pub templates: TemplateBook,
    pub history: SearchHistory,
    pub report: Option<NumberReport>,

    pub number_input: String,
    pub validity: LiveValidity,
    pub input_buffer: String,
    pub input_mode: InputMode,
    pub focus: Focus,

    pub selected_category: usize,
    pub selected_template: usize,
    pub selected_country: usize,
    pub selected_history: usize,

    pub confirmation_state: ConfirmationState,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, config_path: Option<PathBuf>, storage: StorageManager) -> Self {
        let templates = storage.load_templates();
        let history = storage.load_history();
        let directory = storage.load_prefixes();

        log::info!(
            "Loaded {} templates in {} categories and {} history entries from {}",
            templates.len(),
            templates.category_names().len(),
            history.len(),
            storage.data_dir().display()
        );

        Self {
            config,
            config_path,
            storage,
            tracker: Tracker::new(directory),
            templates,
            history,
            report: None,
            number_input: String::new(),
            validity: LiveValidity::Empty,
            input_buffer: String::new(),
            input_mode: InputMode::Normal,
            focus: Focus::Templates,
            selected_category: 0,
            selected_template: 0,
            selected_country: 0,
            selected_history: 0,
            confirmation_state: ConfirmationState::None,
            error_message: None,
            success_message: None,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        RosePine::for_theme(self.config.theme)
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Flips between light and dark and remembers the choice in the config file
    pub fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        log::info!("Switched to {} theme", self.config.theme.name());

        if let Some(path) = self.config_path.clone() {
            if let Err(e) = self.config.save(&path) {
                log::warn!("Failed to save theme: {:#}", e);
                self.set_error_message(format!("Failed to save theme: {}", e));
            }
        }
    }

    // Number input

    pub fn set_number_input(&mut self, value: impl Into<String>) {
        self.number_input = value.into();
        self.refresh_validity();
    }

    pub fn push_number_char(&mut self, c: char) {
        self.number_input.push(c);
        self.refresh_validity();
    }

    pub fn pop_number_char(&mut self) {
        self.number_input.pop();
        self.refresh_validity();
    }

    fn refresh_validity(&mut self) {
        self.validity = self.tracker.live_validity(&self.number_input);
    }

    /// Looks up the current input. Previous results are cleared first so a
    /// failed lookup never leaves stale fields on screen.
    pub fn track(&mut self) {
        self.report = None;

        let report = match self.tracker.lookup(&self.number_input) {
            Ok(report) => report,
            Err(e) => {
                log::info!("Lookup of '{}' rejected: {}", self.number_input.trim(), e);
                self.set_error_message(e.to_string());
                return;
            }
        };

        self.history.record(&self.number_input);
        self.selected_history = 0;
        if let Err(e) = self.storage.save_history(&self.history) {
            log::error!("{:#}", e);
            self.set_error_message(format!("{:#}", e));
        }

        self.report = Some(report);
    }

    /// Field/value pairs for the results table, blank before any lookup
    pub fn result_fields(&self) -> Vec<(&'static str, String)> {
        match &self.report {
            Some(report) => report.fields(),
            None => FIELD_NAMES
                .iter()
                .map(|name| (*name, String::new()))
                .collect(),
        }
    }

    // Templates

    pub fn category_names(&self) -> Vec<String> {
        self.templates.category_names()
    }

    pub fn selected_category_name(&self) -> Option<String> {
        self.category_names().get(self.selected_category).cloned()
    }

    pub fn template_names(&self) -> Vec<String> {
        self.selected_category_name()
            .map(|category| self.templates.template_names(&category))
            .unwrap_or_default()
    }

    pub fn selected_template_name(&self) -> Option<String> {
        self.template_names().get(self.selected_template).cloned()
    }

    pub fn next_category(&mut self) {
        let count = self.category_names().len();
        if count > 0 {
            self.selected_category = (self.selected_category + 1) % count;
            self.selected_template = 0;
        }
    }

    pub fn previous_category(&mut self) {
        let count = self.category_names().len();
        if count > 0 {
            self.selected_category = (self.selected_category + count - 1) % count;
            self.selected_template = 0;
        }
    }

    /// Copies the selected template's number into the input
    pub fn load_selected_template(&mut self) {
        let (Some(category), Some(name)) =
            (self.selected_category_name(), self.selected_template_name())
        else {
            self.set_error_message("Please select a category and template".to_string());
            return;
        };

        if let Some(number) = self.templates.get(&category, &name).map(str::to_string) {
            self.set_number_input(number);
        }
    }

    /// Saves the current input as a template in the selected category
    pub fn save_template(&mut self, name: &str) -> Result<(), String> {
        if self.number_input.trim().is_empty() {
            return Err("Please enter a phone number to save as template".to_string());
        }
        let category = self
            .selected_category_name()
            .ok_or_else(|| "Please select a category first".to_string())?;

        let snapshot = self.templates.clone();
        let previous = self
            .templates
            .save_validated(&self.tracker, &category, name, &self.number_input)
            .map_err(|e| e.to_string())?;
        if previous.is_some() {
            log::info!("Overwrote template '{}' in '{}'", name.trim(), category);
        }

        self.persist_templates_or_restore(snapshot)?;

        if let Some(index) = self
            .template_names()
            .iter()
            .position(|existing| existing == name.trim())
        {
            self.selected_template = index;
        }
        Ok(())
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), String> {
        let snapshot = self.templates.clone();
        let created = self.templates.add_category(name).map_err(|e| e.to_string())?;
        if !created {
            return Err(format!("Category '{}' already exists", name.trim()));
        }

        self.persist_templates_or_restore(snapshot)?;

        if let Some(index) = self
            .category_names()
            .iter()
            .position(|existing| existing == name.trim())
        {
            self.selected_category = index;
            self.selected_template = 0;
        }
        Ok(())
    }

    pub fn request_delete_template(&mut self) {
        match (self.selected_category_name(), self.selected_template_name()) {
            (Some(category), Some(name)) => {
                self.confirmation_state = ConfirmationState::DeleteTemplate { category, name };
            }
            _ => self.set_error_message(
                "Please select a category and template to delete".to_string(),
            ),
        }
    }

    fn delete_template(&mut self, category: &str, name: &str) -> Result<(), String> {
        let snapshot = self.templates.clone();
        self.templates
            .remove(category, name)
            .map_err(|e| e.to_string())?;
        self.persist_templates_or_restore(snapshot)?;

        let count = self.template_names().len();
        self.selected_template = self.selected_template.min(count.saturating_sub(1));
        Ok(())
    }

    /// Writes the book to disk. On failure the in-memory book goes back to
    /// `snapshot` so it never shows changes the file does not have.
    fn persist_templates_or_restore(&mut self, snapshot: TemplateBook) -> Result<(), String> {
        match self.storage.save_templates(&self.templates) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("{:#}", e);
                self.templates = snapshot;
                Err(format!("{:#}", e))
            }
        }
    }

    // History

    pub fn visible_history(&self) -> Vec<&HistoryEntry> {
        self.history.recent(self.config.history_display_limit)
    }

    /// Re-runs the lookup for the selected history entry
    pub fn track_selected_history(&mut self) {
        let number = match self.visible_history().get(self.selected_history) {
            Some(entry) => entry.number.clone(),
            None => return,
        };
        self.set_number_input(number);
        self.track();
    }

    pub fn request_clear_history(&mut self) {
        if self.history.is_empty() {
            self.set_error_message("Search history is already empty".to_string());
        } else {
            self.confirmation_state = ConfirmationState::ClearHistory;
        }
    }

    fn clear_history(&mut self) -> Result<(), String> {
        self.history.clear();
        self.selected_history = 0;
        self.storage
            .save_history(&self.history)
            .map_err(|e| format!("{:#}", e))
    }

    // Country picker

    /// Replaces the input with the selected country's calling code
    pub fn insert_selected_country_code(&mut self) {
        if let Some((_, code)) = regions::QUICK_COUNTRY_CODES.get(self.selected_country) {
            self.set_number_input(format!("+{}", code));
        }
    }

    // Export

    pub fn export_results(&mut self, path: &Path) -> Result<(), String> {
        if self.report.is_none() {
            return Err("No results to export!".to_string());
        }
        export_results_csv(path, &self.result_fields()).map_err(|e| format!("{:#}", e))?;
        log::info!("Exported results to {}", path.display());
        Ok(())
    }

    // List navigation for the focused panel

    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::Templates => self.template_names().len(),
            Focus::Countries => regions::QUICK_COUNTRY_CODES.len(),
            Focus::History => self.visible_history().len(),
            Focus::Results => 0,
        }
    }

    fn focused_selection(&mut self) -> Option<&mut usize> {
        match self.focus {
            Focus::Templates => Some(&mut self.selected_template),
            Focus::Countries => Some(&mut self.selected_country),
            Focus::History => Some(&mut self.selected_history),
            Focus::Results => None,
        }
    }

    pub fn next_item(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        if let Some(selected) = self.focused_selection() {
            *selected = (*selected + 1) % len;
        }
    }

    pub fn previous_item(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        if let Some(selected) = self.focused_selection() {
            *selected = (*selected + len - 1) % len;
        }
    }

    // Confirmation

    pub fn has_pending_action(&self) -> bool {
        self.confirmation_state != ConfirmationState::None
    }

    pub fn confirmation_prompt(&self) -> Option<String> {
        match &self.confirmation_state {
            ConfirmationState::None => None,
            ConfirmationState::DeleteTemplate { category, name } => Some(format!(
                "Delete template '{}' from category '{}'?",
                name, category
            )),
            ConfirmationState::ClearHistory => {
                Some("Clear the entire search history?".to_string())
            }
        }
    }

    pub fn confirm_pending_action(&mut self) {
        let pending = std::mem::replace(&mut self.confirmation_state, ConfirmationState::None);
        let result = match pending {
            ConfirmationState::None => return,
            ConfirmationState::DeleteTemplate { category, name } => self
                .delete_template(&category, &name)
                .map(|_| "Template deleted successfully!"),
            ConfirmationState::ClearHistory => {
                self.clear_history().map(|_| "Search history cleared")
            }
        };

        match result {
            Ok(message) => self.set_success_message(message.to_string()),
            Err(e) => self.set_error_message(e),
        }
    }

    pub fn cancel_pending_action(&mut self) {
        self.confirmation_state = ConfirmationState::None;
    }

    // Messages

    pub fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
        self.success_message = None;
    }

    pub fn set_success_message(&mut self, message: String) {
        self.success_message = Some(message);
        self.error_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    pub fn has_message(&self) -> bool {
        self.error_message.is_some() || self.success_message.is_some()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        tracker::render(frame, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(dir: &Path) -> App {
        let storage = StorageManager::new(Some(dir.to_path_buf())).expect("storage");
        App::new(AppConfig::default(), None, storage)
    }

    #[test]
    fn test_should_record_history_for_successful_lookups_only() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());

        app.set_number_input("+1 650-253-0000");
        app.track();
        assert!(app.report.is_some());
        assert_eq!(app.history.len(), 1);

        app.set_number_input("+1 650-253-000");
        app.track();
        assert!(app.report.is_none());
        assert!(app.error_message.is_some());
        assert_eq!(app.history.len(), 1);
        assert!(app.result_fields().iter().all(|(_, value)| value.is_empty()));

        let reloaded = StorageManager::new(Some(tmp.path().to_path_buf()))
            .expect("storage")
            .load_history();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_should_cap_the_visible_history() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());

        for _ in 0..12 {
            app.set_number_input("+44 20 7031 3000");
            app.track();
        }
        app.set_number_input("+1 650-253-0000");
        app.track();

        let visible = app.visible_history();
        assert_eq!(visible.len(), 10);
        assert_eq!(visible[0].number, "+1 650-253-0000");
    }

    #[test]
    fn test_should_save_and_delete_templates_through_confirmation() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());
        app.add_category("Friends").expect("add category");
        assert_eq!(app.selected_category_name().as_deref(), Some("Friends"));

        app.set_number_input("+44 20 7031 3000");
        app.save_template("Office").expect("save");
        assert_eq!(app.selected_template_name().as_deref(), Some("Office"));

        let storage = StorageManager::new(Some(tmp.path().to_path_buf())).expect("storage");
        assert_eq!(
            storage.load_templates().get("Friends", "Office"),
            Some("+44 20 7031 3000")
        );

        app.request_delete_template();
        assert!(app.has_pending_action());
        app.confirm_pending_action();
        assert!(!app.has_pending_action());
        assert_eq!(storage.load_templates().get("Friends", "Office"), None);
    }

    #[test]
    fn test_should_not_save_templates_for_invalid_input() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());

        app.set_number_input("+1 650-253-000");
        assert!(app.save_template("Broken").is_err());
        assert_eq!(app.templates, TemplateBook::default());
    }

    #[test]
    fn test_should_keep_history_when_clearing_is_cancelled() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());
        app.set_number_input("+1 650-253-0000");
        app.track();

        app.request_clear_history();
        app.cancel_pending_action();
        assert_eq!(app.history.len(), 1);

        app.request_clear_history();
        app.confirm_pending_action();
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_should_restore_templates_when_saving_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());
        app.add_category("Friends").expect("add category");
        app.set_number_input("+44 20 7031 3000");
        app.save_template("Office").expect("save");
        let before = app.templates.clone();

        // A directory in place of the file makes every write fail
        let templates_file = tmp.path().join(crate::models::storage::TEMPLATES_FILE);
        std::fs::remove_file(&templates_file).expect("remove");
        std::fs::create_dir(&templates_file).expect("mkdir");
        std::fs::write(templates_file.join("keep"), "").expect("write");

        assert!(app.add_category("Family").is_err());
        assert_eq!(app.templates, before);

        app.set_number_input("+1 650-253-0000");
        assert!(app.save_template("Desk").is_err());
        assert!(app.save_template("Office").is_err());
        assert_eq!(app.templates, before);

        app.confirmation_state = ConfirmationState::DeleteTemplate {
            category: "Friends".to_string(),
            name: "Office".to_string(),
        };
        app.confirm_pending_action();
        assert!(app.error_message.is_some());
        assert_eq!(app.templates, before);
    }

    #[test]
    fn test_should_insert_country_codes_from_the_picker() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());

        app.focus = Focus::Countries;
        app.next_item();
        app.next_item();
        app.insert_selected_country_code();

        assert_eq!(app.number_input, "+91");
    }

    #[test]
    fn test_should_export_only_after_a_lookup() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut app = app(tmp.path());
        let path = tmp.path().join("out.csv");

        assert_eq!(
            app.export_results(&path),
            Err("No results to export!".to_string())
        );

        app.set_number_input("+1 650-253-0000");
        app.track();
        app.export_results(&path).expect("export");

        let csv = std::fs::read_to_string(&path).expect("read");
        assert!(csv.starts_with("Field,Value\r\n"));
        assert!(csv.contains("E.164 Format,+16502530000"));
    }
}
