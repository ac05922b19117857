pub mod export;
pub mod history;
pub mod storage;
pub mod template;

pub use export::{export_results_csv, export_templates, import_templates};
pub use history::{HistoryEntry, SearchHistory};
pub use storage::StorageManager;
pub use template::TemplateBook;
