use crate::lookup::{LiveValidity, NumberReport, Tracker, regions};
use crate::models::{self, StorageManager};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

fn margin() -> colored::ColoredString {
    "┃".bright_magenta()
}

fn separator() {
    println!("{}", "─".repeat(60).bright_magenta());
}

/// Left-aligns `text` to `width` terminal columns
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Looks up a number, prints every field and optionally records and exports it
pub fn lookup(
    tracker: &Tracker,
    storage: &StorageManager,
    number: &str,
    export: Option<&Path>,
    record: bool,
) -> Result<()> {
    let report = tracker.lookup(number)?;
    print_report(&report);

    if record {
        let mut history = storage.load_history();
        history.record(number);
        storage.save_history(&history)?;
    }

    if let Some(path) = export {
        models::export_results_csv(path, &report.fields())?;
        println!(
            "{}  {} {}",
            margin(),
            "Exported to".bright_green(),
            path.display()
        );
    }

    Ok(())
}

fn print_report(report: &NumberReport) {
    let fields = report.fields();
    let width = fields
        .iter()
        .map(|(field, _)| field.width())
        .max()
        .unwrap_or(0);

    println!(
        "{}  {} {}",
        margin(),
        "NUMBER".bright_green().bold(),
        report.input.trim().bold()
    );
    separator();
    for (field, value) in fields {
        let value = if value.is_empty() {
            "-".dimmed()
        } else {
            value.bright_white()
        };
        println!("{}  {}  {}", margin(), pad(field, width).bright_blue(), value);
    }
}

/// Prints the same feedback the TUI shows while typing
pub fn check(tracker: &Tracker, number: &str) -> Result<()> {
    let validity = tracker.live_validity(number);
    let label = match validity {
        LiveValidity::Valid => validity.label().bright_green(),
        LiveValidity::Possible => validity.label().yellow(),
        LiveValidity::Invalid | LiveValidity::BadFormat => validity.label().bright_red(),
        LiveValidity::Empty => "Empty input".dimmed(),
    };
    println!("{}  {}  {}", margin(), number.trim().bold(), label);

    match validity {
        LiveValidity::Valid | LiveValidity::Possible => Ok(()),
        _ => {
            tracker.validate(number)?;
            Ok(())
        }
    }
}

pub fn list_templates(storage: &StorageManager, category: Option<&str>) -> Result<()> {
    let book = storage.load_templates();

    let categories = match category {
        Some(name) => {
            if !book.contains_category(name) {
                bail!("No category named '{}'", name);
            }
            vec![name.to_string()]
        }
        None => book.category_names(),
    };

    if categories.is_empty() {
        println!("{}  No categories yet", margin());
        return Ok(());
    }

    for name in categories {
        println!("{}  {}", margin(), name.bright_green().bold());
        let templates = book.templates(&name).cloned().unwrap_or_default();
        if templates.is_empty() {
            println!("{}    {}", margin(), "(empty)".dimmed());
            continue;
        }

        let width = templates.keys().map(|key| key.width()).max().unwrap_or(0);
        for (template, number) in &templates {
            println!(
                "{}    {}  {}",
                margin(),
                pad(template, width).yellow(),
                number.bright_white()
            );
        }
    }
    separator();
    println!(
        "{}  {} templates in {} categories",
        margin(),
        book.len(),
        book.category_names().len()
    );

    Ok(())
}

pub fn save_template(
    tracker: &Tracker,
    storage: &StorageManager,
    category: &str,
    name: &str,
    number: &str,
) -> Result<()> {
    let mut book = storage.load_templates();
    let previous = book.save_validated(tracker, category, name, number)?;
    storage.save_templates(&book)?;

    let verb = if previous.is_some() { "Updated" } else { "Saved" };
    println!(
        "{}  {} {} {} {}",
        margin(),
        verb.bright_green(),
        name.trim().bold(),
        "in".dimmed(),
        category.trim()
    );
    Ok(())
}

pub fn delete_template(storage: &StorageManager, category: &str, name: &str) -> Result<()> {
    let mut book = storage.load_templates();
    let number = book.remove(category, name)?;
    storage.save_templates(&book)?;

    println!(
        "{}  {} {} ({})",
        margin(),
        "Deleted".bright_red(),
        name.bold(),
        number
    );
    Ok(())
}

pub fn add_category(storage: &StorageManager, name: &str) -> Result<()> {
    let mut book = storage.load_templates();
    if book.add_category(name)? {
        storage.save_templates(&book)?;
        println!("{}  {} {}", margin(), "Created".bright_green(), name.trim().bold());
    } else {
        println!("{}  Category {} already exists", margin(), name.trim().bold());
    }
    Ok(())
}

pub fn export_templates(storage: &StorageManager, file: &Path) -> Result<()> {
    let book = storage.load_templates();
    models::export_templates(&book, file)?;
    println!(
        "{}  {} {} templates to {}",
        margin(),
        "Exported".bright_green(),
        book.len(),
        file.display()
    );
    Ok(())
}

pub fn import_templates(storage: &StorageManager, file: &Path, overwrite: bool) -> Result<()> {
    let imported = models::import_templates(file)?;
    let mut book = storage.load_templates();
    let written = book.merge(imported, overwrite);
    storage.save_templates(&book)?;

    log::info!("Imported {} templates from {}", written, file.display());
    println!(
        "{}  {} {} templates from {}",
        margin(),
        "Imported".bright_green(),
        written,
        file.display()
    );
    Ok(())
}

pub fn list_history(storage: &StorageManager, limit: usize) -> Result<()> {
    let history = storage.load_history();
    let entries = history.recent(limit);

    if entries.is_empty() {
        println!("{}  No searches yet", margin());
        return Ok(());
    }

    for (idx, entry) in entries.iter().enumerate() {
        println!(
            "{}  {}. {}",
            margin(),
            (idx + 1).to_string().yellow(),
            entry.display_line().bright_white()
        );
    }
    if history.len() > entries.len() {
        println!(
            "{}  ... and {} older",
            margin(),
            history.len() - entries.len()
        );
    }
    Ok(())
}

pub fn clear_history(storage: &StorageManager, yes: bool) -> Result<()> {
    let mut history = storage.load_history();
    if history.is_empty() {
        println!("{}  Search history is already empty", margin());
        return Ok(());
    }

    if !yes && !confirm(&format!("Delete {} history entries?", history.len()))? {
        println!("{}  Cancelled", margin());
        return Ok(());
    }

    history.clear();
    storage.save_history(&history)?;
    println!("{}  {}", margin(), "Search history cleared".bright_green());
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{}  {} [y/N] ", margin(), question);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES" | "Yes"))
}

pub fn list_countries() {
    let width = regions::QUICK_COUNTRY_CODES
        .iter()
        .map(|(name, _)| name.width())
        .max()
        .unwrap_or(0);

    for (name, code) in regions::QUICK_COUNTRY_CODES {
        println!(
            "{}  {}  {}",
            margin(),
            pad(name, width).bright_white(),
            format!("+{}", code).yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_pad_by_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("日本", 5), "日本 ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_should_export_lookup_results() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(Some(tmp.path().join("data"))).expect("storage");
        let out = tmp.path().join("result.csv");

        lookup(
            &Tracker::default(),
            &storage,
            "+1 650-253-0000",
            Some(&out),
            false,
        )
        .expect("lookup");

        let csv = std::fs::read_to_string(out).expect("read");
        assert!(csv.contains("International Format,+1 650-253-0000"));
    }

    #[test]
    fn test_should_merge_imported_templates() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(Some(tmp.path().join("data"))).expect("storage");
        let backup = tmp.path().join("backup.yaml");

        let mut other = models::TemplateBook::empty();
        other
            .insert("Friends", "Alice", "+44 20 7031 3000")
            .expect("insert");
        models::export_templates(&other, &backup).expect("export");

        import_templates(&storage, &backup, false).expect("import");

        let book = storage.load_templates();
        assert_eq!(book.get("Friends", "Alice"), Some("+44 20 7031 3000"));
        assert!(book.contains_category("Business"));
    }

    #[test]
    fn test_should_clear_history_without_prompting_when_confirmed() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(Some(tmp.path().to_path_buf())).expect("storage");
        let mut history = storage.load_history();
        history.record("+1 650-253-0000");
        storage.save_history(&history).expect("save");

        clear_history(&storage, true).expect("clear");
        assert!(storage.load_history().is_empty());
    }
}
