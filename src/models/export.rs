use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::models::TemplateBook;
use crate::models::storage::write_atomic;

/// File formats for template backups
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    /// `.yaml`/`.yml` select YAML, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        }
    }
}

/// Writes the displayed results as a two-column CSV file
pub fn export_results_csv(path: &Path, fields: &[(&str, String)]) -> Result<()> {
    if fields.iter().all(|(_, value)| value.is_empty()) {
        bail!("No results to export!");
    }

    let mut out = String::new();
    push_csv_row(&mut out, "Field", "Value");
    for (field, value) in fields {
        push_csv_row(&mut out, field, value);
    }

    fs::write(path, out)
        .with_context(|| format!("Failed to export results to {}", path.display()))
}

fn push_csv_row(out: &mut String, field: &str, value: &str) {
    out.push_str(&csv_cell(field));
    out.push(',');
    out.push_str(&csv_cell(value));
    out.push_str("\r\n");
}

/// Quotes a cell when it contains a separator, quote or line break
fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Export the whole template book to a JSON or YAML file
pub fn export_templates(book: &TemplateBook, path: &Path) -> Result<()> {
    let content = match ExportFormat::from_path(path) {
        ExportFormat::Json => {
            serde_json::to_string_pretty(book).context("Failed to serialize templates to JSON")?
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(book).context("Failed to serialize templates to YAML")?
        }
    };

    write_atomic(path, content.as_bytes())
        .with_context(|| format!("Failed to write template export {}", path.display()))
}

/// Import a template book previously written by `export_templates`
pub fn import_templates(path: &Path) -> Result<TemplateBook> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))?;

    match ExportFormat::from_path(path) {
        ExportFormat::Json => {
            serde_json::from_str(&contents).context("Failed to parse JSON import file")
        }
        ExportFormat::Yaml => {
            serde_yaml::from_str(&contents).context("Failed to parse YAML import file")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_write_a_header_and_one_row_per_field() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("results.csv");
        let fields = vec![
            ("E.164 Format", "+16502530000".to_string()),
            ("Is Valid Number", "Yes".to_string()),
        ];

        export_results_csv(&path, &fields).expect("export");

        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(
            content,
            "Field,Value\r\nE.164 Format,+16502530000\r\nIs Valid Number,Yes\r\n"
        );
    }

    #[test]
    fn test_should_quote_values_with_separators() {
        assert_eq!(
            csv_cell("America/New_York, America/Chicago"),
            "\"America/New_York, America/Chicago\""
        );
        assert_eq!(csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_cell("plain"), "plain");
    }

    #[test]
    fn test_should_refuse_to_export_empty_results() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("results.csv");
        let fields = vec![("E.164 Format", String::new())];

        let err = export_results_csv(&path, &fields).unwrap_err();
        assert_eq!(err.to_string(), "No results to export!");
        assert!(!path.exists());
    }

    #[test]
    fn test_should_pick_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("backup.YML")),
            ExportFormat::Yaml
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("backup.json")),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("backup")),
            ExportFormat::Json
        );
    }

    #[test]
    fn test_should_restore_templates_from_json_and_yaml_backups() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let book = TemplateBook::default();

        for name in ["backup.json", "backup.yaml"] {
            let path = tmp.path().join(name);
            export_templates(&book, &path).expect("export");
            assert_eq!(import_templates(&path).expect("import"), book);
        }
    }
}
