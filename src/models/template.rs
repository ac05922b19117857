use crate::error::TemplateError;
use crate::lookup::Tracker;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Templates grouped by category: category name → (template name → number).
///
/// Serialized transparently so the file on disk is the plain nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateBook {
    categories: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for TemplateBook {
    /// Sample categories used until a templates file exists
    fn default() -> Self {
        let mut book = Self::empty();
        for (category, entries) in [
            (
                "Business",
                [
                    ("Corporate Office", "+1-212-555-1234"),
                    ("Customer Support", "+44-20-7123-4567"),
                    ("Sales Department", "+91-80-1234-5678"),
                ],
            ),
            (
                "Emergency",
                [
                    ("Police", "+1-911"),
                    ("Ambulance", "+44-999"),
                    ("Fire Department", "+91-101"),
                ],
            ),
            (
                "International",
                [
                    ("US Embassy", "+1-202-501-4444"),
                    ("UK Embassy", "+44-20-7008-1500"),
                    ("Indian Embassy", "+91-11-2419-8000"),
                ],
            ),
        ] {
            let templates = book.categories.entry(category.to_string()).or_default();
            for (name, number) in entries {
                templates.insert(name.to_string(), number.to_string());
            }
        }
        book
    }
}

impl TemplateBook {
    pub fn empty() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn template_names(&self, category: &str) -> Vec<String> {
        self.categories
            .get(category)
            .map(|templates| templates.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn templates(&self, category: &str) -> Option<&BTreeMap<String, String>> {
        self.categories.get(category)
    }

    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|templates| templates.get(name))
            .map(String::as_str)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Total number of templates across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Adds an empty category. Returns false if it already existed.
    pub fn add_category(&mut self, category: &str) -> Result<bool, TemplateError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(TemplateError::EmptyCategory);
        }
        if self.categories.contains_key(category) {
            return Ok(false);
        }
        self.categories
            .insert(category.to_string(), BTreeMap::new());
        Ok(true)
    }

    /// Stores a number under `category`/`name`, creating the category if
    /// needed and overwriting an existing template of the same name.
    /// Returns the number previously stored under that name.
    pub fn insert(
        &mut self,
        category: &str,
        name: &str,
        number: &str,
    ) -> Result<Option<String>, TemplateError> {
        let category = category.trim();
        let name = name.trim();
        if category.is_empty() {
            return Err(TemplateError::EmptyCategory);
        }
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }

        Ok(self
            .categories
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), number.trim().to_string()))
    }

    /// Validates the number with `tracker` before storing it
    pub fn save_validated(
        &mut self,
        tracker: &Tracker,
        category: &str,
        name: &str,
        number: &str,
    ) -> Result<Option<String>, TemplateError> {
        tracker.validate(number)?;
        self.insert(category, name, number)
    }

    pub fn remove(&mut self, category: &str, name: &str) -> Result<String, TemplateError> {
        let templates = self
            .categories
            .get_mut(category)
            .ok_or_else(|| TemplateError::UnknownCategory(category.to_string()))?;

        templates
            .remove(name)
            .ok_or_else(|| TemplateError::UnknownTemplate {
                category: category.to_string(),
                name: name.to_string(),
            })
    }

    /// Folds another book into this one. Existing names are kept unless
    /// `overwrite` is set. Returns how many templates were written.
    pub fn merge(&mut self, other: TemplateBook, overwrite: bool) -> usize {
        let mut written = 0;
        for (category, templates) in other.categories {
            let target = self.categories.entry(category).or_default();
            for (name, number) in templates {
                if overwrite || !target.contains_key(&name) {
                    target.insert(name, number);
                    written += 1;
                }
            }
        }
        written
    }
}
