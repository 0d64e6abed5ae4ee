//! Query template library.
//!
//! Built-in templates carry stable slug ids and cannot be edited or removed.
//! User templates get a random UUID id.

use crate::error::{GenError, GenResult};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// A saved query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub query: String,
    #[serde(default)]
    pub built_in: bool,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub last_used_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub use_count: u32,
}

impl QueryTemplate {
    /// New user template with a generated id.
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            query: query.into(),
            built_in: false,
            created_at: now(),
            last_used_at: None,
            use_count: 0,
        }
    }

    fn built_in(id: &str, name: &str, category: &str, description: &str, query: &str) -> Self {
        Self {
            id: id.to_string(),
            built_in: true,
            ..Self::new(name, query, description, category)
        }
    }

    /// Bump the use counter and stamp the time.
    pub fn mark_used(&mut self) {
        self.use_count += 1;
        self.last_used_at = Some(now());
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Fields of a user template, for add/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub query: String,
    pub description: String,
    pub category: String,
}

impl TemplateDraft {
    fn validate(&self) -> GenResult<()> {
        if self.name.trim().is_empty() {
            return Err(GenError::validation("template name is empty"));
        }
        if self.query.trim().is_empty() {
            return Err(GenError::validation("template query is empty"));
        }
        Ok(())
    }
}

/// Repository of query templates.
pub trait TemplateStore {
    fn all(&self) -> &[QueryTemplate];

    fn get(&self, id: &str) -> Option<&QueryTemplate> {
        self.all().iter().find(|t| t.id == id)
    }

    fn by_category(&self, category: &str) -> Vec<&QueryTemplate> {
        self.all().iter().filter(|t| t.category == category).collect()
    }

    /// Sorted, distinct category names.
    fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.all().iter().map(|t| t.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Templates whose name, description or query contains `term`, ignoring case.
    fn search(&self, term: &str) -> Vec<&QueryTemplate> {
        let term = term.trim().to_lowercase();
        self.all()
            .iter()
            .filter(|t| {
                term.is_empty()
                    || t.name.to_lowercase().contains(&term)
                    || t.description.to_lowercase().contains(&term)
                    || t.query.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Add a user template; returns its id.
    fn add(&mut self, draft: TemplateDraft) -> GenResult<String>;

    fn update(&mut self, id: &str, draft: TemplateDraft) -> GenResult<()>;

    fn remove(&mut self, id: &str) -> GenResult<QueryTemplate>;

    fn mark_used(&mut self, id: &str) -> GenResult<()>;
}

/// In-memory template library seeded with the built-ins.
#[derive(Debug, Clone)]
pub struct InMemoryTemplates {
    templates: Vec<QueryTemplate>,
}

impl Default for InMemoryTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTemplates {
    pub fn new() -> Self {
        Self {
            templates: built_in_templates(),
        }
    }

    /// Replace the contents with templates serialized by [`Self::save_json`].
    ///
    /// Built-ins are re-seeded when the input has none.
    pub fn load_json(&mut self, json: &str) -> GenResult<()> {
        let mut templates: Vec<QueryTemplate> = serde_json::from_str(json)?;
        if !templates.iter().any(|t| t.built_in) {
            let mut seeded = built_in_templates();
            seeded.append(&mut templates);
            templates = seeded;
        }
        self.templates = templates;
        Ok(())
    }

    pub fn save_json(&self) -> GenResult<String> {
        Ok(serde_json::to_string_pretty(&self.templates)?)
    }

    /// Load from `path`; a missing file keeps the built-ins only.
    pub fn load_file(&mut self, path: &Path) -> GenResult<()> {
        match std::fs::read_to_string(path) {
            Ok(json) => self.load_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to `path`, creating parent directories.
    pub fn save_file(&self, path: &Path) -> GenResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.save_json()?)?;
        Ok(())
    }

    fn position(&self, id: &str) -> GenResult<usize> {
        self.templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| GenError::not_found(format!("template {id}")))
    }

    fn editable(&self, id: &str) -> GenResult<usize> {
        let pos = self.position(id)?;
        if self.templates[pos].built_in {
            return Err(GenError::read_only(format!(
                "built-in template {id} cannot be modified"
            )));
        }
        Ok(pos)
    }
}

impl TemplateStore for InMemoryTemplates {
    fn all(&self) -> &[QueryTemplate] {
        &self.templates
    }

    fn add(&mut self, draft: TemplateDraft) -> GenResult<String> {
        draft.validate()?;
        let template = QueryTemplate::new(draft.name, draft.query, draft.description, draft.category);
        let id = template.id.clone();
        self.templates.push(template);
        Ok(id)
    }

    fn update(&mut self, id: &str, draft: TemplateDraft) -> GenResult<()> {
        let pos = self.editable(id)?;
        draft.validate()?;
        let template = &mut self.templates[pos];
        template.name = draft.name;
        template.query = draft.query;
        template.description = draft.description;
        template.category = draft.category;
        Ok(())
    }

    fn remove(&mut self, id: &str) -> GenResult<QueryTemplate> {
        let pos = self.editable(id)?;
        Ok(self.templates.remove(pos))
    }

    fn mark_used(&mut self, id: &str) -> GenResult<()> {
        let pos = self.position(id)?;
        self.templates[pos].mark_used();
        Ok(())
    }
}

/// The fixed built-in library.
pub fn built_in_templates() -> Vec<QueryTemplate> {
    vec![
        QueryTemplate::built_in(
            "basic-select",
            "Basic SELECT",
            "SELECT",
            "Simple SELECT with type filter",
            "SELECT *\nFROM `bucket`\nWHERE type = \"document_type\"\nLIMIT 100",
        ),
        QueryTemplate::built_in(
            "pagination",
            "Pagination Query",
            "SELECT",
            "Paginated results with sorting",
            "SELECT *\nFROM `bucket`\nWHERE type = \"document_type\"\nORDER BY created_at DESC\nLIMIT 20 OFFSET 0",
        ),
        QueryTemplate::built_in(
            "search-by-field",
            "Search by Field",
            "SELECT",
            "Case-insensitive search",
            "SELECT *\nFROM `bucket`\nWHERE type = \"document_type\"\n  AND LOWER(name) LIKE \"%search_term%\"\nLIMIT 50",
        ),
        QueryTemplate::built_in(
            "count-documents",
            "Count Documents",
            "Aggregation",
            "Count matching documents",
            "SELECT COUNT(*) AS total\nFROM `bucket`\nWHERE type = \"document_type\"",
        ),
        QueryTemplate::built_in(
            "group-by-count",
            "Group By with Count",
            "Aggregation",
            "Group documents by status with count",
            "SELECT status, COUNT(*) AS count\nFROM `bucket`\nWHERE type = \"document_type\"\nGROUP BY status\nORDER BY count DESC",
        ),
        QueryTemplate::built_in(
            "sum-average",
            "Sum and Average",
            "Aggregation",
            "Calculate sum and average",
            "SELECT \n  SUM(amount) AS total_amount,\n  AVG(amount) AS avg_amount,\n  COUNT(*) AS count\nFROM `bucket`\nWHERE type = \"order\"",
        ),
        QueryTemplate::built_in(
            "date-range",
            "Date Range Query",
            "SELECT",
            "Query by date range",
            "SELECT *\nFROM `bucket`\nWHERE type = \"document_type\"\n  AND created_at >= \"2024-01-01\"\n  AND created_at < \"2024-02-01\"\nORDER BY created_at",
        ),
        QueryTemplate::built_in(
            "array-contains",
            "Array Contains",
            "SELECT",
            "Find documents where array contains value",
            "SELECT *\nFROM `bucket`\nWHERE type = \"document_type\"\n  AND ANY tag IN tags SATISFIES tag = \"important\" END",
        ),
        QueryTemplate::built_in(
            "insert-document",
            "Insert Document",
            "INSERT",
            "Insert a new document with auto-generated key",
            "INSERT INTO `bucket` (KEY, VALUE)\nVALUES (\n  UUID(),\n  {\n    \"type\": \"document_type\",\n    \"name\": \"New Document\",\n    \"created_at\": NOW_STR()\n  }\n)\nRETURNING *",
        ),
        QueryTemplate::built_in(
            "update-field",
            "Update Single Field",
            "UPDATE",
            "Update a single field by document ID",
            "UPDATE `bucket`\nSET status = \"active\"\nWHERE META().id = \"document_id\"\nRETURNING *",
        ),
        QueryTemplate::built_in(
            "bulk-update",
            "Bulk Update",
            "UPDATE",
            "Update multiple documents matching criteria",
            "UPDATE `bucket`\nSET status = \"archived\",\n    updated_at = NOW_STR()\nWHERE type = \"document_type\"\n  AND status = \"inactive\"\nRETURNING META().id",
        ),
        QueryTemplate::built_in(
            "delete-by-id",
            "Delete by ID",
            "DELETE",
            "Delete a specific document by ID",
            "DELETE FROM `bucket`\nWHERE META().id = \"document_id\"\nRETURNING *",
        ),
        QueryTemplate::built_in(
            "bulk-delete",
            "Bulk Delete",
            "DELETE",
            "Delete multiple old documents",
            "DELETE FROM `bucket`\nWHERE type = \"document_type\"\n  AND status = \"deleted\"\n  AND created_at < \"2023-01-01\"\nRETURNING META().id",
        ),
        QueryTemplate::built_in(
            "upsert-document",
            "Upsert Document",
            "UPSERT",
            "Insert or update a document",
            "UPSERT INTO `bucket` (KEY, VALUE)\nVALUES (\n  \"user::12345\",\n  {\n    \"type\": \"user\",\n    \"name\": \"John Doe\",\n    \"email\": \"john@example.com\",\n    \"updated_at\": NOW_STR()\n  }\n)\nRETURNING *",
        ),
    ]
}
