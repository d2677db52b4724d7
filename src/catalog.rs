use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranker::Document;

/// Errors raised while ingesting catalog data.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog payload was not valid JSON or did not match the schema.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Whether a catalog entry is a project template or a complete sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Template,
    Sample,
}

/// The metadata payload attached to every ranked document.
///
/// Opaque to the ranking engine; the matcher hands it back to the caller when a
/// match is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub id: String,
    pub display_name: String,
    pub kind: ProjectKind,
    pub platform: String,
}

/// One template or sample in a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub display_name: String,
    pub kind: ProjectKind,
    pub platform: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    pub fn meta(&self) -> ProjectMeta {
        ProjectMeta {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            kind: self.kind,
            platform: self.platform.clone(),
        }
    }

    /// The text body ranked for this entry: display name, description and tags.
    fn search_text(&self) -> String {
        let mut text = String::with_capacity(
            self.display_name.len() + self.description.len() + self.tags.len() * 8 + 2,
        );
        text.push_str(&self.display_name);
        text.push(' ');
        text.push_str(&self.description);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text
    }
}

/// An ordered collection of catalog entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON array of entries.
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(data)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge a bundled local catalog with a fetched remote catalog.
///
/// Remote entries replace local entries with the same id in place; remote
/// entries with new ids are appended in remote order. Both inputs are explicit
/// parameters so the merge is a pure function with no hidden catalog state.
pub fn merge_catalogs(local: &Catalog, remote: &Catalog) -> Catalog {
    let mut merged: IndexMap<String, CatalogEntry> = IndexMap::with_capacity(local.len());
    for entry in &local.entries {
        merged.insert(entry.id.clone(), entry.clone());
    }
    for entry in &remote.entries {
        // IndexMap keeps the original position on overwrite
        merged.insert(entry.id.clone(), entry.clone());
    }
    Catalog {
        entries: merged.into_values().collect(),
    }
}

/// Build the ranking corpus for a pair of catalogs.
///
/// Merges the catalogs, then pairs each entry's searchable text with its
/// metadata. Pure and deterministic; the returned sequence feeds
/// [`crate::ranker::Bm25Ranker::build`] directly.
pub fn build_corpus(local: &Catalog, remote: &Catalog) -> Vec<Document<ProjectMeta>> {
    merge_catalogs(local, remote)
        .entries
        .iter()
        .map(|entry| Document::new(entry.search_text(), entry.meta()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, desc: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_owned(),
            display_name: name.to_owned(),
            kind: ProjectKind::Template,
            platform: "office".to_owned(),
            description: desc.to_owned(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn from_json_parses_entries_with_optional_tags() {
        let data = r#"[
            {
                "id": "excel-custom-function",
                "display_name": "Excel Custom Function",
                "kind": "template",
                "platform": "office",
                "description": "Create custom functions in Excel",
                "tags": ["excel", "function"]
            },
            {
                "id": "teams-bot",
                "display_name": "Teams Bot",
                "kind": "sample",
                "platform": "teams",
                "description": "A conversational bot for Teams"
            }
        ]"#;
        let catalog = Catalog::from_json(data).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries[0].tags, vec!["excel", "function"]);
        assert!(catalog.entries[1].tags.is_empty());
        assert_eq!(catalog.entries[1].kind, ProjectKind::Sample);
    }

    #[test]
    fn from_json_reports_malformed_payloads() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn merge_replaces_local_entries_in_place() {
        let local = Catalog::new(vec![
            entry("a", "Local A", "old"),
            entry("b", "Local B", "kept"),
        ]);
        let remote = Catalog::new(vec![
            entry("a", "Remote A", "new"),
            entry("c", "Remote C", "appended"),
        ]);
        let merged = merge_catalogs(&local, &remote);
        let ids: Vec<&str> = merged.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(merged.entries[0].display_name, "Remote A");
        assert_eq!(merged.entries[1].display_name, "Local B");
    }

    #[test]
    fn merge_is_pure() {
        let local = Catalog::new(vec![entry("a", "A", "d")]);
        let remote = Catalog::new(vec![entry("b", "B", "d")]);
        let first = merge_catalogs(&local, &remote);
        let second = merge_catalogs(&local, &remote);
        assert_eq!(first.len(), 2);
        assert_eq!(local.len(), 1);
        assert_eq!(remote.len(), 1);
        assert_eq!(
            first.entries.iter().map(|e| &e.id).collect::<Vec<_>>(),
            second.entries.iter().map(|e| &e.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn corpus_documents_carry_entry_metadata() {
        let local = Catalog::new(vec![entry("excel-starter", "Excel Starter", "a starter")]);
        let docs = build_corpus(&local, &Catalog::default());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].meta.id, "excel-starter");
        assert!(docs[0].text.contains("Excel Starter"));
        assert!(docs[0].text.contains("a starter"));
    }
}
