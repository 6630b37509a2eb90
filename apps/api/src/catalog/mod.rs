//! Catalog Store — read-only companies, skills and top-paying roles.
//!
//! Companies and skills are loaded once from shared JSON data files. A missing or
//! malformed file degrades to an empty collection and is reported in the log only.
//! Top-paying roles are read from CSV on every request.

pub mod handlers;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::catalog::{Company, Skill, TopPayingRole};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    companies: Vec<Company>,
    skills: Vec<Skill>,
    top_paying_roles_file: PathBuf,
}

impl CatalogStore {
    pub fn new(
        companies: Vec<Company>,
        skills: Vec<Skill>,
        top_paying_roles_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            companies,
            skills,
            top_paying_roles_file: top_paying_roles_file.into(),
        }
    }

    /// Loads companies and skills. Never fails.
    pub async fn load(
        companies_file: &Path,
        skills_file: &Path,
        top_paying_roles_file: &Path,
    ) -> Self {
        let companies: Vec<Company> = load_json_array(companies_file, "companies").await;
        let skills: Vec<Skill> = load_json_array(skills_file, "skills").await;
        info!(
            "Catalog loaded: {} companies, {} skills",
            companies.len(),
            skills.len()
        );
        Self::new(companies, skills, top_paying_roles_file)
    }

    pub fn list_companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn get_company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn list_skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Reads the roles CSV. A missing file is an empty list.
    pub async fn list_top_paying_roles(&self) -> Result<Vec<TopPayingRole>, CatalogError> {
        let path = &self.top_paying_roles_file;
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Top-paying roles file {} not found", path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };
        parse_roles_csv(&bytes).map_err(|source| CatalogError::Csv {
            path: path.clone(),
            source,
        })
    }
}

fn parse_roles_csv(bytes: &[u8]) -> Result<Vec<TopPayingRole>, csv::Error> {
    // Tolerate a UTF-8 BOM from spreadsheet exports.
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    csv::Reader::from_reader(bytes)
        .deserialize::<TopPayingRole>()
        .collect()
}

/// Reads a JSON array, skipping entries that do not fit `T`.
async fn load_json_array<T: DeserializeOwned>(path: &Path, label: &str) -> Vec<T> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Error loading {label} from {}: {e}", path.display());
            return Vec::new();
        }
    };
    let items: Vec<Value> = match serde_json::from_slice(&bytes) {
        Ok(items) => items,
        Err(e) => {
            error!("Error parsing {label} file {}: {e}", path.display());
            return Vec::new();
        }
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Skipping {label} entry {i} in {}: {e}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPANIES: &str = r#"[
        {"id": "tcs", "name": "TCS", "role": "Systems Engineer", "tier": "Mass Recruiters",
         "branches": ["CSE", "ECE"], "requirements": ["Aptitude", "Java"]},
        {"id": "google", "name": "Google", "role": "SWE", "packageRange": "30 - 45"},
        {"name": "No Id Corp"}
    ]"#;

    #[tokio::test]
    async fn test_load_keeps_fields_and_skips_entries_without_id() {
        let dir = tempfile::tempdir().unwrap();
        let companies = dir.path().join("companies.json");
        let skills = dir.path().join("skills.json");
        std::fs::write(&companies, COMPANIES).unwrap();
        std::fs::write(
            &skills,
            r#"[{"name": "DSA", "category": "Programming", "level": "Essential"}]"#,
        )
        .unwrap();

        let store = CatalogStore::load(&companies, &skills, &dir.path().join("roles.csv")).await;
        assert_eq!(store.list_companies().len(), 2);
        assert_eq!(store.list_skills().len(), 1);

        let tcs = store.get_company("tcs").unwrap();
        assert_eq!(tcs.fields["name"], "TCS");
        assert_eq!(tcs.fields["branches"], serde_json::json!(["CSE", "ECE"]));
        assert!(store.get_company("infosys").is_none());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_sources_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let malformed = dir.path().join("skills.json");
        std::fs::write(&malformed, "export const skillsData = [").unwrap();

        let store = CatalogStore::load(
            &dir.path().join("missing.json"),
            &malformed,
            &dir.path().join("roles.csv"),
        )
        .await;
        assert!(store.list_companies().is_empty());
        assert!(store.list_skills().is_empty());
    }

    #[tokio::test]
    async fn test_roles_csv_rows_keyed_by_header() {
        let dir = tempfile::tempdir().unwrap();
        let roles = dir.path().join("roles.csv");
        std::fs::write(
            &roles,
            "\u{feff}Role,Average Salary,Companies\nSDE,18 LPA,\"Google, Amazon\"\nData Analyst,9 LPA,Deloitte\n",
        )
        .unwrap();

        let store = CatalogStore::new(vec![], vec![], &roles);
        let rows = store.list_top_paying_roles().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0["Role"], "SDE");
        assert_eq!(rows[0].0["Companies"], "Google, Amazon");
        assert_eq!(rows[1].0["Average Salary"], "9 LPA");
    }

    #[tokio::test]
    async fn test_roles_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(vec![], vec![], dir.path().join("nope.csv"));
        assert!(store.list_top_paying_roles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_roles_ragged_csv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let roles = dir.path().join("roles.csv");
        std::fs::write(&roles, "Role,Salary\nSDE,18,extra\n").unwrap();
        let store = CatalogStore::new(vec![], vec![], &roles);
        assert!(matches!(
            store.list_top_paying_roles().await,
            Err(CatalogError::Csv { .. })
        ));
    }
}
