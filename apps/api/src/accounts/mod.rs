//! Account Store — user records in a flat JSON file, keyed by unique email.
//!
//! Every mutation holds one async mutex across read → check → append → write,
//! so two concurrent signups with the same email cannot both pass the check.
//! Writes go through a temp file that is atomically persisted over the target,
//! so readers never see a half-written file and do not need the lock.

pub mod handlers;

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::user::{PublicUser, User};

/// Fields a signup must carry, each present and non-empty.
pub const REQUIRED_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "email",
    "password",
    "branch",
    "currentYear",
    "college",
];

/// Assigned by the server; ignored if a client sends them.
const SERVER_FIELDS: &[&str] = &["id", "createdAt"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Account file {} is not a valid user list: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Account write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct AccountStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates and appends a new user. Nothing is written on failure.
    pub async fn create_user(&self, mut fields: Map<String, Value>) -> Result<User, StoreError> {
        if !REQUIRED_FIELDS
            .iter()
            .all(|f| fields.get(*f).is_some_and(is_present))
        {
            return Err(StoreError::Validation("Missing required fields".to_string()));
        }
        for key in SERVER_FIELDS {
            fields.remove(*key);
        }

        let mut user: User = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            StoreError::Validation(format!("Invalid field value: {e}"))
        })?;
        user.id = Some(Uuid::new_v4());
        user.created_at = Some(Utc::now());

        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        users.push(user.clone());
        self.persist(users).await?;

        info!("Registered account for {}", user.email);
        Ok(user)
    }

    /// Exact, plaintext comparison of both email and password.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, StoreError> {
        let users = self.load().await?;
        users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(PublicUser::from)
            .ok_or(StoreError::InvalidCredentials)
    }

    /// All stored users. A missing or blank file is an empty collection.
    pub async fn load(&self) -> Result<Vec<User>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn persist(&self, users: Vec<User>) -> Result<(), StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &users)).await?
    }
}

fn write_atomic(path: &Path, users: &[User]) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
    serde_json::to_writer_pretty(&mut tmp, users).map_err(|e| io_err(e.into()))?;
    tmp.write_all(b"\n").map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| {
        warn!("Failed to persist account file: {}", e.error);
        io_err(e.error)
    })?;
    Ok(())
}

/// A field counts as present unless it is null, blank, `false`, zero, or an empty container.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::json;

    fn signup(email: &str) -> Map<String, Value> {
        match json!({
            "firstName": "Asha",
            "lastName": "Rao",
            "email": email,
            "password": "hunter2",
            "branch": "CSE",
            "currentYear": "3",
            "college": "NIT Trichy",
            "phone": "98400"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_signup_then_signin_strips_password() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("users.json"));

        let created = store.create_user(signup("asha@example.com")).await.unwrap();
        assert!(created.id.is_some());
        assert!(created.created_at.is_some());

        let user = store
            .authenticate("asha@example.com", "hunter2")
            .await
            .unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["firstName"], "Asha");
        assert_eq!(value["phone"], "98400");
    }

    #[tokio::test]
    async fn test_missing_field_rejected_and_nothing_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = AccountStore::new(&path);

        for field in REQUIRED_FIELDS {
            let mut fields = signup("x@example.com");
            fields.remove(*field);
            let err = store.create_user(fields).await.unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)), "field {field}");
        }

        let mut blank = signup("x@example.com");
        blank.insert("college".into(), json!("   "));
        assert!(matches!(
            store.create_user(blank).await,
            Err(StoreError::Validation(_))
        ));

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_collection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("users.json"));

        store.create_user(signup("dup@example.com")).await.unwrap();
        let before = store.load().await.unwrap().len();

        let err = store
            .create_user(signup("dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.load().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_signups_admit_exactly_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(AccountStore::new(dir.path().join("users.json")));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create_user(signup("race@example.com")).await })
            })
            .collect();

        let mut ok = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("users.json"));
        store.create_user(signup("a@example.com")).await.unwrap();

        assert!(matches!(
            store.authenticate("a@example.com", "nope").await,
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("b@example.com", "hunter2").await,
            Err(StoreError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("users.json"));
        let mut fields = signup("id@example.com");
        fields.insert("id".into(), json!("not-a-uuid"));

        let created = store.create_user(fields).await.unwrap();
        assert!(created.id.is_some());
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("users.json");
        let store = AccountStore::new(&path);
        store.create_user(signup("n@example.com")).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = AccountStore::new(&path);

        assert!(matches!(
            store.create_user(signup("c@example.com")).await,
            Err(StoreError::Corrupt { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn test_blank_file_is_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "\n").unwrap();
        let store = AccountStore::new(&path);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!([])));
        assert!(is_present(&json!(2)));
        assert!(is_present(&json!("CSE")));
    }
}
