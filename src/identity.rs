//! Projection of the signed-in user's identity into the header.
//!
//! The identity record is written by the login flow, which lives outside this
//! crate. Here it is only ever read: when the slot is empty or unreadable the
//! header falls back to a default derived from the current path.

use fake::Dummy;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Storage slot holding the serialized identity record.
///
pub const IDENTITY_KEY: &str = "nhm_user";

/// Errors that can occur while reading the persisted identity.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Nothing stored under the identity slot
    #[error("No identity stored under '{0}'")]
    Absent(String),

    /// Backing store could not be read
    #[error("Failed to read identity store {path}: {source}")]
    StoreRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Backing store is not a key-value object
    #[error("Identity store {path} is malformed: {source}")]
    StoreFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Stored value is not a valid identity record
    #[error("Failed to parse stored identity: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Display projection of the current user.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    #[serde(rename = "displayName", alias = "name", default = "default_name")]
    pub display_name: String,
    #[serde(default = "default_initials")]
    pub initials: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_name() -> String {
    "User".to_string()
}

fn default_initials() -> String {
    "U".to_string()
}

fn default_role() -> String {
    "user".to_string()
}

/// Text shown in the header's user name and avatar surfaces.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderDisplay {
    pub user_name: String,
    pub avatar: String,
}

/// Read-only access to persisted key-value slots.
///
pub trait IdentityStore {
    fn read(&self, key: &str) -> Result<Option<String>, IdentityError>;
}

/// In-memory slots, mostly useful for tests and demos.
///
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }
}

impl IdentityStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, IdentityError> {
        Ok(self.slots.get(key).cloned())
    }
}

/// Slots kept as a JSON object of strings in a single file.
///
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, IdentityError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| IdentityError::StoreRead {
            path: self.path.clone(),
            source: e,
        })?;
        let slots: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|e| IdentityError::StoreFormat {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(slots.get(key).cloned())
    }
}

/// Default identity for a page, chosen by the role keyword in its path.
///
pub fn default_for_path(pathname: &str) -> IdentityRecord {
    let (display_name, initials, role) = if pathname.contains("admin") {
        ("Admin User", "A", "admin")
    } else if pathname.contains("district") {
        ("District Officer", "DO", "district_officer")
    } else if pathname.contains("auditor") {
        ("Field Auditor", "FA", "auditor")
    } else {
        ("User", "U", "user")
    };
    IdentityRecord {
        display_name: display_name.to_string(),
        initials: initials.to_string(),
        role: role.to_string(),
    }
}

/// Reads the persisted identity and projects it into header display.
///
pub struct IdentityPresenter<'a> {
    store: &'a dyn IdentityStore,
}

impl<'a> IdentityPresenter<'a> {
    pub fn new(store: &'a dyn IdentityStore) -> Self {
        IdentityPresenter { store }
    }

    /// Return the stored identity record.
    ///
    pub fn stored(&self) -> Result<IdentityRecord, IdentityError> {
        let blob = self
            .store
            .read(IDENTITY_KEY)?
            .ok_or_else(|| IdentityError::Absent(IDENTITY_KEY.to_string()))?;
        Ok(serde_json::from_str(&blob)?)
    }

    /// Return the identity to display on `pathname`.
    ///
    pub fn identity(&self, pathname: &str) -> IdentityRecord {
        match self.stored() {
            Ok(record) => record,
            Err(e @ IdentityError::Absent(_)) => {
                info!("{}; using default for {}", e, pathname);
                default_for_path(pathname)
            }
            Err(e) => {
                error!("Error reading user info: {}", e);
                default_for_path(pathname)
            }
        }
    }

    /// Project the identity for `pathname` into header display.
    ///
    pub fn present(&self, pathname: &str) -> HeaderDisplay {
        let record = self.identity(pathname);
        HeaderDisplay {
            user_name: record.display_name,
            avatar: record.initials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use std::io::Write;

    #[test]
    fn stored_record_is_projected() {
        let record: IdentityRecord = Faker.fake();
        let blob = serde_json::to_string(&record).unwrap();
        let store = MemoryStore::new().with(IDENTITY_KEY, &blob);
        let display = IdentityPresenter::new(&store).present("/admin-dashboard.html");
        assert_eq!(display.user_name, record.display_name);
        assert_eq!(display.avatar, record.initials);
    }

    #[test]
    fn login_blob_with_name_field_is_accepted() {
        let store = MemoryStore::new().with(
            IDENTITY_KEY,
            r#"{"name":"Asha Verma","initials":"AV","role":"district_officer"}"#,
        );
        let display = IdentityPresenter::new(&store).present("/admin-dashboard.html");
        assert_eq!(display.user_name, "Asha Verma");
        assert_eq!(display.avatar, "AV");
    }

    #[test]
    fn missing_fields_fall_back_to_generic_user() {
        let store = MemoryStore::new().with(IDENTITY_KEY, r#"{"role":"auditor"}"#);
        let display = IdentityPresenter::new(&store).present("/auditor-dashboard.html");
        assert_eq!(display.user_name, "User");
        assert_eq!(display.avatar, "U");
    }

    #[test]
    fn unparsable_blob_uses_path_default() {
        let store = MemoryStore::new().with(IDENTITY_KEY, "not json at all");
        let presenter = IdentityPresenter::new(&store);
        assert!(matches!(presenter.stored(), Err(IdentityError::Parse(_))));
        let display = presenter.present("/auditor-dashboard.html");
        assert_eq!(display.user_name, "Field Auditor");
        assert_eq!(display.avatar, "FA");
    }

    #[test]
    fn absent_blob_uses_path_default() {
        let store = MemoryStore::new();
        let presenter = IdentityPresenter::new(&store);
        assert!(matches!(presenter.stored(), Err(IdentityError::Absent(_))));
        let display = presenter.present("/district-dashboard.html");
        assert_eq!(display.user_name, "District Officer");
        assert_eq!(display.avatar, "DO");
    }

    #[test]
    fn path_defaults() {
        assert_eq!(default_for_path("/admin-dashboard.html").initials, "A");
        assert_eq!(default_for_path("/district/alerts.html").role, "district_officer");
        assert_eq!(default_for_path("/auditor-upload.html").display_name, "Field Auditor");
        assert_eq!(default_for_path("/alerts.html").display_name, "User");
        assert_eq!(default_for_path("/alerts.html").initials, "U");
    }

    #[test]
    fn file_store_reads_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let mut slots = HashMap::new();
        slots.insert(
            IDENTITY_KEY.to_string(),
            r#"{"displayName":"Admin User","initials":"A","role":"admin"}"#.to_string(),
        );
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{}", serde_json::to_string(&slots).unwrap()).unwrap();

        let store = FileStore::new(&path);
        let record = IdentityPresenter::new(&store).stored().unwrap();
        assert_eq!(record.display_name, "Admin User");
        assert_eq!(store.read("other").unwrap(), None);
    }

    #[test]
    fn file_store_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing.json"));
        assert_eq!(store.read(IDENTITY_KEY).unwrap(), None);
    }

    #[test]
    fn malformed_file_store_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let store = FileStore::new(&path);
        let presenter = IdentityPresenter::new(&store);
        assert!(matches!(presenter.stored(), Err(IdentityError::StoreFormat { .. })));
        assert_eq!(presenter.present("/admin-dashboard.html").user_name, "Admin User");
    }
}
