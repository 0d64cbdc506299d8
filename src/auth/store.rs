//! File-backed credential storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::credentials::CredentialSet;
use crate::{Error, Result};

/// JSON file holding a single [`CredentialSet`].
///
/// The file is human-inspectable and not encrypted. On Unix it is written
/// with mode `0600`.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored credential set.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<CredentialSet>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::CredentialStorage {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&data)
            .map(Some)
            .map_err(|source| Error::CredentialsCorrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Load the stored credential set, failing if the file is absent.
    pub fn load_required(&self) -> Result<CredentialSet> {
        self.load()?.ok_or_else(|| Error::CredentialsNotFound {
            path: self.path.clone(),
        })
    }

    /// Write `credentials` to the backing file, replacing its contents.
    pub fn save(&self, credentials: &CredentialSet) -> Result<()> {
        self.write(credentials).map_err(|source| Error::Persist {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, credentials: &CredentialSet) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(credentials).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, data)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> CredentialSet {
        CredentialSet {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            token_type: "Bearer".into(),
            expires_in: 1800,
            scope: "PlaceTrades AccountAccess".into(),
            refresh_token_expires_in: 7_776_000,
        }
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("creds.json"));
        assert!(store.load().unwrap().is_none());
        assert!(matches!(
            store.load_required(),
            Err(Error::CredentialsNotFound { .. })
        ));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("nested").join("creds.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn test_record_uses_plain_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("creds.json"));
        store.save(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let mut keys: Vec<_> = raw.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "access_token",
                "expires_in",
                "refresh_token",
                "refresh_token_expires_in",
                "scope",
                "token_type"
            ]
        );
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        std::fs::write(&path, "not json").unwrap();

        let err = CredentialStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::CredentialsCorrupt { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("creds.json"));
        store.save(&sample()).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_unwritable_location_is_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let store = CredentialStore::new(blocker.join("creds.json"));
        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, Error::Persist { .. }));
    }

    #[test]
    fn test_unreadable_location_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        std::fs::create_dir(&path).unwrap();

        let err = CredentialStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::CredentialStorage { path: ref p, .. } if *p == path));
    }

    #[test]
    fn test_session_construction_reports_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        std::fs::create_dir(&path).unwrap();

        let err = crate::auth::AuthenticatedSession::new(
            reqwest::Client::new(),
            CredentialStore::new(&path),
            "CLIENT",
            url::Url::parse("http://127.0.0.1:1/v1/oauth2/token").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::CredentialStorage { .. }));
    }
}
