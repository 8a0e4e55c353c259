use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Driver,
    Admin,
}

/// Persists the selected role across runs. Injected into `Session` so views
/// never touch storage directly.
pub trait RoleStore {
    fn load(&self) -> Result<Option<Role>, AppError>;
    fn save(&self, role: Role) -> Result<(), AppError>;
}

pub struct FileRoleStore {
    path: PathBuf,
}

impl FileRoleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RoleStore for FileRoleStore {
    fn load(&self) -> Result<Option<Role>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AppError::Internal(format!(
                    "failed to read session file: {err}"
                )));
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| AppError::Internal(format!("corrupt session file: {err}")))
    }

    fn save(&self, role: Role) -> Result<(), AppError> {
        let raw = serde_json::to_string(&role)
            .map_err(|err| AppError::Internal(format!("failed to encode role: {err}")))?;

        fs::write(&self.path, raw)
            .map_err(|err| AppError::Internal(format!("failed to write session file: {err}")))
    }
}

/// Top-level application context owning the current role. Persistence is an
/// explicit side effect of `switch_role`, never an ambient read.
pub struct Session<S: RoleStore> {
    role: Role,
    store: S,
}

impl<S: RoleStore> Session<S> {
    pub fn load_or_default(store: S) -> Result<Self, AppError> {
        let role = store.load()?.unwrap_or(Role::Customer);
        Ok(Self { role, store })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn switch_role(&mut self, role: Role) -> Result<(), AppError> {
        if role == self.role {
            return Ok(());
        }

        self.store.save(role)?;
        self.role = role;
        info!(?role, "role switched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{FileRoleStore, Role, RoleStore, Session};
    use crate::error::AppError;

    struct CountingStore {
        role: RefCell<Option<Role>>,
        saves: RefCell<usize>,
    }

    impl CountingStore {
        fn new(role: Option<Role>) -> Self {
            Self {
                role: RefCell::new(role),
                saves: RefCell::new(0),
            }
        }
    }

    impl RoleStore for CountingStore {
        fn load(&self) -> Result<Option<Role>, AppError> {
            Ok(*self.role.borrow())
        }

        fn save(&self, role: Role) -> Result<(), AppError> {
            *self.role.borrow_mut() = Some(role);
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn defaults_to_customer_when_nothing_stored() {
        let session = Session::load_or_default(CountingStore::new(None)).unwrap();
        assert_eq!(session.role(), Role::Customer);
    }

    #[test]
    fn switching_persists_exactly_once_per_change() {
        let mut session = Session::load_or_default(CountingStore::new(None)).unwrap();

        session.switch_role(Role::Driver).unwrap();
        session.switch_role(Role::Driver).unwrap();

        assert_eq!(session.role(), Role::Driver);
        assert_eq!(*session.store.saves.borrow(), 1);
    }

    #[test]
    fn file_store_round_trips_the_role() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileRoleStore::new(&path);

        assert_eq!(store.load().unwrap(), None);
        store.save(Role::Admin).unwrap();
        assert_eq!(store.load().unwrap(), Some(Role::Admin));

        let session = Session::load_or_default(FileRoleStore::new(&path)).unwrap();
        assert_eq!(session.role(), Role::Admin);
    }
}
