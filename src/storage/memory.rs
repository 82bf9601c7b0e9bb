//! In-memory [`Store`] used by handler tests.
//!
//! Mirrors the constraints the database enforces: unique usernames and emails,
//! and projects that must reference an existing user.

use super::{NewProject, NewUser, Profile, Store, StoreError};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) struct ProjectRecord {
    pub(crate) id: i64,
    pub(crate) project: String,
    pub(crate) user: i64,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<(i64, NewUser)>,
    projects: Vec<ProjectRecord>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
    offline: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like an unreachable database.
    pub(crate) fn offline() -> Self {
        Self {
            tables: Mutex::default(),
            offline: true,
        }
    }

    pub(crate) fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub(crate) fn user_id(&self, username: &str) -> Option<i64> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|(_, user)| user.username == username)
            .map(|(id, _)| *id)
    }

    pub(crate) fn projects(&self) -> Vec<ProjectRecord> {
        self.tables.lock().unwrap().projects.clone()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();

        if tables
            .users
            .iter()
            .any(|(_, u)| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Duplicate);
        }

        let id = i64::try_from(tables.users.len()).unwrap() + 1;
        tables.users.push((id, user.clone()));
        Ok(id)
    }

    async fn get_user(&self, id: i64) -> Result<Option<Profile>, StoreError> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();

        Ok(tables
            .users
            .iter()
            .find(|(user_id, _)| *user_id == id)
            .map(|(_, user)| Profile {
                username: user.username.clone(),
                email: user.email.clone(),
                zipcode: user.zipcode.clone(),
            }))
    }

    async fn add_project(&self, project: &NewProject) -> Result<i64, StoreError> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();

        let Some(user) = tables
            .users
            .iter()
            .find(|(_, u)| u.username == project.username)
            .map(|(id, _)| *id)
        else {
            return Err(StoreError::UserNotFound);
        };

        let id = i64::try_from(tables.projects.len()).unwrap() + 1;
        tables.projects.push(ProjectRecord {
            id,
            project: project.project.clone(),
            user,
        });
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
