//! In-memory repository for user accounts.

use async_trait::async_trait;
use mockable::DefaultClock;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::user::{
    domain::{DepartmentName, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> UserRepositoryResult<RwLockReadGuard<'_, InMemoryUserState>> {
        self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> UserRepositoryResult<RwLockWriteGuard<'_, InMemoryUserState>> {
        self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn sorted_by_department_then_username(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|left, right| {
        left.department()
            .cmp(&right.department())
            .then_with(|| left.username().cmp(right.username()))
    });
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write()?;

        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }

        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write()?;

        let old_username = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .username()
            .clone();

        if *user.username() != old_username {
            if let Some(&indexed_id) = state.username_index.get(user.username())
                && indexed_id != user.id()
            {
                return Err(UserRepositoryError::DuplicateUsername(
                    user.username().clone(),
                ));
            }
            state.username_index.remove(&old_username);
            state
                .username_index
                .insert(user.username().clone(), user.id());
        }

        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        let mut state = self.write()?;
        let removed = state
            .users
            .remove(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        state.username_index.remove(removed.username());
        Ok(())
    }

    async fn delete_many(&self, ids: &[UserId]) -> UserRepositoryResult<usize> {
        let mut state = self.write()?;
        let mut removed_count = 0;
        for id in ids {
            if let Some(removed) = state.users.remove(id) {
                state.username_index.remove(removed.username());
                removed_count += 1;
            }
        }
        Ok(removed_count)
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.read()?;
        let user = state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.read()?;
        Ok(sorted_by_department_then_username(
            state.users.values().cloned().collect(),
        ))
    }

    async fn list_by_department(
        &self,
        department: &DepartmentName,
    ) -> UserRepositoryResult<Vec<User>> {
        let state = self.read()?;
        let members = state
            .users
            .values()
            .filter(|user| user.belongs_to(department))
            .cloned()
            .collect();
        Ok(sorted_by_department_then_username(members))
    }

    async fn list_departments(&self) -> UserRepositoryResult<Vec<DepartmentName>> {
        let state = self.read()?;
        let departments: BTreeSet<DepartmentName> = state
            .users
            .values()
            .filter_map(|user| user.department().cloned())
            .collect();
        Ok(departments.into_iter().collect())
    }

    async fn rename_department(
        &self,
        from: &DepartmentName,
        to: &DepartmentName,
    ) -> UserRepositoryResult<usize> {
        let mut state = self.write()?;
        let mut changed = 0;
        for user in state.users.values_mut() {
            if user.belongs_to(from) {
                user.move_to_department(Some(to.clone()), &DefaultClock);
                changed += 1;
            }
        }
        Ok(changed)
    }
}
