//! In-memory account store
//!
//! Ordered `Vec<Account>` plus a monotonic id counter. Ids are never reused,
//! not even after a removal. The store does not enforce email uniqueness;
//! handlers check it while holding the write lock.

use shared::models::{Account, Administrator, Person, User};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("account {0} not found")]
    NotFound(i64),
}

/// Fields an update may overwrite; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub active: Option<bool>,
}

impl AccountChanges {
    /// Overwrite the supplied fields on `account`
    pub fn apply(&self, account: &mut Account) {
        let user = account.user_mut();
        if let Some(name) = &self.name {
            user.person.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.person.email = email.clone();
        }
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
        if let Some(active) = self.active {
            user.active = active;
        }
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    accounts: Vec<Account>,
    next_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store, first id is 1
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            next_id: 1,
        }
    }

    /// Store preloaded with two users and one administrator
    pub fn with_demo_data() -> Self {
        let mut store = Self::new();
        let seed: [Account; 3] = [
            User::new(
                Person::new(1, "João Silva", "joao@email.com"),
                "123456",
                None,
            )
            .into(),
            User::new(
                Person::new(2, "Maria Santos", "maria@email.com"),
                "senha123",
                None,
            )
            .into(),
            Administrator::new(
                Person::new(3, "Admin Master", "admin@email.com"),
                "admin123",
                Some(3),
            )
            .into(),
        ];
        for account in seed {
            store.insert(account);
        }
        store
    }

    /// All accounts in insertion order
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    pub fn find_by_role(&self, role: &str) -> Vec<&Account> {
        self.accounts.iter().filter(|a| a.role() == role).collect()
    }

    /// First account with exactly this email (case-sensitive)
    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.person().email == email)
    }

    /// Id the next inserted account should carry
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// Append an account and advance the counter past its id
    pub fn insert(&mut self, account: Account) -> &Account {
        self.next_id = self.next_id.max(account.id() + 1);
        self.accounts.push(account);
        &self.accounts[self.accounts.len() - 1]
    }

    pub fn update_fields(&mut self, id: i64, changes: &AccountChanges) -> Result<&Account, StoreError> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        changes.apply(account);
        Ok(&*account)
    }

    pub fn remove(&mut self, id: i64) -> Result<Account, StoreError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.accounts.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AccountKind, Profile};

    fn user(id: i64, name: &str, email: &str) -> Account {
        User::new(Person::new(id, name, email), "pw", None).into()
    }

    #[test]
    fn test_demo_data() {
        let store = MemoryStore::with_demo_data();
        assert_eq!(store.len(), 3);
        assert_eq!(store.next_id(), 4);
        assert_eq!(store.list()[2].kind(), AccountKind::Administrator);
        assert_eq!(store.find_by_id(2).unwrap().person().name, "Maria Santos");
    }

    #[test]
    fn test_insert_keeps_order_and_advances_counter() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);

        store.insert(user(store.next_id(), "Ana", "ana@x.com"));
        store.insert(user(store.next_id(), "Bia", "bia@x.com"));

        let names: Vec<_> = store.list().iter().map(|a| a.person().name.as_str()).collect();
        assert_eq!(names, ["Ana", "Bia"]);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_ids_are_not_reused_after_remove() {
        let mut store = MemoryStore::new();
        store.insert(user(store.next_id(), "Ana", "ana@x.com"));
        store.insert(user(store.next_id(), "Bia", "bia@x.com"));

        let removed = store.remove(2).unwrap();
        assert_eq!(removed.person().name, "Bia");
        assert_eq!(store.next_id(), 3);
        assert!(store.find_by_id(2).is_none());
        assert_eq!(store.remove(2), Err(StoreError::NotFound(2)));
    }

    #[test]
    fn test_find_by_role_and_email() {
        let store = MemoryStore::with_demo_data();
        assert_eq!(store.find_by_role("common").len(), 2);
        assert_eq!(store.find_by_role("admin").len(), 1);
        assert!(store.find_by_role("Admin").is_empty());

        assert_eq!(store.find_by_email("admin@email.com").unwrap().id(), 3);
        assert!(store.find_by_email("ADMIN@email.com").is_none());
    }

    #[test]
    fn test_update_fields_only_touches_supplied_fields() {
        let mut store = MemoryStore::with_demo_data();
        let before = store.find_by_id(1).unwrap().clone();

        let changes = AccountChanges {
            name: Some("João S.".into()),
            active: Some(false),
            ..Default::default()
        };
        let updated = store.update_fields(1, &changes).unwrap();

        assert_eq!(updated.person().name, "João S.");
        assert!(!updated.user().active);
        assert_eq!(updated.person().email, before.person().email);
        assert_eq!(updated.user().password, before.user().password);
        assert_eq!(updated.person().created_at, before.person().created_at);
        assert!(updated.describe().ends_with("Active: false"));
    }

    #[test]
    fn test_update_missing_account() {
        let mut store = MemoryStore::new();
        let err = store
            .update_fields(99, &AccountChanges::default())
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(99));
    }

    #[test]
    fn test_changes_keep_administrator_variant() {
        let mut store = MemoryStore::with_demo_data();
        let changes = AccountChanges {
            password: Some("new-secret".into()),
            ..Default::default()
        };
        let updated = store.update_fields(3, &changes).unwrap();
        assert_eq!(updated.kind(), AccountKind::Administrator);
        assert!(updated.authenticate("new-secret"));
        assert!(!updated.authenticate("admin123"));
    }
}
