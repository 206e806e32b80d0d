//! In-memory repository.
//!
//! Records live in a `Vec` behind an `RwLock`. Lookups are linear scans; the collections are
//! small mock data sets.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Record, Repository};
use crate::{ClinicError, ClinicResult};

#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Builds a repository from initial records.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::DuplicateId` if two records share an id.
    pub fn from_items(items: Vec<T>) -> ClinicResult<Self> {
        check_unique(&items)?;
        Ok(Self {
            items: RwLock::new(items),
        })
    }

    fn read(&self) -> ClinicResult<RwLockReadGuard<'_, Vec<T>>> {
        self.items
            .read()
            .map_err(|_| ClinicError::LockPoisoned(T::KIND))
    }

    fn write(&self) -> ClinicResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.items
            .write()
            .map_err(|_| ClinicError::LockPoisoned(T::KIND))
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique<T: Record>(items: &[T]) -> ClinicResult<()> {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(ClinicError::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
    }
    Ok(())
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> ClinicResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &str) -> ClinicResult<Option<T>> {
        Ok(self.read()?.iter().find(|item| item.id() == id).cloned())
    }

    fn insert(&self, item: T) -> ClinicResult<()> {
        let mut items = self.write()?;
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(ClinicError::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
        items.push(item);
        Ok(())
    }

    fn update(&self, item: T) -> ClinicResult<()> {
        let mut items = self.write()?;
        let slot = items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| ClinicError::NotFound {
                kind: T::KIND,
                id: item.id().to_string(),
            })?;
        *slot = item;
        Ok(())
    }

    fn modify(&self, id: &str, change: &mut dyn FnMut(&mut T)) -> ClinicResult<T> {
        let mut items = self.write()?;
        let slot = items
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| ClinicError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        change(slot);
        Ok(slot.clone())
    }

    fn modify_or_insert(&self, seed: T, change: &mut dyn FnMut(&mut T)) -> ClinicResult<T> {
        let mut items = self.write()?;
        let index = match items.iter().position(|existing| existing.id() == seed.id()) {
            Some(index) => index,
            None => {
                items.push(seed);
                items.len() - 1
            }
        };
        let slot = &mut items[index];
        change(slot);
        Ok(slot.clone())
    }

    fn replace_all(&self, items: Vec<T>) -> ClinicResult<()> {
        check_unique(&items)?;
        *self.write()? = items;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::directory::{ContactDetails, Staff, StaffStatus};

    fn staff(id: &str, name: &str) -> Staff {
        Staff {
            id: id.into(),
            name: name.into(),
            role: "Nurse".into(),
            department: "Outpatients".into(),
            contact: ContactDetails::default(),
            status: StaffStatus::Active,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let repo = InMemoryRepository::new();
        repo.insert(staff("S1", "Ana")).unwrap();
        repo.insert(staff("S2", "Ben")).unwrap();

        assert_eq!(repo.get("S2").unwrap().unwrap().name, "Ben");
        assert!(repo.get("S9").unwrap().is_none());
        let names: Vec<String> = repo.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Ana", "Ben"]);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let repo = InMemoryRepository::new();
        repo.insert(staff("S1", "Ana")).unwrap();
        let err = repo.insert(staff("S1", "Other")).unwrap_err();
        assert!(matches!(err, ClinicError::DuplicateId { kind: "staff member", .. }));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_update_replaces_by_id() {
        let repo = InMemoryRepository::from_items(vec![staff("S1", "Ana")]).unwrap();
        repo.update(staff("S1", "Ana Maria")).unwrap();
        assert_eq!(repo.get("S1").unwrap().unwrap().name, "Ana Maria");

        let err = repo.update(staff("S2", "Nobody")).unwrap_err();
        assert!(matches!(err, ClinicError::NotFound { .. }));
    }

    #[test]
    fn test_modify_changes_in_place() {
        let repo = InMemoryRepository::from_items(vec![staff("S1", "Ana")]).unwrap();
        let changed = repo.modify("S1", &mut |s| s.name.push_str(" Maria")).unwrap();
        assert_eq!(changed.name, "Ana Maria");
        assert_eq!(repo.get("S1").unwrap().unwrap().name, "Ana Maria");

        let err = repo.modify("S2", &mut |s| s.name.clear()).unwrap_err();
        assert!(matches!(err, ClinicError::NotFound { .. }));
    }

    #[test]
    fn test_modify_or_insert_seeds_missing_records_once() {
        let repo = InMemoryRepository::new();
        repo.modify_or_insert(staff("S1", "Ana"), &mut |s| s.department = "Triage".into())
            .unwrap();
        repo.modify_or_insert(staff("S1", "Ignored"), &mut |s| s.role = "Lead".into())
            .unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ana");
        assert_eq!(all[0].department, "Triage");
        assert_eq!(all[0].role, "Lead");
    }

    #[test]
    fn test_from_items_and_replace_all_reject_duplicates() {
        assert!(InMemoryRepository::from_items(vec![staff("S1", "A"), staff("S1", "B")]).is_err());

        let repo = InMemoryRepository::from_items(vec![staff("S1", "A")]).unwrap();
        assert!(repo
            .replace_all(vec![staff("S2", "B"), staff("S2", "C")])
            .is_err());
        assert_eq!(repo.get("S1").unwrap().unwrap().name, "A");

        repo.replace_all(vec![staff("S3", "C")]).unwrap();
        assert!(repo.get("S1").unwrap().is_none());
    }
}
