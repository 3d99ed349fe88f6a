//! In-process store used when no database is configured, and by tests.
//!
//! One mutex guards every table, so each port call is atomic: a house write
//! that names a missing engineer or architect changes nothing. Deleting a
//! linked professional is refused the way the `ON DELETE RESTRICT` foreign
//! keys refuse it in PostgreSQL.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    HouseRepository, HouseRepositoryError, ProfessionalRepository, ProfessionalRepositoryError,
    UserAccountRepository, UserAccountRepositoryError,
};
use crate::domain::{
    ArchitectKind, EngineerKind, House, HouseDraft, HouseId, Login, Professional, ProfessionalId,
    ProfessionalKind, ProfessionalName, ProfessionalRef, UserAccount,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    houses: BTreeMap<i64, House>,
    /// Professional tables keyed by kind label.
    professionals: HashMap<&'static str, BTreeMap<i64, ProfessionalName>>,
    accounts: HashMap<String, UserAccount>,
}

impl Tables {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn table<K: ProfessionalKind>(&mut self) -> &mut BTreeMap<i64, ProfessionalName> {
        self.professionals.entry(K::LABEL).or_default()
    }

    fn contains<K: ProfessionalKind>(&self, id: i64) -> bool {
        self.professionals
            .get(K::LABEL)
            .is_some_and(|table| table.contains_key(&id))
    }

    fn check_links(
        &self,
        engineer: Option<i64>,
        architect: Option<i64>,
    ) -> Result<(), HouseRepositoryError> {
        if let Some(id) = engineer.filter(|id| !self.contains::<EngineerKind>(*id)) {
            return Err(HouseRepositoryError::missing_engineer(id));
        }
        if let Some(id) = architect.filter(|id| !self.contains::<ArchitectKind>(*id)) {
            return Err(HouseRepositoryError::missing_architect(id));
        }
        Ok(())
    }

    fn is_referenced(&self, reference: ProfessionalRef) -> bool {
        self.houses.values().any(|house| house.references(reference))
    }
}

/// Shared in-memory implementation of every repository port.
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "memory store lock poisoned".to_owned())
    }
}

fn professional<K: ProfessionalKind>(
    raw_id: i64,
    name: &ProfessionalName,
) -> Result<Professional<K>, ProfessionalRepositoryError> {
    let id = ProfessionalId::new(raw_id)
        .map_err(|err| ProfessionalRepositoryError::query(err.to_string()))?;
    Ok(Professional::new(id, name.clone()))
}

#[async_trait]
impl HouseRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<House>, HouseRepositoryError> {
        let tables = self.lock().map_err(HouseRepositoryError::query)?;
        Ok(tables.houses.values().cloned().collect())
    }

    async fn find_by_id(&self, id: HouseId) -> Result<Option<House>, HouseRepositoryError> {
        let tables = self.lock().map_err(HouseRepositoryError::query)?;
        Ok(tables.houses.get(&id.get()).cloned())
    }

    async fn find_by_project_name(
        &self,
        project_name: &str,
    ) -> Result<Vec<House>, HouseRepositoryError> {
        let tables = self.lock().map_err(HouseRepositoryError::query)?;
        Ok(tables
            .houses
            .values()
            .filter(|house| house.project_name().as_str() == project_name)
            .cloned()
            .collect())
    }

    async fn find_by_professional(
        &self,
        reference: ProfessionalRef,
    ) -> Result<Vec<House>, HouseRepositoryError> {
        let tables = self.lock().map_err(HouseRepositoryError::query)?;
        Ok(tables
            .houses
            .values()
            .filter(|house| house.references(reference))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &HouseDraft) -> Result<House, HouseRepositoryError> {
        let mut tables = self.lock().map_err(HouseRepositoryError::query)?;
        tables.check_links(
            draft.engineer.map(ProfessionalId::get),
            draft.architect.map(ProfessionalId::get),
        )?;
        let raw = tables.allocate();
        let id = HouseId::new(raw).map_err(|err| HouseRepositoryError::query(err.to_string()))?;
        let house = House::new(id, draft.clone());
        tables.houses.insert(raw, house.clone());
        Ok(house)
    }

    async fn replace(&self, house: &House) -> Result<bool, HouseRepositoryError> {
        let mut tables = self.lock().map_err(HouseRepositoryError::query)?;
        tables.check_links(
            house.engineer().map(ProfessionalId::get),
            house.architect().map(ProfessionalId::get),
        )?;
        match tables.houses.get_mut(&house.id().get()) {
            Some(stored) => {
                *stored = house.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: HouseId) -> Result<bool, HouseRepositoryError> {
        let mut tables = self.lock().map_err(HouseRepositoryError::query)?;
        Ok(tables.houses.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl<K: ProfessionalKind> ProfessionalRepository<K> for MemoryStore {
    async fn list(&self) -> Result<Vec<Professional<K>>, ProfessionalRepositoryError> {
        let mut tables = self.lock().map_err(ProfessionalRepositoryError::query)?;
        tables
            .table::<K>()
            .iter()
            .map(|(id, name)| professional(*id, name))
            .collect()
    }

    async fn find_by_id(
        &self,
        id: ProfessionalId<K>,
    ) -> Result<Option<Professional<K>>, ProfessionalRepositoryError> {
        let mut tables = self.lock().map_err(ProfessionalRepositoryError::query)?;
        tables
            .table::<K>()
            .get(&id.get())
            .map(|name| professional(id.get(), name))
            .transpose()
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<Professional<K>>, ProfessionalRepositoryError> {
        let mut tables = self.lock().map_err(ProfessionalRepositoryError::query)?;
        tables
            .table::<K>()
            .iter()
            .filter(|(_, stored)| stored.as_str() == name)
            .map(|(id, stored)| professional(*id, stored))
            .collect()
    }

    async fn create(
        &self,
        name: &ProfessionalName,
    ) -> Result<Professional<K>, ProfessionalRepositoryError> {
        let mut tables = self.lock().map_err(ProfessionalRepositoryError::query)?;
        let raw = tables.allocate();
        tables.table::<K>().insert(raw, name.clone());
        professional(raw, name)
    }

    async fn update(
        &self,
        professional: &Professional<K>,
    ) -> Result<bool, ProfessionalRepositoryError> {
        let mut tables = self.lock().map_err(ProfessionalRepositoryError::query)?;
        match tables.table::<K>().get_mut(&professional.id().get()) {
            Some(stored) => {
                *stored = professional.name().clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProfessionalId<K>) -> Result<bool, ProfessionalRepositoryError> {
        let mut tables = self.lock().map_err(ProfessionalRepositoryError::query)?;
        if tables.is_referenced(K::reference(id)) {
            return Err(ProfessionalRepositoryError::still_referenced(id.get()));
        }
        Ok(tables.table::<K>().remove(&id.get()).is_some())
    }
}

#[async_trait]
impl UserAccountRepository for MemoryStore {
    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let tables = self.lock().map_err(UserAccountRepositoryError::query)?;
        Ok(tables.accounts.get(login.as_str()).cloned())
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut tables = self.lock().map_err(UserAccountRepositoryError::query)?;
        let key = account.login.as_str().to_owned();
        if tables.accounts.contains_key(&key) {
            return Err(UserAccountRepositoryError::duplicate_login(key));
        }
        tables.accounts.insert(key, account.clone());
        Ok(())
    }
}
