use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Storage;
use crate::entities::Entity;
use crate::error::Error;

/// Rows in insertion order, with an id index into them.
#[derive(Default)]
struct Table {
    rows: Vec<(Uuid, Value)>,
    index: HashMap<Uuid, usize>,
}

impl Table {
    fn get(&self, id: &Uuid) -> Option<&Value> {
        self.index.get(id).map(|&position| &self.rows[position].1)
    }

    fn upsert(&mut self, id: Uuid, data: Value) {
        match self.index.get(&id) {
            Some(&position) => self.rows[position].1 = data,
            None => {
                self.index.insert(id, self.rows.len());
                self.rows.push((id, data));
            }
        }
    }

    fn remove(&mut self, id: &Uuid) {
        if let Some(position) = self.index.remove(id) {
            self.rows.remove(position);

            for (key, _) in &self.rows[position..] {
                if let Some(shifted) = self.index.get_mut(key) {
                    *shifted -= 1;
                }
            }
        }
    }
}

/// Keeps entities in process memory, in the same serialized form the
/// database stores them. Lost on shutdown.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn get<T: Entity>(&self, id: Uuid) -> Result<Option<T>, Error> {
        let tables = self.tables.read().await;

        let maybe_data = tables
            .get(T::TABLE)
            .and_then(|table| table.get(&id))
            .cloned();

        match maybe_data {
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn filter<T: Entity>(&self, field: &'static str, value: Uuid) -> Result<Vec<T>, Error> {
        let tables = self.tables.read().await;
        let wanted = value.to_string();

        let table = match tables.get(T::TABLE) {
            Some(table) => table,
            None => return Ok(vec![]),
        };

        table
            .rows
            .iter()
            .filter(|(_, data)| data.get(field).and_then(Value::as_str) == Some(wanted.as_str()))
            .map(|(_, data)| serde_json::from_value(data.clone()).map_err(Error::from))
            .collect()
    }

    #[tracing::instrument(skip(self, entity), fields(table = T::TABLE, id = %entity.id()))]
    async fn save<T: Entity>(&self, entity: &T) -> Result<(), Error> {
        let id = entity.id();
        let data = serde_json::to_value(entity)?;

        let mut tables = self.tables.write().await;
        let table = tables.entry(T::TABLE).or_default();

        table.upsert(id, data);

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn delete<T: Entity>(&self, id: Uuid) -> Result<(), Error> {
        let mut tables = self.tables.write().await;

        if let Some(table) = tables.get_mut(T::TABLE) {
            table.remove(&id);
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn count<T: Entity>(&self) -> Result<i64, Error> {
        let tables = self.tables.read().await;

        Ok(tables.get(T::TABLE).map_or(0, |table| table.rows.len() as i64))
    }
}
