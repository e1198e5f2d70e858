//! In-process document store

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, Sort, SortDirection, UpdateOutcome};
use crate::error::StoreResult;

/// Documents kept in insertion order per collection
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(collection: Collection, filter: &Filter, body: &Map<String, Value>) -> bool {
    match filter {
        Filter::All => true,
        Filter::Text(query) => query.matches(
            collection
                .text_fields()
                .iter()
                .filter_map(|field| body.get(*field).and_then(Value::as_str)),
        ),
        Filter::FieldEquals { field, value } => {
            body.get(field).and_then(Value::as_str) == Some(value.as_str())
        }
    }
}

/// Rank of a JSON type in the jsonb ordering
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Missing fields sort after every value, as SQL NULLs do
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(
        &self,
        collection: Collection,
        body: Map<String, Value>,
    ) -> StoreResult<Option<Uuid>> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(Document { id, body });
        Ok(Some(id))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> StoreResult<Vec<Document>> {
        let mut docs: Vec<Document> = self
            .collections
            .read()
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(collection, filter, &doc.body))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = sort {
            docs.sort_by(|a, b| {
                let ordering = compare_field(a.body.get(&sort.field), b.body.get(&sort.field));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        Ok(docs)
    }

    async fn find_one(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned()))
    }

    async fn set_field(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        value: Value,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.collections.write();
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
        else {
            return Ok(UpdateOutcome::default());
        };

        let modified = doc.body.get(field) != Some(&value);
        if modified {
            doc.body.insert(field.to_string(), value);
        }
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok((before - docs.len()) as u64)
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .map_or(0, |docs| docs.len() as u64))
    }
}
