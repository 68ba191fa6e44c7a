use crate::kv::KvStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct DraftRecord {
    fields: HashMap<String, String>,
    saved_at: DateTime<Utc>,
}

/// Saves and restores in-progress form field values so a reload does not
/// lose the visitor's typing. Absence or corruption reads as "no draft".
#[derive(Clone)]
pub struct DraftRepo {
    store: Arc<dyn KvStore>,
}

impl DraftRepo {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn key(form_id: &str) -> String {
        format!("greenscape_{}_form", form_id)
    }

    pub fn save(&self, form_id: &str, fields: &HashMap<String, String>) {
        let record = DraftRecord {
            fields: fields.clone(),
            saved_at: Utc::now(),
        };
        match serde_json::to_string(&record) {
            Ok(raw) => self.store.set(&Self::key(form_id), &raw),
            Err(e) => debug!("Skipping draft save for {}: {}", form_id, e),
        }
    }

    pub fn load(&self, form_id: &str) -> HashMap<String, String> {
        let Some(raw) = self.store.get(&Self::key(form_id)) else {
            return HashMap::new();
        };
        match serde_json::from_str::<DraftRecord>(&raw) {
            Ok(record) => record.fields,
            Err(e) => {
                debug!("Ignoring corrupt draft for {}: {}", form_id, e);
                HashMap::new()
            }
        }
    }

    pub fn clear(&self, form_id: &str) {
        self.store.remove(&Self::key(form_id));
    }
}
