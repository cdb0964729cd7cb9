use std::collections::{BTreeMap, HashMap};

use tokio::sync::{Mutex, MutexGuard};

use crate::record::Record;

/// In-memory directory of records, keyed by hostname exactly as supplied.
pub struct Store {
    records: Mutex<HashMap<String, Record>>,
}

/// Exclusive access to the records for the duration of one operation.
pub struct Entries<'a> {
    records: MutexGuard<'a, HashMap<String, Record>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Holds the store lock until the returned guard is dropped, so a
    /// lookup followed by a write can't interleave with another caller.
    pub async fn lock(&self) -> Entries<'_> {
        Entries {
            records: self.records.lock().await,
        }
    }

    pub async fn snapshot(&self) -> BTreeMap<String, Record> {
        self.records
            .lock()
            .await
            .iter()
            .map(|(hostname, record)| (hostname.clone(), record.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

impl Entries<'_> {
    pub fn get(&self, hostname: &str) -> Option<&Record> {
        self.records.get(hostname)
    }

    pub fn upsert(&mut self, record: Record) {
        self.records.insert(record.hostname.clone(), record);
    }
}
