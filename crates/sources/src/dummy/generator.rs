//! Record generator for the dummy source

use ripple_protocol::Record;
use serde_json::Value;

/// Cycles through a record list, optionally stamping a counter
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    records: Vec<Record>,
    index: usize,
    auto_increment_key: Option<String>,
    next_value: u64,
}

impl RecordGenerator {
    /// Create a generator over `records`
    pub fn new(records: Vec<Record>, auto_increment_key: Option<String>) -> Self {
        Self {
            records,
            index: 0,
            auto_increment_key,
            next_value: 0,
        }
    }

    /// Next record; an empty list yields empty records
    pub fn generate(&mut self) -> Record {
        if self.index >= self.records.len() {
            self.index = 0;
        }
        let mut record = self.records.get(self.index).cloned().unwrap_or_default();
        self.index += 1;

        if let Some(key) = &self.auto_increment_key {
            record.insert(key.clone(), Value::from(self.next_value));
            self.next_value += 1;
        }
        record
    }

    /// Value the next auto-incremented record will carry
    pub fn next_value(&self) -> u64 {
        self.next_value
    }
}
