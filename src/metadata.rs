//! Port metadata: the key/value table negotiated before streaming starts.
//!
//! Metadata (declared frame rate, frame dimensions, ...) is written by the
//! node during setup and consumed by the host before the first frame
//! transfer. The table is *sealed* when the run leaves Setup; any write
//! after that point is a contract violation and fails with
//! [`Error::MetadataSealed`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A single negotiated metadata value: a scalar or a fixed-size array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Int(i64),
    Float(f64),
    Str(String),
    IntList(Vec<i64>),
    /// Two-dimensional extent, e.g. frame width and height in pixels.
    Size { width: u32, height: u32 },
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<i32> for MetadataValue {
    fn from(v: i32) -> Self {
        MetadataValue::Int(v as i64)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Str(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::Str(v)
    }
}

impl From<Vec<i64>> for MetadataValue {
    fn from(v: Vec<i64>) -> Self {
        MetadataValue::IntList(v)
    }
}

/// Key/value table attached to one port.
///
/// Shared between the node-side port and the host-side handle, so the
/// host can read negotiated values before streaming begins.
#[derive(Debug)]
pub struct MetadataTable {
    port: String,
    values: Mutex<BTreeMap<String, MetadataValue>>,
    sealed: AtomicBool,
}

impl MetadataTable {
    pub(crate) fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            values: Mutex::new(BTreeMap::new()),
            sealed: AtomicBool::new(false),
        }
    }

    /// Insert a value. Fails once the table is sealed.
    pub(crate) fn insert(&self, key: &str, value: MetadataValue) -> Result<()> {
        if self.is_sealed() {
            return Err(Error::MetadataSealed {
                port: self.port.clone(),
                key: key.to_string(),
            });
        }
        self.values
            .lock()
            .expect("metadata table lock poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }

    /// Freeze the table. Called when the run leaves Setup; irreversible.
    pub(crate) fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    /// Whether streaming has started and the table is frozen.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Look up a single value.
    pub fn get(&self, key: &str) -> Option<MetadataValue> {
        self.values
            .lock()
            .expect("metadata table lock poisoned")
            .get(key)
            .cloned()
    }

    /// Snapshot of the whole table, e.g. for host-side persistence.
    pub fn snapshot(&self) -> BTreeMap<String, MetadataValue> {
        self.values
            .lock()
            .expect("metadata table lock poisoned")
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let table = MetadataTable::new("video-out");
        table.insert("framerate", MetadataValue::Int(200)).unwrap();
        assert_eq!(table.get("framerate"), Some(MetadataValue::Int(200)));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn test_insert_after_seal_fails() {
        let table = MetadataTable::new("video-out");
        table.insert("framerate", MetadataValue::Int(200)).unwrap();
        table.seal();

        let err = table
            .insert("framerate", MetadataValue::Int(100))
            .unwrap_err();
        assert!(matches!(err, Error::MetadataSealed { .. }));
        // The sealed value is unchanged.
        assert_eq!(table.get("framerate"), Some(MetadataValue::Int(200)));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let table = MetadataTable::new("out");
        table.insert("a", MetadataValue::Int(1)).unwrap();
        let snap = table.snapshot();
        table.insert("b", MetadataValue::Int(2)).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(table.snapshot().len(), 2);
    }

    #[test]
    fn test_value_serde_round_trip() {
        let value = MetadataValue::Size {
            width: 800,
            height: 600,
        };
        let encoded = toml::to_string(&value).unwrap();
        let decoded: MetadataValue = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
