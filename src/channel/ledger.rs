use std::collections::{hash_map::Entry, HashMap};

use super::{ChannelError, ChannelKey, ChannelRecord};

/// Authoritative map from channel identity to channel state.
///
/// Records are never removed: a closed channel stays queryable and its
/// identity can not be reused.
#[derive(Debug, Default, Clone)]
pub struct ChannelLedger {
    channels: HashMap<ChannelKey, ChannelRecord>,
}

impl ChannelLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ChannelKey) -> Option<&ChannelRecord> {
        self.channels.get(key)
    }

    pub fn contains(&self, key: &ChannelKey) -> bool {
        self.channels.contains_key(key)
    }

    /// Insert a fresh record, failing if the identity was ever used.
    pub(super) fn insert_new(
        &mut self,
        key: ChannelKey,
        record: ChannelRecord,
    ) -> Result<(), ChannelError> {
        match self.channels.entry(key) {
            Entry::Occupied(_) => Err(ChannelError::ChannelExists),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    /// Look up a record that must exist and still be open.
    pub(super) fn open_record(&self, key: &ChannelKey) -> Result<&ChannelRecord, ChannelError> {
        let record = self.get(key).ok_or(ChannelError::ChannelNotFound)?;
        if record.is_open {
            Ok(record)
        } else {
            Err(ChannelError::ChannelClosed)
        }
    }

    /// Replace an existing record. The engine only calls this after all
    /// checks and transfers of an operation succeeded.
    pub(super) fn commit(&mut self, key: ChannelKey, record: ChannelRecord) {
        debug_assert!(record.is_conserved());
        self.channels.insert(key, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChannelKey, &ChannelRecord)> {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
