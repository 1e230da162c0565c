//! Keyed storage of swap records.
//!
//! One record per unique [`SwapId`], owned exclusively by the state machine.
//! An id stays taken for the lifetime of the store, so a terminal record
//! blocks re-use of its id forever.

use crate::{record::SwapRecord, swap_id::SwapId};
use std::collections::{hash_map::Entry, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a record with this id already exists")]
pub struct AlreadyExists;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no record with this id")]
pub struct NotFound;

#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<SwapId, SwapRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, id: SwapId, record: SwapRecord) -> Result<(), AlreadyExists> {
        match self.records.entry(id) {
            Entry::Occupied(_) => Err(AlreadyExists),
            Entry::Vacant(vacant) => {
                vacant.insert(record);
                Ok(())
            }
        }
    }

    pub fn contains(&self, id: &SwapId) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &SwapId) -> Option<&SwapRecord> {
        self.records.get(id)
    }

    pub fn update<F>(&mut self, id: &SwapId, mutator: F) -> Result<(), NotFound>
    where
        F: FnOnce(&mut SwapRecord),
    {
        let record = self.records.get_mut(id).ok_or(NotFound)?;
        mutator(record);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
