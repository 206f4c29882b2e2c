//! Per-parameter slow-weight storage.
//!
//! Slow weights live in a dense arena; each [`ParamId`] is assigned a slot the
//! first time it is seen and keeps it for the lifetime of the table.

use crate::param::ParamId;
use scirs2_core::ndarray::Array2;
use std::collections::HashMap;

/// Arena of slow-weight tensors indexed by parameter identity.
#[derive(Debug, Default, Clone)]
pub struct SlowStateTable {
    slots: Vec<Array2<f64>>,
    index: HashMap<ParamId, usize>,
}

impl SlowStateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` as the slow weight of `id`, overwriting any previous entry.
    pub fn insert(&mut self, id: ParamId, value: Array2<f64>) -> &mut Array2<f64> {
        let slot = match self.slot(id) {
            Some(slot) => {
                self.slots[slot] = value;
                slot
            }
            None => self.push(id, value),
        };
        &mut self.slots[slot]
    }

    /// Slow weight of `id`, created from `init` if the parameter is new.
    pub fn get_or_insert_with<F>(&mut self, id: ParamId, init: F) -> &mut Array2<f64>
    where
        F: FnOnce() -> Array2<f64>,
    {
        let slot = match self.slot(id) {
            Some(slot) => slot,
            None => self.push(id, init()),
        };
        &mut self.slots[slot]
    }

    fn push(&mut self, id: ParamId, value: Array2<f64>) -> usize {
        let slot = self.slots.len();
        self.slots.push(value);
        self.index.insert(id, slot);
        slot
    }

    /// Slot assigned to `id`, if any.
    pub fn slot(&self, id: ParamId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Whether `id` already has a slow weight.
    pub fn contains(&self, id: ParamId) -> bool {
        self.index.contains_key(&id)
    }

    /// Slow weight of `id`.
    pub fn get(&self, id: ParamId) -> Option<&Array2<f64>> {
        self.slot(id).map(|slot| &self.slots[slot])
    }

    /// Mutable slow weight of `id`.
    pub fn get_mut(&mut self, id: ParamId) -> Option<&mut Array2<f64>> {
        let slot = self.slot(id)?;
        Some(&mut self.slots[slot])
    }

    /// Number of tracked parameters.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no parameter is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over `(id, slow weight)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, &Array2<f64>)> + '_ {
        let mut ids: Vec<(usize, ParamId)> =
            self.index.iter().map(|(&id, &slot)| (slot, id)).collect();
        ids.sort_unstable();
        ids.into_iter().map(move |(slot, id)| (id, &self.slots[slot]))
    }
}
