// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row selections over a member dataset.

extern crate alloc;

use alloc::rc::Rc;

use hashbrown::HashMap;

use crate::record::{Member, PartyId};

/// An ordered set of dataset rows: every member, or the members of one party.
///
/// Cloning is cheap; clones share their row list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    party: Option<PartyId>,
    rows: Rc<[usize]>,
}

impl Selection {
    /// Every row of a dataset with `len` records.
    pub fn all(len: usize) -> Self {
        Self {
            party: None,
            rows: (0..len).collect(),
        }
    }

    /// The rows of `data` that belong to `party`, in dataset order.
    pub fn party(party: PartyId, data: &[Member]) -> Self {
        Self {
            party: Some(party),
            rows: data
                .iter()
                .enumerate()
                .filter(|(_, m)| m.party_id == Some(party))
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// The party this selection was built for, or `None` for "all".
    pub fn party_id(&self) -> Option<PartyId> {
        self.party
    }

    /// Selected rows, in dataset order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The party of the first selected record.
    pub fn first_party(&self, data: &[Member]) -> Option<PartyId> {
        self.rows
            .first()
            .and_then(|&row| data.get(row))
            .and_then(|m| m.party_id)
    }
}

/// A party given either by id or by one of its selections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartyRef<'a> {
    /// A party id.
    Id(PartyId),
    /// A selection; stands for the party of its first record.
    Selection(&'a Selection),
}

impl PartyRef<'_> {
    /// Resolves to a party id. An empty selection resolves to nothing.
    pub fn resolve(self, data: &[Member]) -> Option<PartyId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Selection(selection) => selection.first_party(data),
        }
    }
}

impl From<PartyId> for PartyRef<'_> {
    fn from(id: PartyId) -> Self {
        Self::Id(id)
    }
}

impl From<i64> for PartyRef<'_> {
    fn from(id: i64) -> Self {
        Self::Id(PartyId(id))
    }
}

impl<'a> From<&'a Selection> for PartyRef<'a> {
    fn from(selection: &'a Selection) -> Self {
        Self::Selection(selection)
    }
}

/// Selections of one rendered dataset: "all", a lazy per-party cache, and the current one.
#[derive(Clone, Debug)]
pub(crate) struct SelectionCache {
    all: Selection,
    parties: HashMap<PartyId, Selection>,
    current: Option<Selection>,
}

impl SelectionCache {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            all: Selection::all(len),
            parties: HashMap::new(),
            current: None,
        }
    }

    pub(crate) fn all(&self) -> &Selection {
        &self.all
    }

    pub(crate) fn party(&mut self, id: PartyId, data: &[Member]) -> &Selection {
        self.parties
            .entry(id)
            .or_insert_with(|| Selection::party(id, data))
    }

    pub(crate) fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub(crate) fn set_current(&mut self, selection: Selection) {
        self.current = Some(selection);
    }

    #[cfg(test)]
    pub(crate) fn cached_parties(&self) -> alloc::vec::Vec<PartyId> {
        let mut ids: alloc::vec::Vec<_> = self.parties.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
