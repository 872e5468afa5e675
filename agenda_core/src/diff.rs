// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene change sets handed to rendering surfaces.

extern crate alloc;

use alloc::boxed::Box;

use crate::{Mark, MarkId};

/// One change to the retained scene.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark was created.
    Enter {
        /// Mark id.
        id: MarkId,
        /// The mark as of the flush.
        new: Box<Mark>,
    },
    /// An existing mark changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// The mark as of the flush.
        new: Box<Mark>,
    },
    /// A mark was removed.
    Exit {
        /// Mark id.
        id: MarkId,
    },
}

impl MarkDiff {
    /// Returns the id of the changed mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id } => *id,
        }
    }
}

/// Pending change kind, coalesced per mark between flushes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Change {
    Enter,
    Update,
    Exit,
}

impl Change {
    /// Folds a new change into an already pending one.
    ///
    /// Returns `None` when the two cancel out (a mark created and removed between flushes).
    pub(crate) fn merge(self, next: Self) -> Option<Self> {
        match (self, next) {
            (Self::Enter, Self::Update) => Some(Self::Enter),
            (Self::Enter, Self::Exit) => None,
            (Self::Exit, Self::Enter) => Some(Self::Update),
            (_, next) => Some(next),
        }
    }
}
