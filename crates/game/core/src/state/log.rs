//! Append-only action history.
//!
//! Every applied action is recorded here, immutable once written. The
//! consumed-id set backs the idempotency guarantee: a transport-level retry
//! of an already-applied submission is rejected instead of replayed.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::action::{Action, ActionId};

use super::PlayerId;

/// One applied action, as recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub action_id: ActionId,
    pub player: PlayerId,
    /// Round the action was applied in.
    pub round: u32,
    /// Caller-supplied submission time; recorded for audit, never used for
    /// rules logic.
    pub submitted_at: DateTime<Utc>,
    pub action: Action,
}

/// Append-only record store plus the consumed-id index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLog {
    records: Vec<ActionRecord>,
    consumed: BTreeSet<ActionId>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_consumed(&self, id: ActionId) -> bool {
        self.consumed.contains(&id)
    }

    pub fn push(&mut self, record: ActionRecord) {
        self.consumed.insert(record.action_id);
        self.records.push(record);
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
