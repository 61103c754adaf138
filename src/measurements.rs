// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Append-only journal for body-measurement edits.
//!
//! Values are kept as typed; the last update per date and key wins on collapse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasurementAction {
    Update {
        date: String,
        key: String,
        value: String,
    },
}

/// Date, then measurement key, to the latest value. Both levels keep first-seen order.
pub type MeasurementValues = IndexMap<String, IndexMap<String, String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementJournal {
    actions: Vec<MeasurementAction>,
}

impl MeasurementJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_update(
        &mut self,
        date: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let action = MeasurementAction::Update {
            date: date.into(),
            key: key.into(),
            value: value.into(),
        };
        tracing::trace!(position = self.actions.len(), "measurements: recorded update");
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[MeasurementAction] {
        &self.actions
    }

    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn collapse(&self) -> MeasurementValues {
        let mut by_date = MeasurementValues::new();
        for MeasurementAction::Update { date, key, value } in &self.actions {
            by_date
                .entry(date.clone())
                .or_default()
                .insert(key.clone(), value.clone());
        }
        by_date
    }
}
