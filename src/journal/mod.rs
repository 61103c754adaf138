// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Append-only edit journal for the routine editor.
//!
//! The journal records user intents exactly in the order they happen. It never validates
//! or deduplicates; `plan::collapse_journal` folds it into a `SavePlan` at save time.

use serde::{Deserialize, Serialize};

use crate::model::{CatalogExerciseId, RoutineExerciseId, RoutineSetId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExAction {
    ExAdd {
        ex_id: RoutineExerciseId,
        exercise_id: CatalogExerciseId,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<u32>,
    },
    ExDelete {
        ex_id: RoutineExerciseId,
    },
    ExReorder {
        ex_id: RoutineExerciseId,
        order: u32,
    },
    ExUpdateMeta {
        ex_id: RoutineExerciseId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        muscle_group: Option<String>,
    },
}

impl ExAction {
    pub fn ex_id(&self) -> RoutineExerciseId {
        match self {
            Self::ExAdd { ex_id, .. }
            | Self::ExDelete { ex_id }
            | Self::ExReorder { ex_id, .. }
            | Self::ExUpdateMeta { ex_id, .. } => *ex_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExAdd { .. } => "EX_ADD",
            Self::ExDelete { .. } => "EX_DELETE",
            Self::ExReorder { .. } => "EX_REORDER",
            Self::ExUpdateMeta { .. } => "EX_UPDATE_META",
        }
    }
}

/// Set-level intents. Reps and weight stay as the raw text the user typed; numeric
/// coercion happens when the journal is collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetAction {
    SetAdd {
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        set_order: Option<u32>,
        reps: String,
        weight: String,
    },
    SetUpdate {
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reps: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<String>,
    },
    SetDelete {
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
    },
    SetReorder {
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        set_order: u32,
    },
}

impl SetAction {
    pub fn ex_id(&self) -> RoutineExerciseId {
        match self {
            Self::SetAdd { ex_id, .. }
            | Self::SetUpdate { ex_id, .. }
            | Self::SetDelete { ex_id, .. }
            | Self::SetReorder { ex_id, .. } => *ex_id,
        }
    }

    pub fn set_id(&self) -> RoutineSetId {
        match self {
            Self::SetAdd { set_id, .. }
            | Self::SetUpdate { set_id, .. }
            | Self::SetDelete { set_id, .. }
            | Self::SetReorder { set_id, .. } => *set_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetAdd { .. } => "SET_ADD",
            Self::SetUpdate { .. } => "SET_UPDATE",
            Self::SetDelete { .. } => "SET_DELETE",
            Self::SetReorder { .. } => "SET_REORDER",
        }
    }
}

/// One editing session's worth of recorded intents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditJournal {
    #[serde(default)]
    pub ex: Vec<ExAction>,
    #[serde(default)]
    pub sets: Vec<SetAction>,
}

impl EditJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ex.len() + self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ex.is_empty() && self.sets.is_empty()
    }

    pub fn record_ex_add(
        &mut self,
        ex_id: RoutineExerciseId,
        exercise_id: CatalogExerciseId,
        name: impl Into<String>,
        order: Option<u32>,
    ) {
        self.push_ex(ExAction::ExAdd {
            ex_id,
            exercise_id,
            name: name.into(),
            order,
        });
    }

    pub fn record_ex_delete(&mut self, ex_id: RoutineExerciseId) {
        self.push_ex(ExAction::ExDelete { ex_id });
    }

    pub fn record_ex_reorder(&mut self, ex_id: RoutineExerciseId, order: u32) {
        self.push_ex(ExAction::ExReorder { ex_id, order });
    }

    pub fn record_ex_update_meta(
        &mut self,
        ex_id: RoutineExerciseId,
        name: Option<String>,
        muscle_group: Option<String>,
    ) {
        self.push_ex(ExAction::ExUpdateMeta {
            ex_id,
            name,
            muscle_group,
        });
    }

    pub fn record_set_add(
        &mut self,
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        set_order: Option<u32>,
        reps: impl Into<String>,
        weight: impl Into<String>,
    ) {
        self.push_set(SetAction::SetAdd {
            ex_id,
            set_id,
            set_order,
            reps: reps.into(),
            weight: weight.into(),
        });
    }

    pub fn record_set_update(
        &mut self,
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        reps: Option<String>,
        weight: Option<String>,
    ) {
        self.push_set(SetAction::SetUpdate {
            ex_id,
            set_id,
            reps,
            weight,
        });
    }

    pub fn record_set_delete(&mut self, ex_id: RoutineExerciseId, set_id: RoutineSetId) {
        self.push_set(SetAction::SetDelete { ex_id, set_id });
    }

    pub fn record_set_reorder(
        &mut self,
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        set_order: u32,
    ) {
        self.push_set(SetAction::SetReorder {
            ex_id,
            set_id,
            set_order,
        });
    }

    fn push_ex(&mut self, action: ExAction) {
        tracing::trace!(
            kind = action.kind(),
            ex_id = %action.ex_id(),
            position = self.ex.len(),
            "journal: recorded exercise action"
        );
        self.ex.push(action);
    }

    fn push_set(&mut self, action: SetAction) {
        tracing::trace!(
            kind = action.kind(),
            ex_id = %action.ex_id(),
            set_id = %action.set_id(),
            position = self.sets.len(),
            "journal: recorded set action"
        );
        self.sets.push(action);
    }
}

/// True iff nothing was recorded, so the save round-trip can be skipped entirely.
pub fn journal_is_noop(journal: &EditJournal) -> bool {
    journal.ex.is_empty() && journal.sets.is_empty()
}
