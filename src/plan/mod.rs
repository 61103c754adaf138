// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Save plans: the minimal set of backend operations that reaches the edited state.
//!
//! Two producers feed the same plan shape: `collapse_journal` (append-only journal) and
//! `editor::build_save_plan` (live editor tree). `runner::run_save_plan` executes either.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{CatalogExerciseId, RoutineExerciseId, RoutineSetId};

mod collapse;
pub mod numeric;

pub use collapse::collapse_journal;
pub use numeric::{normalize_weight, parse_reps, parse_weight};

/// New values for an existing set. Only fields the user actually edited are present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetValuesUpdate {
    pub id: RoutineSetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOrderUpdate {
    pub id: RoutineSetId,
    pub set_order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseOrderUpdate {
    pub id: RoutineExerciseId,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCreate {
    /// Client temp id; the runner maps it to the id the backend assigns.
    pub temp_ex_id: RoutineExerciseId,
    pub exercise_id: CatalogExerciseId,
    pub order: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetCreate {
    pub set_id: RoutineSetId,
    pub reps: u32,
    pub weight: f64,
    pub set_order: u32,
}

impl SetCreate {
    /// Rows with neither reps nor weight are never persisted.
    pub fn is_empty(&self) -> bool {
        self.reps == 0 && self.weight <= 0.0
    }
}

/// Invariants: delete lists hold persisted ids only; no id appears both in a delete list
/// and in a create/update list; buckets in `create_sets_by_exercise` are keyed by the
/// owning exercise id, temp or persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavePlan {
    pub delete_exercises: Vec<RoutineExerciseId>,
    pub delete_sets: Vec<RoutineSetId>,
    pub update_sets: Vec<SetValuesUpdate>,
    pub order_sets: Vec<SetOrderUpdate>,
    pub order_exercises: Vec<ExerciseOrderUpdate>,
    pub create_exercises: Vec<ExerciseCreate>,
    pub create_sets_by_exercise: IndexMap<RoutineExerciseId, Vec<SetCreate>>,
}

impl SavePlan {
    pub fn is_empty(&self) -> bool {
        self.delete_exercises.is_empty()
            && self.delete_sets.is_empty()
            && self.update_sets.is_empty()
            && self.order_sets.is_empty()
            && self.order_exercises.is_empty()
            && self.create_exercises.is_empty()
            && self.create_sets_by_exercise.values().all(Vec::is_empty)
    }

    /// Total number of rows the plan touches (set buckets count per row).
    pub fn operation_count(&self) -> usize {
        self.delete_exercises.len()
            + self.delete_sets.len()
            + self.update_sets.len()
            + self.order_sets.len()
            + self.order_exercises.len()
            + self.create_exercises.len()
            + self.create_sets_by_exercise.values().map(Vec::len).sum::<usize>()
    }

    pub(crate) fn push_created_set(&mut self, ex_id: RoutineExerciseId, row: SetCreate) {
        self.create_sets_by_exercise.entry(ex_id).or_default().push(row);
    }
}
