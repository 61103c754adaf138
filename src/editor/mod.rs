// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Live editor tree for a routine.
//!
//! Screens that want optimistic state mutate an `EditorRoutine` directly instead of
//! recording a journal. Each node carries `EditFlags`; `build_save_plan` turns the flagged
//! tree into the same `SavePlan` the journal collapser produces.

use std::fmt;

use indexmap::IndexMap;

use crate::model::{
    CatalogExerciseId, RoutineExerciseId, RoutineRow, RoutineSetId, RoutineSnapshot,
    TempIdAllocator,
};
use crate::runner::{ExIdMap, ExerciseRef};

mod diff;
mod mutations;

pub use diff::build_save_plan;
pub use mutations::{ExerciseMeta, SetFieldUpdate};

/// Local edit state of a node. Never sent to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditFlags {
    /// The node exists only locally (temp id).
    pub created: bool,
    pub deleted: bool,
    /// A persisted node whose values or position changed.
    pub dirty: bool,
}

impl EditFlags {
    pub(crate) const CREATED: Self = Self {
        created: true,
        deleted: false,
        dirty: false,
    };

    /// Created and removed again before any save: nothing to send.
    pub fn is_discarded(self) -> bool {
        self.created && self.deleted
    }

    pub fn is_pending(self) -> bool {
        !self.is_discarded() && (self.created || self.deleted || self.dirty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetNode {
    pub id: RoutineSetId,
    pub routine_exercise_id: RoutineExerciseId,
    pub exercise_id: CatalogExerciseId,
    pub set_order: u32,
    pub planned_reps: u32,
    pub planned_weight_kg: f64,
    pub notes: Option<String>,
    pub flags: EditFlags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseNode {
    pub id: RoutineExerciseId,
    pub exercise_id: CatalogExerciseId,
    pub exercise_order: u32,
    pub exercise_name: Option<String>,
    pub muscle_group: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub flags: EditFlags,
    sets: IndexMap<RoutineSetId, SetNode>,
    set_order: Vec<RoutineSetId>,
}

impl ExerciseNode {
    /// Visible sets in render order.
    pub fn visible_sets(&self) -> impl Iterator<Item = &SetNode> + '_ {
        self.set_order.iter().filter_map(|id| self.sets.get(id))
    }

    /// Every set ever attached to this exercise, removed ones included.
    pub fn all_sets(&self) -> impl Iterator<Item = &SetNode> + '_ {
        self.sets.values()
    }

    pub fn set(&self, id: RoutineSetId) -> Option<&SetNode> {
        self.sets.get(&id)
    }

    pub fn set_order(&self) -> &[RoutineSetId] {
        &self.set_order
    }

    fn has_pending_edits(&self) -> bool {
        self.flags.is_pending()
            || (!self.flags.is_discarded() && self.sets.values().any(|set| set.flags.is_pending()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    ExerciseNotFound {
        ex_id: RoutineExerciseId,
    },
    SetNotFound {
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
    },
    ExerciseDeleted {
        ex_id: RoutineExerciseId,
    },
    SetDeleted {
        set_id: RoutineSetId,
    },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExerciseNotFound { ex_id } => write!(f, "exercise not found: {ex_id}"),
            Self::SetNotFound { ex_id, set_id } => {
                write!(f, "set {set_id} not found under exercise {ex_id}")
            }
            Self::ExerciseDeleted { ex_id } => write!(f, "exercise was removed: {ex_id}"),
            Self::SetDeleted { set_id } => write!(f, "set was removed: {set_id}"),
        }
    }
}

impl std::error::Error for EditorError {}

/// A routine plus all of its exercises and sets, with local edit flags.
///
/// Removed nodes stay in the tree (flagged `deleted`) so the diff can delete them; they
/// are only dropped from the render orders.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorRoutine {
    pub routine: RoutineRow,
    exercises: IndexMap<RoutineExerciseId, ExerciseNode>,
    exercise_order: Vec<RoutineExerciseId>,
    has_unsaved: bool,
    temp_ids: TempIdAllocator,
}

impl EditorRoutine {
    pub fn new(routine: RoutineRow) -> Self {
        Self {
            routine,
            exercises: IndexMap::new(),
            exercise_order: Vec::new(),
            has_unsaved: false,
            temp_ids: TempIdAllocator::new(),
        }
    }

    /// Builds the tree from persisted rows.
    ///
    /// Exercises are ordered by `exercise_order` and sets by `set_order` (stable for ties).
    /// Inactive rows and sets of unknown exercises are dropped; missing reps and weight
    /// become zero.
    pub fn from_snapshot(snapshot: &RoutineSnapshot) -> Self {
        let mut editor = Self::new(snapshot.routine.clone());

        let mut exercises: Vec<_> = snapshot
            .exercises
            .iter()
            .filter(|(row, _)| row.is_active)
            .collect();
        exercises.sort_by_key(|(row, _)| row.exercise_order);
        for (row, catalog) in exercises {
            let node = ExerciseNode {
                id: row.id,
                exercise_id: row.exercise_id,
                exercise_order: row.exercise_order,
                exercise_name: catalog.as_ref().map(|c| c.name.clone()),
                muscle_group: catalog.as_ref().and_then(|c| c.muscle_group.clone()),
                category: catalog.as_ref().and_then(|c| c.category.clone()),
                notes: row.notes.clone(),
                flags: EditFlags::default(),
                sets: IndexMap::new(),
                set_order: Vec::new(),
            };
            editor.exercises.insert(row.id, node);
            editor.exercise_order.push(row.id);
        }

        let mut sets: Vec<_> = snapshot.sets.iter().filter(|row| row.is_active).collect();
        sets.sort_by_key(|row| row.set_order);
        for row in sets {
            let Some(parent) = editor.exercises.get_mut(&row.routine_exercise_id) else {
                continue;
            };
            parent.sets.insert(
                row.id,
                SetNode {
                    id: row.id,
                    routine_exercise_id: row.routine_exercise_id,
                    exercise_id: row.exercise_id,
                    set_order: row.set_order,
                    planned_reps: row.planned_reps.unwrap_or(0),
                    planned_weight_kg: row.planned_weight_kg.unwrap_or(0.0),
                    notes: row.notes.clone(),
                    flags: EditFlags::default(),
                },
            );
            parent.set_order.push(row.id);
        }

        editor
    }

    pub fn has_unsaved(&self) -> bool {
        self.has_unsaved
    }

    pub fn exercise(&self, ex_id: RoutineExerciseId) -> Option<&ExerciseNode> {
        self.exercises.get(&ex_id)
    }

    pub fn exercise_order(&self) -> &[RoutineExerciseId] {
        &self.exercise_order
    }

    /// Visible exercises in render order.
    pub fn visible_exercises(&self) -> impl Iterator<Item = &ExerciseNode> + '_ {
        self.exercise_order
            .iter()
            .filter_map(|id| self.exercises.get(id))
    }

    /// Catalog and backend ids of every exercise that can still own new sets.
    pub fn ex_id_map(&self) -> ExIdMap {
        self.exercises
            .values()
            .filter(|node| !node.flags.deleted)
            .map(|node| {
                let entry = if node.id.is_persisted() {
                    ExerciseRef::persisted(node.id, node.exercise_id)
                } else {
                    ExerciseRef::pending(node.exercise_id)
                };
                (node.id, entry)
            })
            .collect()
    }

    fn recompute_has_unsaved(&mut self) {
        self.has_unsaved = self.exercises.values().any(ExerciseNode::has_pending_edits);
    }

    fn exercise_mut(&mut self, ex_id: RoutineExerciseId) -> Result<&mut ExerciseNode, EditorError> {
        self.exercises
            .get_mut(&ex_id)
            .ok_or(EditorError::ExerciseNotFound { ex_id })
    }
}

#[cfg(test)]
mod tests;
