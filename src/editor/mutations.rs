// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;

use crate::model::{CatalogExerciseId, RoutineExerciseId, RoutineSetId};
use crate::plan::{normalize_weight, parse_reps, parse_weight};

use super::{EditFlags, EditorError, EditorRoutine, ExerciseNode, SetNode};

/// Display metadata for an exercise added from the catalog picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseMeta {
    pub name: Option<String>,
    pub muscle_group: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetFieldUpdate {
    PlannedReps(u32),
    PlannedWeightKg(f64),
    Notes(Option<String>),
}

impl SetFieldUpdate {
    /// Reps as typed into a text field; unparseable input becomes zero.
    pub fn reps_text(raw: &str) -> Self {
        Self::PlannedReps(parse_reps(raw))
    }

    pub fn weight_text(raw: &str) -> Self {
        Self::PlannedWeightKg(parse_weight(raw))
    }
}

impl EditorRoutine {
    /// Appends a new exercise with a temp id and no sets.
    pub fn add_exercise(
        &mut self,
        exercise_id: CatalogExerciseId,
        meta: ExerciseMeta,
    ) -> RoutineExerciseId {
        let id = self.temp_ids.allocate();
        let order = position(self.exercise_order.len());
        self.exercises.insert(
            id,
            ExerciseNode {
                id,
                exercise_id,
                exercise_order: order,
                exercise_name: meta.name,
                muscle_group: meta.muscle_group,
                category: meta.category,
                notes: None,
                flags: EditFlags::CREATED,
                sets: IndexMap::new(),
                set_order: Vec::new(),
            },
        );
        self.exercise_order.push(id);
        self.recompute_has_unsaved();
        id
    }

    /// Flags the exercise and all of its sets deleted and hides it.
    pub fn remove_exercise(&mut self, ex_id: RoutineExerciseId) -> Result<(), EditorError> {
        let exercise = self.exercise_mut(ex_id)?;
        exercise.flags.deleted = true;
        for set in exercise.sets.values_mut() {
            set.flags.deleted = true;
        }
        exercise.set_order.clear();

        self.exercise_order.retain(|id| *id != ex_id);
        self.recompute_has_unsaved();
        Ok(())
    }

    /// Appends an empty set (zero reps, zero weight) to a visible exercise.
    pub fn add_set(&mut self, ex_id: RoutineExerciseId) -> Result<RoutineSetId, EditorError> {
        if self.exercise_mut(ex_id)?.flags.deleted {
            return Err(EditorError::ExerciseDeleted { ex_id });
        }
        let set_id = self.temp_ids.allocate();
        let exercise = self.exercise_mut(ex_id)?;

        let set_order = position(exercise.set_order.len());
        exercise.sets.insert(
            set_id,
            SetNode {
                id: set_id,
                routine_exercise_id: ex_id,
                exercise_id: exercise.exercise_id,
                set_order,
                planned_reps: 0,
                planned_weight_kg: 0.0,
                notes: None,
                flags: EditFlags::CREATED,
            },
        );
        exercise.set_order.push(set_id);
        self.recompute_has_unsaved();
        Ok(set_id)
    }

    /// Writes one field. Persisted sets become dirty only when the value actually changes.
    /// Non-finite or negative weights are stored as zero.
    pub fn update_set_field(
        &mut self,
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        update: SetFieldUpdate,
    ) -> Result<(), EditorError> {
        let set = live_set_mut(self.exercise_mut(ex_id)?, ex_id, set_id)?;

        let changed = match update {
            SetFieldUpdate::PlannedReps(reps) => {
                replace_if_changed(&mut set.planned_reps, reps)
            }
            SetFieldUpdate::PlannedWeightKg(weight) => {
                replace_if_changed(&mut set.planned_weight_kg, normalize_weight(weight))
            }
            SetFieldUpdate::Notes(notes) => replace_if_changed(&mut set.notes, notes),
        };
        if changed {
            set.flags.dirty = !set.flags.created;
        }

        self.recompute_has_unsaved();
        Ok(())
    }

    /// Flags the set deleted and hides it. Removing it twice is fine.
    pub fn remove_set(
        &mut self,
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
    ) -> Result<(), EditorError> {
        let exercise = self.exercise_mut(ex_id)?;
        let set = exercise
            .sets
            .get_mut(&set_id)
            .ok_or(EditorError::SetNotFound { ex_id, set_id })?;
        set.flags.deleted = true;
        exercise.set_order.retain(|id| *id != set_id);

        self.recompute_has_unsaved();
        Ok(())
    }

    /// Renumbers visible sets 1..K. Renumbered persisted sets become dirty.
    pub fn reindex_set_orders(&mut self, ex_id: RoutineExerciseId) -> Result<(), EditorError> {
        let exercise = self.exercise_mut(ex_id)?;
        for (idx, set_id) in exercise.set_order.iter().enumerate() {
            let Some(set) = exercise.sets.get_mut(set_id) else {
                continue;
            };
            if set.flags.deleted {
                continue;
            }
            let desired = position(idx);
            if set.set_order != desired {
                set.set_order = desired;
                if !set.flags.created {
                    set.flags.dirty = true;
                }
            }
        }

        self.recompute_has_unsaved();
        Ok(())
    }

    /// Moves a visible set to `to_index` (clamped) and renumbers the exercise's sets.
    pub fn move_set(
        &mut self,
        ex_id: RoutineExerciseId,
        set_id: RoutineSetId,
        to_index: usize,
    ) -> Result<(), EditorError> {
        let exercise = self.exercise_mut(ex_id)?;
        live_set_mut(exercise, ex_id, set_id)?;
        move_within(&mut exercise.set_order, set_id, to_index);
        self.reindex_set_orders(ex_id)
    }

    /// Moves a visible exercise to `to_index` (clamped) and renumbers all exercises.
    pub fn move_exercise(
        &mut self,
        ex_id: RoutineExerciseId,
        to_index: usize,
    ) -> Result<(), EditorError> {
        if self.exercise_mut(ex_id)?.flags.deleted {
            return Err(EditorError::ExerciseDeleted { ex_id });
        }
        move_within(&mut self.exercise_order, ex_id, to_index);
        self.reindex_exercise_orders();
        Ok(())
    }

    /// Renumbers visible exercises 1..K. Renumbered persisted exercises become dirty.
    pub fn reindex_exercise_orders(&mut self) {
        for (idx, ex_id) in self.exercise_order.iter().enumerate() {
            let Some(exercise) = self.exercises.get_mut(ex_id) else {
                continue;
            };
            let desired = position(idx);
            if exercise.exercise_order != desired {
                exercise.exercise_order = desired;
                if !exercise.flags.created {
                    exercise.flags.dirty = true;
                }
            }
        }
        self.recompute_has_unsaved();
    }
}

fn live_set_mut(
    exercise: &mut ExerciseNode,
    ex_id: RoutineExerciseId,
    set_id: RoutineSetId,
) -> Result<&mut SetNode, EditorError> {
    let set = exercise
        .sets
        .get_mut(&set_id)
        .ok_or(EditorError::SetNotFound { ex_id, set_id })?;
    if set.flags.deleted {
        return Err(EditorError::SetDeleted { set_id });
    }
    Ok(set)
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn move_within<T: PartialEq + Copy>(order: &mut Vec<T>, item: T, to_index: usize) {
    let Some(from) = order.iter().position(|id| *id == item) else {
        return;
    };
    order.remove(from);
    let to = to_index.min(order.len());
    order.insert(to, item);
}

/// 1-based position of the element at `idx`.
fn position(idx: usize) -> u32 {
    u32::try_from(idx).map_or(u32::MAX, |idx| idx.saturating_add(1))
}
