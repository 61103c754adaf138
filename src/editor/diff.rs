// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::plan::{
    ExerciseCreate, ExerciseOrderUpdate, SavePlan, SetCreate, SetOrderUpdate, SetValuesUpdate,
};

use super::{EditorRoutine, ExerciseNode};

/// Walks the flagged tree once and emits the operations that persist it.
///
/// Visible exercises come first in render order, then removed ones. Created exercises are
/// emitted even when none of their sets is worth creating; the runner skips those.
pub fn build_save_plan(editor: &EditorRoutine) -> SavePlan {
    let mut plan = SavePlan::default();

    let removed = editor
        .exercises
        .keys()
        .filter(|id| !editor.exercise_order.contains(*id));
    for ex_id in editor.exercise_order.iter().chain(removed) {
        let Some(exercise) = editor.exercises.get(ex_id) else {
            continue;
        };

        if exercise.flags.deleted {
            if exercise.id.is_persisted() {
                plan.delete_exercises.push(exercise.id);
            }
            continue;
        }

        if exercise.flags.created {
            plan.create_exercises.push(ExerciseCreate {
                temp_ex_id: exercise.id,
                exercise_id: exercise.exercise_id,
                order: exercise.exercise_order,
                name: exercise.exercise_name.clone().unwrap_or_default(),
            });
        } else if exercise.flags.dirty {
            plan.order_exercises.push(ExerciseOrderUpdate {
                id: exercise.id,
                order: exercise.exercise_order,
            });
        }

        diff_sets(exercise, &mut plan);
    }

    plan
}

fn diff_sets(exercise: &ExerciseNode, plan: &mut SavePlan) {
    let removed = exercise
        .sets
        .values()
        .filter(|set| !exercise.set_order.contains(&set.id));
    for set in exercise.visible_sets().chain(removed) {
        if set.flags.deleted {
            if set.id.is_persisted() {
                plan.delete_sets.push(set.id);
            }
            continue;
        }

        if set.flags.created {
            let row = SetCreate {
                set_id: set.id,
                reps: set.planned_reps,
                weight: set.planned_weight_kg,
                set_order: set.set_order,
            };
            if !row.is_empty() {
                plan.push_created_set(exercise.id, row);
            }
        } else if set.flags.dirty {
            plan.update_sets.push(SetValuesUpdate {
                id: set.id,
                reps: Some(set.planned_reps),
                weight: Some(set.planned_weight_kg),
            });
            plan.order_sets.push(SetOrderUpdate {
                id: set.id,
                set_order: set.set_order,
            });
        }
    }
}
