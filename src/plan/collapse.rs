// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;

use crate::journal::{EditJournal, ExAction, SetAction};
use crate::model::{CatalogExerciseId, RoutineExerciseId, RoutineSetId};

use super::numeric::{parse_reps, parse_weight};
use super::{
    ExerciseCreate, ExerciseOrderUpdate, SavePlan, SetCreate, SetOrderUpdate, SetValuesUpdate,
};

#[derive(Debug)]
struct AddedExercise<'j> {
    exercise_id: CatalogExerciseId,
    name: &'j str,
    order: Option<u32>,
}

/// Everything the journal says about one exercise, later actions overriding earlier ones.
#[derive(Debug, Default)]
struct ExerciseFold<'j> {
    added: Option<AddedExercise<'j>>,
    deleted: bool,
    final_order: Option<u32>,
    // Muscle-group edits are display-only; the name overrides the created row's name.
    meta_name: Option<&'j str>,
}

#[derive(Debug)]
struct AddedSet<'j> {
    reps: &'j str,
    weight: &'j str,
    set_order: Option<u32>,
}

#[derive(Debug, Default)]
struct FinalSetValues<'j> {
    reps: Option<&'j str>,
    weight: Option<&'j str>,
    set_order: Option<u32>,
}

#[derive(Debug, Default)]
struct SetFold<'j> {
    added: Option<AddedSet<'j>>,
    deleted: bool,
    final_values: FinalSetValues<'j>,
    touched: bool,
}

/// Sets are scoped to their exercise, so equal set ids under different exercises never merge.
type SetKey = (RoutineExerciseId, RoutineSetId);

/// Folds an append-only journal into a deduplicated `SavePlan`.
///
/// Pure and deterministic: entities are resolved in the order they first appear in the
/// journal. Deletion is sticky, so an entity that was both added and deleted in the same
/// session never reaches the backend, whatever the order of the two actions.
pub fn collapse_journal(journal: &EditJournal) -> SavePlan {
    let exercises = fold_exercise_actions(&journal.ex);
    let sets = fold_set_actions(&journal.sets);

    let mut plan = SavePlan::default();
    resolve_exercises(&exercises, &mut plan);
    resolve_sets(&exercises, &sets, &mut plan);

    // An exercise whose every set was blank has nothing to create.
    let buckets = &plan.create_sets_by_exercise;
    plan.create_exercises.retain(|create| {
        buckets
            .get(&create.temp_ex_id)
            .is_some_and(|rows| !rows.is_empty())
    });

    plan
}

fn fold_exercise_actions(actions: &[ExAction]) -> IndexMap<RoutineExerciseId, ExerciseFold<'_>> {
    let mut folds: IndexMap<RoutineExerciseId, ExerciseFold<'_>> = IndexMap::new();

    for action in actions {
        let fold = folds.entry(action.ex_id()).or_default();
        match action {
            ExAction::ExAdd {
                exercise_id,
                name,
                order,
                ..
            } => {
                fold.added = Some(AddedExercise {
                    exercise_id: *exercise_id,
                    name: name.as_str(),
                    order: *order,
                });
            }
            ExAction::ExDelete { .. } => fold.deleted = true,
            ExAction::ExReorder { order, .. } => fold.final_order = Some(*order),
            ExAction::ExUpdateMeta { name, .. } => {
                if let Some(name) = name {
                    fold.meta_name = Some(name.as_str());
                }
            }
        }
    }

    folds
}

fn fold_set_actions(actions: &[SetAction]) -> IndexMap<SetKey, SetFold<'_>> {
    let mut folds: IndexMap<SetKey, SetFold<'_>> = IndexMap::new();

    for action in actions {
        let fold = folds.entry((action.ex_id(), action.set_id())).or_default();
        match action {
            SetAction::SetAdd {
                set_order,
                reps,
                weight,
                ..
            } => {
                fold.added = Some(AddedSet {
                    reps: reps.as_str(),
                    weight: weight.as_str(),
                    set_order: *set_order,
                });
            }
            SetAction::SetUpdate { reps, weight, .. } => {
                if let Some(reps) = reps {
                    fold.final_values.reps = Some(reps.as_str());
                }
                if let Some(weight) = weight {
                    fold.final_values.weight = Some(weight.as_str());
                }
            }
            SetAction::SetDelete { .. } => fold.deleted = true,
            SetAction::SetReorder { set_order, .. } => {
                fold.final_values.set_order = Some(*set_order);
            }
        }
        fold.touched = true;
    }

    folds
}

fn resolve_exercises(
    exercises: &IndexMap<RoutineExerciseId, ExerciseFold<'_>>,
    plan: &mut SavePlan,
) {
    for (&ex_id, fold) in exercises {
        if fold.added.is_some() && fold.deleted {
            continue;
        }

        if fold.deleted {
            if ex_id.is_persisted() {
                plan.delete_exercises.push(ex_id);
            }
            continue;
        }

        match &fold.added {
            Some(added) if ex_id.is_temp() => {
                plan.create_exercises.push(ExerciseCreate {
                    temp_ex_id: ex_id,
                    exercise_id: added.exercise_id,
                    order: fold.final_order.or(added.order).unwrap_or(1),
                    name: fold.meta_name.unwrap_or(added.name).to_owned(),
                });
            }
            _ => {
                if let (true, Some(order)) = (ex_id.is_persisted(), fold.final_order) {
                    plan.order_exercises.push(ExerciseOrderUpdate { id: ex_id, order });
                }
            }
        }
    }
}

fn resolve_sets(
    exercises: &IndexMap<RoutineExerciseId, ExerciseFold<'_>>,
    sets: &IndexMap<SetKey, SetFold<'_>>,
    plan: &mut SavePlan,
) {
    for (&(ex_id, set_id), fold) in sets {
        // Cascade: a deleted parent voids every set-level entry beneath it.
        if exercises.get(&ex_id).is_some_and(|parent| parent.deleted) {
            continue;
        }

        if fold.added.is_some() && fold.deleted {
            continue;
        }

        if fold.deleted {
            if set_id.is_persisted() {
                plan.delete_sets.push(set_id);
            }
            continue;
        }

        if let (Some(added), true) = (&fold.added, set_id.is_temp()) {
            let row = SetCreate {
                set_id,
                reps: parse_reps(fold.final_values.reps.unwrap_or(added.reps)),
                weight: parse_weight(fold.final_values.weight.unwrap_or(added.weight)),
                set_order: fold.final_values.set_order.or(added.set_order).unwrap_or(0),
            };
            if !row.is_empty() {
                plan.push_created_set(ex_id, row);
            }
            continue;
        }

        if set_id.is_persisted() && fold.touched {
            let reps = fold.final_values.reps.map(parse_reps);
            let weight = fold.final_values.weight.map(parse_weight);
            if reps.is_some() || weight.is_some() {
                plan.update_sets.push(SetValuesUpdate {
                    id: set_id,
                    reps,
                    weight,
                });
            }
            if let Some(set_order) = fold.final_values.set_order {
                plan.order_sets.push(SetOrderUpdate { id: set_id, set_order });
            }
        }
    }
}
