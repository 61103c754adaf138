// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;

use crate::model::{CatalogExerciseId, NewSetRow, RoutineExerciseId, RoutineId};
use crate::plan::{SavePlan, SetCreate};

use super::{ExIdMap, RoutineStore, SaveError, SaveReport, SaveStep};

/// Applies `plan` to `store` for `routine_id`.
///
/// `ex_ids` resolves the exercise ids of create buckets that the plan itself does not
/// create. The muscle summary is recomputed at the end even when the plan is empty.
pub async fn run_save_plan<S>(
    store: &S,
    plan: &SavePlan,
    routine_id: RoutineId,
    ex_ids: &ExIdMap,
) -> Result<SaveReport, SaveError<S::Error>>
where
    S: RoutineStore + ?Sized,
{
    tracing::debug!(
        routine_id,
        operations = plan.operation_count(),
        "runner: starting save"
    );
    let mut report = SaveReport::default();

    settle(
        SaveStep::DeleteExercises,
        plan.delete_exercises
            .iter()
            .map(|&id| store.delete_routine_exercise(id)),
    )
    .await?;

    settle(
        SaveStep::DeleteSets,
        plan.delete_sets.iter().map(|&id| store.delete_exercise_set(id)),
    )
    .await?;

    settle(
        SaveStep::UpdateSets,
        plan.update_sets
            .iter()
            .map(|update| store.update_exercise_set(update.id, update.reps, update.weight)),
    )
    .await?;

    settle(
        SaveStep::OrderSets,
        plan.order_sets
            .iter()
            .map(|order| store.update_exercise_set_order(order.id, order.set_order)),
    )
    .await?;

    settle(
        SaveStep::OrderExercises,
        plan.order_exercises
            .iter()
            .map(|order| store.update_routine_exercise_order(order.id, order.order)),
    )
    .await?;

    // Sequential: each new id must be known before its sets are created.
    for create in &plan.create_exercises {
        let has_rows = plan
            .create_sets_by_exercise
            .get(&create.temp_ex_id)
            .is_some_and(|rows| rows.iter().any(|row| !row.is_empty()));
        if !has_rows {
            tracing::warn!(
                temp_ex_id = %create.temp_ex_id,
                "runner: skipping exercise without sets to create"
            );
            report.skipped_exercises.push(create.temp_ex_id);
            continue;
        }

        let created = store
            .add_exercise_to_routine(routine_id, create.exercise_id, create.order)
            .await
            .map_err(|source| SaveError {
                step: SaveStep::CreateExercises,
                source,
            })?;
        match created {
            Some(persisted_id) => {
                tracing::debug!(
                    temp_ex_id = %create.temp_ex_id,
                    %persisted_id,
                    "runner: created exercise"
                );
                report
                    .created_exercises
                    .insert(create.temp_ex_id, persisted_id);
            }
            None => {
                tracing::warn!(
                    temp_ex_id = %create.temp_ex_id,
                    exercise_id = create.exercise_id,
                    "runner: backend returned no exercise row"
                );
                report.skipped_exercises.push(create.temp_ex_id);
            }
        }
    }

    for (&ex_id, rows) in &plan.create_sets_by_exercise {
        let payload = set_payload(rows);
        if payload.is_empty() {
            continue;
        }

        let Some((persisted_id, exercise_id)) =
            resolve_exercise(plan, ex_ids, &report.created_exercises, ex_id)
        else {
            tracing::warn!(
                %ex_id,
                rows = payload.len(),
                "runner: skipping sets of unresolved exercise"
            );
            report.skipped_buckets.push(ex_id);
            continue;
        };

        store
            .add_exercise_sets_to_routine(persisted_id, exercise_id, &payload)
            .await
            .map_err(|source| SaveError {
                step: SaveStep::CreateSets,
                source,
            })?;
        report.sets_created += payload.len();
    }

    report.summary = store
        .recompute_routine_muscle_summary(routine_id)
        .await
        .map_err(|source| SaveError {
            step: SaveStep::RecomputeSummary,
            source,
        })?;

    tracing::info!(
        routine_id,
        created_exercises = report.created_exercises.len(),
        sets_created = report.sets_created,
        skipped_exercises = report.skipped_exercises.len(),
        skipped_buckets = report.skipped_buckets.len(),
        "runner: save complete"
    );
    Ok(report)
}

/// Drives every future of one step to completion, then reports the first failure in plan order.
async fn settle<F, E>(
    step: SaveStep,
    operations: impl IntoIterator<Item = F>,
) -> Result<(), SaveError<E>>
where
    F: Future<Output = Result<(), E>>,
{
    let results = join_all(operations).await;
    if !results.is_empty() {
        tracing::debug!(%step, operations = results.len(), "runner: step settled");
    }
    results
        .into_iter()
        .collect::<Result<Vec<()>, E>>()
        .map(|_| ())
        .map_err(|source| {
            tracing::warn!(%step, "runner: step failed");
            SaveError { step, source }
        })
}

fn set_payload(rows: &[SetCreate]) -> Vec<NewSetRow> {
    rows.iter()
        .filter(|row| !row.is_empty())
        .map(|row| NewSetRow {
            reps: row.reps,
            weight: row.weight,
            set_order: row.set_order,
        })
        .collect()
}

fn resolve_exercise(
    plan: &SavePlan,
    ex_ids: &ExIdMap,
    created: &HashMap<RoutineExerciseId, RoutineExerciseId>,
    ex_id: RoutineExerciseId,
) -> Option<(RoutineExerciseId, CatalogExerciseId)> {
    let known = ex_ids.get(&ex_id);
    let persisted_id = created
        .get(&ex_id)
        .copied()
        .or_else(|| known.and_then(|entry| entry.persisted_id))?;
    let exercise_id = known.and_then(|entry| entry.exercise_id).or_else(|| {
        plan.create_exercises
            .iter()
            .find(|create| create.temp_ex_id == ex_id)
            .map(|create| create.exercise_id)
    })?;
    Some((persisted_id, exercise_id))
}
