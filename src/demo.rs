// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scripted editing session used by `setlog demo`.
//!
//! Seeds an in-memory routine, then saves one round of edits through the journal and one
//! through the editor tree.

use std::fmt;

use serde::Serialize;

use crate::editor::{build_save_plan, EditorError, EditorRoutine, ExerciseMeta, SetFieldUpdate};
use crate::journal::{journal_is_noop, EditJournal};
use crate::model::{
    next_temp_id, CatalogExercise, CatalogExerciseId, NewSetRow, RoutineExerciseId, RoutineId,
    RoutineSetId, RoutineSnapshot,
};
use crate::plan::{collapse_journal, SavePlan};
use crate::runner::{run_save_plan, RoutineStore, SaveError, SaveReport};
use crate::store::{MemoryRoutineStore, MemoryStoreError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoOutcome {
    pub journal_plan: SavePlan,
    pub journal_report: Option<SaveReport>,
    pub editor_plan: SavePlan,
    pub editor_report: Option<SaveReport>,
    pub routine: RoutineSnapshot,
}

#[derive(Debug)]
pub enum DemoError {
    Store(MemoryStoreError),
    Save(SaveError<MemoryStoreError>),
    Editor(EditorError),
    Seed { exercise_id: CatalogExerciseId },
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(source) => write!(f, "demo store error: {source}"),
            Self::Save(source) => write!(f, "demo save error: {source}"),
            Self::Editor(source) => write!(f, "demo editor error: {source}"),
            Self::Seed { exercise_id } => {
                write!(f, "cannot seed demo routine with exercise {exercise_id}")
            }
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(source) => Some(source),
            Self::Save(source) => Some(source),
            Self::Editor(source) => Some(source),
            Self::Seed { .. } => None,
        }
    }
}

impl From<MemoryStoreError> for DemoError {
    fn from(source: MemoryStoreError) -> Self {
        Self::Store(source)
    }
}

impl From<SaveError<MemoryStoreError>> for DemoError {
    fn from(source: SaveError<MemoryStoreError>) -> Self {
        Self::Save(source)
    }
}

impl From<EditorError> for DemoError {
    fn from(source: EditorError) -> Self {
        Self::Editor(source)
    }
}

pub fn demo_catalog() -> Vec<CatalogExercise> {
    let entry = |exercise_id, name: &str, muscle_group: &str| CatalogExercise {
        exercise_id,
        name: name.to_owned(),
        muscle_group: Some(muscle_group.to_owned()),
        category: Some("strength".to_owned()),
    };
    vec![
        entry(1, "Bench Press", "Chest"),
        entry(2, "Back Squat", "Legs"),
        entry(5, "Barbell Row", "Back"),
        entry(7, "Overhead Press", "Shoulders"),
    ]
}

pub async fn run_demo() -> Result<DemoOutcome, DemoError> {
    let store = MemoryRoutineStore::new(demo_catalog());
    let routine_id = store.create_routine("Upper A").await;
    let bench = seed_exercise(&store, routine_id, 1, 1, &[(10, 50.0), (8, 60.0)]).await?;
    let row = seed_exercise(&store, routine_id, 5, 2, &[(12, 40.0)]).await?;
    store.recompute_routine_muscle_summary(routine_id).await?;

    let seeded = store.snapshot(routine_id).await?;
    let bench_sets: Vec<RoutineSetId> = seeded
        .sets
        .iter()
        .filter(|set| set.routine_exercise_id == bench)
        .map(|set| set.id)
        .collect();
    let &[first_bench_set, second_bench_set] = bench_sets.as_slice() else {
        return Err(DemoError::Seed { exercise_id: 1 });
    };

    let mut journal = EditJournal::new();
    let press: RoutineExerciseId = next_temp_id();
    journal.record_ex_add(press, 7, "Overhead Press", Some(3));
    journal.record_set_add(press, next_temp_id(), Some(1), "8", "35");
    journal.record_set_add(press, next_temp_id(), Some(2), "", "");
    journal.record_set_update(bench, first_bench_set, Some("12".to_owned()), None);
    journal.record_set_delete(bench, second_bench_set);
    journal.record_ex_reorder(row, 1);
    journal.record_ex_reorder(bench, 2);

    let journal_plan = collapse_journal(&journal);
    let journal_report = if journal_is_noop(&journal) {
        None
    } else {
        let known = EditorRoutine::from_snapshot(&seeded).ex_id_map();
        Some(run_save_plan(&store, &journal_plan, routine_id, &known).await?)
    };

    let mut editor = EditorRoutine::from_snapshot(&store.snapshot(routine_id).await?);
    let squat = editor.add_exercise(
        2,
        ExerciseMeta {
            name: Some("Back Squat".to_owned()),
            muscle_group: Some("Legs".to_owned()),
            category: Some("strength".to_owned()),
        },
    );
    let squat_set = editor.add_set(squat)?;
    editor.update_set_field(squat, squat_set, SetFieldUpdate::reps_text("5"))?;
    editor.update_set_field(squat, squat_set, SetFieldUpdate::weight_text("100"))?;
    editor.move_exercise(squat, 0)?;

    let editor_plan = build_save_plan(&editor);
    let editor_report = if editor.has_unsaved() {
        Some(run_save_plan(&store, &editor_plan, routine_id, &editor.ex_id_map()).await?)
    } else {
        None
    };

    Ok(DemoOutcome {
        journal_plan,
        journal_report,
        editor_plan,
        editor_report,
        routine: store.snapshot(routine_id).await?,
    })
}

async fn seed_exercise(
    store: &MemoryRoutineStore,
    routine_id: RoutineId,
    exercise_id: CatalogExerciseId,
    order: u32,
    sets: &[(u32, f64)],
) -> Result<RoutineExerciseId, DemoError> {
    let id = store
        .add_exercise_to_routine(routine_id, exercise_id, order)
        .await?
        .ok_or(DemoError::Seed { exercise_id })?;
    let rows: Vec<NewSetRow> = (1..)
        .zip(sets)
        .map(|(set_order, &(reps, weight))| NewSetRow {
            reps,
            weight,
            set_order,
        })
        .collect();
    store
        .add_exercise_sets_to_routine(id, exercise_id, &rows)
        .await?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::run_demo;

    #[tokio::test]
    async fn demo_saves_through_both_front_ends() {
        let outcome = run_demo().await.expect("demo");

        let journal_report = outcome.journal_report.expect("journal saved");
        assert_eq!(journal_report.created_exercises.len(), 1);
        assert_eq!(journal_report.sets_created, 1);
        assert_eq!(outcome.journal_plan.update_sets.len(), 1);
        assert_eq!(outcome.journal_plan.delete_sets.len(), 1);
        assert_eq!(outcome.journal_plan.order_exercises.len(), 2);

        let editor_report = outcome.editor_report.expect("editor saved");
        assert_eq!(editor_report.created_exercises.len(), 1);
        assert_eq!(outcome.editor_plan.order_exercises.len(), 3);

        let catalog_ids: Vec<u64> = outcome
            .routine
            .exercises
            .iter()
            .map(|(row, _)| row.exercise_id)
            .collect();
        assert_eq!(catalog_ids, vec![2, 5, 1, 7]);
        assert_eq!(
            outcome.routine.routine.muscle_group_summary.as_deref(),
            Some("Back • Chest • Legs • Shoulders")
        );
    }
}
