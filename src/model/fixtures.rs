// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{RoutineExerciseId, RoutineSetId};
use super::rows::{CatalogExercise, RoutineExerciseRow, RoutineRow, RoutineSetRow, RoutineSnapshot};

pub(crate) const ROUTINE_ID: u64 = 1;

pub(crate) fn ex(value: i64) -> RoutineExerciseId {
    RoutineExerciseId::new(value).expect("exercise id")
}

pub(crate) fn set(value: i64) -> RoutineSetId {
    RoutineSetId::new(value).expect("set id")
}

pub(crate) fn catalog() -> Vec<CatalogExercise> {
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
        entry(7, "Overhead Press", " Shoulders "),
    ]
}

/// "Push Pull" routine: bench press (row 10, sets 20/21) and barbell row (row 11, set 22).
pub(crate) fn push_pull_snapshot() -> RoutineSnapshot {
    let catalog = catalog();
    let lookup = |id: u64| catalog.iter().find(|c| c.exercise_id == id).cloned();

    let exercise = |id: i64, exercise_id: u64, order: u32| RoutineExerciseRow {
        id: ex(id),
        routine_id: ROUTINE_ID,
        exercise_id,
        exercise_order: order,
        is_active: true,
        notes: None,
    };
    let planned = |id: i64, parent: i64, exercise_id: u64, order: u32, reps: u32, kg: f64| {
        RoutineSetRow {
            id: set(id),
            routine_exercise_id: ex(parent),
            exercise_id,
            set_order: order,
            is_active: true,
            planned_reps: Some(reps),
            planned_weight_kg: Some(kg),
            notes: None,
        }
    };

    RoutineSnapshot {
        routine: RoutineRow {
            routine_id: ROUTINE_ID,
            name: "Push Pull".to_owned(),
            is_active: true,
            muscle_group_summary: Some("Back • Chest".to_owned()),
        },
        exercises: vec![
            (exercise(11, 5, 2), lookup(5)),
            (exercise(10, 1, 1), lookup(1)),
        ],
        sets: vec![
            planned(21, 10, 1, 2, 8, 60.0),
            planned(20, 10, 1, 1, 10, 50.0),
            planned(22, 11, 5, 1, 12, 40.0),
        ],
    }
}
