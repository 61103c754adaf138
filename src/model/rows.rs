// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{CatalogExerciseId, RoutineExerciseId, RoutineId, RoutineSetId};

/// A routine template as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineRow {
    pub routine_id: RoutineId,
    pub name: String,
    pub is_active: bool,
    pub muscle_group_summary: Option<String>,
}

/// An exercise attached to a routine template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineExerciseRow {
    pub id: RoutineExerciseId,
    pub routine_id: RoutineId,
    pub exercise_id: CatalogExerciseId,
    pub exercise_order: u32,
    pub is_active: bool,
    pub notes: Option<String>,
}

/// A planned set of a routine exercise.
///
/// The backend stores "no value" rather than zero for reps/weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineSetRow {
    pub id: RoutineSetId,
    pub routine_exercise_id: RoutineExerciseId,
    pub exercise_id: CatalogExerciseId,
    pub set_order: u32,
    pub is_active: bool,
    pub planned_reps: Option<u32>,
    pub planned_weight_kg: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogExercise {
    pub exercise_id: CatalogExerciseId,
    pub name: String,
    pub muscle_group: Option<String>,
    pub category: Option<String>,
}

/// Derived per-routine aggregate recomputed at the end of every save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MuscleSummary {
    pub muscle_group_summary: Option<String>,
    pub exercise_count: usize,
}

/// Active rows of one routine, joined with catalog metadata where known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineSnapshot {
    pub routine: RoutineRow,
    pub exercises: Vec<(RoutineExerciseRow, Option<CatalogExercise>)>,
    pub sets: Vec<RoutineSetRow>,
}

/// Set row payload for batch creation under one persisted exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewSetRow {
    pub reps: u32,
    pub weight: f64,
    pub set_order: u32,
}
