// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Executes a `SavePlan` against a persistence facade.
//!
//! Steps run strictly in sequence because later steps depend on earlier side effects.
//! Independent operations inside one step are driven together and all settle before the
//! first failure is reported. There is no rollback: a `SaveError` means every step before
//! `SaveError::step` has been committed.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{
    CatalogExerciseId, MuscleSummary, NewSetRow, RoutineExerciseId, RoutineId, RoutineSetId,
};

mod execute;

pub use execute::run_save_plan;

/// The backend operations a save needs. Implementations decide transport and storage.
#[async_trait]
pub trait RoutineStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Removes an exercise from its routine; its sets go with it.
    async fn delete_routine_exercise(&self, id: RoutineExerciseId) -> Result<(), Self::Error>;

    async fn delete_exercise_set(&self, id: RoutineSetId) -> Result<(), Self::Error>;

    /// Patches only the fields that are `Some`.
    async fn update_exercise_set(
        &self,
        id: RoutineSetId,
        reps: Option<u32>,
        weight: Option<f64>,
    ) -> Result<(), Self::Error>;

    async fn update_exercise_set_order(
        &self,
        id: RoutineSetId,
        set_order: u32,
    ) -> Result<(), Self::Error>;

    async fn update_routine_exercise_order(
        &self,
        id: RoutineExerciseId,
        order: u32,
    ) -> Result<(), Self::Error>;

    /// Returns the persisted id of the new row, or `None` when the backend declined to
    /// create it (e.g. unknown catalog exercise).
    async fn add_exercise_to_routine(
        &self,
        routine_id: RoutineId,
        exercise_id: CatalogExerciseId,
        order: u32,
    ) -> Result<Option<RoutineExerciseId>, Self::Error>;

    async fn add_exercise_sets_to_routine(
        &self,
        routine_exercise_id: RoutineExerciseId,
        exercise_id: CatalogExerciseId,
        rows: &[NewSetRow],
    ) -> Result<(), Self::Error>;

    async fn recompute_routine_muscle_summary(
        &self,
        routine_id: RoutineId,
    ) -> Result<Option<MuscleSummary>, Self::Error>;
}

/// What the caller knows about an exercise id referenced by a create bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRef {
    /// Backend row id, once the exercise exists there.
    pub persisted_id: Option<RoutineExerciseId>,
    pub exercise_id: Option<CatalogExerciseId>,
}

impl ExerciseRef {
    pub fn persisted(persisted_id: RoutineExerciseId, exercise_id: CatalogExerciseId) -> Self {
        Self {
            persisted_id: Some(persisted_id),
            exercise_id: Some(exercise_id),
        }
    }

    pub fn pending(exercise_id: CatalogExerciseId) -> Self {
        Self {
            persisted_id: None,
            exercise_id: Some(exercise_id),
        }
    }
}

/// Maps temp and persisted exercise ids to their backend row and catalog exercise.
pub type ExIdMap = HashMap<RoutineExerciseId, ExerciseRef>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveStep {
    DeleteExercises,
    DeleteSets,
    UpdateSets,
    OrderSets,
    OrderExercises,
    CreateExercises,
    CreateSets,
    RecomputeSummary,
}

impl SaveStep {
    pub const ALL: [SaveStep; 8] = [
        Self::DeleteExercises,
        Self::DeleteSets,
        Self::UpdateSets,
        Self::OrderSets,
        Self::OrderExercises,
        Self::CreateExercises,
        Self::CreateSets,
        Self::RecomputeSummary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeleteExercises => "delete exercises",
            Self::DeleteSets => "delete sets",
            Self::UpdateSets => "update sets",
            Self::OrderSets => "order sets",
            Self::OrderExercises => "order exercises",
            Self::CreateExercises => "create exercises",
            Self::CreateSets => "create sets",
            Self::RecomputeSummary => "recompute summary",
        }
    }
}

impl fmt::Display for SaveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct SaveError<E> {
    /// The step that failed. All earlier steps were applied.
    pub step: SaveStep,
    pub source: E,
}

impl<E: fmt::Display> fmt::Display for SaveError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "save failed at step '{}': {}", self.step, self.source)
    }
}

impl<E> std::error::Error for SaveError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Outcome of a successful `run_save_plan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveReport {
    /// Temp exercise id to the id the backend assigned.
    pub created_exercises: HashMap<RoutineExerciseId, RoutineExerciseId>,
    /// Create entries that were never sent: no set to create, or the backend returned no row.
    pub skipped_exercises: Vec<RoutineExerciseId>,
    /// Buckets whose exercise could not be resolved to a backend row and catalog id.
    pub skipped_buckets: Vec<RoutineExerciseId>,
    pub sets_created: usize,
    pub summary: Option<MuscleSummary>,
}
