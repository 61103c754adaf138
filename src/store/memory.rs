// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::{
    CatalogExercise, CatalogExerciseId, MuscleSummary, NewSetRow, RoutineExerciseId,
    RoutineExerciseRow, RoutineId, RoutineRow, RoutineSetId, RoutineSetRow, RoutineSnapshot,
};
use crate::runner::RoutineStore;

pub const MUSCLE_SUMMARY_SEPARATOR: &str = " • ";

/// Facade operation kinds, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    DeleteRoutineExercise,
    DeleteExerciseSet,
    UpdateExerciseSet,
    UpdateExerciseSetOrder,
    UpdateRoutineExerciseOrder,
    AddExerciseToRoutine,
    AddExerciseSetsToRoutine,
    RecomputeMuscleSummary,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeleteRoutineExercise => "delete_routine_exercise",
            Self::DeleteExerciseSet => "delete_exercise_set",
            Self::UpdateExerciseSet => "update_exercise_set",
            Self::UpdateExerciseSetOrder => "update_exercise_set_order",
            Self::UpdateRoutineExerciseOrder => "update_routine_exercise_order",
            Self::AddExerciseToRoutine => "add_exercise_to_routine",
            Self::AddExerciseSetsToRoutine => "add_exercise_sets_to_routine",
            Self::RecomputeMuscleSummary => "recompute_routine_muscle_summary",
        }
    }
}

/// One facade call as received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    DeleteRoutineExercise(RoutineExerciseId),
    DeleteExerciseSet(RoutineSetId),
    UpdateExerciseSet {
        id: RoutineSetId,
        reps: Option<u32>,
        weight: Option<f64>,
    },
    UpdateExerciseSetOrder {
        id: RoutineSetId,
        set_order: u32,
    },
    UpdateRoutineExerciseOrder {
        id: RoutineExerciseId,
        order: u32,
    },
    AddExerciseToRoutine {
        routine_id: RoutineId,
        exercise_id: CatalogExerciseId,
        order: u32,
    },
    AddExerciseSetsToRoutine {
        routine_exercise_id: RoutineExerciseId,
        exercise_id: CatalogExerciseId,
        rows: Vec<NewSetRow>,
    },
    RecomputeMuscleSummary(RoutineId),
}

impl StoreCall {
    pub fn op(&self) -> StoreOp {
        match self {
            Self::DeleteRoutineExercise(_) => StoreOp::DeleteRoutineExercise,
            Self::DeleteExerciseSet(_) => StoreOp::DeleteExerciseSet,
            Self::UpdateExerciseSet { .. } => StoreOp::UpdateExerciseSet,
            Self::UpdateExerciseSetOrder { .. } => StoreOp::UpdateExerciseSetOrder,
            Self::UpdateRoutineExerciseOrder { .. } => StoreOp::UpdateRoutineExerciseOrder,
            Self::AddExerciseToRoutine { .. } => StoreOp::AddExerciseToRoutine,
            Self::AddExerciseSetsToRoutine { .. } => StoreOp::AddExerciseSetsToRoutine,
            Self::RecomputeMuscleSummary(_) => StoreOp::RecomputeMuscleSummary,
        }
    }

    /// The row or routine id the call is addressed to.
    fn target(&self) -> i64 {
        match self {
            Self::DeleteRoutineExercise(id)
            | Self::UpdateRoutineExerciseOrder { id, .. }
            | Self::AddExerciseSetsToRoutine {
                routine_exercise_id: id,
                ..
            } => id.get(),
            Self::DeleteExerciseSet(id)
            | Self::UpdateExerciseSet { id, .. }
            | Self::UpdateExerciseSetOrder { id, .. } => id.get(),
            Self::AddExerciseToRoutine { routine_id, .. }
            | Self::RecomputeMuscleSummary(routine_id) => {
                i64::try_from(*routine_id).unwrap_or(i64::MAX)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    RoutineNotFound { routine_id: RoutineId },
    ExerciseNotFound { id: RoutineExerciseId },
    SetNotFound { id: RoutineSetId },
    Injected { op: StoreOp },
}

impl fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoutineNotFound { routine_id } => write!(f, "routine not found: {routine_id}"),
            Self::ExerciseNotFound { id } => write!(f, "routine exercise not found: {id}"),
            Self::SetNotFound { id } => write!(f, "routine set not found: {id}"),
            Self::Injected { op } => write!(f, "injected failure in {}", op.as_str()),
        }
    }
}

impl std::error::Error for MemoryStoreError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InjectedFailure {
    op: StoreOp,
    target: Option<i64>,
}

#[derive(Debug, Default)]
struct MemoryState {
    catalog: BTreeMap<CatalogExerciseId, CatalogExercise>,
    routines: BTreeMap<RoutineId, RoutineRow>,
    exercises: BTreeMap<RoutineExerciseId, RoutineExerciseRow>,
    sets: BTreeMap<RoutineSetId, RoutineSetRow>,
    next_routine_id: RoutineId,
    next_row_id: i64,
    calls: Vec<StoreCall>,
    failures: Vec<InjectedFailure>,
}

impl MemoryState {
    fn record(&mut self, call: StoreCall) -> Result<(), MemoryStoreError> {
        let op = call.op();
        let target = call.target();
        self.calls.push(call);
        let injected = self
            .failures
            .iter()
            .any(|f| f.op == op && f.target.map_or(true, |t| t == target));
        if injected {
            return Err(MemoryStoreError::Injected { op });
        }
        Ok(())
    }

    fn allocate_row_id(&mut self) -> i64 {
        let id = self.next_row_id;
        self.next_row_id = self.next_row_id.saturating_add(1);
        id
    }

    fn exercise_mut(
        &mut self,
        id: RoutineExerciseId,
    ) -> Result<&mut RoutineExerciseRow, MemoryStoreError> {
        self.exercises
            .get_mut(&id)
            .ok_or(MemoryStoreError::ExerciseNotFound { id })
    }

    fn set_mut(&mut self, id: RoutineSetId) -> Result<&mut RoutineSetRow, MemoryStoreError> {
        self.sets
            .get_mut(&id)
            .ok_or(MemoryStoreError::SetNotFound { id })
    }
}

/// In-process routine backend.
///
/// Rows are soft-deleted (`is_active = false`), deletes of inactive rows are no-ops, and
/// zero reps/weight are stored as "no value". Every facade call is logged and can be made
/// to fail on demand.
#[derive(Debug)]
pub struct MemoryRoutineStore {
    state: Mutex<MemoryState>,
}

impl MemoryRoutineStore {
    pub fn new(catalog: impl IntoIterator<Item = CatalogExercise>) -> Self {
        let state = MemoryState {
            catalog: catalog
                .into_iter()
                .map(|entry| (entry.exercise_id, entry))
                .collect(),
            next_routine_id: 1,
            next_row_id: 1,
            ..MemoryState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Seeds the store with the rows of an already persisted routine.
    pub fn from_snapshot(
        catalog: impl IntoIterator<Item = CatalogExercise>,
        snapshot: &RoutineSnapshot,
    ) -> Self {
        let mut store = Self::new(catalog);
        let state = store.state.get_mut();
        let routine_id = snapshot.routine.routine_id;
        state.routines.insert(routine_id, snapshot.routine.clone());
        state.next_routine_id = routine_id.saturating_add(1);
        for (row, _) in &snapshot.exercises {
            state.exercises.insert(row.id, row.clone());
        }
        for row in &snapshot.sets {
            state.sets.insert(row.id, row.clone());
        }

        let max_row_id = state
            .exercises
            .keys()
            .map(|id| id.get())
            .chain(state.sets.keys().map(|id| id.get()))
            .max()
            .unwrap_or(0);
        state.next_row_id = max_row_id.max(0).saturating_add(1);
        store
    }

    pub async fn create_routine(&self, name: impl Into<String>) -> RoutineId {
        let mut state = self.state.lock().await;
        let routine_id = state.next_routine_id;
        state.next_routine_id = routine_id.saturating_add(1);
        state.routines.insert(
            routine_id,
            RoutineRow {
                routine_id,
                name: name.into(),
                is_active: true,
                muscle_group_summary: None,
            },
        );
        routine_id
    }

    /// Active rows of a routine, exercises by `exercise_order` and sets by `set_order`.
    pub async fn snapshot(
        &self,
        routine_id: RoutineId,
    ) -> Result<RoutineSnapshot, MemoryStoreError> {
        let state = self.state.lock().await;
        let routine = state
            .routines
            .get(&routine_id)
            .cloned()
            .ok_or(MemoryStoreError::RoutineNotFound { routine_id })?;

        let mut exercises: Vec<(RoutineExerciseRow, Option<CatalogExercise>)> = state
            .exercises
            .values()
            .filter(|row| row.routine_id == routine_id && row.is_active)
            .map(|row| (row.clone(), state.catalog.get(&row.exercise_id).cloned()))
            .collect();
        exercises.sort_by_key(|(row, _)| (row.exercise_order, row.id));

        let active: BTreeSet<RoutineExerciseId> = exercises.iter().map(|(row, _)| row.id).collect();
        let mut sets: Vec<RoutineSetRow> = state
            .sets
            .values()
            .filter(|row| row.is_active && active.contains(&row.routine_exercise_id))
            .cloned()
            .collect();
        sets.sort_by_key(|row| (row.routine_exercise_id, row.set_order, row.id));

        Ok(RoutineSnapshot {
            routine,
            exercises,
            sets,
        })
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    /// Every later call of `op` fails with `MemoryStoreError::Injected`.
    pub async fn fail_on(&self, op: StoreOp) {
        self.state
            .lock()
            .await
            .failures
            .push(InjectedFailure { op, target: None });
    }

    /// Like `fail_on`, restricted to calls addressed to `target` (row or routine id).
    pub async fn fail_on_target(&self, op: StoreOp, target: i64) {
        self.state.lock().await.failures.push(InjectedFailure {
            op,
            target: Some(target),
        });
    }

    pub async fn clear_failures(&self) {
        self.state.lock().await.failures.clear();
    }
}

#[async_trait]
impl RoutineStore for MemoryRoutineStore {
    type Error = MemoryStoreError;

    async fn delete_routine_exercise(&self, id: RoutineExerciseId) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::DeleteRoutineExercise(id))?;

        let row = state.exercise_mut(id)?;
        if !row.is_active {
            return Ok(());
        }
        row.is_active = false;
        for set in state.sets.values_mut() {
            if set.routine_exercise_id == id {
                set.is_active = false;
            }
        }
        Ok(())
    }

    async fn delete_exercise_set(&self, id: RoutineSetId) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::DeleteExerciseSet(id))?;
        state.set_mut(id)?.is_active = false;
        Ok(())
    }

    async fn update_exercise_set(
        &self,
        id: RoutineSetId,
        reps: Option<u32>,
        weight: Option<f64>,
    ) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::UpdateExerciseSet { id, reps, weight })?;

        let row = state.set_mut(id)?;
        if let Some(reps) = reps {
            row.planned_reps = stored_reps(reps);
        }
        if let Some(weight) = weight {
            row.planned_weight_kg = stored_weight(weight);
        }
        Ok(())
    }

    async fn update_exercise_set_order(
        &self,
        id: RoutineSetId,
        set_order: u32,
    ) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::UpdateExerciseSetOrder { id, set_order })?;
        state.set_mut(id)?.set_order = set_order;
        Ok(())
    }

    async fn update_routine_exercise_order(
        &self,
        id: RoutineExerciseId,
        order: u32,
    ) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::UpdateRoutineExerciseOrder { id, order })?;
        state.exercise_mut(id)?.exercise_order = order;
        Ok(())
    }

    async fn add_exercise_to_routine(
        &self,
        routine_id: RoutineId,
        exercise_id: CatalogExerciseId,
        order: u32,
    ) -> Result<Option<RoutineExerciseId>, Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::AddExerciseToRoutine {
            routine_id,
            exercise_id,
            order,
        })?;

        if !state.routines.contains_key(&routine_id) {
            return Err(MemoryStoreError::RoutineNotFound { routine_id });
        }
        if !state.catalog.contains_key(&exercise_id) {
            return Ok(None);
        }

        let Ok(id) = RoutineExerciseId::new(state.allocate_row_id()) else {
            return Ok(None);
        };
        state.exercises.insert(
            id,
            RoutineExerciseRow {
                id,
                routine_id,
                exercise_id,
                exercise_order: order,
                is_active: true,
                notes: None,
            },
        );
        Ok(Some(id))
    }

    async fn add_exercise_sets_to_routine(
        &self,
        routine_exercise_id: RoutineExerciseId,
        exercise_id: CatalogExerciseId,
        rows: &[NewSetRow],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::AddExerciseSetsToRoutine {
            routine_exercise_id,
            exercise_id,
            rows: rows.to_vec(),
        })?;
        state.exercise_mut(routine_exercise_id)?;

        for row in rows {
            let Ok(id) = RoutineSetId::new(state.allocate_row_id()) else {
                continue;
            };
            state.sets.insert(
                id,
                RoutineSetRow {
                    id,
                    routine_exercise_id,
                    exercise_id,
                    set_order: row.set_order,
                    is_active: true,
                    planned_reps: stored_reps(row.reps),
                    planned_weight_kg: stored_weight(row.weight),
                    notes: None,
                },
            );
        }
        Ok(())
    }

    async fn recompute_routine_muscle_summary(
        &self,
        routine_id: RoutineId,
    ) -> Result<Option<MuscleSummary>, Self::Error> {
        let mut state = self.state.lock().await;
        state.record(StoreCall::RecomputeMuscleSummary(routine_id))?;
        if !state.routines.contains_key(&routine_id) {
            return Err(MemoryStoreError::RoutineNotFound { routine_id });
        }

        let active: Vec<CatalogExerciseId> = state
            .exercises
            .values()
            .filter(|row| row.routine_id == routine_id && row.is_active)
            .map(|row| row.exercise_id)
            .collect();
        if active.is_empty() {
            tracing::debug!(routine_id, "store: no active exercises, summary left as is");
            return Ok(None);
        }

        let groups: BTreeSet<&str> = active
            .iter()
            .filter_map(|exercise_id| state.catalog.get(exercise_id))
            .filter_map(|entry| entry.muscle_group.as_deref())
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .collect();
        let summary = MuscleSummary {
            muscle_group_summary: (!groups.is_empty()).then(|| {
                groups
                    .into_iter()
                    .collect::<Vec<_>>()
                    .join(MUSCLE_SUMMARY_SEPARATOR)
            }),
            exercise_count: active.len(),
        };

        if let Some(routine) = state.routines.get_mut(&routine_id) {
            routine.muscle_group_summary = summary.muscle_group_summary.clone();
        }
        Ok(Some(summary))
    }
}

fn stored_reps(reps: u32) -> Option<u32> {
    (reps > 0).then_some(reps)
}

fn stored_weight(weight: f64) -> Option<f64> {
    (weight > 0.0).then_some(weight)
}
