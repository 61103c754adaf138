// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Identifiers and persisted row shapes.
//!
//! A routine template owns exercises, each exercise owns planned sets.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod rows;

pub use ids::{
    next_temp_id, CatalogExerciseId, Id, IdError, RoutineExerciseId, RoutineId, RoutineSetId,
    TempIdAllocator,
};
pub use rows::{
    CatalogExercise, MuscleSummary, NewSetRow, RoutineExerciseRow, RoutineRow, RoutineSetRow,
    RoutineSnapshot,
};
