// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A row identifier shared by the journal, the editor tree and the save runner.
///
/// Positive values refer to rows the backend already persisted. Negative values are
/// client-only placeholders ("temp ids") for rows that do not exist yet. Zero is never
/// a valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: i64) -> Result<Self, IdError> {
        if value == 0 {
            return Err(IdError::Zero);
        }
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn get(self) -> i64 {
        self.value
    }

    pub fn is_temp(self) -> bool {
        self.value < 0
    }

    pub fn is_persisted(self) -> bool {
        self.value > 0
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| IdError::NotAnInteger)?;
        Self::new(value)
    }
}

impl<T> TryFrom<i64> for Id<T> {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Zero,
    NotAnInteger,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("id must not be zero"),
            Self::NotAnInteger => f.write_str("id must be a signed integer"),
        }
    }
}

impl std::error::Error for IdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoutineExerciseTag {}
/// Row id of an exercise attached to a routine template.
pub type RoutineExerciseId = Id<RoutineExerciseTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoutineSetTag {}
/// Row id of a planned set within a routine exercise.
pub type RoutineSetId = Id<RoutineSetTag>;

/// Catalog reference of an exercise (always positive).
pub type CatalogExerciseId = u64;

pub type RoutineId = u64;

/// Hands out temp ids from a private monotonic counter: -1, -2, -3, ...
///
/// Owned by a single editing surface, so ids are deterministic for a given sequence of
/// edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempIdAllocator {
    next: i64,
}

impl Default for TempIdAllocator {
    fn default() -> Self {
        Self { next: -1 }
    }
}

impl TempIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate<T>(&mut self) -> Id<T> {
        let value = self.next;
        self.next = self.next.saturating_sub(1);
        Id {
            value,
            _marker: PhantomData,
        }
    }
}

static NEXT_TEMP_ID: AtomicI64 = AtomicI64::new(-1);

/// Process-wide temp id source for UI code that records into a journal.
pub fn next_temp_id<T>() -> Id<T> {
    let value = NEXT_TEMP_ID.fetch_sub(1, Ordering::Relaxed);
    Id {
        value,
        _marker: PhantomData,
    }
}
