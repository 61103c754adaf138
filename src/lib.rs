// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Setlog: routine editing and save planning for a workout tracker.
//!
//! Edits to a routine template are captured either as an append-only `journal` or in a
//! live `editor` tree. Both are reduced to a `plan::SavePlan`, which `runner` applies to a
//! `runner::RoutineStore` backend.

pub mod demo;
pub mod editor;
pub mod journal;
pub mod measurements;
pub mod model;
pub mod plan;
pub mod runner;
pub mod store;
