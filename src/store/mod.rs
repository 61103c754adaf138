// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Routine storage backends.
//!
//! `MemoryRoutineStore` keeps routine rows in process memory, mirroring the soft-delete
//! and summary rules of the hosted backend. The CLI demo and the test suites run saves
//! against it.

pub mod memory;

pub use memory::{MemoryRoutineStore, MemoryStoreError, StoreCall, StoreOp};
