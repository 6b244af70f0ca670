// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side persistence operations.
//!
//! Mutations use Diesel DSL and run inside transactions where a check and
//! a write must be atomic.

mod events;
mod suspensions;

pub use events::append_event;
pub use suspensions::{delete_suspension, upsert_suspension};
