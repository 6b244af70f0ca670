// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side persistence operations.
//!
//! Event queries always return events in log order: `issued_at` ascending,
//! then `event_id` ascending.

mod events;
mod suspensions;

pub use events::{
    events_for_agent, events_for_email, events_for_landlord, find_sent_event_by_token,
};
pub use suspensions::get_suspension;
