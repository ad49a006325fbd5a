// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Date-grouped itinerary view.

use crate::models::Activity;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One bucket of the itinerary: every activity sharing a `date` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ItineraryDay {
    /// The verbatim date key; `None` for undated activities
    pub date: Option<String>,
    pub activities: Vec<Activity>,
}

/// Days in the order their first activity appeared in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Itinerary {
    pub days: Vec<ItineraryDay>,
}

impl Itinerary {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Look up a day by its exact key.
    pub fn day(&self, date: Option<&str>) -> Option<&ItineraryDay> {
        self.days.iter().find(|d| d.date.as_deref() == date)
    }
}
