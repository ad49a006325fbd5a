// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip activity model for storage and API.

use crate::error::{AppError, Result};
use crate::time_utils::{parse_calendar_date, parse_clock_time};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Activity ID (also used as document ID)
    pub id: String,
    /// Owning trip
    pub trip_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date (`YYYY-MM-DD`). Compared verbatim when grouping.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: String,
    /// Price in the trip currency
    pub price: f64,
    /// Position within the trip, contiguous from 0
    pub order: u32,
    #[serde(default)]
    pub itinerary_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Activity {
    /// Build a new activity for `trip_id` at position `order`.
    pub fn new(trip_id: &str, details: ActivityDetails, order: u32, now: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            title: details.title.trim().to_string(),
            description: details.description,
            date: details.date,
            start_time: details.start_time,
            end_time: details.end_time,
            location: details.location,
            price: details.price,
            order,
            itinerary_id: details.itinerary_id,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Replace the user-editable fields. Identity, trip and order are kept.
    pub fn apply(&mut self, details: ActivityDetails, now: &str) {
        self.title = details.title.trim().to_string();
        self.description = details.description;
        self.date = details.date;
        self.start_time = details.start_time;
        self.end_time = details.end_time;
        self.location = details.location;
        self.price = details.price;
        self.itinerary_id = details.itinerary_id;
        self.updated_at = now.to_string();
    }
}

/// User-editable activity fields, as submitted by the activity form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityDetails {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub itinerary_id: Option<String>,
}

impl ActivityDetails {
    /// Validate before anything touches the store.
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be blank".to_string()));
        }
        if !self.price.is_finite() {
            return Err(AppError::Validation("price must be a number".to_string()));
        }
        if let Some(date) = self.date.as_deref() {
            if parse_calendar_date(date).is_none() {
                return Err(AppError::Validation(format!(
                    "date '{}' must be YYYY-MM-DD",
                    date
                )));
            }
        }

        let start = self.start_time.as_deref().map(parse_time_field).transpose()?;
        let end = self.end_time.as_deref().map(parse_time_field).transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(AppError::Validation(
                    "end_time must not be before start_time".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_time_field(raw: &str) -> Result<chrono::NaiveTime> {
    parse_clock_time(raw)
        .ok_or_else(|| AppError::Validation(format!("time '{}' must be HH:MM", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ActivityDetails {
        ActivityDetails {
            title: "Temple of Literature".to_string(),
            date: Some("2024-05-01".to_string()),
            start_time: Some("09:00".to_string()),
            end_time: Some("11:30".to_string()),
            location: "Hanoi".to_string(),
            price: 2.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_details_pass() {
        assert!(details().check().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut d = details();
        d.price = -1.0;
        assert!(matches!(d.check(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut d = details();
        d.title = "   ".to_string();
        assert!(matches!(d.check(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut d = details();
        d.date = Some("May 1st".to_string());
        assert!(matches!(d.check(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut d = details();
        d.end_time = Some("08:00".to_string());
        assert!(matches!(d.check(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_apply_keeps_order_and_identity() {
        let mut activity = Activity::new("trip-1", details(), 4, "2024-01-01T00:00:00Z");
        let id = activity.id.clone();

        let mut update = details();
        update.title = "Hoa Lo Prison".to_string();
        activity.apply(update, "2024-01-02T00:00:00Z");

        assert_eq!(activity.id, id);
        assert_eq!(activity.order, 4);
        assert_eq!(activity.trip_id, "trip-1");
        assert_eq!(activity.title, "Hoa Lo Prison");
        assert_eq!(activity.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(activity.updated_at, "2024-01-02T00:00:00Z");
    }
}
