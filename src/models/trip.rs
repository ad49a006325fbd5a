// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip model for storage and API.

use crate::error::{AppError, Result};
use crate::time_utils::parse_calendar_date;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored trip record. Owns its activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Trip {
    /// Trip ID (also used as document ID)
    pub id: String,
    pub name: String,
    pub destination: String,
    /// First day (`YYYY-MM-DD`)
    pub start_date: String,
    /// Last day (`YYYY-MM-DD`)
    pub end_date: String,
    /// ISO 4217 code, upper case
    pub currency: String,
    pub total_budget: f64,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Trip {
    pub fn new(details: TripDetails, now: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: details.name.trim().to_string(),
            destination: details.destination.trim().to_string(),
            start_date: details.start_date,
            end_date: details.end_date,
            currency: details.currency.trim().to_ascii_uppercase(),
            total_budget: details.total_budget,
            is_public: details.is_public,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Full update of the editable fields.
    pub fn apply(&mut self, details: TripDetails, now: &str) {
        self.name = details.name.trim().to_string();
        self.destination = details.destination.trim().to_string();
        self.start_date = details.start_date;
        self.end_date = details.end_date;
        self.currency = details.currency.trim().to_ascii_uppercase();
        self.total_budget = details.total_budget;
        self.is_public = details.is_public;
        self.updated_at = now.to_string();
    }
}

/// User-editable trip fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripDetails {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub total_budget: f64,
    #[serde(default)]
    pub is_public: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl TripDetails {
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.name.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(AppError::Validation(
                "name and destination must not be blank".to_string(),
            ));
        }
        if !self.total_budget.is_finite() {
            return Err(AppError::Validation(
                "total_budget must be a number".to_string(),
            ));
        }

        check_currency_code(&self.currency)?;

        let start = parse_calendar_date(&self.start_date).ok_or_else(|| {
            AppError::Validation("start_date must be YYYY-MM-DD".to_string())
        })?;
        let end = parse_calendar_date(&self.end_date)
            .ok_or_else(|| AppError::Validation("end_date must be YYYY-MM-DD".to_string()))?;
        if end < start {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }

        Ok(())
    }
}

/// Accepts a 3-letter alphabetic code in any case, surrounding blanks ignored.
pub(crate) fn check_currency_code(raw: &str) -> Result<()> {
    let currency = raw.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::Validation(format!(
            "currency '{}' must be a 3-letter code",
            raw
        )));
    }
    Ok(())
}
