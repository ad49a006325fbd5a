// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip expense model for storage and API.
//!
//! Expenses are spending recorded against a trip that is not tied to a
//! scheduled activity (taxis, snacks, SIM cards).

use crate::error::{AppError, Result};
use crate::models::trip::check_currency_code;
use crate::time_utils::parse_calendar_date;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Expense {
    /// Expense ID (also used as document ID)
    pub id: String,
    pub trip_id: String,
    pub amount: f64,
    /// Upper-case ISO code
    pub currency: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date (`YYYY-MM-DD`)
    pub date: String,
    pub created_at: String,
}

impl Expense {
    /// Build a new expense. A missing currency falls back to `trip_currency`.
    pub fn new(trip_id: &str, trip_currency: &str, details: ExpenseDetails, now: &str) -> Self {
        let currency = details
            .currency
            .as_deref()
            .unwrap_or(trip_currency)
            .trim()
            .to_ascii_uppercase();

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            amount: details.amount,
            currency,
            category: details.category.trim().to_string(),
            description: details.description,
            date: details.date,
            created_at: now.to_string(),
        }
    }
}

/// Expense form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExpenseDetails {
    #[validate(range(min = 0.0))]
    pub amount: f64,
    /// Defaults to the trip currency
    #[serde(default)]
    pub currency: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub date: String,
}

impl ExpenseDetails {
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if !self.amount.is_finite() {
            return Err(AppError::Validation("amount must be a number".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::Validation(
                "category must not be blank".to_string(),
            ));
        }
        if let Some(currency) = self.currency.as_deref() {
            check_currency_code(currency)?;
        }
        if parse_calendar_date(&self.date).is_none() {
            return Err(AppError::Validation(format!(
                "date '{}' must be YYYY-MM-DD",
                self.date
            )));
        }

        Ok(())
    }
}
