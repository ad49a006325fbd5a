// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense routes: record, list and remove spending against a trip.

use crate::db::{ExpenseStore, TripStore};
use crate::error::{AppError, Result};
use crate::models::{Expense, ExpenseDetails};
use crate::routes::trips::require_trip;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes<S: ExpenseStore + TripStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route(
            "/api/trips/{trip_id}/expenses",
            get(list_expenses::<S>).post(create_expense::<S>),
        )
        .route(
            "/api/trips/{trip_id}/expenses/{expense_id}",
            delete(delete_expense::<S>),
        )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExpensesResponse {
    pub trip_id: String,
    /// Newest date first
    pub expenses: Vec<Expense>,
}

async fn list_expenses<S: ExpenseStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<ExpensesResponse>> {
    require_trip(&state.db, &trip_id).await?;
    let expenses = state.db.list_expenses_for_trip(&trip_id).await?;

    Ok(Json(ExpensesResponse { trip_id, expenses }))
}

async fn create_expense<S: ExpenseStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
    Json(details): Json<ExpenseDetails>,
) -> Result<(StatusCode, Json<Expense>)> {
    details.check()?;
    let trip = require_trip(&state.db, &trip_id).await?;

    let expense = Expense::new(&trip.id, &trip.currency, details, &now_rfc3339());
    state.db.insert_expense(&expense).await?;

    tracing::info!(
        trip_id = %trip.id,
        expense_id = %expense.id,
        category = %expense.category,
        "Expense recorded"
    );
    Ok((StatusCode::CREATED, Json(expense)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteExpenseResponse {
    pub success: bool,
}

async fn delete_expense<S: ExpenseStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((trip_id, expense_id)): Path<(String, String)>,
) -> Result<Json<DeleteExpenseResponse>> {
    state
        .db
        .get_expense(&expense_id)
        .await?
        .filter(|e| e.trip_id == trip_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Expense {} not found in trip {}", expense_id, trip_id))
        })?;

    state.db.delete_expense(&expense_id).await?;

    tracing::info!(trip_id = %trip_id, expense_id = %expense_id, "Expense deleted");
    Ok(Json(DeleteExpenseResponse { success: true }))
}
