// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip budget overview.
//!
//! Spending is the sum of activity prices plus recorded expenses. Activity
//! prices are in the trip currency. Expenses in another currency are not
//! converted; they are left out of the totals and counted separately.

use crate::models::{Activity, Expense, Trip};
use serde::Serialize;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BudgetSummary {
    pub trip_id: String,
    pub currency: String,
    pub total_budget: f64,
    pub activity_spent: f64,
    pub expense_spent: f64,
    /// `activity_spent + expense_spent`
    pub spent: f64,
    /// Negative when over budget
    pub remaining: f64,
    pub activity_count: u32,
    pub expense_count: u32,
    /// Expenses skipped because they are not in the trip currency
    pub foreign_expense_count: u32,
    /// Expense totals per category, largest first
    pub by_category: Vec<CategoryTotal>,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

impl BudgetSummary {
    /// Summarize spending for `trip`. Rows of other trips are ignored.
    pub fn for_trip(trip: &Trip, activities: &[Activity], expenses: &[Expense]) -> Self {
        let (activity_spent, activity_count) = activities
            .iter()
            .filter(|a| a.trip_id == trip.id)
            .fold((0.0, 0u32), |(sum, count), a| (sum + a.price, count + 1));

        let mut expense_spent = 0.0;
        let mut expense_count = 0u32;
        let mut foreign_expense_count = 0u32;
        let mut categories: HashMap<&str, f64> = HashMap::new();
        for expense in expenses.iter().filter(|e| e.trip_id == trip.id) {
            if !expense.currency.eq_ignore_ascii_case(&trip.currency) {
                foreign_expense_count += 1;
                continue;
            }
            expense_spent += expense.amount;
            expense_count += 1;
            *categories.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
        }

        let mut by_category: Vec<CategoryTotal> = categories
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.to_string(),
                amount,
            })
            .collect();
        by_category.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        let spent = activity_spent + expense_spent;
        let remaining = trip.total_budget - spent;

        Self {
            trip_id: trip.id.clone(),
            currency: trip.currency.clone(),
            total_budget: trip.total_budget,
            activity_spent,
            expense_spent,
            spent,
            remaining,
            activity_count,
            expense_count,
            foreign_expense_count,
            by_category,
            over_budget: remaining < 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityDetails, ExpenseDetails, TripDetails};

    fn trip(budget: f64) -> Trip {
        Trip::new(
            TripDetails {
                name: "Thailand".to_string(),
                destination: "Bangkok".to_string(),
                start_date: "2024-06-01".to_string(),
                end_date: "2024-06-07".to_string(),
                currency: "THB".to_string(),
                total_budget: budget,
                is_public: false,
            },
            "2024-01-01T00:00:00Z",
        )
    }

    fn activity(trip_id: &str, price: f64, order: u32) -> Activity {
        Activity::new(
            trip_id,
            ActivityDetails {
                title: format!("Activity {}", order),
                price,
                ..Default::default()
            },
            order,
            "2024-01-01T00:00:00Z",
        )
    }

    fn expense(trip_id: &str, category: &str, amount: f64, currency: Option<&str>) -> Expense {
        Expense::new(
            trip_id,
            "THB",
            ExpenseDetails {
                amount,
                currency: currency.map(str::to_string),
                category: category.to_string(),
                description: None,
                date: "2024-06-02".to_string(),
            },
            "2024-01-01T00:00:00Z",
        )
    }

    #[test]
    fn test_budget_sums_prices() {
        let trip = trip(1000.0);
        let activities = vec![activity(&trip.id, 250.0, 0), activity(&trip.id, 100.5, 1)];

        let summary = BudgetSummary::for_trip(&trip, &activities, &[]);

        assert_eq!(summary.spent, 350.5);
        assert_eq!(summary.remaining, 649.5);
        assert_eq!(summary.activity_count, 2);
        assert_eq!(summary.currency, "THB");
        assert!(summary.by_category.is_empty());
        assert!(!summary.over_budget);
    }

    #[test]
    fn test_budget_ignores_other_trips() {
        let trip = trip(100.0);
        let activities = vec![activity(&trip.id, 40.0, 0), activity("other", 500.0, 0)];
        let expenses = vec![expense("other", "Food", 80.0, None)];

        let summary = BudgetSummary::for_trip(&trip, &activities, &expenses);

        assert_eq!(summary.spent, 40.0);
        assert_eq!(summary.activity_count, 1);
        assert_eq!(summary.expense_count, 0);
    }

    #[test]
    fn test_expenses_add_to_spent_by_category() {
        let trip = trip(1000.0);
        let activities = vec![activity(&trip.id, 300.0, 0)];
        let expenses = vec![
            expense(&trip.id, "Food", 120.0, None),
            expense(&trip.id, "Transport", 200.0, Some("thb")),
            expense(&trip.id, "Food", 90.0, None),
        ];

        let summary = BudgetSummary::for_trip(&trip, &activities, &expenses);

        assert_eq!(summary.activity_spent, 300.0);
        assert_eq!(summary.expense_spent, 410.0);
        assert_eq!(summary.spent, 710.0);
        assert_eq!(summary.remaining, 290.0);
        assert_eq!(summary.expense_count, 3);
        assert_eq!(
            summary.by_category,
            vec![
                CategoryTotal {
                    category: "Food".to_string(),
                    amount: 210.0
                },
                CategoryTotal {
                    category: "Transport".to_string(),
                    amount: 200.0
                },
            ]
        );
    }

    #[test]
    fn test_foreign_currency_expenses_are_counted_not_summed() {
        let trip = trip(100.0);
        let expenses = vec![
            expense(&trip.id, "Food", 10.0, None),
            expense(&trip.id, "Souvenirs", 50.0, Some("USD")),
        ];

        let summary = BudgetSummary::for_trip(&trip, &[], &expenses);

        assert_eq!(summary.spent, 10.0);
        assert_eq!(summary.expense_count, 1);
        assert_eq!(summary.foreign_expense_count, 1);
        assert_eq!(summary.by_category.len(), 1);
    }

    #[test]
    fn test_over_budget() {
        let trip = trip(100.0);
        let activities = vec![activity(&trip.id, 80.0, 0)];
        let expenses = vec![expense(&trip.id, "Food", 40.0, None)];

        let summary = BudgetSummary::for_trip(&trip, &activities, &expenses);

        assert_eq!(summary.remaining, -20.0);
        assert!(summary.over_budget);
    }

    #[test]
    fn test_empty_trip_budget() {
        let trip = trip(0.0);
        let summary = BudgetSummary::for_trip(&trip, &[], &[]);
        assert_eq!(summary.spent, 0.0);
        assert_eq!(summary.activity_count, 0);
        assert!(!summary.over_budget);
    }
}
