// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides the store operations for:
//! - Trips (one document per trip)
//! - Activities (one document per activity, filtered by `trip_id`)
//! - Expenses (one document per expense, filtered by `trip_id`)

use crate::db::{collections, ActivityStore, ExpenseStore, TripDeletion, TripStore};
use crate::error::AppError;
use crate::models::{Activity, Expense, Trip};
use firestore::errors::FirestoreError;
use firestore::{paths, FirestoreQueryDirection, FirestoreWritePrecondition};
use serde::{Deserialize, Serialize};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Partial document written when only the position changes.
#[derive(Serialize, Deserialize)]
struct OrderPatch {
    order: u32,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Write a whole new document.
    async fn set_document<T>(&self, collection: &str, doc_id: &str, object: &T) -> Result<(), AppError>
    where
        T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
    {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(doc_id)
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Overwrite a document that must already exist.
    ///
    /// A write racing a delete fails with `NotFound` instead of recreating
    /// the document.
    async fn replace_document<T>(
        &self,
        collection: &str,
        doc_id: &str,
        object: &T,
    ) -> Result<(), AppError>
    where
        T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
    {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(doc_id)
            .object(object)
            .execute()
            .await
            .map_err(|e| existing_write_error(collection, doc_id, e))?;
        Ok(())
    }

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}

// ─── Activity Operations ─────────────────────────────────────

impl ActivityStore for FirestoreDb {
    async fn insert_activity(&self, activity: &Activity) -> Result<(), AppError> {
        self.set_document(collections::ACTIVITIES, &activity.id, activity)
            .await
    }

    async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(activity_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_activity(&self, activity: &Activity) -> Result<(), AppError> {
        self.replace_document(collections::ACTIVITIES, &activity.id, activity)
            .await
    }

    async fn update_activity_order(&self, activity_id: &str, order: u32) -> Result<(), AppError> {
        // Field mask keeps the rest of the document; the precondition stops a
        // late write from resurrecting a deleted activity.
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(paths!(OrderPatch::{order}))
            .in_col(collections::ACTIVITIES)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(activity_id)
            .object(&OrderPatch { order })
            .execute()
            .await
            .map_err(|e| existing_write_error(collections::ACTIVITIES, activity_id, e))?;
        Ok(())
    }

    async fn delete_activity(&self, activity_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::ACTIVITIES)
            .document_id(activity_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_activities_for_trip(&self, trip_id: &str) -> Result<Vec<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(|q| q.for_all([q.field("trip_id").eq(trip_id)]))
            .order_by([("order", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

// ─── Trip Operations ─────────────────────────────────────────

impl TripStore for FirestoreDb {
    async fn insert_trip(&self, trip: &Trip) -> Result<(), AppError> {
        self.set_document(collections::TRIPS, &trip.id, trip).await
    }

    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRIPS)
            .obj()
            .one(trip_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_trip(&self, trip: &Trip) -> Result<(), AppError> {
        self.replace_document(collections::TRIPS, &trip.id, trip).await
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRIPS)
            .order_by([("start_date", FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<TripDeletion, AppError> {
        let activities = self.list_activities_for_trip(trip_id).await?;
        self.batch_delete(&activities, collections::ACTIVITIES, |a: &Activity| {
            a.id.clone()
        })
        .await?;

        let expenses = self.list_expenses_for_trip(trip_id).await?;
        self.batch_delete(&expenses, collections::EXPENSES, |e: &Expense| e.id.clone())
            .await?;

        let deleted = TripDeletion {
            activities: activities.len(),
            expenses: expenses.len(),
        };
        tracing::debug!(
            trip_id,
            activities = deleted.activities,
            expenses = deleted.expenses,
            "Deleted trip rows"
        );

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TRIPS)
            .document_id(trip_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            trip_id,
            deleted_activities = deleted.activities,
            deleted_expenses = deleted.expenses,
            "Trip deleted"
        );

        Ok(deleted)
    }
}

// ─── Expense Operations ──────────────────────────────────────

impl ExpenseStore for FirestoreDb {
    async fn insert_expense(&self, expense: &Expense) -> Result<(), AppError> {
        self.set_document(collections::EXPENSES, &expense.id, expense)
            .await
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::EXPENSES)
            .obj()
            .one(expense_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::EXPENSES)
            .document_id(expense_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_expenses_for_trip(&self, trip_id: &str) -> Result<Vec<Expense>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::EXPENSES)
            .filter(|q| q.for_all([q.field("trip_id").eq(trip_id)]))
            .order_by([
                ("date", FirestoreQueryDirection::Descending),
                ("created_at", FirestoreQueryDirection::Descending),
            ])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Map a failed write to a document that had to exist.
fn existing_write_error(collection: &str, doc_id: &str, err: FirestoreError) -> AppError {
    match err {
        FirestoreError::DataNotFoundError(_) => {
            AppError::NotFound(format!("{} document {}", collection, doc_id))
        }
        other => AppError::Database(other.to_string()),
    }
}
