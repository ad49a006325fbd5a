// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense API tests: record, list, delete and trip scoping.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use trip_planner::db::ExpenseStore;

mod common;
use common::{json_body, seed_trip};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_expense_defaults_to_trip_currency() {
    let (app, state) = common::create_test_app();
    let trip = seed_trip(&state.db, "Trip").await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/trips/{}/expenses", trip.id),
            json!({
                "amount": 12.5,
                "category": "Food",
                "description": "Bun cha",
                "date": "2024-05-02"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["trip_id"], trip.id.as_str());

    let id = json["id"].as_str().unwrap();
    assert!(state.db.get_expense(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_expense_rejects_bad_input() {
    let (app, state) = common::create_test_app();
    let trip = seed_trip(&state.db, "Trip").await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/trips/{}/expenses", trip.id),
            json!({ "amount": -4.0, "category": "Food", "date": "2024-05-02" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.db.expense_count(), 0);
}

#[tokio::test]
async fn test_create_expense_for_missing_trip() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/trips/nope/expenses",
            json!({ "amount": 4.0, "category": "Food", "date": "2024-05-02" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.db.expense_count(), 0);
}

#[tokio::test]
async fn test_list_expenses_newest_first() {
    let (app, state) = common::create_test_app();
    let trip = seed_trip(&state.db, "Trip").await;
    let uri = format!("/api/trips/{}/expenses", trip.id);

    for (category, date) in [("Food", "2024-05-01"), ("Taxi", "2024-05-03"), ("SIM", "2024-05-02")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                json!({ "amount": 5.0, "category": category, "date": date }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let categories: Vec<&str> = json["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Taxi", "SIM", "Food"]);
}

#[tokio::test]
async fn test_delete_expense() {
    let (app, state) = common::create_test_app();
    let trip = seed_trip(&state.db, "Trip").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/trips/{}/expenses", trip.id),
            json!({ "amount": 9.0, "category": "Laundry", "date": "2024-05-02" }),
        ))
        .await
        .unwrap();
    let id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/trips/{}/expenses/{}", trip.id, id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.db.expense_count(), 0);
}

#[tokio::test]
async fn test_delete_expense_of_other_trip_is_not_found() {
    let (app, state) = common::create_test_app();
    let trip = seed_trip(&state.db, "Mine").await;
    let other = seed_trip(&state.db, "Theirs").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/trips/{}/expenses", other.id),
            json!({ "amount": 9.0, "category": "Hotel", "date": "2024-05-02" }),
        ))
        .await
        .unwrap();
    let id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/trips/{}/expenses/{}", trip.id, id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.db.expense_count(), 1);
}
