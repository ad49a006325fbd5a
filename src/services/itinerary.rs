// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary grouping.
//!
//! Pure functions over already-fetched activities; nothing here touches the
//! store.

use crate::models::{Activity, Itinerary, ItineraryDay};
use std::collections::HashMap;

/// Bucket activities by their `date` value.
///
/// The key is compared verbatim: no timezone or format normalization, and
/// undated (`None`) or empty-string dates get their own buckets. Activities
/// keep their input order inside a day, and days appear in the order their
/// first activity was seen. Sort the input first (see [`chronological`]) for
/// a date-ordered itinerary.
pub fn group_by_date(activities: &[Activity]) -> Itinerary {
    let mut days: Vec<ItineraryDay> = Vec::new();
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();

    for activity in activities {
        let slot = *index.entry(activity.date.as_deref()).or_insert_with(|| {
            days.push(ItineraryDay {
                date: activity.date.clone(),
                activities: Vec::new(),
            });
            days.len() - 1
        });
        days[slot].activities.push(activity.clone());
    }

    Itinerary { days }
}

/// Stable sort by `(date, start_time)`. Missing values sort first.
pub fn chronological(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
    activities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(id: &str, date: Option<&str>, start: Option<&str>, order: u32) -> Activity {
        Activity {
            id: id.to_string(),
            trip_id: "trip".to_string(),
            title: format!("Activity {}", id),
            description: None,
            date: date.map(str::to_string),
            start_time: start.map(str::to_string),
            end_time: None,
            location: String::new(),
            price: 0.0,
            order,
            itinerary_id: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn ids(day: &ItineraryDay) -> Vec<&str> {
        day.activities.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_date(&[]).is_empty());
    }

    #[test]
    fn test_groups_preserve_input_order() {
        let activities = vec![
            activity("1", Some("2024-05-01"), None, 0),
            activity("2", Some("2024-05-02"), None, 1),
            activity("3", Some("2024-05-01"), None, 2),
        ];

        let itinerary = group_by_date(&activities);

        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.days[0].date.as_deref(), Some("2024-05-01"));
        assert_eq!(ids(&itinerary.days[0]), vec!["1", "3"]);
        assert_eq!(itinerary.days[1].date.as_deref(), Some("2024-05-02"));
        assert_eq!(ids(&itinerary.days[1]), vec!["2"]);
    }

    #[test]
    fn test_days_in_first_encounter_order() {
        let activities = vec![
            activity("a", Some("2024-05-03"), None, 0),
            activity("b", Some("2024-05-01"), None, 1),
            activity("c", Some("2024-05-03"), None, 2),
        ];

        let dates: Vec<_> = group_by_date(&activities)
            .days
            .into_iter()
            .map(|d| d.date)
            .collect();

        assert_eq!(
            dates,
            vec![Some("2024-05-03".to_string()), Some("2024-05-01".to_string())]
        );
    }

    #[test]
    fn test_missing_and_empty_dates_are_separate_buckets() {
        let activities = vec![
            activity("1", None, None, 0),
            activity("2", Some(""), None, 1),
            activity("3", None, None, 2),
        ];

        let itinerary = group_by_date(&activities);

        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(ids(itinerary.day(None).unwrap()), vec!["1", "3"]);
        assert_eq!(ids(itinerary.day(Some("")).unwrap()), vec!["2"]);
    }

    #[test]
    fn test_no_date_normalization() {
        let activities = vec![
            activity("1", Some("2024-05-01"), None, 0),
            activity("2", Some("2024-05-01T00:00:00Z"), None, 1),
        ];

        assert_eq!(group_by_date(&activities).days.len(), 2);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let activities = vec![
            activity("1", Some("2024-05-01"), None, 0),
            activity("2", None, None, 1),
            activity("3", Some("2024-05-01"), None, 2),
        ];

        assert_eq!(group_by_date(&activities), group_by_date(&activities));
    }

    #[test]
    fn test_chronological_sorts_by_date_then_time() {
        let activities = vec![
            activity("late", Some("2024-05-01"), Some("18:00"), 0),
            activity("next-day", Some("2024-05-02"), Some("08:00"), 1),
            activity("early", Some("2024-05-01"), Some("07:30"), 2),
            activity("undated", None, None, 3),
        ];

        let sorted: Vec<String> = chronological(activities)
            .into_iter()
            .map(|a| a.id)
            .collect();

        assert_eq!(sorted, vec!["undated", "early", "late", "next-day"]);
    }
}
