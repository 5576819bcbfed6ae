use chrono::NaiveDate;

use crate::assessment::domain::{HistoryEntry, RawJobRecord, UserPreferences};
use crate::assessment::normalize::NormalizedFields;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Established client: every client dimension is favorable.
pub(super) fn trusted_client_record() -> RawJobRecord {
    RawJobRecord {
        job_title: text("Rust backend engineer for payments API"),
        full_job_description: text("Build and maintain an axum service."),
        job_type: text("Hourly"),
        budget_or_rate: text("$25.00 - $45.00"),
        job_age: text("Posted 20 minutes ago"),
        proposals_count: text("Less than 5"),
        interviewing: text("0"),
        invites_sent: text("2"),
        hires: text("0"),
        required_connects: text("12"),
        available_connects: text("80"),
        experience_level: text("Intermediate"),
        payment_verified: text("Yes"),
        client_location: text("Germany"),
        client_rating: text("4.8"),
        client_reviews_count: text("(45 reviews)"),
        total_spent: text("$120,000"),
        client_jobs_posted: text("60"),
        open_jobs: text("2"),
        client_hire_rate: text("90%"),
        avg_hourly_rate: text("$35"),
        total_hours: text("3,400"),
        member_since: text("Member since Jun 15, 2022"),
        client_history: vec![HistoryEntry {
            project_title: text("Payments reconciliation"),
            freelancer_name: text("Dana K."),
            date: text("Jan 2025 - Mar 2025"),
            price: text("$40.00 /hr"),
            feedback_to_freelancer: text("Great communication."),
            feedback_from_freelancer: text("Clear requirements, paid on time."),
        }],
        ..RawJobRecord::default()
    }
}

/// Brand-new, unverified client with nothing filled in.
pub(super) fn unknown_client_record() -> RawJobRecord {
    RawJobRecord {
        job_title: text("Quick scraping script"),
        job_type: text("Fixed-price"),
        budget_or_rate: text("$50.00"),
        payment_verified: text("No"),
        client_rating: text("N/A"),
        client_reviews_count: text("N/A"),
        total_spent: text("N/A"),
        client_jobs_posted: text("N/A"),
        client_hire_rate: text("N/A"),
        avg_hourly_rate: text("N/A"),
        ..RawJobRecord::default()
    }
}

/// Client with three perfect reviews and a clean hiring record.
pub(super) fn promising_client_record() -> RawJobRecord {
    RawJobRecord {
        payment_verified: text("Yes"),
        client_rating: text("5.0"),
        client_reviews_count: text("(3 reviews)"),
        total_spent: text("$800"),
        client_jobs_posted: text("3"),
        client_hire_rate: text("100%"),
        avg_hourly_rate: text("$20.00"),
        member_since: text("Member since Apr 2, 2025"),
        ..trusted_client_record()
    }
}

pub(super) fn fixed_price_record(
    budget: &str,
    client_rate: &str,
    deadline: Option<&str>,
) -> RawJobRecord {
    RawJobRecord {
        job_type: text("Fixed-price"),
        budget_or_rate: text(budget),
        avg_hourly_rate: text(client_rate),
        deadline: deadline.map(str::to_string),
        ..trusted_client_record()
    }
}

pub(super) fn fields(record: &RawJobRecord) -> NormalizedFields {
    NormalizedFields::from_raw(record, today())
}

pub(super) fn no_preferences() -> UserPreferences {
    UserPreferences::default()
}
