use chrono::NaiveDate;

use crate::assessment::domain::{AdvisoryTier, ExperienceLevel, JobKind, UserPreferences};
use crate::assessment::evaluation::rules;
use crate::assessment::normalize::ProposalBand;

use super::common::*;

#[test]
fn rating_is_never_green_with_five_or_fewer_reviews() {
    for rating in [0.0, 3.9, 4.5, 4.9, 5.0] {
        for reviews in 0..=5 {
            let verdict = rules::client_rating(Some(rating), reviews);
            assert_ne!(
                verdict.tier,
                AdvisoryTier::Green,
                "rating {rating} with {reviews} reviews"
            );
        }
    }
}

#[test]
fn rating_tiers() {
    assert_eq!(rules::client_rating(None, 40).tier, AdvisoryTier::Red);
    assert_eq!(rules::client_rating(Some(5.0), 8).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::client_rating(Some(4.7), 30).tier, AdvisoryTier::Green);
    assert_eq!(rules::client_rating(Some(4.2), 30).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::client_rating(Some(3.5), 30).tier, AdvisoryTier::Red);
}

#[test]
fn spend_tiers() {
    assert_eq!(rules::total_spent(0.0).tier, AdvisoryTier::Red);
    assert_eq!(rules::total_spent(5_000.0).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::total_spent(5_001.0).tier, AdvisoryTier::Green);
    assert!(rules::total_spent(120_000.0).message.contains("$100K"));
    assert!(rules::total_spent(40_000.0).message.contains("$35K"));
}

#[test]
fn jobs_posted_depends_on_hire_rate_for_small_clients() {
    assert_eq!(rules::jobs_posted(None, Some(90)).tier, AdvisoryTier::Red);
    assert_eq!(rules::jobs_posted(Some(3), Some(95)).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::jobs_posted(Some(3), Some(50)).tier, AdvisoryTier::Red);
    assert_eq!(rules::jobs_posted(Some(3), None).tier, AdvisoryTier::Red);
    assert_eq!(rules::jobs_posted(Some(60), Some(90)).tier, AdvisoryTier::Green);
    assert!(rules::jobs_posted(Some(20), Some(90)).is_none());
}

#[test]
fn hire_rate_tiers() {
    assert_eq!(rules::hire_rate(None, Some(10)).tier, AdvisoryTier::Red);
    assert_eq!(rules::hire_rate(Some(59), Some(10)).tier, AdvisoryTier::Red);
    assert_eq!(rules::hire_rate(Some(60), Some(10)).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::hire_rate(Some(85), Some(10)).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::hire_rate(Some(86), Some(10)).tier, AdvisoryTier::Green);
    assert_eq!(rules::hire_rate(Some(90), Some(3)).tier, AdvisoryTier::Yellow);
}

#[test]
fn tenure_boundary_at_twenty_four_months_is_green() {
    let joined = NaiveDate::from_ymd_opt(2023, 6, 15);
    assert_eq!(rules::member_tenure(None, 0).tier, AdvisoryTier::Red);
    assert_eq!(rules::member_tenure(joined, 2).tier, AdvisoryTier::Red);
    assert_eq!(rules::member_tenure(joined, 3).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::member_tenure(joined, 12).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::member_tenure(joined, 23).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::member_tenure(joined, 24).tier, AdvisoryTier::Green);
}

#[test]
fn exactly_twenty_four_months_after_joining_reads_as_green() {
    let mut record = trusted_client_record();
    record.member_since = Some("Member since Jun 15, 2023".to_string());
    let fields = fields(&record);

    assert_eq!(fields.tenure_months, 24);
    let verdict = rules::member_tenure(fields.member_since, fields.tenure_months);
    assert_eq!(verdict.tier, AdvisoryTier::Green);
}

#[test]
fn client_average_rate_tiers() {
    assert_eq!(rules::client_average_rate(0.0, false).tier, AdvisoryTier::Red);
    assert!(rules::client_average_rate(0.0, true).is_none());
    assert_eq!(rules::client_average_rate(9.99, false).tier, AdvisoryTier::Red);
    assert_eq!(rules::client_average_rate(10.0, false).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::client_average_rate(15.0, false).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::client_average_rate(15.5, false).tier, AdvisoryTier::Green);
    assert!(rules::client_average_rate(30.0, false)
        .message
        .contains("excellent"));
}

#[test]
fn hourly_rate_shifts_up_for_expert_jobs() {
    let intermediate = Some(ExperienceLevel::Intermediate);
    let expert = Some(ExperienceLevel::Expert);

    assert_eq!(rules::hourly_rate(9.0, intermediate).tier, AdvisoryTier::Red);
    assert_eq!(rules::hourly_rate(15.0, intermediate).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::hourly_rate(18.0, intermediate).tier, AdvisoryTier::Green);
    assert_eq!(rules::hourly_rate(18.0, expert).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::hourly_rate(20.0, expert).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::hourly_rate(25.0, expert).tier, AdvisoryTier::Green);
    assert!(rules::hourly_rate(35.0, None).message.starts_with("Excellent"));
}

#[test]
fn minimum_hourly_rate_upgrades_or_overrides() {
    let upgraded = rules::apply_minimum_hourly_rate(rules::hourly_rate(8.0, None), 8.0, 5.0);
    assert_eq!(upgraded.tier, AdvisoryTier::Yellow);
    assert!(upgraded.message.contains("Very low hourly rate"));
    assert!(upgraded.message.contains("meets your minimum of $5/hr"));

    let promoted = rules::apply_minimum_hourly_rate(rules::hourly_rate(12.0, None), 12.0, 10.0);
    assert_eq!(promoted.tier, AdvisoryTier::Green);

    let rejected = rules::apply_minimum_hourly_rate(rules::hourly_rate(25.0, None), 25.0, 30.0);
    assert_eq!(rejected.tier, AdvisoryTier::Red);
    assert!(rejected.message.contains("Good hourly rate"));
    assert!(rejected.message.contains("below your minimum of $30/hr"));

    let unset = rules::apply_minimum_hourly_rate(rules::hourly_rate(12.0, None), 12.0, 0.0);
    assert_eq!(unset.tier, AdvisoryTier::Yellow);
}

#[test]
fn job_rate_uses_upper_bound_and_preferences() {
    let fields = fields(&trusted_client_record());
    let preferences = UserPreferences {
        min_hourly_rate: 50.0,
        ..UserPreferences::default()
    };

    assert_eq!(
        rules::job_rate(&fields, &no_preferences()).tier,
        AdvisoryTier::Green
    );
    assert_eq!(
        rules::job_rate(&fields, &preferences).tier,
        AdvisoryTier::Red
    );
}

#[test]
fn proposal_competition() {
    let band = |low, high| Some(ProposalBand { low, high });

    assert_eq!(rules::proposals(band(0, Some(4))).tier, AdvisoryTier::Green);
    assert_eq!(rules::proposals(band(5, Some(10))).tier, AdvisoryTier::Green);
    assert_eq!(rules::proposals(band(10, Some(15))).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::proposals(band(20, Some(50))).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::proposals(band(50, None)).tier, AdvisoryTier::Red);
    assert!(rules::proposals(None).is_none());
}

#[test]
fn connects_cost() {
    assert_eq!(rules::connects(Some(15), None).tier, AdvisoryTier::Green);
    assert_eq!(rules::connects(Some(16), None).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::connects(Some(22), None).tier, AdvisoryTier::Yellow);
    assert_eq!(rules::connects(Some(23), None).tier, AdvisoryTier::Red);
    assert!(rules::connects(None, Some(40)).is_none());

    let short = rules::connects(Some(10), Some(4));
    assert_eq!(short.tier, AdvisoryTier::Red);
    assert!(short.message.starts_with("Not enough connects"));
}

#[test]
fn job_age_and_hires() {
    assert_eq!(rules::job_age(Some(0)).tier, AdvisoryTier::Green);
    assert_eq!(rules::job_age(Some(60)).tier, AdvisoryTier::Green);
    assert!(rules::job_age(Some(61)).is_none());
    assert!(rules::job_age(Some(24 * 60)).is_none());
    assert_eq!(rules::job_age(Some(2 * 24 * 60)).tier, AdvisoryTier::Red);

    assert_eq!(rules::hires(Some(1)).tier, AdvisoryTier::Red);
    assert!(rules::hires(Some(0)).is_none());
}

#[test]
fn vague_recent_posting_reads_as_fresh() {
    let mut record = trusted_client_record();
    record.job_age = Some("Posted a few minutes ago".to_string());
    let fields = fields(&record);

    assert_eq!(fields.posted_age_minutes, Some(3));
    assert_eq!(
        rules::job_age(fields.posted_age_minutes).tier,
        AdvisoryTier::Green
    );
}

#[test]
fn experience_and_job_type_match() {
    use ExperienceLevel::{Entry, Expert, Intermediate};

    assert_eq!(
        rules::experience_match(Some(Entry), Some(Expert)).tier,
        AdvisoryTier::Red
    );
    assert_eq!(
        rules::experience_match(Some(Entry), Some(Intermediate)).tier,
        AdvisoryTier::Yellow
    );
    assert_eq!(
        rules::experience_match(Some(Expert), Some(Entry)).tier,
        AdvisoryTier::Green
    );
    assert_eq!(
        rules::experience_match(Some(Intermediate), Some(Intermediate)).tier,
        AdvisoryTier::Green
    );
    assert!(rules::experience_match(None, Some(Expert)).is_none());

    assert_eq!(
        rules::job_type_match(Some(JobKind::Hourly), Some(JobKind::Hourly)).tier,
        AdvisoryTier::Green
    );
    assert_eq!(
        rules::job_type_match(Some(JobKind::Hourly), Some(JobKind::FixedPrice)).tier,
        AdvisoryTier::Red
    );
    assert!(rules::job_type_match(None, Some(JobKind::Hourly)).is_none());
}
