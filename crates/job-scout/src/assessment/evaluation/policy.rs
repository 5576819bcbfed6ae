use super::super::domain::{ClientStatus, ScoreResult};
use super::super::normalize::NormalizedFields;
use super::rules::dollars;

const BASE_SCORE: f64 = 5.0;
const MAX_SCORE: f64 = 10.0;
const WARNING_CAP: f64 = 9.0;

/// Warnings gathered in the second pass.
#[derive(Debug, Default)]
pub(crate) struct WarningSignals {
    pub promising: bool,
    pub reasons: Vec<String>,
}

fn push_unique(reasons: &mut Vec<String>, reason: String) {
    if !reasons.contains(&reason) {
        reasons.push(reason);
    }
}

/// Job-independent score of the client behind a posting.
pub(crate) fn score_client(fields: &NormalizedFields) -> ScoreResult {
    let dangers = detect_dangers(fields);
    let warnings = detect_warnings(fields);

    if !dangers.is_empty() {
        let score = match dangers.len() {
            1 => 2.0,
            2 => 1.0,
            _ => 0.0,
        };

        let mut reasons = Vec::new();
        for reason in dangers.into_iter().chain(warnings.reasons) {
            push_unique(&mut reasons, reason);
        }

        return ScoreResult {
            score,
            status: ClientStatus::Danger,
            reasons,
        };
    }

    let status = if warnings.promising {
        ClientStatus::Promising
    } else if !warnings.reasons.is_empty() {
        ClientStatus::Warning
    } else {
        ClientStatus::Normal
    };

    let mut score = point_score(fields, warnings.promising).clamp(0.0, MAX_SCORE);
    if status == ClientStatus::Warning && score >= MAX_SCORE {
        score = WARNING_CAP;
    }

    let mut reasons = Vec::new();
    for reason in warnings.reasons {
        push_unique(&mut reasons, reason);
    }

    ScoreResult {
        score,
        status,
        reasons,
    }
}

/// Deal-breakers. Any one of them puts the client in the danger bucket.
pub(crate) fn detect_dangers(fields: &NormalizedFields) -> Vec<String> {
    let mut dangers = Vec::new();

    if !fields.payment_verified {
        dangers.push("Payment not verified".to_string());
    }
    if fields.total_spent <= 0.0 {
        dangers.push("Total spent is zero".to_string());
    }
    if fields.rating.is_none() {
        dangers.push("No rating".to_string());
    }
    match fields.hire_rate {
        None => dangers.push("No hire rate".to_string()),
        Some(0) => dangers.push("Hire rate is 0%".to_string()),
        Some(_) => {}
    }
    if fields.jobs_posted.is_none() {
        dangers.push("Jobs posted unknown".to_string());
    }
    if let (Some(rate), Some(jobs)) = (fields.hire_rate, fields.jobs_posted) {
        if rate < 70 && jobs > 5 {
            dangers.push(format!("Low hire rate ({rate}%) across {jobs} jobs"));
        }
    }
    if let Some(rating) = fields.rating {
        if rating < 4.0 {
            dangers.push(format!("Rating below 4.0 ({rating:.2})"));
        }
    }
    let average = fields.avg_hourly_rate;
    if average > 0.0 && average < 9.0 {
        dangers.push(format!(
            "Very low average hourly rate paid ({}/hr)",
            dollars(average)
        ));
    }

    dangers
}

/// A perfect-looking client with almost no reviews is one "promising" warning that
/// replaces all the others.
pub(crate) fn detect_warnings(fields: &NormalizedFields) -> WarningSignals {
    let reviews = fields.review_count;
    let average = fields.avg_hourly_rate;

    let promising = reviews <= 5
        && fields.hire_rate == Some(100)
        && fields.rating.is_some_and(|rating| rating >= 5.0)
        && average >= 10.0;
    if promising {
        return WarningSignals {
            promising: true,
            reasons: vec![format!(
                "Promising new client: perfect record but only {reviews} review(s), so the outcome is still uncertain"
            )],
        };
    }

    let mut reasons = Vec::new();

    let spent = fields.total_spent;
    if spent > 0.0 && spent < 5_000.0 {
        reasons.push(format!("Low total spend ({})", dollars(spent)));
    }

    let weak_rating = fields
        .rating
        .filter(|rating| (4.0..=4.6).contains(rating));
    let few_reviews = reviews > 0 && reviews < 10;
    match (weak_rating, few_reviews) {
        (Some(rating), true) => reasons.push(format!(
            "Mediocre rating ({rating:.2}) from only {reviews} review(s)"
        )),
        (Some(rating), false) => reasons.push(format!("Mediocre rating ({rating:.2})")),
        (None, true) => reasons.push(format!("Only {reviews} review(s)")),
        (None, false) => {}
    }

    match (fields.hire_rate, fields.jobs_posted) {
        (Some(rate), _) if (60..=85).contains(&rate) => {
            reasons.push(format!("Moderate hire rate ({rate}%)"))
        }
        (Some(rate), Some(jobs)) if rate > 85 && jobs <= 5 => reasons.push(format!(
            "High hire rate ({rate}%) but only {jobs} job(s) posted"
        )),
        _ => {}
    }

    if let Some(jobs) = fields.jobs_posted {
        if jobs <= 5 {
            reasons.push(format!("Few jobs posted ({jobs})"));
        }
    }

    if (9.0..10.0).contains(&average) {
        reasons.push(format!(
            "Low average hourly rate paid ({}/hr)",
            dollars(average)
        ));
    } else if (10.0..15.0).contains(&average) {
        reasons.push(format!(
            "Average hourly rate paid is acceptable but not high ({}/hr)",
            dollars(average)
        ));
    }

    if fields.tenure_months < 3 {
        reasons.push("New member (less than 3 months)".to_string());
    }

    WarningSignals {
        promising: false,
        reasons,
    }
}

/// Point adjustments around the base score. Only used when there are no deal-breakers.
pub(crate) fn point_score(fields: &NormalizedFields, promising: bool) -> f64 {
    let mut score = BASE_SCORE;
    let reviews = fields.review_count;

    if fields.payment_verified {
        score += 1.5;
    }

    match fields.rating {
        Some(rating) if rating >= 4.9 && reviews >= 20 => score += 2.0,
        Some(rating) if rating >= 4.7 && reviews >= 10 => score += 1.0,
        Some(rating) if rating < 4.5 => score -= 1.5,
        _ => {}
    }

    if reviews < 5 && !promising {
        score -= 1.0;
    }

    let spent = fields.total_spent;
    if spent > 50_000.0 {
        score += 1.5;
    } else if spent > 10_000.0 {
        score += 1.0;
    } else if spent > 5_000.0 {
        score += 0.5;
    } else if !promising {
        score -= 1.0;
    }

    match (fields.hire_rate, fields.jobs_posted) {
        (Some(rate), Some(jobs)) if rate >= 80 && jobs >= 10 => score += 1.0,
        (Some(rate), _) if rate >= 50 => score += 0.5,
        _ => {}
    }

    if fields.tenure_months > 24 {
        score += 1.0;
    } else if fields.tenure_months > 12 {
        score += 0.5;
    }

    let average = fields.avg_hourly_rate;
    if average > 40.0 {
        score += 1.0;
    } else if (10.0..15.0).contains(&average) {
        score -= 1.0;
    } else if average > 0.0 && average < 10.0 {
        score -= 1.5;
    } else if average <= 0.0 && !fields.fixed_price_history {
        score -= 1.5;
    }

    score
}
