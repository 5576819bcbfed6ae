use chrono::NaiveDate;

use super::super::domain::{DimensionVerdict, ExperienceLevel, JobKind, UserPreferences};
use super::super::normalize::NormalizedFields;
use super::config::EvaluationConfig;
use super::rules::{dollars, hourly_rate, join_message, upgrade};

/// Budget verdict for fixed-price jobs, with the user's minimum price layered on top.
pub(crate) fn fixed_budget(
    fields: &NormalizedFields,
    preferences: &UserPreferences,
    config: &EvaluationConfig,
    today: NaiveDate,
) -> DimensionVerdict {
    if fields.job_kind != Some(JobKind::FixedPrice) || fields.fixed_budget <= 0.0 {
        return DimensionVerdict::none();
    }

    let base = budget_verdict(fields, preferences, config, today);
    apply_minimum_fixed_price(base, fields.fixed_budget, preferences.min_fixed_price)
}

/// First matching rule wins: suspicious budget, deadline-implied rate, high budget.
fn budget_verdict(
    fields: &NormalizedFields,
    preferences: &UserPreferences,
    config: &EvaluationConfig,
    today: NaiveDate,
) -> DimensionVerdict {
    let budget = fields.fixed_budget;
    let client_rate = fields.avg_hourly_rate;

    if budget >= config.suspicious_budget_floor
        && client_rate > 0.0
        && client_rate <= config.suspicious_client_rate_ceiling
    {
        return DimensionVerdict::yellow(format!(
            "Budget of {} looks high relative to what this client typically pays per hour ({}/hr); verify project duration",
            dollars(budget),
            dollars(client_rate)
        ));
    }

    if let Some(deadline) = fields.deadline {
        let duration_days = (deadline - today).num_days().max(1);

        if duration_days > config.long_deadline_days {
            match preferences.experience_level {
                Some(ExperienceLevel::Entry) => {
                    return DimensionVerdict::green(format!(
                        "Long deadline ({duration_days} days) suits an entry-level pace"
                    ))
                }
                Some(ExperienceLevel::Intermediate) => {
                    return DimensionVerdict::yellow(format!(
                        "Long deadline ({duration_days} days); check the scope justifies {}",
                        dollars(budget)
                    ))
                }
                _ => {}
            }
        }

        let hours = duration_days as f64 * config.working_hours_per_day;
        let implied = budget / hours;
        let delegated = hourly_rate(implied, fields.experience_level);
        let message = format!(
            "{} over {duration_days} day(s) at {} hours/day",
            delegated
                .message
                .replace("hourly rate", "price")
                .replace("($", "(implied $"),
            config.working_hours_per_day
        );
        return DimensionVerdict::new(delegated.tier, message);
    }

    if budget >= config.high_budget_floor {
        return DimensionVerdict::green(format!(
            "High and excellent price ({}), but verify project duration",
            dollars(budget)
        ));
    }

    DimensionVerdict::none()
}

/// Meeting the minimum moves the verdict one step toward GREEN; missing it is appended to
/// the message without hiding the underlying tier.
pub(crate) fn apply_minimum_fixed_price(
    base: DimensionVerdict,
    budget: f64,
    minimum: f64,
) -> DimensionVerdict {
    if minimum <= 0.0 {
        return base;
    }

    if budget >= minimum {
        let note = format!("meets your minimum fixed price of {}", dollars(minimum));
        DimensionVerdict::new(upgrade(base.tier), join_message(&base.message, &note))
    } else {
        let note = format!("below your minimum fixed price of {}", dollars(minimum));
        DimensionVerdict::new(base.tier, join_message(&base.message, &note))
    }
}
