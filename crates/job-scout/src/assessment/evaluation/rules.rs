use chrono::NaiveDate;

use super::super::domain::{
    AdvisoryTier, DimensionVerdict, ExperienceLevel, JobKind, UserPreferences,
};
use super::super::normalize::{NormalizedFields, ProposalBand};

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * 60;

pub(crate) fn dollars(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}

pub(crate) fn join_message(base: &str, extra: &str) -> String {
    if base.is_empty() {
        extra.to_string()
    } else {
        format!("{base}; {extra}")
    }
}

fn is_perfect(rating: f64) -> bool {
    (rating - 5.0).abs() < f64::EPSILON
}

pub(crate) fn payment_verified(verified: bool) -> DimensionVerdict {
    if verified {
        DimensionVerdict::green("Payment method verified")
    } else {
        DimensionVerdict::red("Payment method not verified")
    }
}

/// Too few reviews is RED regardless of the rating itself.
pub(crate) fn client_rating(rating: Option<f64>, reviews: u32) -> DimensionVerdict {
    let Some(rating) = rating else {
        return DimensionVerdict::red("Client has no rating yet");
    };

    if reviews <= 5 {
        DimensionVerdict::red(format!(
            "Rating {rating:.1} rests on only {reviews} review(s)"
        ))
    } else if is_perfect(rating) && reviews < 10 {
        DimensionVerdict::yellow(format!(
            "Perfect 5.0 rating but only {reviews} reviews"
        ))
    } else if rating >= 4.5 {
        DimensionVerdict::green(format!(
            "Strong rating {rating:.2} across {reviews} reviews"
        ))
    } else if rating >= 4.0 {
        DimensionVerdict::yellow(format!("Average rating {rating:.2}"))
    } else {
        DimensionVerdict::red(format!("Poor rating {rating:.2}"))
    }
}

pub(crate) fn total_spent(spent: f64) -> DimensionVerdict {
    if spent <= 0.0 {
        DimensionVerdict::red("Client has not spent anything yet")
    } else if spent <= 5_000.0 {
        DimensionVerdict::yellow(format!("Client has spent only {}", dollars(spent)))
    } else if spent > 100_000.0 {
        DimensionVerdict::green("Client has spent over $100K")
    } else if spent > 35_000.0 {
        DimensionVerdict::green("Client has spent over $35K")
    } else {
        DimensionVerdict::green("Client has spent over $5K")
    }
}

pub(crate) fn jobs_posted(jobs: Option<u32>, hire_rate: Option<u32>) -> DimensionVerdict {
    let Some(jobs) = jobs else {
        return DimensionVerdict::red("Number of jobs posted is unknown");
    };

    if jobs <= 5 {
        return match hire_rate {
            Some(rate) if rate >= 90 => DimensionVerdict::yellow(format!(
                "Only {jobs} job(s) posted, though {rate}% led to a hire"
            )),
            Some(rate) => DimensionVerdict::red(format!(
                "Only {jobs} job(s) posted with a {rate}% hire rate"
            )),
            None => DimensionVerdict::red(format!(
                "Only {jobs} job(s) posted and the hire rate is unknown"
            )),
        };
    }

    match hire_rate {
        Some(rate) if jobs > 50 && rate > 85 => DimensionVerdict::green(format!(
            "{jobs} jobs posted with a {rate}% hire rate"
        )),
        _ => DimensionVerdict::none(),
    }
}

pub(crate) fn hire_rate(hire_rate: Option<u32>, jobs: Option<u32>) -> DimensionVerdict {
    let Some(rate) = hire_rate else {
        return DimensionVerdict::red("Hire rate is unknown");
    };

    if rate < 60 {
        return DimensionVerdict::red(format!("Low hire rate ({rate}%)"));
    }
    if rate <= 85 {
        return DimensionVerdict::yellow(format!("Moderate hire rate ({rate}%)"));
    }

    match jobs {
        Some(jobs) if jobs > 5 => {
            DimensionVerdict::green(format!("High hire rate ({rate}%) over {jobs} jobs"))
        }
        Some(jobs) => DimensionVerdict::yellow(format!(
            "High hire rate ({rate}%) but only {jobs} job(s) posted"
        )),
        None => DimensionVerdict::yellow(format!(
            "High hire rate ({rate}%) over an unknown number of jobs"
        )),
    }
}

pub(crate) fn member_tenure(member_since: Option<NaiveDate>, months: u32) -> DimensionVerdict {
    if member_since.is_none() {
        return DimensionVerdict::red("Join date is unknown");
    }

    match months {
        0..=2 => DimensionVerdict::red(format!("New member ({months} month(s))")),
        3..=12 => DimensionVerdict::yellow(format!("Member for {months} months")),
        13..=23 => DimensionVerdict::yellow(format!(
            "Member for {months} months, under two years"
        )),
        _ => DimensionVerdict::green(format!("Member for over two years ({months} months)")),
    }
}

/// Rate this client has historically paid per hour.
pub(crate) fn client_average_rate(average: f64, fixed_price_history: bool) -> DimensionVerdict {
    if average <= 0.0 {
        return if fixed_price_history {
            DimensionVerdict::none()
        } else {
            DimensionVerdict::red("Client has no hourly rate history")
        };
    }

    let paid = dollars(average);
    if average < 10.0 {
        DimensionVerdict::red(format!("Client pays a very low average of {paid}/hr"))
    } else if average <= 15.0 {
        DimensionVerdict::yellow(format!("Client pays a modest average of {paid}/hr"))
    } else if average >= 30.0 {
        DimensionVerdict::green(format!("Client pays an excellent average of {paid}/hr"))
    } else {
        DimensionVerdict::green(format!("Client pays a good average of {paid}/hr"))
    }
}

/// Rate judged against the experience the job demands. Expert jobs need more than $20/hr.
///
/// Messages always mention "hourly rate" so the fixed-price procedure can reword them.
pub fn hourly_rate(rate: f64, job_level: Option<ExperienceLevel>) -> DimensionVerdict {
    let shown = dollars(rate);
    if rate < 10.0 {
        DimensionVerdict::red(format!("Very low hourly rate ({shown}/hr)"))
    } else if rate <= 15.0 {
        DimensionVerdict::yellow(format!("Low hourly rate ({shown}/hr)"))
    } else if job_level == Some(ExperienceLevel::Expert) && rate <= 20.0 {
        DimensionVerdict::yellow(format!(
            "Low hourly rate for an expert-level job ({shown}/hr)"
        ))
    } else if rate > 30.0 {
        DimensionVerdict::green(format!("Excellent hourly rate ({shown}/hr)"))
    } else if rate > 20.0 {
        DimensionVerdict::green(format!("Good hourly rate ({shown}/hr)"))
    } else {
        DimensionVerdict::green(format!("Decent hourly rate ({shown}/hr)"))
    }
}

pub(crate) fn job_rate(fields: &NormalizedFields, preferences: &UserPreferences) -> DimensionVerdict {
    if fields.job_kind != Some(JobKind::Hourly) {
        return DimensionVerdict::none();
    }
    let Some(rate) = fields.hourly_rate else {
        return DimensionVerdict::none();
    };

    let base = hourly_rate(rate, fields.experience_level);
    apply_minimum_hourly_rate(base, rate, preferences.min_hourly_rate)
}

/// Layer the user's minimum hourly rate on top of a base verdict.
pub(crate) fn apply_minimum_hourly_rate(
    base: DimensionVerdict,
    rate: f64,
    minimum: f64,
) -> DimensionVerdict {
    if minimum <= 0.0 {
        return base;
    }

    if rate < minimum {
        let note = format!("below your minimum of {}/hr", dollars(minimum));
        return DimensionVerdict::red(join_message(&base.message, &note));
    }

    let note = format!("meets your minimum of {}/hr", dollars(minimum));
    DimensionVerdict::new(upgrade(base.tier), join_message(&base.message, &note))
}

/// One step toward GREEN.
pub(crate) fn upgrade(tier: AdvisoryTier) -> AdvisoryTier {
    match tier {
        AdvisoryTier::Red => AdvisoryTier::Yellow,
        AdvisoryTier::Yellow | AdvisoryTier::None | AdvisoryTier::Green => AdvisoryTier::Green,
    }
}

fn describe_band(band: &ProposalBand) -> String {
    match band.high {
        None => format!("{}+ proposals", band.low),
        Some(high) if band.low == 0 => format!("fewer than {} proposals", high + 1),
        Some(high) if high == band.low => format!("{high} proposals"),
        Some(high) => format!("{} to {} proposals", band.low, high),
    }
}

pub(crate) fn proposals(band: Option<ProposalBand>) -> DimensionVerdict {
    let Some(band) = band else {
        return DimensionVerdict::none();
    };

    let described = describe_band(&band);
    match band.high {
        None => DimensionVerdict::red(format!("Heavy competition ({described})")),
        Some(high) if high > 50 => DimensionVerdict::red(format!("Heavy competition ({described})")),
        Some(high) if high <= 10 => DimensionVerdict::green(format!("Low competition ({described})")),
        Some(_) => DimensionVerdict::yellow(format!("Moderate competition ({described})")),
    }
}

pub(crate) fn connects(required: Option<u32>, available: Option<u32>) -> DimensionVerdict {
    let Some(required) = required else {
        return DimensionVerdict::none();
    };

    if let Some(available) = available {
        if available < required {
            return DimensionVerdict::red(format!(
                "Not enough connects: {required} required, {available} available"
            ));
        }
    }

    if required > 22 {
        DimensionVerdict::red(format!("Expensive to apply ({required} connects)"))
    } else if required <= 15 {
        DimensionVerdict::green(format!("Affordable to apply ({required} connects)"))
    } else {
        DimensionVerdict::yellow(format!("{required} connects required"))
    }
}

pub(crate) fn job_age(age_minutes: Option<i64>) -> DimensionVerdict {
    match age_minutes {
        Some(minutes) if minutes <= MINUTES_PER_HOUR => {
            DimensionVerdict::green("Posted within the last hour")
        }
        Some(minutes) if minutes > MINUTES_PER_DAY => {
            DimensionVerdict::red("Posted more than a day ago")
        }
        _ => DimensionVerdict::none(),
    }
}

pub(crate) fn hires(count: Option<u32>) -> DimensionVerdict {
    match count {
        Some(count) if count > 0 => DimensionVerdict::red(format!(
            "Client already hired {count} freelancer(s) for this job"
        )),
        _ => DimensionVerdict::none(),
    }
}

pub(crate) fn experience_match(
    user: Option<ExperienceLevel>,
    job: Option<ExperienceLevel>,
) -> DimensionVerdict {
    let (Some(user), Some(job)) = (user, job) else {
        return DimensionVerdict::none();
    };

    match job.rank() - user.rank() {
        gap if gap >= 2 => DimensionVerdict::red(format!(
            "Job asks for {} while you are {}",
            job.label(),
            user.label()
        )),
        1 => DimensionVerdict::yellow(format!(
            "Job asks for {}, one step above your level",
            job.label()
        )),
        _ => DimensionVerdict::green(format!("Your level covers {}", job.label())),
    }
}

pub(crate) fn job_type_match(preferred: Option<JobKind>, actual: Option<JobKind>) -> DimensionVerdict {
    let (Some(preferred), Some(actual)) = (preferred, actual) else {
        return DimensionVerdict::none();
    };

    if preferred == actual {
        DimensionVerdict::green(format!("Matches your {} preference", actual.label()))
    } else {
        DimensionVerdict::red(format!(
            "{} job, but you prefer {}",
            actual.label(),
            preferred.label()
        ))
    }
}
