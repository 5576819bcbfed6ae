use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{ExperienceLevel, JobKind, RawJobRecord, NOT_AVAILABLE};

const DATE_LABELS: [&str; 5] = ["member since", "deadline:", "deadline", "due date:", "due"];
const DAY_FORMATS: [&str; 5] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d %b %Y"];
const MONTH_FORMATS: [&str; 2] = ["%d %b %Y", "%d %B %Y"];

/// Bracket of proposals reported by the marketplace ("5 to 10", "50+").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalBand {
    pub low: u32,
    /// Inclusive upper bound; `None` for open-ended bands.
    pub high: Option<u32>,
}

/// Typed view of a [`RawJobRecord`], built once per evaluation.
///
/// Unknown counts, rates and ratings are `None`. Money totals that are meaningfully zero
/// when absent (spend, client average rate, fixed budget) use `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedFields {
    pub job_kind: Option<JobKind>,
    pub hourly_rate: Option<f64>,
    pub hourly_rate_floor: Option<f64>,
    pub fixed_budget: f64,
    pub posted_age_minutes: Option<i64>,
    pub deadline: Option<NaiveDate>,
    pub proposals: Option<ProposalBand>,
    pub interviewing: Option<u32>,
    pub invites_sent: Option<u32>,
    pub hires: Option<u32>,
    pub required_connects: Option<u32>,
    pub available_connects: Option<u32>,
    pub experience_level: Option<ExperienceLevel>,
    pub payment_verified: bool,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub total_spent: f64,
    pub jobs_posted: Option<u32>,
    pub open_jobs: Option<u32>,
    pub hire_rate: Option<u32>,
    pub avg_hourly_rate: f64,
    pub total_hours: Option<u32>,
    pub member_since: Option<NaiveDate>,
    pub tenure_months: u32,
    pub fixed_price_history: bool,
}

impl NormalizedFields {
    pub fn from_raw(record: &RawJobRecord, today: NaiveDate) -> Self {
        let text = |value: &Option<String>| RawJobRecord::display(value).to_string();

        let job_kind = parse_job_kind(&text(&record.job_type));
        let budget_text = text(&record.budget_or_rate);
        let (hourly_rate_floor, hourly_rate) = match job_kind {
            Some(JobKind::Hourly) => match parse_rate_range(&budget_text) {
                Some((low, high)) => (Some(low), Some(high)),
                None => (None, None),
            },
            _ => (None, None),
        };
        let fixed_budget = match job_kind {
            Some(JobKind::FixedPrice) => parse_money(&budget_text),
            _ => 0.0,
        };

        let total_spent = parse_money(&text(&record.total_spent));
        let total_hours = parse_count(&text(&record.total_hours));
        let member_since = parse_calendar_date(&text(&record.member_since));

        let fixed_price_history = record.client_history.iter().any(|entry| {
            let price = RawJobRecord::display(&entry.price);
            let lowered = price.to_ascii_lowercase();
            parse_money(price) > 0.0 && !lowered.contains("/hr") && !lowered.contains("hourly")
        }) || (total_spent > 0.0 && total_hours.unwrap_or(0) == 0);

        Self {
            job_kind,
            hourly_rate,
            hourly_rate_floor,
            fixed_budget,
            posted_age_minutes: parse_posted_age(&text(&record.job_age))
                .map(|age| age.num_minutes()),
            deadline: parse_calendar_date(&text(&record.deadline)),
            proposals: parse_proposal_band(&text(&record.proposals_count)),
            interviewing: parse_count(&text(&record.interviewing)),
            invites_sent: parse_count(&text(&record.invites_sent)),
            hires: parse_count(&text(&record.hires)),
            required_connects: parse_count(&text(&record.required_connects)),
            available_connects: parse_count(&text(&record.available_connects)),
            experience_level: parse_experience_level(&text(&record.experience_level)),
            payment_verified: parse_payment_verified(&text(&record.payment_verified)),
            rating: parse_rating(&text(&record.client_rating)),
            review_count: parse_review_count(&text(&record.client_reviews_count)),
            total_spent,
            jobs_posted: parse_count(&text(&record.client_jobs_posted)),
            open_jobs: parse_count(&text(&record.open_jobs)),
            hire_rate: parse_percentage(&text(&record.client_hire_rate)),
            avg_hourly_rate: parse_money(&text(&record.avg_hourly_rate)),
            total_hours,
            member_since,
            tenure_months: member_since
                .map(|joined| tenure_months_between(joined, today))
                .unwrap_or(0),
            fixed_price_history,
        }
    }
}

fn meaningful(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE) {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse a money string such as `"$1,000"`, `"2.5K"` or `"$1M+"`.
///
/// Every character except digits and `.` is dropped before parsing. A `K` or `M` directly
/// after the number scales it by a thousand or a million; the two are exclusive. Absent,
/// `"N/A"` and unparseable input yield `0.0`.
pub fn parse_money(text: &str) -> f64 {
    let Some(text) = meaningful(text) else {
        return 0.0;
    };

    let digits: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    match digits.parse::<f64>() {
        Ok(amount) => amount * magnitude(text),
        Err(_) => 0.0,
    }
}

fn magnitude(text: &str) -> f64 {
    let mut chars = text
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .skip_while(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == ',')
        .skip_while(|ch| ch.is_whitespace());

    let unit = chars.next();
    if chars.next().is_some_and(|ch| ch.is_alphabetic()) {
        return 1.0;
    }

    match unit {
        Some('k' | 'K') => 1_000.0,
        Some('m' | 'M') => 1_000_000.0,
        _ => 1.0,
    }
}

/// `"90%"` → `Some(90)`.
pub fn parse_percentage(text: &str) -> Option<u32> {
    let text = meaningful(text)?;
    leading_integer(text.trim_start_matches('%'))
}

/// Leading integer of a count field, e.g. `"60 jobs posted"` → `Some(60)`.
pub fn parse_count(text: &str) -> Option<u32> {
    leading_integer(meaningful(text)?)
}

/// Leading decimal of a rating field, e.g. `"4.8 of 45 reviews"` → `Some(4.8)`.
pub fn parse_rating(text: &str) -> Option<f64> {
    let text = meaningful(text)?;
    let number: String = text
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    number.parse().ok()
}

/// First integer anywhere in the text, `0` when there is none.
pub fn parse_review_count(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Whole calendar months between the join date in `text` and `today`, `0` when missing.
pub fn parse_tenure_months(text: &str, today: NaiveDate) -> u32 {
    parse_calendar_date(text)
        .map(|joined| tenure_months_between(joined, today))
        .unwrap_or(0)
}

/// Month difference using calendar year/month components only; the day of month is ignored.
pub fn tenure_months_between(joined: NaiveDate, today: NaiveDate) -> u32 {
    let months = (today.year() - joined.year()) * 12 + today.month() as i32
        - joined.month() as i32;
    months.max(0) as u32
}

fn leading_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == ',')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Hourly budget such as `"$15.00 - $30.00"` into `(low, high)`. A single rate yields the
/// same value twice.
pub fn parse_rate_range(text: &str) -> Option<(f64, f64)> {
    let text = meaningful(text)?;
    let rates: Vec<f64> = text
        .split(['-', '–'])
        .map(parse_money)
        .filter(|rate| *rate > 0.0)
        .collect();

    match rates.as_slice() {
        [] => None,
        [single] => Some((*single, *single)),
        [first, .., last] => Some((first.min(*last), first.max(*last))),
    }
}

pub fn parse_job_kind(text: &str) -> Option<JobKind> {
    let lowered = meaningful(text)?.to_ascii_lowercase();
    if lowered.contains("hourly") {
        Some(JobKind::Hourly)
    } else if lowered.contains("fixed") {
        Some(JobKind::FixedPrice)
    } else {
        None
    }
}

pub fn parse_experience_level(text: &str) -> Option<ExperienceLevel> {
    let lowered = meaningful(text)?.to_ascii_lowercase();
    if lowered.contains("expert") {
        Some(ExperienceLevel::Expert)
    } else if lowered.contains("intermediate") {
        Some(ExperienceLevel::Intermediate)
    } else if lowered.contains("entry") {
        Some(ExperienceLevel::Entry)
    } else {
        None
    }
}

/// `"Yes"` or `"Payment method verified"` count as verified; anything else does not.
pub fn parse_payment_verified(text: &str) -> bool {
    let Some(text) = meaningful(text) else {
        return false;
    };
    let lowered = text.to_ascii_lowercase();
    if lowered.contains("not verified") || lowered.contains("unverified") {
        return false;
    }
    matches!(lowered.as_str(), "yes" | "true") || lowered.contains("verified")
}

/// Relative posting time such as `"Posted 5 minutes ago"` or `"yesterday"`.
pub fn parse_posted_age(text: &str) -> Option<Duration> {
    let lowered = meaningful(text)?.to_ascii_lowercase();
    let phrase = lowered.trim_start_matches("posted").trim();

    match phrase {
        "now" | "just now" | "moments ago" | "a few seconds ago" => {
            return Some(Duration::zero())
        }
        "yesterday" => return Some(Duration::days(1)),
        "last week" => return Some(Duration::weeks(1)),
        "last month" => return Some(Duration::days(30)),
        _ => {}
    }

    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    let position = tokens.iter().position(|token| {
        matches!(*token, "a" | "an") || token.chars().all(|ch| ch.is_ascii_digit())
    })?;
    let mut quantity: i64 = match tokens[position] {
        "a" | "an" => 1,
        digits => digits.parse().ok()?,
    };
    let mut unit_at = position + 1;
    // "a few minutes", "a couple of hours"
    match tokens.get(unit_at).copied() {
        Some("few") => {
            quantity = 3;
            unit_at += 1;
        }
        Some("couple") => {
            quantity = 2;
            unit_at += 1;
            if tokens.get(unit_at) == Some(&"of") {
                unit_at += 1;
            }
        }
        _ => {}
    }
    let unit = tokens.get(unit_at)?;

    if unit.starts_with("second") || unit.starts_with("sec") {
        Some(Duration::seconds(quantity))
    } else if unit.starts_with("min") {
        Some(Duration::minutes(quantity))
    } else if unit.starts_with("hour") || unit.starts_with("hr") {
        Some(Duration::hours(quantity))
    } else if unit.starts_with("day") {
        Some(Duration::days(quantity))
    } else if unit.starts_with("week") {
        Some(Duration::weeks(quantity))
    } else if unit.starts_with("month") {
        Some(Duration::days(quantity * 30))
    } else if unit.starts_with("year") {
        Some(Duration::days(quantity * 365))
    } else {
        None
    }
}

/// Calendar date in one of the formats the marketplace renders, with an optional leading
/// label such as `"Member since"`.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = meaningful(text)?;
    let lowered = text.to_ascii_lowercase();
    let stripped = DATE_LABELS
        .iter()
        .find(|label| lowered.starts_with(*label))
        .map(|label| text[label.len()..].trim())
        .unwrap_or(text);

    DAY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(stripped, format).ok())
        .or_else(|| {
            let first_of_month = format!("1 {stripped}");
            MONTH_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(&first_of_month, format).ok())
        })
}

/// `"Less than 5"`, `"5 to 10"`, `"50+"` or a plain count.
pub fn parse_proposal_band(text: &str) -> Option<ProposalBand> {
    let lowered = meaningful(text)?.to_ascii_lowercase();

    if let Some(rest) = lowered.strip_prefix("less than") {
        let bound = leading_integer(rest)?;
        return Some(ProposalBand {
            low: 0,
            high: Some(bound.saturating_sub(1)),
        });
    }

    if lowered.trim_end().ends_with('+') {
        return Some(ProposalBand {
            low: leading_integer(&lowered)?,
            high: None,
        });
    }

    if let Some((low, high)) = lowered.split_once(" to ") {
        return Some(ProposalBand {
            low: leading_integer(low)?,
            high: Some(leading_integer(high)?),
        });
    }

    let count = leading_integer(&lowered)?;
    Some(ProposalBand {
        low: count,
        high: Some(count),
    })
}
