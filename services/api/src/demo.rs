use crate::infra::{read_record, today_or_local};
use chrono::{Datelike, Months, NaiveDate};
use clap::Args;
use job_scout::assessment::{export_file_name, HistoryEntry};
use job_scout::config::AppConfig;
use job_scout::error::AppError;
use job_scout::{
    render_text, Assessment, AssessmentEngine, ExperienceLevel, JobKind, RawJobRecord,
    UserPreferences,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Extracted job record (JSON object with camelCase keys)
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Your experience level: entry, intermediate or expert
    #[arg(long)]
    pub(crate) experience: Option<ExperienceLevel>,
    /// Preferred billing model: hourly or fixed-price
    #[arg(long)]
    pub(crate) job_type: Option<JobKind>,
    /// Minimum acceptable hourly rate in dollars
    #[arg(long)]
    pub(crate) min_hourly_rate: Option<f64>,
    /// Minimum acceptable fixed price in dollars
    #[arg(long)]
    pub(crate) min_fixed_price: Option<f64>,
    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the assessment as JSON instead of the text export
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    /// Command-line flags override the stored preferences field by field.
    fn preferences(&self, stored: UserPreferences) -> UserPreferences {
        UserPreferences {
            experience_level: self.experience.or(stored.experience_level),
            job_type: self.job_type.or(stored.job_type),
            min_hourly_rate: self.min_hourly_rate.unwrap_or(stored.min_hourly_rate),
            min_fixed_price: self.min_fixed_price.unwrap_or(stored.min_fixed_price),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct AssessOutput<'a> {
    today: NaiveDate,
    preferences: &'a UserPreferences,
    assessment: &'a Assessment,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let preferences = args.preferences(config.preferences);
    let today = today_or_local(args.today);

    let record = read_record(&args.record)?;
    let assessment = AssessmentEngine::default().assess(&record, &preferences, today);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let output = AssessOutput {
            today,
            preferences: &preferences,
            assessment: &assessment,
        };
        serde_json::to_writer_pretty(&mut out, &output).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render_text(&record, &assessment))?;
        writeln!(out, "Export file: {}", export_file_name(&assessment.job_title))?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = today_or_local(args.today);
    let engine = AssessmentEngine::default();
    let preferences = UserPreferences {
        experience_level: Some(ExperienceLevel::Intermediate),
        job_type: Some(JobKind::Hourly),
        min_hourly_rate: 25.0,
        min_fixed_price: 0.0,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Job Scout demo (reference date {today})")?;
    writeln!(
        out,
        "Preferences: intermediate, hourly, minimum ${}/hr",
        preferences.min_hourly_rate
    )?;

    for record in [established_client_sample(today), unproven_client_sample()] {
        let assessment = engine.assess(&record, &preferences, today);
        writeln!(out, "\n==== {} ====", assessment.job_title)?;
        write!(out, "{}", render_text(&record, &assessment))?;
    }

    Ok(())
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Long-standing client posting a fresh hourly job. Joined three years before `today`.
fn established_client_sample(today: NaiveDate) -> RawJobRecord {
    let joined = today
        .with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(36)))
        .unwrap_or(today);

    RawJobRecord {
        job_title: text("Rust engineer for a payments reconciliation service"),
        full_job_description: text(
            "We need help hardening an axum service that reconciles card settlements.",
        ),
        job_type: text("Hourly"),
        budget_or_rate: text("$35.00 - $60.00"),
        job_age: text("Posted 25 minutes ago"),
        last_viewed: text("3 minutes ago"),
        proposals_count: text("5 to 10"),
        interviewing: text("1"),
        invites_sent: text("4"),
        hires: text("0"),
        required_connects: text("14"),
        available_connects: text("62"),
        experience_level: text("Intermediate"),
        payment_verified: text("Payment method verified"),
        client_location: text("Canada"),
        client_rating: text("4.9"),
        client_reviews_count: text("(38 reviews)"),
        total_spent: text("$85K"),
        client_jobs_posted: text("41"),
        open_jobs: text("2"),
        client_hire_rate: text("87%"),
        avg_hourly_rate: text("$42.10"),
        total_hours: text("5,120"),
        member_since: Some(format!("Member since {}", joined.format("%b %d, %Y"))),
        client_history: vec![HistoryEntry {
            project_title: text("Ledger export tooling"),
            freelancer_name: text("Priya S."),
            date: text("Nov 2024 - Feb 2025"),
            price: text("$55.00 /hr"),
            feedback_to_freelancer: text("Thorough and fast."),
            feedback_from_freelancer: text("Responsive client with clear specs."),
        }],
        ..RawJobRecord::default()
    }
}

/// Fixed-price posting from an account with nothing on record.
fn unproven_client_sample() -> RawJobRecord {
    RawJobRecord {
        job_title: text("Scrape competitor prices into a spreadsheet"),
        full_job_description: text("Need it done quickly, budget is firm."),
        job_type: text("Fixed-price"),
        budget_or_rate: text("$40.00"),
        job_age: text("Posted 2 days ago"),
        proposals_count: text("50+"),
        required_connects: text("8"),
        experience_level: text("Entry level"),
        payment_verified: text("Payment method not verified"),
        client_rating: text("N/A"),
        client_reviews_count: text("N/A"),
        total_spent: text("N/A"),
        client_jobs_posted: text("N/A"),
        client_hire_rate: text("N/A"),
        avg_hourly_rate: text("N/A"),
        ..RawJobRecord::default()
    }
}
