use std::fmt::Write;

use super::domain::{Assessment, RawJobRecord};

/// Plain-text export of a job snapshot followed by its assessment.
pub fn render_text(record: &RawJobRecord, assessment: &Assessment) -> String {
    let field = RawJobRecord::display;
    let mut content = String::new();

    writeln!(&mut content, "--- JOB DETAILS ---").expect("write job heading");
    let connects = format!(
        "{} required ({} available)",
        field(&record.required_connects),
        field(&record.available_connects)
    );
    for (label, value) in [
        ("Job Title", field(&record.job_title)),
        ("Job Type", field(&record.job_type)),
        ("Budget / Rate", field(&record.budget_or_rate)),
        ("Experience Level", field(&record.experience_level)),
        ("Posted", field(&record.job_age)),
        ("Deadline", field(&record.deadline)),
        ("Last Viewed", field(&record.last_viewed)),
        ("Proposals", field(&record.proposals_count)),
        ("Interviewing", field(&record.interviewing)),
        ("Invites Sent", field(&record.invites_sent)),
        ("Hires", field(&record.hires)),
        ("Connects", connects.as_str()),
    ] {
        writeln!(&mut content, "{label}: {value}").expect("write job detail");
    }

    writeln!(&mut content, "\n--- CLIENT DETAILS ---").expect("write client heading");
    let rating = format!(
        "{} ({})",
        field(&record.client_rating),
        field(&record.client_reviews_count)
    );
    let hire_rate = format!(
        "{} ({} open)",
        field(&record.client_hire_rate),
        field(&record.open_jobs)
    );
    for (label, value) in [
        ("Payment Verified", field(&record.payment_verified)),
        ("Rating", rating.as_str()),
        ("Location", field(&record.client_location)),
        ("Total Spent", field(&record.total_spent)),
        ("Jobs Posted", field(&record.client_jobs_posted)),
        ("Hire Rate", hire_rate.as_str()),
        ("Avg Hourly Rate", field(&record.avg_hourly_rate)),
        ("Total Hours", field(&record.total_hours)),
        ("Member Since", field(&record.member_since)),
    ] {
        writeln!(&mut content, "{label}: {value}").expect("write client detail");
    }

    writeln!(&mut content, "\n--- FULL JOB DESCRIPTION ---").expect("write description heading");
    writeln!(&mut content, "{}", field(&record.full_job_description)).expect("write description");

    writeln!(
        &mut content,
        "\n--- CLIENT RECENT HISTORY ({}) ---",
        record.client_history.len()
    )
    .expect("write history heading");
    if record.client_history.is_empty() {
        content.push_str("No recent history found.\n");
    }
    for entry in &record.client_history {
        writeln!(&mut content, "Project: {}", field(&entry.project_title)).expect("write project");
        for (label, value) in [
            ("Freelancer", field(&entry.freelancer_name)),
            ("Date", field(&entry.date)),
            ("Price", field(&entry.price)),
            ("Feedback to Freelancer", field(&entry.feedback_to_freelancer)),
            ("Feedback from Freelancer", field(&entry.feedback_from_freelancer)),
        ] {
            writeln!(&mut content, "  - {label}: {value}").expect("write history detail");
        }
    }

    let client = &assessment.client;
    writeln!(&mut content, "\n--- ASSESSMENT ---").expect("write assessment heading");
    writeln!(
        &mut content,
        "Client Score: {:.1}/10 ({})",
        client.score,
        client.status.label()
    )
    .expect("write client score");
    writeln!(&mut content, "Job Outlook: {}", assessment.job_outlook.label())
        .expect("write job outlook");
    writeln!(
        &mut content,
        "Client Outlook: {}",
        assessment.client_outlook.label()
    )
    .expect("write client outlook");
    for reason in &client.reasons {
        writeln!(&mut content, "  * {reason}").expect("write reason");
    }
    for (dimension, verdict) in &assessment.indicators {
        if verdict.is_none() {
            continue;
        }
        writeln!(
            &mut content,
            "[{}] {}: {}",
            verdict.tier.label(),
            dimension.label(),
            verdict.message
        )
        .expect("write indicator");
    }

    content
}

/// Download name for an export: every non-alphanumeric character becomes `_`.
pub fn export_file_name(job_title: &str) -> String {
    let stem: String = job_title
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{stem}.txt")
}
