mod config;
pub(crate) mod fixed_price;
pub(crate) mod policy;
pub(crate) mod rules;

pub use config::EvaluationConfig;
pub use rules::hourly_rate;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use super::domain::{
    AdvisoryTier, Assessment, Dimension, DimensionVerdict, RawJobRecord, ScoreResult,
    UserPreferences,
};
use super::normalize::NormalizedFields;

/// Stateless engine turning one job snapshot into advisory indicators and a client score.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    config: EvaluationConfig,
}

impl AssessmentEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn assess(
        &self,
        record: &RawJobRecord,
        preferences: &UserPreferences,
        today: NaiveDate,
    ) -> Assessment {
        let fields = NormalizedFields::from_raw(record, today);
        let indicators = self.indicators(&fields, preferences, today);
        let client = score_client(&fields);

        let job_outlook = outlook(&indicators, |dimension| !dimension.is_client());
        let client_outlook = outlook(&indicators, Dimension::is_client);

        debug!(
            score = client.score,
            status = client.status.label(),
            job_outlook = job_outlook.label(),
            reasons = client.reasons.len(),
            "job assessed"
        );

        Assessment {
            job_title: RawJobRecord::display(&record.job_title).to_string(),
            fields,
            indicators,
            job_outlook,
            client_outlook,
            client,
        }
    }

    /// Run every per-dimension evaluator. Evaluators are independent of each other.
    pub fn indicators(
        &self,
        fields: &NormalizedFields,
        preferences: &UserPreferences,
        today: NaiveDate,
    ) -> BTreeMap<Dimension, DimensionVerdict> {
        let mut indicators = BTreeMap::new();

        indicators.insert(
            Dimension::PaymentVerified,
            rules::payment_verified(fields.payment_verified),
        );
        indicators.insert(
            Dimension::ClientRating,
            rules::client_rating(fields.rating, fields.review_count),
        );
        indicators.insert(Dimension::TotalSpent, rules::total_spent(fields.total_spent));
        indicators.insert(
            Dimension::JobsPosted,
            rules::jobs_posted(fields.jobs_posted, fields.hire_rate),
        );
        indicators.insert(
            Dimension::HireRate,
            rules::hire_rate(fields.hire_rate, fields.jobs_posted),
        );
        indicators.insert(
            Dimension::MemberTenure,
            rules::member_tenure(fields.member_since, fields.tenure_months),
        );
        indicators.insert(
            Dimension::ClientAverageRate,
            rules::client_average_rate(fields.avg_hourly_rate, fields.fixed_price_history),
        );
        indicators.insert(Dimension::JobRate, rules::job_rate(fields, preferences));
        indicators.insert(
            Dimension::FixedBudget,
            fixed_price::fixed_budget(fields, preferences, &self.config, today),
        );
        indicators.insert(Dimension::Proposals, rules::proposals(fields.proposals));
        indicators.insert(
            Dimension::Connects,
            rules::connects(fields.required_connects, fields.available_connects),
        );
        indicators.insert(Dimension::JobAge, rules::job_age(fields.posted_age_minutes));
        indicators.insert(Dimension::Hires, rules::hires(fields.hires));
        indicators.insert(
            Dimension::ExperienceMatch,
            rules::experience_match(preferences.experience_level, fields.experience_level),
        );
        indicators.insert(
            Dimension::JobTypeMatch,
            rules::job_type_match(preferences.job_type, fields.job_kind),
        );

        indicators
    }
}

/// Composite client score; independent of the job and of the user's preferences.
pub fn score_client(fields: &NormalizedFields) -> ScoreResult {
    policy::score_client(fields)
}

fn outlook<F>(indicators: &BTreeMap<Dimension, DimensionVerdict>, include: F) -> AdvisoryTier
where
    F: Fn(Dimension) -> bool,
{
    AdvisoryTier::worst(
        indicators
            .iter()
            .filter(|(dimension, _)| include(**dimension))
            .map(|(_, verdict)| verdict.tier),
    )
}
