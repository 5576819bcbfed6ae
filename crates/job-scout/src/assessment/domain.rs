use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalize::NormalizedFields;

/// Sentinel the page extractor writes for fields it could not find.
pub const NOT_AVAILABLE: &str = "N/A";

/// Flat snapshot of a job posting as produced by the page extractor.
///
/// Every value is carried verbatim, including the `"N/A"` sentinel. The record is never
/// mutated by the assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawJobRecord {
    pub job_title: Option<String>,
    pub full_job_description: Option<String>,
    pub job_type: Option<String>,
    pub budget_or_rate: Option<String>,
    pub job_age: Option<String>,
    pub deadline: Option<String>,
    pub last_viewed: Option<String>,
    pub proposals_count: Option<String>,
    pub interviewing: Option<String>,
    pub invites_sent: Option<String>,
    pub hires: Option<String>,
    pub required_connects: Option<String>,
    pub available_connects: Option<String>,
    pub experience_level: Option<String>,
    pub payment_verified: Option<String>,
    pub client_location: Option<String>,
    pub client_rating: Option<String>,
    pub client_reviews_count: Option<String>,
    pub total_spent: Option<String>,
    pub client_jobs_posted: Option<String>,
    pub open_jobs: Option<String>,
    pub client_hire_rate: Option<String>,
    pub avg_hourly_rate: Option<String>,
    pub total_hours: Option<String>,
    #[serde(alias = "clientJoinDate")]
    pub member_since: Option<String>,
    pub client_history: Vec<HistoryEntry>,
}

/// The extractor payload could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("invalid job record: {source}")]
pub struct RecordError {
    #[from]
    source: serde_json::Error,
}

impl RawJobRecord {
    /// Decode one extractor payload. Missing keys are treated as absent fields.
    pub fn from_json(payload: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Display helper that folds absent values into the extractor sentinel.
    pub fn display(value: &Option<String>) -> &str {
        value
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// One past contract listed in the client's recent history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryEntry {
    pub project_title: Option<String>,
    pub freelancer_name: Option<String>,
    pub date: Option<String>,
    pub price: Option<String>,
    #[serde(alias = "clientFeedback")]
    pub feedback_to_freelancer: Option<String>,
    #[serde(alias = "freelancerFeedback")]
    pub feedback_from_freelancer: Option<String>,
}

/// Experience tier advertised by a job or claimed by the freelancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Intermediate,
    Expert,
}

impl ExperienceLevel {
    pub const fn rank(self) -> i8 {
        match self {
            Self::Entry => 0,
            Self::Intermediate => 1,
            Self::Expert => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Entry => "Entry level",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }
}

/// A preference value outside the accepted vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownPreference {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for ExperienceLevel {
    type Err = UnknownPreference;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "entry" | "entry level" | "entry_level" => Ok(Self::Entry),
            "intermediate" => Ok(Self::Intermediate),
            "expert" => Ok(Self::Expert),
            _ => Err(UnknownPreference {
                kind: "experience level",
                value: value.to_string(),
            }),
        }
    }
}

/// Billing model of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Hourly,
    FixedPrice,
}

impl JobKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::FixedPrice => "Fixed-price",
        }
    }
}

impl FromStr for JobKind {
    type Err = UnknownPreference;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "fixed" | "fixed-price" | "fixed_price" | "fixed price" => Ok(Self::FixedPrice),
            _ => Err(UnknownPreference {
                kind: "job type",
                value: value.to_string(),
            }),
        }
    }
}

/// Settings chosen by the freelancer. Zero rates mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub experience_level: Option<ExperienceLevel>,
    pub job_type: Option<JobKind>,
    pub min_hourly_rate: f64,
    pub min_fixed_price: f64,
}

/// Advisory classification of one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTier {
    Green,
    Yellow,
    Red,
    None,
}

impl AdvisoryTier {
    const fn severity(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Green => 1,
            Self::Yellow => 2,
            Self::Red => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
            Self::None => "NONE",
        }
    }

    /// Most severe tier in the sequence; `None` tiers never win over an opinion.
    pub fn worst<I>(tiers: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        tiers
            .into_iter()
            .fold(Self::None, |acc, tier| {
                if tier.severity() > acc.severity() {
                    tier
                } else {
                    acc
                }
            })
    }
}

/// Every advisory dimension the engine can opine on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    PaymentVerified,
    ClientRating,
    TotalSpent,
    JobsPosted,
    HireRate,
    MemberTenure,
    ClientAverageRate,
    JobRate,
    FixedBudget,
    Proposals,
    Connects,
    JobAge,
    Hires,
    ExperienceMatch,
    JobTypeMatch,
}

impl Dimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PaymentVerified => "Payment verified",
            Self::ClientRating => "Client rating",
            Self::TotalSpent => "Total spent",
            Self::JobsPosted => "Jobs posted",
            Self::HireRate => "Hire rate",
            Self::MemberTenure => "Member since",
            Self::ClientAverageRate => "Avg hourly rate paid",
            Self::JobRate => "Hourly rate",
            Self::FixedBudget => "Fixed budget",
            Self::Proposals => "Proposals",
            Self::Connects => "Connects",
            Self::JobAge => "Posted",
            Self::Hires => "Hires",
            Self::ExperienceMatch => "Experience match",
            Self::JobTypeMatch => "Job type match",
        }
    }

    /// Dimensions describing the client rather than the posting itself.
    pub const fn is_client(self) -> bool {
        matches!(
            self,
            Self::PaymentVerified
                | Self::ClientRating
                | Self::TotalSpent
                | Self::JobsPosted
                | Self::HireRate
                | Self::MemberTenure
                | Self::ClientAverageRate
        )
    }
}

/// Output of a single evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionVerdict {
    pub tier: AdvisoryTier,
    pub message: String,
}

impl DimensionVerdict {
    pub fn new(tier: AdvisoryTier, message: impl Into<String>) -> Self {
        Self {
            tier,
            message: message.into(),
        }
    }

    pub fn green(message: impl Into<String>) -> Self {
        Self::new(AdvisoryTier::Green, message)
    }

    pub fn yellow(message: impl Into<String>) -> Self {
        Self::new(AdvisoryTier::Yellow, message)
    }

    pub fn red(message: impl Into<String>) -> Self {
        Self::new(AdvisoryTier::Red, message)
    }

    /// The evaluator has no opinion.
    pub fn none() -> Self {
        Self::new(AdvisoryTier::None, String::new())
    }

    pub fn is_none(&self) -> bool {
        self.tier == AdvisoryTier::None
    }
}

/// Overall classification of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Normal,
    Warning,
    Danger,
    Promising,
}

impl ClientStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Promising => "promising",
        }
    }
}

/// Composite client score with the reasons behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub status: ClientStatus,
    pub reasons: Vec<String>,
}

/// Everything computed for one job snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub job_title: String,
    pub fields: NormalizedFields,
    pub indicators: BTreeMap<Dimension, DimensionVerdict>,
    pub job_outlook: AdvisoryTier,
    pub client_outlook: AdvisoryTier,
    pub client: ScoreResult,
}

impl Assessment {
    pub fn verdict(&self, dimension: Dimension) -> Option<&DimensionVerdict> {
        self.indicators.get(&dimension)
    }
}
