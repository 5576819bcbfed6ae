//! Job and client suitability assessment.
//!
//! Raw extractor fields are normalized into typed values, every advisory dimension is
//! evaluated independently, and the client receives a composite 0-10 score. The whole
//! pipeline is a pure function of the record, the user's preferences and the reference date.

pub mod domain;
pub(crate) mod evaluation;
pub mod normalize;
pub mod report;

#[cfg(test)]
mod tests;

pub use domain::{
    AdvisoryTier, Assessment, ClientStatus, Dimension, DimensionVerdict, ExperienceLevel,
    HistoryEntry, JobKind, RawJobRecord, RecordError, ScoreResult, UnknownPreference,
    UserPreferences, NOT_AVAILABLE,
};
pub use evaluation::{hourly_rate, score_client, AssessmentEngine, EvaluationConfig};
pub use normalize::{NormalizedFields, ProposalBand};
pub use report::{export_file_name, render_text};
