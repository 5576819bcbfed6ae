//! Suitability scoring for freelance marketplace job postings.
//!
//! The [`assessment`] module is the pure engine; [`config`], [`telemetry`] and [`error`]
//! carry the process plumbing shared by the CLI and HTTP front ends.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;

pub use assessment::{
    render_text, AdvisoryTier, Assessment, AssessmentEngine, ClientStatus, Dimension,
    DimensionVerdict, ExperienceLevel, JobKind, RawJobRecord, ScoreResult, UserPreferences,
};
