use serde::{Deserialize, Serialize};

/// Tunables for the fixed-price budget procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub working_hours_per_day: f64,
    pub long_deadline_days: i64,
    pub suspicious_budget_floor: f64,
    pub suspicious_client_rate_ceiling: f64,
    pub high_budget_floor: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            working_hours_per_day: 4.0,
            long_deadline_days: 30,
            suspicious_budget_floor: 2500.0,
            suspicious_client_rate_ceiling: 15.0,
            high_budget_floor: 1000.0,
        }
    }
}
