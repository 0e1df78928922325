use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorInsightsResponse {
    pub peak_hours: Vec<u8>,
    pub procrastination_risk: f64,
    pub burnout_risk: f64,
    pub weekly_productivity_forecast: Vec<f64>,
}
