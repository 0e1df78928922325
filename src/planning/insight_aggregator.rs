use uuid::Uuid;

use crate::{
    behavior_insights_response::BehaviorInsightsResponse,
    data_access::data_context::{CompletionSummary, DataContext},
    data_error::DataError,
    heuristic_engine::round_to,
};

/// Hours reported as most productive. A fixed placeholder until there is
/// activity data to derive them from.
pub const PEAK_HOURS: [u8; 4] = [9, 10, 11, 15];
const FORECAST_DAYS: usize = 7;

pub fn generate_insights(
    data_context: &DataContext,
    owner_id: Uuid,
) -> Result<BehaviorInsightsResponse, DataError> {
    let summary = data_context.completion_summary(owner_id)?;
    Ok(insights_from_summary(summary))
}

pub fn insights_from_summary(summary: CompletionSummary) -> BehaviorInsightsResponse {
    let completion_rate = summary.rate();
    let procrastination_risk = round_to((0.9 - completion_rate).max(0.0), 3);
    let burnout_risk = round_to((0.25 + summary.total as f64 / 100.0).min(1.0), 3);
    let weekly_productivity_forecast = (0..FORECAST_DAYS)
        .map(|day| round_to(50.0 + completion_rate * 10.0 + day as f64 * 0.8, 2))
        .collect();

    BehaviorInsightsResponse {
        peak_hours: PEAK_HOURS.to_vec(),
        procrastination_risk,
        burnout_risk,
        weekly_productivity_forecast,
    }
}
