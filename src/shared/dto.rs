// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod patch;
pub mod timestamp;
pub mod login_request;
pub mod signup_request;
pub mod schedule_request;

// Responses
pub mod token_response;
pub mod user_get_response;
pub mod task_breakdown_response;
pub mod task_estimation_response;
pub mod behavior_insights_response;
pub mod schedule_response;
