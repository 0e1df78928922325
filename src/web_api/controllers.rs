pub mod authentication_controller;
pub mod task_controller;
pub mod ai_controller;
pub mod insight_controller;
pub mod schedule_controller;
pub mod realtime_controller;
pub mod health_controller;
