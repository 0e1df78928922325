pub mod app_state;
pub mod settings;
pub mod task;
pub mod task_status;
pub mod user;
pub mod realtime_event;
