use std::sync::Arc;

use crate::{
    data_access::data_context::DataContext, realtime::broadcaster::Broadcaster, settings::Settings,
};

pub struct AppState {
    pub data_context: DataContext,
    pub broadcaster: Broadcaster,
    pub settings: Settings,
}

impl AppState {
    pub fn new(data_context: DataContext, settings: Settings) -> Self {
        Self {
            data_context,
            broadcaster: Broadcaster::new(),
            settings,
        }
    }
}

pub type SharedState = Arc<AppState>;
