
//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
    pub mod api_error;
    pub mod api_json;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
pub use web_api::api_error;
pub use web_api::api_json;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
}

pub use shared::models::*;
pub use shared::dto::*;
//---------------------------------------

//---------------------------------------
pub mod authentication {
    pub mod auth;
}
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod data_error;
}

pub use data_access::data_error;
//---------------------------------------

//---------------------------------------
pub mod planning {
    pub mod heuristic_engine;
    pub mod insight_aggregator;
    pub mod schedule_packer;
}

pub use planning::*;
//---------------------------------------

//---------------------------------------
pub mod realtime {
    pub mod broadcaster;
}
//---------------------------------------
