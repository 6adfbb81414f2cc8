use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};

use crate::{
    config::CorsSettings,
    cors::{AllowedOrigins, cors_layer, reject_disallowed_origin},
    handlers::process_data_handler,
};

pub const PROCESS_DATA_PATH: &str = "/api/process-data";

/// Route table plus CORS policy, fixed once at startup.
pub struct App {
    cors: CorsSettings,
}

impl App {
    pub fn new(cors: CorsSettings) -> Self {
        Self { cors }
    }

    pub fn router(self) -> anyhow::Result<Router> {
        let allowed = AllowedOrigins::from_settings(&self.cors)?;

        Ok(Router::new()
            .route(PROCESS_DATA_PATH, post(process_data_handler))
            .layer(DefaultBodyLimit::disable())
            .layer(cors_layer(&self.cors)?)
            .layer(middleware::from_fn_with_state(
                allowed,
                reject_disallowed_origin,
            )))
    }
}
