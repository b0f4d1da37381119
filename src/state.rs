use std::sync::Arc;
use std::time::Duration;

use crate::api::client::{DoctorsApi, HttpDoctorsApi};
use crate::cache::{BookedSlots, InFlight};
use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;

/// Shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn DoctorsApi>,
    pub clock: Arc<dyn Clock>,
    pub booked: BookedSlots,
    pub in_flight: InFlight,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(
            Arc::new(HttpDoctorsApi::new(config.api_base_url.clone())),
            Arc::new(SystemClock),
            config.booked_cache_idle,
        )
    }

    pub fn with_parts(api: Arc<dyn DoctorsApi>, clock: Arc<dyn Clock>, booked_idle: Duration) -> Self {
        Self {
            api,
            clock,
            booked: BookedSlots::new(booked_idle),
            in_flight: InFlight::default(),
        }
    }
}
