use std::sync::Arc;
use crate::app_config::PricingSettings;

#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingSettings>,
}

impl AppState {
    pub fn new(pricing: PricingSettings) -> Self {
        Self {
            pricing: Arc::new(pricing),
        }
    }
}
