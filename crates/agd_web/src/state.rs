use std::sync::Arc;

use agd_bot::DigestService;

pub struct AppState {
    pub service: Arc<DigestService>,
}
