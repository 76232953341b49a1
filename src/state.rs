use crate::config::AppConfig;
use crate::domain::reading::store::ReadingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ReadingStore,
    pub config: AppConfig,
    pub started_at: std::time::Instant,
}
