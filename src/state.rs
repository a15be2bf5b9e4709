use crate::config::AppConfig;
use crate::db::Database;

/// Shared by every worker; cheap to clone (paths only).
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
}
