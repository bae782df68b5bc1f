use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::email::SystemMailer;
use crate::rate_limit::AttemptLimiter;
use crate::reset::ResetService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub resets: ResetService,
    pub system_mailer: Option<Arc<SystemMailer>>,
    pub login_limiter: AttemptLimiter,
}
