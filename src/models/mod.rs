mod health;
mod state;

pub use health::{CheckStatus, HealthChecks, HealthReport, HealthStatus};
pub use state::AppState;
