use crate::models::GitHead;
use crate::session::SessionTick;

/// Everything one refresh gathered, ready to render as text or JSON.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub model_id: Option<String>,
    pub display_name: String,
    pub workspace: Option<String>,
    pub git: GitHead,
    pub session: SessionTick,
    pub cost_usd: Option<f64>,
}
