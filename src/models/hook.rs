use serde::Deserialize;
use serde_json::Value;

use crate::utils::number_from_value;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookModel {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

/// Claude Code sends an object; some wrappers pipe just the model name.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ModelField {
    Object(HookModel),
    Name(String),
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookWorkspace {
    pub current_dir: Option<String>,
    pub project_dir: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct HookJson {
    pub cwd: Option<String>,
    pub model: Option<ModelField>,
    pub workspace: Option<HookWorkspace>,
    /// Either `{ "total_cost_usd": .. }` or a bare number
    pub cost: Option<Value>,
    pub total_cost_usd: Option<Value>,
    pub cost_usd: Option<Value>,
}

impl HookJson {
    pub fn model_id(&self) -> Option<&str> {
        match self.model.as_ref()? {
            ModelField::Object(m) => m.id.as_deref(),
            ModelField::Name(name) => Some(name.as_str()),
        }
    }

    /// Display name, falling back to the model id and then to "Unknown".
    pub fn model_display_name(&self) -> &str {
        let display = match self.model.as_ref() {
            Some(ModelField::Object(m)) => m.display_name.as_deref(),
            Some(ModelField::Name(name)) => Some(name.as_str()),
            None => None,
        };
        display
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.model_id().filter(|s| !s.trim().is_empty()))
            .unwrap_or("Unknown")
    }

    /// Directory whose `.git/HEAD` is inspected.
    pub fn workspace_dir(&self) -> Option<&str> {
        let ws = self.workspace.as_ref();
        ws.and_then(|w| w.current_dir.as_deref())
            .or_else(|| ws.and_then(|w| w.project_dir.as_deref()))
            .or(self.cwd.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// First numeric cost found, in lookup order:
    /// `cost.total_cost_usd`, `cost` itself, `total_cost_usd`, `cost_usd`.
    pub fn cost_usd(&self) -> Option<f64> {
        if let Some(cost) = self.cost.as_ref() {
            if let Some(total) = cost.get("total_cost_usd").and_then(number_from_value) {
                return Some(total);
            }
            if let Some(bare) = number_from_value(cost) {
                return Some(bare);
            }
        }
        self.total_cost_usd
            .as_ref()
            .and_then(number_from_value)
            .or_else(|| self.cost_usd.as_ref().and_then(number_from_value))
    }
}
