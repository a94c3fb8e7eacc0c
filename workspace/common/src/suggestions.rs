use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Four lists of short operational tips, regenerated on every request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SuggestionSet {
    pub key_actions: Vec<String>,
    pub waste_reduction: Vec<String>,
    pub next_day_menu: Vec<String>,
    pub operational_tips: Vec<String>,
}

impl SuggestionSet {
    pub fn is_empty(&self) -> bool {
        self.key_actions.is_empty()
            && self.waste_reduction.is_empty()
            && self.next_day_menu.is_empty()
            && self.operational_tips.is_empty()
    }
}
