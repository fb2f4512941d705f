use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitProjectRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub url: String,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}
