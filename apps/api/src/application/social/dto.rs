use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LikeStatus {
    pub liked: bool,
    #[ts(type = "number")]
    pub likes_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ViewRecorded {
    /// Whether this call increased the counter
    pub counted: bool,
    #[ts(type = "number")]
    pub views: i64,
}
