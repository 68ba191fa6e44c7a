use uuid::Uuid;

/// Emitted when a booking or contact form submission is accepted.
/// Consumed by the analytics layer (logged via tracing today).
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct FormSubmittedEvent {
    pub form_id: String,
    pub reference: Option<Uuid>,
    pub activity_id: Option<String>,
    pub participants: i32,
    pub timestamp: i64,
}

/// Emitted when a visitor favorites or un-favorites an activity.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct FavoriteToggledEvent {
    pub activity_id: String,
    pub favorited: bool,
    pub timestamp: i64,
}

impl FavoriteToggledEvent {
    pub fn new(activity_id: &str, favorited: bool) -> Self {
        Self {
            activity_id: activity_id.to_string(),
            favorited,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
