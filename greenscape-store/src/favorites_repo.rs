use crate::kv::KvStore;
use greenscape_shared::models::events::FavoriteToggledEvent;
use std::sync::Arc;
use tracing::{debug, info};

const FAVORITES_KEY: &str = "greenscape_favorites";

/// The visitor's favorited activities, stored as a JSON array of activity
/// ids in first-favorited order.
#[derive(Clone)]
pub struct FavoritesRepo {
    store: Arc<dyn KvStore>,
}

impl FavoritesRepo {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<String> {
        let Some(raw) = self.store.get(FAVORITES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                debug!("Ignoring corrupt favorites list: {}", e);
                Vec::new()
            }
        }
    }

    pub fn is_favorite(&self, activity_id: &str) -> bool {
        self.list().iter().any(|id| id == activity_id)
    }

    /// Flips one activity's favorite state. Returns true when the activity
    /// is favorited after the call.
    pub fn toggle(&self, activity_id: &str) -> bool {
        let mut favorites = self.list();
        let now_favorited = match favorites.iter().position(|id| id == activity_id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(activity_id.to_string());
                true
            }
        };
        if let Ok(raw) = serde_json::to_string(&favorites) {
            self.store.set(FAVORITES_KEY, &raw);
        }
        let event = FavoriteToggledEvent::new(activity_id, now_favorited);
        info!(?event, "Favorite toggled");
        now_favorited
    }
}
