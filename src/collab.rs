//! Collaborators the menu talks to but does not own: routing and playlist
//! persistence.

use crate::model::Playlist;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The backend refused the request; the message is shown to the user as is.
    #[error("{0}")]
    Rejected(String),
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),
}

#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn add_songs_to_playlist(
        &self,
        playlist_id: &str,
        item_ids: &[String],
    ) -> Result<(), PersistenceError>;
}

pub trait Router: Send + Sync {
    fn push(&self, route: &str);
}

/// Records every route pushed to it.
#[derive(Debug, Default)]
pub struct MemoryRouter {
    routes: Mutex<Vec<String>>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Router for MemoryRouter {
    fn push(&self, route: &str) {
        debug!(route, "navigate");
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_string());
    }
}

/// Playlists kept in the local state file.
#[derive(Debug, Default)]
pub struct LocalPlaylistStore {
    playlists: Mutex<HashMap<String, Playlist>>,
}

impl LocalPlaylistStore {
    pub fn new(playlists: HashMap<String, Playlist>) -> Self {
        Self {
            playlists: Mutex::new(playlists),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, Playlist> {
        self.playlists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PlaylistStore for LocalPlaylistStore {
    async fn add_songs_to_playlist(
        &self,
        playlist_id: &str,
        item_ids: &[String],
    ) -> Result<(), PersistenceError> {
        let mut playlists = self.playlists.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(playlist) = playlists.get_mut(playlist_id) else {
            return Err(PersistenceError::PlaylistNotFound(playlist_id.to_string()));
        };

        playlist.item_ids.extend(item_ids.iter().cloned());
        info!(playlist_id, count = item_ids.len(), "playlist updated");
        Ok(())
    }
}
