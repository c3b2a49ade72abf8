use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Song,
    Episode,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Song => "Song",
            Self::Episode => "Episode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ArtistMap {
    #[serde(default)]
    pub primary_artists: Vec<Artist>,
    #[serde(default)]
    pub featured_artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub url: String,
    pub image: String,
    #[serde(default)]
    pub artist_map: ArtistMap,
    pub download_url: String,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub album_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub url: String,
    pub image: String,
    #[serde(default)]
    pub artist_map: ArtistMap,
}

/// The only shape the player queue holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    pub url: String,
    pub image: String,
    #[serde(default)]
    pub artists: Vec<String>,
    pub download_url: String,
}

impl From<&Song> for QueueEntry {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.clone(),
            name: song.name.clone(),
            subtitle: song.subtitle.clone(),
            kind: ItemKind::Song,
            url: song.url.clone(),
            image: song.image.clone(),
            artists: song
                .artist_map
                .featured_artists
                .iter()
                .map(|artist| artist.name.clone())
                .collect(),
            download_url: song.download_url.clone(),
        }
    }
}

/// Anything the action menu can be opened on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayableItem {
    Song(Song),
    Episode(Episode),
    Queued(QueueEntry),
}

impl PlayableItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Song(song) => &song.id,
            Self::Episode(episode) => &episode.id,
            Self::Queued(entry) => &entry.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Song(song) => &song.name,
            Self::Episode(episode) => &episode.name,
            Self::Queued(entry) => &entry.name,
        }
    }

    pub fn subtitle(&self) -> &str {
        match self {
            Self::Song(song) => &song.subtitle,
            Self::Episode(episode) => &episode.subtitle,
            Self::Queued(entry) => &entry.subtitle,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Song(song) => &song.url,
            Self::Episode(episode) => &episode.url,
            Self::Queued(entry) => &entry.url,
        }
    }

    pub fn image(&self) -> &str {
        match self {
            Self::Song(song) => &song.image,
            Self::Episode(episode) => &episode.image,
            Self::Queued(entry) => &entry.image,
        }
    }

    /// Queue entries carry their own type tag, so an episode that was queued
    /// elsewhere still reports `Episode`.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Song(_) => ItemKind::Song,
            Self::Episode(_) => ItemKind::Episode,
            Self::Queued(entry) => entry.kind,
        }
    }

    pub fn is_episode(&self) -> bool {
        self.kind() == ItemKind::Episode
    }

    pub fn album_url(&self) -> Option<&str> {
        match self {
            Self::Song(song) => song.album_url.as_deref(),
            Self::Episode(_) | Self::Queued(_) => None,
        }
    }

    pub fn primary_artists(&self) -> Vec<String> {
        match self {
            Self::Song(Song { artist_map, .. }) | Self::Episode(Episode { artist_map, .. }) => {
                artist_map
                    .primary_artists
                    .iter()
                    .map(|artist| artist.name.clone())
                    .collect()
            }
            Self::Queued(entry) => entry.artists.clone(),
        }
    }
}

/// Projects an item into the queue shape. Queue entries pass through
/// unchanged; episodes cannot be queued and yield `None`.
pub fn normalize(item: &PlayableItem) -> Option<QueueEntry> {
    match item {
        PlayableItem::Song(song) => Some(QueueEntry::from(song)),
        PlayableItem::Queued(entry) => Some(entry.clone()),
        PlayableItem::Episode(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub item_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub queue: Vec<QueueEntry>,
    #[serde(default)]
    pub current_index: Option<usize>,
    #[serde(default)]
    pub playlists: HashMap<String, Playlist>,
    #[serde(default = "default_login_route")]
    pub login_route: String,
}

fn default_login_route() -> String {
    String::from("/login")
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            current_index: None,
            playlists: HashMap::new(),
            login_route: default_login_route(),
        }
    }
}

impl PersistedState {
    pub fn playlist_summaries(&self) -> Vec<PlaylistSummary> {
        let mut summaries: Vec<PlaylistSummary> = self
            .playlists
            .iter()
            .map(|(id, playlist)| PlaylistSummary {
                id: id.clone(),
                name: playlist.name.clone(),
            })
            .collect();
        summaries.sort_by_cached_key(|summary| summary.name.to_ascii_lowercase());
        summaries
    }
}
