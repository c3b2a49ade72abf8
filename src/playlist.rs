use crate::collab::{PersistenceError, PlaylistStore};
use crate::menu::MenuSession;
use crate::notify::{Notice, Notifier, PLAYLIST_LOADING};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistAddOutcome {
    Added,
    Failed(PersistenceError),
}

/// An add-to-playlist request that has been sent but not yet settled.
///
/// It owns everything it needs, so the menu stays usable while it is pending.
/// Dropping it abandons the outcome; the request itself is not cancelled.
pub struct PendingPlaylistAdd {
    ticket: u64,
    generation: u64,
    item_name: String,
    playlist_name: String,
    request: BoxFuture<'static, Result<(), PersistenceError>>,
}

impl std::fmt::Debug for PendingPlaylistAdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingPlaylistAdd")
            .field("ticket", &self.ticket)
            .field("generation", &self.generation)
            .field("playlist_name", &self.playlist_name)
            .finish_non_exhaustive()
    }
}

impl PendingPlaylistAdd {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub async fn wait(self) -> SettledPlaylistAdd {
        let result = self.request.await;
        SettledPlaylistAdd {
            ticket: self.ticket,
            generation: self.generation,
            item_name: self.item_name,
            playlist_name: self.playlist_name,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SettledPlaylistAdd {
    ticket: u64,
    generation: u64,
    item_name: String,
    playlist_name: String,
    result: Result<(), PersistenceError>,
}

/// Sends playlist additions and folds their outcome back into menu state.
pub struct PlaylistCoordinator {
    store: Arc<dyn PlaylistStore>,
    notifier: Arc<dyn Notifier>,
    next_ticket: u64,
}

impl PlaylistCoordinator {
    pub fn new(store: Arc<dyn PlaylistStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            next_ticket: 0,
        }
    }

    /// Issues exactly one request and shows the loading notice. There is no
    /// guard against overlapping requests for the same playlist.
    pub fn start(
        &mut self,
        session: &MenuSession,
        playlist_id: &str,
        playlist_name: &str,
        item_id: &str,
        item_name: &str,
    ) -> PendingPlaylistAdd {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        info!(ticket, playlist_id, item_id, "adding item to playlist");

        let store = Arc::clone(&self.store);
        let playlist_id = playlist_id.to_string();
        let item_ids = vec![item_id.to_string()];
        let request =
            async move { store.add_songs_to_playlist(&playlist_id, &item_ids).await }.boxed();

        self.notifier.notify(Notice::Loading {
            ticket,
            text: String::from(PLAYLIST_LOADING),
        });

        PendingPlaylistAdd {
            ticket,
            generation: session.generation(),
            item_name: item_name.to_string(),
            playlist_name: playlist_name.to_string(),
            request,
        }
    }

    /// Reports the outcome and closes the dialog whatever happened, unless the
    /// menu has been reopened since the request was sent.
    pub fn finish(
        &self,
        settled: SettledPlaylistAdd,
        session: &mut MenuSession,
    ) -> PlaylistAddOutcome {
        let ticket = settled.ticket;
        let outcome = match settled.result {
            Ok(()) => {
                info!(ticket, "playlist add succeeded");
                self.notifier.notify(Notice::Success {
                    ticket,
                    text: format!(
                        "\"{}\" added to \"{}\" playlist",
                        settled.item_name, settled.playlist_name
                    ),
                });
                PlaylistAddOutcome::Added
            }
            Err(err) => {
                warn!(ticket, error = %err, "playlist add failed");
                self.notifier.notify(Notice::Failure {
                    ticket,
                    text: err.to_string(),
                });
                PlaylistAddOutcome::Failed(err)
            }
        };

        if settled.generation == session.generation() {
            session.close_dialog();
        }
        outcome
    }
}
