use crate::collab::{PlaylistStore, Router};
use crate::menu::{MenuAction, MenuHeader, MenuLinks, MenuSession};
use crate::model::{PlayableItem, PlaylistSummary, normalize};
use crate::notify::{LOGIN_REQUIRED_DESCRIPTION, LOGIN_REQUIRED_TITLE, Notice, Notifier};
use crate::playlist::{
    PendingPlaylistAdd, PlaylistAddOutcome, PlaylistCoordinator, SettledPlaylistAdd,
};
use crate::queue::PlayerQueue;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    EpisodePlayback,
    EpisodeQueue,
    Favourite,
    Radio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// `reused` is true when the item was already queued and only the
    /// selection moved.
    Played { index: usize, reused: bool },
    Queued { index: usize },
    DialogOpened,
    Redirected(String),
    Unsupported(Feature),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

#[derive(Clone)]
pub struct MenuServices {
    pub notifier: Arc<dyn Notifier>,
    pub router: Arc<dyn Router>,
    pub playlists: Arc<dyn PlaylistStore>,
}

/// The action menu opened on a single item.
pub struct TileMenu {
    item: PlayableItem,
    user: Option<User>,
    playlists: Vec<PlaylistSummary>,
    show_album: bool,
    login_route: String,
    session: MenuSession,
    notifier: Arc<dyn Notifier>,
    router: Arc<dyn Router>,
    coordinator: PlaylistCoordinator,
}

impl TileMenu {
    pub fn new(item: PlayableItem, services: MenuServices) -> Self {
        let coordinator =
            PlaylistCoordinator::new(services.playlists, Arc::clone(&services.notifier));
        Self {
            item,
            user: None,
            playlists: Vec::new(),
            show_album: false,
            login_route: String::from("/login"),
            session: MenuSession::default(),
            notifier: services.notifier,
            router: services.router,
            coordinator,
        }
    }

    pub fn with_user(mut self, user: Option<User>) -> Self {
        self.user = user;
        self
    }

    pub fn with_playlists(mut self, playlists: Vec<PlaylistSummary>) -> Self {
        self.playlists = playlists;
        self
    }

    pub fn with_album_link(mut self, show_album: bool) -> Self {
        self.show_album = show_album;
        self
    }

    pub fn with_login_route(mut self, route: &str) -> Self {
        self.login_route = route.to_string();
        self
    }

    pub fn session(&self) -> &MenuSession {
        &self.session
    }

    /// Called each time the menu shell is shown again.
    pub fn present(&mut self) {
        self.session.reopen();
    }

    pub fn open_share(&mut self) {
        self.session.open_share();
    }

    pub fn back(&mut self) {
        self.session.back();
    }

    pub fn header(&self) -> MenuHeader {
        MenuHeader {
            title: self.item.name().to_string(),
            description: self.item.subtitle().to_string(),
            image: self.item.image().to_string(),
        }
    }

    pub fn actions(&self) -> Vec<(MenuAction, String)> {
        let kind = self.item.kind();
        MenuAction::ALL
            .iter()
            .map(|action| (*action, action.label(kind)))
            .collect()
    }

    pub fn links(&self) -> MenuLinks {
        MenuLinks::for_item(&self.item, self.show_album)
    }

    pub fn dispatch(&mut self, action: MenuAction, queue: &mut PlayerQueue) -> ActionOutcome {
        debug!(?action, item_id = self.item.id(), "menu action");
        match action {
            MenuAction::Favourite => self.favourite(),
            MenuAction::PlayNow => self.play(queue),
            MenuAction::AddToQueue => self.add_to_queue(queue),
            MenuAction::AddToPlaylist => self.toggle_playlist_dialog(),
            MenuAction::PlayRadio => self.play_radio(),
        }
    }

    pub fn favourite(&self) -> ActionOutcome {
        self.unsupported(Feature::Favourite)
    }

    pub fn play_radio(&self) -> ActionOutcome {
        self.unsupported(Feature::Radio)
    }

    /// Jumps to the item if it is already queued, otherwise appends it and
    /// selects the new position. Either way the player is switched on.
    pub fn play(&self, queue: &mut PlayerQueue) -> ActionOutcome {
        if self.item.is_episode() {
            return self.unsupported(Feature::EpisodePlayback);
        }

        let outcome = match queue.find_index(self.item.id()) {
            Some(index) => {
                queue.set_selection(index);
                ActionOutcome::Played {
                    index,
                    reused: true,
                }
            }
            None => {
                let Some(entry) = normalize(&self.item) else {
                    return self.unsupported(Feature::EpisodePlayback);
                };
                let index = queue.append(entry);
                queue.set_selection(index);
                ActionOutcome::Played {
                    index,
                    reused: false,
                }
            }
        };

        queue.activate_player();
        info!(item_id = self.item.id(), ?outcome, "play");
        outcome
    }

    /// Always appends, even when the same id is already queued.
    pub fn add_to_queue(&self, queue: &mut PlayerQueue) -> ActionOutcome {
        if self.item.is_episode() {
            return self.unsupported(Feature::EpisodeQueue);
        }
        let Some(entry) = normalize(&self.item) else {
            return self.unsupported(Feature::EpisodeQueue);
        };

        let index = queue.append(entry);
        self.notifier.notify(Notice::Message(format!(
            "\"{}\" added to queue",
            self.item.name()
        )));
        ActionOutcome::Queued { index }
    }

    /// Opens the playlist picker, or sends a signed-out user to log in.
    pub fn toggle_playlist_dialog(&mut self) -> ActionOutcome {
        if self.user.is_none() {
            info!(route = %self.login_route, "playlist dialog needs a signed-in user");
            self.router.push(&self.login_route);
            self.notifier.notify(Notice::Info {
                title: String::from(LOGIN_REQUIRED_TITLE),
                description: String::from(LOGIN_REQUIRED_DESCRIPTION),
            });
            return ActionOutcome::Redirected(self.login_route.clone());
        }

        self.session.open_dialog();
        ActionOutcome::DialogOpened
    }

    pub fn close_playlist_dialog(&mut self) {
        self.session.close_dialog();
    }

    /// Playlists offered while the picker is showing.
    pub fn playlist_choices(&self) -> &[PlaylistSummary] {
        if self.user.is_some() && self.session.is_dialog_open() {
            &self.playlists
        } else {
            &[]
        }
    }

    /// Sends the item to a playlist picked from the open dialog. Returns
    /// `None` without touching the store when nobody is signed in (the caller
    /// is redirected to log in) or the dialog is not showing.
    pub fn add_to_playlist(
        &mut self,
        playlist_id: &str,
        playlist_name: &str,
    ) -> Option<PendingPlaylistAdd> {
        if self.user.is_none() {
            self.toggle_playlist_dialog();
            return None;
        }
        if !self.session.is_dialog_open() {
            debug!(playlist_id, "playlist dialog closed, ignoring add");
            return None;
        }

        Some(self.coordinator.start(
            &self.session,
            playlist_id,
            playlist_name,
            self.item.id(),
            self.item.name(),
        ))
    }

    pub fn finish_playlist_add(&mut self, settled: SettledPlaylistAdd) -> PlaylistAddOutcome {
        self.coordinator.finish(settled, &mut self.session)
    }

    /// Sends the request and waits for it. The menu is borrowed for the whole
    /// round trip; use `add_to_playlist` to keep acting while it is pending.
    pub async fn add_to_playlist_and_wait(
        &mut self,
        playlist_id: &str,
        playlist_name: &str,
    ) -> Option<PlaylistAddOutcome> {
        let pending = self.add_to_playlist(playlist_id, playlist_name)?;
        let settled = pending.wait().await;
        Some(self.finish_playlist_add(settled))
    }

    fn unsupported(&self, feature: Feature) -> ActionOutcome {
        debug!(?feature, item_id = self.item.id(), "feature not available");
        self.notifier.notify(Notice::InDevelopment);
        ActionOutcome::Unsupported(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{LocalPlaylistStore, MemoryRouter};
    use crate::model::fixtures::{episode, song};
    use crate::model::{ItemKind, QueueEntry};
    use crate::notify::MemoryNotifier;
    use proptest::prop_assert;

    struct Harness {
        notifier: Arc<MemoryNotifier>,
        router: Arc<MemoryRouter>,
        services: MenuServices,
    }

    fn harness() -> Harness {
        let notifier = Arc::new(MemoryNotifier::new());
        let router = Arc::new(MemoryRouter::new());
        let services = MenuServices {
            notifier: notifier.clone(),
            router: router.clone(),
            playlists: Arc::new(LocalPlaylistStore::default()),
        };
        Harness {
            notifier,
            router,
            services,
        }
    }

    fn song_menu(id: &str, h: &Harness) -> TileMenu {
        TileMenu::new(PlayableItem::Song(song(id)), h.services.clone())
    }

    #[test]
    fn play_on_empty_queue_appends_and_selects_first() {
        let h = harness();
        let mut queue = PlayerQueue::new();

        let outcome = song_menu("a", &h).play(&mut queue);

        assert_eq!(
            outcome,
            ActionOutcome::Played {
                index: 0,
                reused: false
            }
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current_index(), Some(0));
        assert!(queue.is_player_active());
        assert_eq!(queue.entries()[0].artists, vec!["Guest", "Other"]);
    }

    #[test]
    fn play_reuses_existing_position() {
        let h = harness();
        let mut queue = PlayerQueue::new();
        queue.append(QueueEntry::from(&song("a")));
        queue.append(QueueEntry::from(&song("b")));
        queue.set_selection(0);

        let outcome = song_menu("b", &h).play(&mut queue);

        assert_eq!(
            outcome,
            ActionOutcome::Played {
                index: 1,
                reused: true
            }
        );
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn play_appends_after_existing_entries() {
        let h = harness();
        let mut queue = PlayerQueue::new();
        queue.append(QueueEntry::from(&song("a")));

        song_menu("c", &h).play(&mut queue);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn episode_play_is_unsupported_and_leaves_state() {
        let h = harness();
        let mut queue = PlayerQueue::new();
        let menu = TileMenu::new(PlayableItem::Episode(episode("e")), h.services.clone());

        assert_eq!(
            menu.play(&mut queue),
            ActionOutcome::Unsupported(Feature::EpisodePlayback)
        );
        assert_eq!(
            menu.add_to_queue(&mut queue),
            ActionOutcome::Unsupported(Feature::EpisodeQueue)
        );
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        assert!(!queue.is_player_active());
        assert_eq!(h.notifier.notices(), vec![Notice::InDevelopment, Notice::InDevelopment]);
    }

    #[test]
    fn queued_episode_entry_is_still_unsupported() {
        let h = harness();
        let mut queue = PlayerQueue::new();
        let mut entry = QueueEntry::from(&song("a"));
        entry.kind = ItemKind::Episode;
        let menu = TileMenu::new(PlayableItem::Queued(entry), h.services.clone());

        assert!(matches!(menu.play(&mut queue), ActionOutcome::Unsupported(_)));
        assert!(matches!(menu.add_to_queue(&mut queue), ActionOutcome::Unsupported(_)));
        assert!(queue.is_empty());
    }

    #[test]
    fn add_to_queue_never_deduplicates() {
        let h = harness();
        let mut queue = PlayerQueue::new();
        let menu = song_menu("a", &h);

        assert_eq!(menu.add_to_queue(&mut queue), ActionOutcome::Queued { index: 0 });
        assert_eq!(menu.add_to_queue(&mut queue), ActionOutcome::Queued { index: 1 });

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), None);
        assert!(!queue.is_player_active());
        let expected = Notice::Message(String::from("\"Song a\" added to queue"));
        assert_eq!(h.notifier.notices(), vec![expected.clone(), expected]);
    }

    #[test]
    fn stubs_report_unsupported_for_every_kind() {
        let h = harness();
        let mut queue = PlayerQueue::new();
        for item in [
            PlayableItem::Song(song("a")),
            PlayableItem::Episode(episode("e")),
            PlayableItem::Queued(QueueEntry::from(&song("q"))),
        ] {
            let mut menu = TileMenu::new(item, h.services.clone());
            assert_eq!(
                menu.dispatch(MenuAction::Favourite, &mut queue),
                ActionOutcome::Unsupported(Feature::Favourite)
            );
            assert_eq!(
                menu.dispatch(MenuAction::PlayRadio, &mut queue),
                ActionOutcome::Unsupported(Feature::Radio)
            );
        }
        assert!(queue.is_empty());
        assert_eq!(h.notifier.notices().len(), 6);
    }

    #[test]
    fn signed_out_user_is_sent_to_login() {
        let h = harness();
        let mut menu = song_menu("a", &h).with_login_route("/signin");

        let outcome = menu.toggle_playlist_dialog();

        assert_eq!(outcome, ActionOutcome::Redirected(String::from("/signin")));
        assert!(!menu.session().is_dialog_open());
        assert_eq!(h.router.routes(), vec!["/signin"]);
        assert_eq!(
            h.notifier.notices(),
            vec![Notice::Info {
                title: String::from(LOGIN_REQUIRED_TITLE),
                description: String::from(LOGIN_REQUIRED_DESCRIPTION),
            }]
        );
    }

    #[test]
    fn signed_in_user_sees_playlists_while_dialog_open() {
        let h = harness();
        let playlists = vec![PlaylistSummary {
            id: String::from("pl1"),
            name: String::from("Favorites"),
        }];
        let mut menu = song_menu("a", &h)
            .with_user(Some(User {
                name: String::from("sam"),
            }))
            .with_playlists(playlists.clone());

        assert!(menu.playlist_choices().is_empty());
        assert_eq!(menu.toggle_playlist_dialog(), ActionOutcome::DialogOpened);
        assert_eq!(menu.playlist_choices(), playlists.as_slice());

        menu.close_playlist_dialog();
        assert!(menu.playlist_choices().is_empty());
        assert!(h.router.routes().is_empty());
    }

    #[test]
    fn present_resets_share_panel() {
        let h = harness();
        let mut menu = song_menu("a", &h);
        menu.open_share();
        menu.present();
        assert_eq!(menu.session().panel(), crate::menu::MenuPanel::Primary);
    }

    #[test]
    fn episode_menu_labels_and_header() {
        let h = harness();
        let menu = TileMenu::new(PlayableItem::Episode(episode("e")), h.services.clone());

        let labels: Vec<String> = menu.actions().into_iter().map(|(_, label)| label).collect();
        assert_eq!(labels[1], "Play Episode Now");
        assert_eq!(menu.header().title, "Episode e");
        assert_eq!(menu.header().description, "Some Show");
        assert_eq!(menu.header().image, "https://img.example/e.jpg");
    }

    proptest::proptest! {
        #[test]
        fn selection_stays_in_range_after_random_actions(ops in proptest::collection::vec((0u8..5, 0usize..4), 1..120)) {
            let h = harness();
            let mut queue = PlayerQueue::new();
            let ids = ["a", "b", "c", "d"];

            for (op, pick) in ops {
                let mut menu = song_menu(ids[pick], &h);
                let before = queue.len();
                match op {
                    0 => {
                        let already = queue.find_index(ids[pick]);
                        menu.dispatch(MenuAction::PlayNow, &mut queue);
                        match already {
                            Some(idx) => {
                                prop_assert!(queue.len() == before);
                                prop_assert!(queue.current_index() == Some(idx));
                            }
                            None => {
                                prop_assert!(queue.len() == before + 1);
                                prop_assert!(queue.current_index() == Some(before));
                            }
                        }
                        prop_assert!(queue.is_player_active());
                    }
                    1 => {
                        menu.dispatch(MenuAction::AddToQueue, &mut queue);
                        prop_assert!(queue.len() == before + 1);
                    }
                    2 => {
                        menu.dispatch(MenuAction::Favourite, &mut queue);
                        prop_assert!(queue.len() == before);
                    }
                    3 => {
                        menu.open_share();
                        menu.back();
                    }
                    _ => {
                        menu.dispatch(MenuAction::AddToPlaylist, &mut queue);
                        prop_assert!(!menu.session().is_dialog_open());
                    }
                }

                if let Some(idx) = queue.current_index() {
                    prop_assert!(idx < queue.len());
                }
            }
        }
    }
}
