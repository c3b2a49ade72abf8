#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use tune_menu::collab::{LocalPlaylistStore, MemoryRouter};
use tune_menu::core::{MenuServices, TileMenu};
use tune_menu::menu::MenuAction;
use tune_menu::model::{PlayableItem, QueueEntry};
use tune_menu::notify::MemoryNotifier;
use tune_menu::queue::PlayerQueue;

fn entry(id: u8) -> QueueEntry {
    QueueEntry {
        id: format!("item_{}", id % 8),
        name: format!("item {id}"),
        subtitle: String::new(),
        kind: Default::default(),
        url: String::new(),
        image: String::new(),
        artists: Vec::new(),
        download_url: String::new(),
    }
}

fuzz_target!(|data: &[u8]| {
    let services = MenuServices {
        notifier: Arc::new(MemoryNotifier::new()),
        router: Arc::new(MemoryRouter::new()),
        playlists: Arc::new(LocalPlaylistStore::default()),
    };
    let mut queue = PlayerQueue::new();

    for pair in data.chunks(2) {
        let id = pair.get(1).copied().unwrap_or_default();
        let mut menu = TileMenu::new(PlayableItem::Queued(entry(id)), services.clone());
        match pair[0] % 6 {
            0 => {
                menu.dispatch(MenuAction::PlayNow, &mut queue);
            }
            1 => {
                menu.dispatch(MenuAction::AddToQueue, &mut queue);
            }
            2 => {
                menu.dispatch(MenuAction::AddToPlaylist, &mut queue);
            }
            3 => {
                menu.open_share();
                menu.back();
            }
            4 => {
                menu.dispatch(MenuAction::Favourite, &mut queue);
            }
            _ => menu.present(),
        }

        if let Some(idx) = queue.current_index() {
            assert!(idx < queue.len());
        }
    }
});
