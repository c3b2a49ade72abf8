use crate::model::{PersistedState, QueueEntry};
use tracing::{debug, warn};

/// Ordered playback queue plus the selected position and the player flag.
///
/// One instance lives for the whole player session and is handed to every
/// menu by reference. Duplicate ids are allowed; lookups return the first hit.
#[derive(Debug, Default)]
pub struct PlayerQueue {
    entries: Vec<QueueEntry>,
    current_index: Option<usize>,
    player_active: bool,
}

impl PlayerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the queue from disk. The player flag always starts off, and a
    /// stored selection that no longer fits the queue is dropped.
    pub fn from_persisted(state: &PersistedState) -> Self {
        let entries = state.queue.clone();
        let current_index = state.current_index.filter(|idx| *idx < entries.len());
        if current_index != state.current_index {
            warn!(
                stored = ?state.current_index,
                len = entries.len(),
                "dropping out of range queue selection"
            );
        }
        Self {
            entries,
            current_index,
            player_active: false,
        }
    }

    pub fn write_to(&self, state: &mut PersistedState) {
        state.queue = self.entries.clone();
        state.current_index = self.current_index;
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current(&self) -> Option<&QueueEntry> {
        self.entries.get(self.current_index?)
    }

    pub fn is_player_active(&self) -> bool {
        self.player_active
    }

    pub fn find_index(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Returns the position the entry landed at.
    pub fn append(&mut self, entry: QueueEntry) -> usize {
        debug!(item_id = %entry.id, position = self.entries.len(), "queue append");
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// # Panics
    ///
    /// Panics if `index` is not a position in the queue.
    pub fn set_selection(&mut self, index: usize) {
        assert!(
            index < self.entries.len(),
            "selection {index} out of range for queue of {}",
            self.entries.len()
        );
        debug!(index, "queue selection");
        self.current_index = Some(index);
    }

    pub fn activate_player(&mut self) {
        if !self.player_active {
            debug!("player activated");
        }
        self.player_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::song;

    fn entry(id: &str) -> QueueEntry {
        QueueEntry::from(&song(id))
    }

    #[test]
    fn find_index_returns_first_match() {
        let mut queue = PlayerQueue::new();
        queue.append(entry("a"));
        queue.append(entry("b"));
        queue.append(entry("a"));

        assert_eq!(queue.find_index("a"), Some(0));
        assert_eq!(queue.find_index("b"), Some(1));
        assert_eq!(queue.find_index("missing"), None);
    }

    #[test]
    fn append_keeps_duplicates_in_order() {
        let mut queue = PlayerQueue::new();
        assert_eq!(queue.append(entry("a")), 0);
        assert_eq!(queue.append(entry("a")), 1);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn set_selection_points_at_entry() {
        let mut queue = PlayerQueue::new();
        queue.append(entry("a"));
        queue.append(entry("b"));
        queue.set_selection(1);

        assert_eq!(queue.current().map(|e| e.id.as_str()), Some("b"));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_selection_rejects_out_of_range() {
        let mut queue = PlayerQueue::new();
        queue.append(entry("a"));
        queue.set_selection(1);
    }

    #[test]
    fn activate_player_is_idempotent() {
        let mut queue = PlayerQueue::new();
        queue.activate_player();
        queue.activate_player();
        assert!(queue.is_player_active());
    }

    #[test]
    fn restore_drops_stale_selection_and_starts_inactive() {
        let state = PersistedState {
            queue: vec![entry("a")],
            current_index: Some(3),
            ..PersistedState::default()
        };
        let queue = PlayerQueue::from_persisted(&state);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current_index(), None);
        assert!(!queue.is_player_active());
    }

    #[test]
    fn write_to_round_trips_selection() {
        let mut queue = PlayerQueue::new();
        queue.append(entry("a"));
        queue.append(entry("b"));
        queue.set_selection(1);

        let mut state = PersistedState::default();
        queue.write_to(&mut state);
        let restored = PlayerQueue::from_persisted(&state);
        assert_eq!(restored.current_index(), Some(1));
        assert_eq!(restored.entries(), queue.entries());
    }
}
