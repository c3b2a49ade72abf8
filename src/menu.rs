use crate::model::{ItemKind, PlayableItem};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPanel {
    #[default]
    Primary,
    Share,
}

impl MenuPanel {
    /// `Primary` only moves to `Share`; every other pairing is a no-op.
    pub fn open_share(self) -> Self {
        match self {
            Self::Primary => Self::Share,
            Self::Share => self,
        }
    }

    pub fn back(self) -> Self {
        match self {
            Self::Share => Self::Primary,
            Self::Primary => self,
        }
    }

    /// Horizontal slide, in percent, of the panel strip.
    pub fn translate_x(self) -> i16 {
        match self {
            Self::Primary => 0,
            Self::Share => -110,
        }
    }
}

/// State scoped to one presentation of the menu.
#[derive(Debug, Default)]
pub struct MenuSession {
    panel: MenuPanel,
    dialog_open: bool,
    generation: u64,
}

impl MenuSession {
    pub fn panel(&self) -> MenuPanel {
        self.panel
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a fresh presentation: primary panel, dialog closed.
    pub fn reopen(&mut self) {
        self.panel = MenuPanel::Primary;
        self.dialog_open = false;
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, "menu reopened");
    }

    pub fn open_share(&mut self) {
        self.panel = self.panel.open_share();
    }

    pub fn back(&mut self) {
        self.panel = self.panel.back();
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Favourite,
    PlayNow,
    AddToQueue,
    AddToPlaylist,
    PlayRadio,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        Self::Favourite,
        Self::PlayNow,
        Self::AddToQueue,
        Self::AddToPlaylist,
        Self::PlayRadio,
    ];

    fn base_label(self) -> &'static str {
        match self {
            Self::Favourite => "Add To Favourite",
            Self::PlayNow => "Play Song Now",
            Self::AddToQueue => "Add to Queue",
            Self::AddToPlaylist => "Add To Playlist",
            Self::PlayRadio => "Play Radio",
        }
    }

    pub fn label(self, kind: ItemKind) -> String {
        match kind {
            ItemKind::Song => self.base_label().to_string(),
            ItemKind::Episode => self
                .base_label()
                .replace(ItemKind::Song.label(), ItemKind::Episode.label()),
        }
    }
}

pub const SHARE_LABEL: &str = "Share";
pub const BACK_LABEL: &str = "Back";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuHeader {
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLinks {
    pub kind: ItemKind,
    pub item_url: String,
    pub album_url: Option<String>,
    pub primary_artists: Vec<String>,
}

impl MenuLinks {
    pub fn for_item(item: &PlayableItem, show_album: bool) -> Self {
        let kind = item.kind();
        let album_url = if show_album && kind == ItemKind::Song {
            item.album_url().map(str::to_string)
        } else {
            None
        };
        Self {
            kind,
            item_url: item.url().to_string(),
            album_url,
            primary_artists: item.primary_artists(),
        }
    }
}
