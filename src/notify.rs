use std::sync::{Mutex, PoisonError};
use tracing::info;

pub const IN_DEVELOPMENT: &str = "This feature is currently in development";
pub const LOGIN_REQUIRED_TITLE: &str = "Unable to perform action";
pub const LOGIN_REQUIRED_DESCRIPTION: &str = "You need to be logged in to add to playlist";
pub const PLAYLIST_LOADING: &str = "Adding songs to playlist...";

/// Transient, user-visible messages. `ticket` ties the three stages of one
/// playlist request together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Message(String),
    Info { title: String, description: String },
    InDevelopment,
    Loading { ticket: u64, text: String },
    Success { ticket: u64, text: String },
    Failure { ticket: u64, text: String },
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::Message(text) => text,
            Self::Info { title, .. } => title,
            Self::InDevelopment => IN_DEVELOPMENT,
            Self::Loading { text, .. }
            | Self::Success { text, .. }
            | Self::Failure { text, .. } => text,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Keeps every notice it receives.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

/// Prints notices for the command line front end.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        info!(?notice, "notice");
        match &notice {
            Notice::Info { title, description } => println!("[info] {title}: {description}"),
            Notice::Loading { text, .. } => println!("[..] {text}"),
            Notice::Success { text, .. } => println!("[ok] {text}"),
            Notice::Failure { text, .. } => println!("[error] {text}"),
            Notice::Message(_) | Notice::InDevelopment => println!("{}", notice.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::Message(String::from("one")));
        notifier.notify(Notice::InDevelopment);

        let notices = notifier.take();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].text(), IN_DEVELOPMENT);
        assert!(notifier.notices().is_empty());
    }
}
