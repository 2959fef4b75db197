use crate::page::Page;
use crate::{Channel, Chat, Preview, User};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9 ]+").expect("number regex is valid"));

// Telegram fills the description with this line when a user has no bio.
static NO_BIO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^You can contact @[a-z0-9_]+ right away\.$").expect("bio regex is valid")
});

/// Kind of entity a preview page describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Channel,
    Chat,
}

impl EntityKind {
    /// Decides the entity kind from the action button label alone.
    ///
    /// Public channels and public chats share the "View in Telegram" label;
    /// only channels also render a preview button.
    pub fn classify(button: &str, has_preview: bool) -> Option<Self> {
        match button.to_lowercase().as_str() {
            "send message" => Some(EntityKind::User),
            "view in telegram" if has_preview => Some(EntityKind::Channel),
            "view in telegram" => Some(EntityKind::Chat),
            "join channel" => Some(EntityKind::Channel),
            "join group" => Some(EntityKind::Chat),
            _ => None,
        }
    }
}

impl Page {
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::classify(&self.button, self.has_preview)
    }

    /// Maps the page into its typed preview. Unknown pages become
    /// [`Preview::Empty`].
    pub fn to_preview(&self) -> Preview {
        match self.kind() {
            Some(EntityKind::User) => Preview::User(self.to_user()),
            Some(EntityKind::Channel) => Preview::Channel(self.to_channel()),
            Some(EntityKind::Chat) => Preview::Chat(self.to_chat()),
            None => {
                debug!(button = %self.button, "Unrecognized action button");
                Preview::Empty
            }
        }
    }

    /// Parses the `index`-th run of digits and spaces in the extra line,
    /// so `"1 020 members, 303 online"` gives 1020 for index 0 and 303 for
    /// index 1. Missing or unparseable runs give 0.
    pub fn extra_number(&self, index: usize) -> u64 {
        parse_number_run(&self.extra, index)
    }

    fn to_user(&self) -> User {
        User {
            name: self.title.clone(),
            username: self.extra.clone(),
            bio: filter_bio(&self.description).to_string(),
            avatar: self.avatar.clone(),
        }
    }

    fn to_channel(&self) -> Channel {
        Channel {
            title: self.title.clone(),
            members: self.extra_number(0),
            description: self.description.clone(),
            avatar: self.avatar.clone(),
        }
    }

    fn to_chat(&self) -> Chat {
        Chat {
            title: self.title.clone(),
            members: self.extra_number(0),
            online: self.extra_number(1),
            description: self.description.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

fn parse_number_run(text: &str, index: usize) -> u64 {
    NUMBER_REGEX
        .find_iter(text)
        .nth(index)
        .and_then(|run| run.as_str().replace(' ', "").parse().ok())
        .unwrap_or(0)
}

fn filter_bio(description: &str) -> &str {
    if NO_BIO_REGEX.is_match(description) {
        ""
    } else {
        description
    }
}
