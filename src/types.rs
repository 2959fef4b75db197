use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A user or a bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub name: String,

    /// Username with its leading `@`
    pub username: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bio: String,

    /// Link to avatar
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar: String,
}

/// A public or private channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub title: String,

    /// Subscriber count
    #[serde(default)]
    pub members: u64,

    pub description: String,

    /// Link to avatar
    pub avatar: String,
}

/// A public or private group chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub title: String,

    #[serde(default)]
    pub members: u64,

    /// Members online when the page was rendered
    #[serde(default)]
    pub online: u64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Link to avatar
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar: String,
}

/// What a t.me page turned out to describe.
///
/// Encodes as a single-key object (`{"user": {..}}`, `{"channel": {..}}`,
/// `{"chat": {..}}`), or `{}` when the page matched no known entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PreviewRepr")]
pub enum Preview {
    User(User),
    Channel(Channel),
    Chat(Chat),
    #[default]
    Empty,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        matches!(self, Preview::Empty)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Preview::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn channel(&self) -> Option<&Channel> {
        match self {
            Preview::Channel(channel) => Some(channel),
            _ => None,
        }
    }

    pub fn chat(&self) -> Option<&Chat> {
        match self {
            Preview::Chat(chat) => Some(chat),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Preview::User(_) => "user",
            Preview::Channel(_) => "channel",
            Preview::Chat(_) => "chat",
            Preview::Empty => "empty",
        }
    }
}

impl Serialize for Preview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.is_empty() { 0 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        match self {
            Preview::User(user) => map.serialize_entry("user", user)?,
            Preview::Channel(channel) => map.serialize_entry("channel", channel)?,
            Preview::Chat(chat) => map.serialize_entry("chat", chat)?,
            Preview::Empty => {}
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct PreviewRepr {
    user: Option<User>,
    channel: Option<Channel>,
    chat: Option<Chat>,
}

impl TryFrom<PreviewRepr> for Preview {
    type Error = String;

    fn try_from(repr: PreviewRepr) -> Result<Self, Self::Error> {
        match (repr.user, repr.channel, repr.chat) {
            (None, None, None) => Ok(Preview::Empty),
            (Some(user), None, None) => Ok(Preview::User(user)),
            (None, Some(channel), None) => Ok(Preview::Channel(channel)),
            (None, None, Some(chat)) => Ok(Preview::Chat(chat)),
            _ => Err("expected at most one of user, channel, chat".to_string()),
        }
    }
}
