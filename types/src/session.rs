//! Session-layer records: users, conversations, and preferences.
//!
//! These are the JSON blobs the hosting application keeps in its local
//! key-value store under the fixed key names below. Field names serialize in
//! camelCase to stay byte-compatible with records written by the web app.
//! Timestamps are caller-supplied ISO-8601 strings; the core never reads a
//! clock.

use serde::{Deserialize, Serialize};

/// Store key for the registered-user list.
pub const USERS_KEY: &str = "web3-tutor-users";
/// Store key for the currently signed-in user.
pub const CURRENT_USER_KEY: &str = "web3-tutor-current-user";
/// Store key for the per-user conversation map.
pub const CONVERSATIONS_KEY: &str = "web3-tutor-conversations";
/// Store key for the per-user preferences map.
pub const USER_PREFERENCES_KEY: &str = "web3-tutor-preferences";

/// A registered user.
///
/// `password_hash` is present in the user list but stripped from the
/// current-user record and from anything returned to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub created_at: String,
}

impl UserRecord {
    /// Copy of this record with the password digest removed.
    pub fn without_hash(&self) -> Self {
        Self {
            password_hash: None,
            ..self.clone()
        }
    }
}

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: String,
}

/// A stored conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: String,
    pub updated_at: String,
    pub avatar: String,
    #[serde(default)]
    pub imported: bool,
}

/// Per-user UI preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRecord {
    pub theme: String,
    pub notifications: bool,
    pub default_chat_avatar: String,
    pub auto_save_conversations: bool,
}

impl Default for PreferencesRecord {
    fn default() -> Self {
        Self {
            theme: "light".into(),
            notifications: true,
            default_chat_avatar: "ethereum".into(),
            auto_save_conversations: true,
        }
    }
}
