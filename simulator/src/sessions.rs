//! Local auth/session layer over a [`KvStore`].
//!
//! Mirrors the hosting application's local-storage contract: the same fixed
//! key names, the same JSON record shapes, and the same line-oriented
//! transcript format for conversation import/export. The password digest is
//! illustrative only; nothing here is hardened and nothing should be.
//!
//! Timestamps are caller-supplied ISO-8601 strings so the layer stays
//! deterministic under test.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use thiserror::Error as ThisError;
use tracing::debug;
use uuid::Uuid;

use tutorhub_types::session::{
    CONVERSATIONS_KEY, CURRENT_USER_KEY, USERS_KEY, USER_PREFERENCES_KEY,
};
use tutorhub_types::{
    ChatMessage, ChatRole, ConversationRecord, PreferencesRecord, UserRecord,
};

use crate::store::{KvStore, StoreError};

/// Salt baked into the illustrative password digest.
const SECRET_KEY: &str = "web3-tutor-hub-secret-key";

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },
    #[error("no account for email: {email}")]
    UnknownUser { email: String },
    #[error("invalid credentials for {email}")]
    InvalidCredentials { email: String },
    #[error("conversation not found: {id}")]
    UnknownConversation { id: String },
    #[error("transcript contained no valid messages")]
    EmptyTranscript,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("corrupt session record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Illustrative salted SHA-256 digest, hex-encoded.
fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(SECRET_KEY.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// User, conversation, and preference management over a key-value store.
pub struct SessionManager<S: KvStore> {
    store: S,
}

impl<S: KvStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store, for embedders that share it.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_users(&self) -> Result<Vec<UserRecord>, SessionError> {
        match self.store.get(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_users(&mut self, users: &[UserRecord]) -> Result<(), SessionError> {
        self.store.put(USERS_KEY, serde_json::to_string(users)?)?;
        Ok(())
    }

    /// Register a new account. Emails are unique.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        now: &str,
    ) -> Result<UserRecord, SessionError> {
        let mut users = self.load_users()?;
        if users.iter().any(|user| user.email == email) {
            return Err(SessionError::DuplicateEmail {
                email: email.to_string(),
            });
        }
        let user = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: Some(hash_password(password)),
            created_at: now.to_string(),
        };
        users.push(user.clone());
        self.save_users(&users)?;
        debug!(email, "user registered");
        Ok(user.without_hash())
    }

    /// Sign in and record the current user (with the digest stripped).
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserRecord, SessionError> {
        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|user| user.email == email)
            .ok_or_else(|| SessionError::UnknownUser {
                email: email.to_string(),
            })?;
        if user.password_hash.as_deref() != Some(hash_password(password).as_str()) {
            return Err(SessionError::InvalidCredentials {
                email: email.to_string(),
            });
        }
        let current = user.without_hash();
        self.store
            .put(CURRENT_USER_KEY, serde_json::to_string(&current)?)?;
        debug!(email, "user signed in");
        Ok(current)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.remove(CURRENT_USER_KEY)?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<UserRecord>, SessionError> {
        match self.store.get(CURRENT_USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.current_user(), Ok(Some(_)))
    }

    fn load_conversations(
        &self,
    ) -> Result<HashMap<String, Vec<ConversationRecord>>, SessionError> {
        match self.store.get(CONVERSATIONS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(HashMap::new()),
        }
    }

    fn save_conversations(
        &mut self,
        all: &HashMap<String, Vec<ConversationRecord>>,
    ) -> Result<(), SessionError> {
        self.store
            .put(CONVERSATIONS_KEY, serde_json::to_string(all)?)?;
        Ok(())
    }

    /// All conversations belonging to a user.
    pub fn conversations(&self, user_id: &str) -> Result<Vec<ConversationRecord>, SessionError> {
        Ok(self
            .load_conversations()?
            .remove(user_id)
            .unwrap_or_default())
    }

    /// Insert or replace a conversation by id.
    pub fn save_conversation(
        &mut self,
        user_id: &str,
        conversation: ConversationRecord,
    ) -> Result<(), SessionError> {
        let mut all = self.load_conversations()?;
        let list = all.entry(user_id.to_string()).or_default();
        match list.iter_mut().find(|existing| existing.id == conversation.id) {
            Some(existing) => *existing = conversation,
            None => list.push(conversation),
        }
        self.save_conversations(&all)
    }

    /// Delete a conversation; deleting an absent one is a no-op.
    pub fn delete_conversation(
        &mut self,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<(), SessionError> {
        let mut all = self.load_conversations()?;
        if let Some(list) = all.get_mut(user_id) {
            list.retain(|conversation| conversation.id != conversation_id);
            self.save_conversations(&all)?;
        }
        Ok(())
    }

    /// Append a message; the conversation's `updated_at` follows the
    /// message timestamp.
    pub fn add_message(
        &mut self,
        user_id: &str,
        conversation_id: &str,
        message: ChatMessage,
    ) -> Result<ConversationRecord, SessionError> {
        let mut all = self.load_conversations()?;
        let list = all
            .get_mut(user_id)
            .ok_or_else(|| SessionError::UnknownConversation {
                id: conversation_id.to_string(),
            })?;
        let conversation = list
            .iter_mut()
            .find(|conversation| conversation.id == conversation_id)
            .ok_or_else(|| SessionError::UnknownConversation {
                id: conversation_id.to_string(),
            })?;
        conversation.updated_at = message.timestamp.clone();
        conversation.messages.push(message);
        let updated = conversation.clone();
        self.save_conversations(&all)?;
        Ok(updated)
    }

    /// Import a `[timestamp] Role: message` transcript as a new
    /// conversation. Unparseable lines are skipped; an import with zero
    /// valid messages is an error.
    pub fn import_transcript(
        &mut self,
        user_id: &str,
        content: &str,
        title: Option<&str>,
        now: &str,
    ) -> Result<ConversationRecord, SessionError> {
        let messages = parse_transcript(content);
        if messages.is_empty() {
            return Err(SessionError::EmptyTranscript);
        }
        let conversation = ConversationRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.unwrap_or("Imported Conversation").to_string(),
            messages,
            created_at: now.to_string(),
            updated_at: now.to_string(),
            avatar: "ethereum".to_string(),
            imported: true,
        };
        self.save_conversation(user_id, conversation.clone())?;
        debug!(
            user_id,
            messages = conversation.messages.len(),
            "transcript imported"
        );
        Ok(conversation)
    }

    pub fn preferences(&self, user_id: &str) -> Result<PreferencesRecord, SessionError> {
        let all: HashMap<String, PreferencesRecord> =
            match self.store.get(USER_PREFERENCES_KEY)? {
                Some(raw) => serde_json::from_str(&raw)?,
                None => HashMap::new(),
            };
        Ok(all.get(user_id).cloned().unwrap_or_default())
    }

    pub fn save_preferences(
        &mut self,
        user_id: &str,
        preferences: PreferencesRecord,
    ) -> Result<(), SessionError> {
        let mut all: HashMap<String, PreferencesRecord> =
            match self.store.get(USER_PREFERENCES_KEY)? {
                Some(raw) => serde_json::from_str(&raw)?,
                None => HashMap::new(),
            };
        all.insert(user_id.to_string(), preferences);
        self.store
            .put(USER_PREFERENCES_KEY, serde_json::to_string(&all)?)?;
        Ok(())
    }
}

/// Parse a transcript of `[timestamp] Role: message` lines.
///
/// Accepted roles are `User`, `AI`, and `Assistant` (exact casing); the
/// latter two both map to the assistant. Anything else is skipped.
pub fn parse_transcript(content: &str) -> Vec<ChatMessage> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let rest = line.strip_prefix('[')?;
            let (timestamp, rest) = rest.split_once(']')?;
            let (role, message) = rest.trim_start().split_once(':')?;
            let role = match role {
                "User" => ChatRole::User,
                "AI" | "Assistant" => ChatRole::Assistant,
                _ => return None,
            };
            let content = message.trim();
            if content.is_empty() {
                return None;
            }
            Some(ChatMessage {
                id: Uuid::new_v4().to_string(),
                role,
                content: content.to_string(),
                timestamp: timestamp.to_string(),
            })
        })
        .collect()
}

/// Render a conversation back into the transcript line format.
pub fn export_transcript(conversation: &ConversationRecord) -> String {
    conversation
        .messages
        .iter()
        .map(|message| {
            let role = match message.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
            };
            format!("[{}] {}: {}", message.timestamp, role, message.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
