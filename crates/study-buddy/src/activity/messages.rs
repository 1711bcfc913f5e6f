use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::connections::{with_status, Connection, ConnectionStatus};
use crate::discovery::CandidateId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: CandidateId,
    pub recipient_id: CandidateId,
    pub content: String,
    pub sent_at: NaiveDateTime,
    #[serde(default)]
    pub read: bool,
}

impl Message {
    fn involves(&self, participant: &CandidateId) -> bool {
        &self.sender_id == participant || &self.recipient_id == participant
    }
}

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub buddy_id: CandidateId,
    pub name: String,
    pub initials: String,
    pub unread: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
}

/// All messages visible to the signed-in student.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    messages: Vec<Message>,
}

impl Inbox {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn send(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Thread with `buddy`, oldest first.
    pub fn conversation(&self, buddy: &CandidateId) -> Vec<&Message> {
        let mut thread: Vec<&Message> = self
            .messages
            .iter()
            .filter(|message| message.involves(buddy))
            .collect();
        thread.sort_by_key(|message| message.sent_at);
        thread
    }

    /// Unread messages sent by `buddy`.
    pub fn unread_from(&self, buddy: &CandidateId) -> usize {
        self.messages
            .iter()
            .filter(|message| &message.sender_id == buddy && !message.read)
            .count()
    }

    pub fn last_message_with(&self, buddy: &CandidateId) -> Option<&Message> {
        self.messages
            .iter()
            .filter(|message| message.involves(buddy))
            .max_by_key(|message| message.sent_at)
    }

    /// Conversation list: active connections whose name contains `query`, ignoring case.
    pub fn summaries(&self, connections: &[Connection], query: &str) -> Vec<ConversationSummary> {
        let lowered = query.to_lowercase();
        with_status(connections, ConnectionStatus::Active)
            .into_iter()
            .filter(|connection| connection.name.to_lowercase().contains(&lowered))
            .map(|connection| ConversationSummary {
                buddy_id: connection.id.clone(),
                name: connection.name.clone(),
                initials: connection.initials(),
                unread: self.unread_from(&connection.id),
                last_message: self.last_message_with(&connection.id).cloned(),
            })
            .collect()
    }
}
