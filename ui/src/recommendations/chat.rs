//! Local simulated assistant. Replies are canned text derived from the
//! top-ranked recommendation; nothing is sent to a backend.

use uuid::Uuid;

use crate::api::CollaborationRecommendation;

pub const NO_RECOMMENDATION_REPLY: &str = "Mohon maaf, saat ini belum ada rekomendasi kolaborasi tersedia. Silakan jalankan clustering terlebih dahulu.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    User,
    Bot,
    Typing,
    Error,
}

impl ChatKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "chat-message--user",
            Self::Bot => "chat-message--bot",
            Self::Typing => "chat-message--typing",
            Self::Error => "chat-message--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub kind: ChatKind,
    pub text: String,
}

impl ChatMessage {
    fn new(kind: ChatKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            text: text.into(),
        }
    }
}

/// Append-only transcript with at most one pending typing placeholder per reply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.messages.iter().any(|m| m.kind == ChatKind::Typing)
    }

    /// Returns `false` (and records nothing) for blank input.
    pub fn push_user(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage::new(ChatKind::User, text));
        true
    }

    /// Insert a typing placeholder and return its id.
    pub fn begin_typing(&mut self) -> String {
        let placeholder = ChatMessage::new(ChatKind::Typing, "");
        let id = placeholder.id.clone();
        self.messages.push(placeholder);
        id
    }

    /// Swap the placeholder for the bot reply. Unknown ids append the reply.
    pub fn resolve_typing(&mut self, placeholder_id: &str, reply: impl Into<String>) {
        self.messages
            .retain(|m| !(m.kind == ChatKind::Typing && m.id == placeholder_id));
        self.messages.push(ChatMessage::new(ChatKind::Bot, reply));
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatKind::Error, text));
    }
}

/// Reply to any user question.
pub fn canned_reply(top: Option<&CollaborationRecommendation>) -> String {
    let Some(top) = top else {
        return NO_RECOMMENDATION_REPLY.to_string();
    };
    let a = &top.innovation_a;
    let b = &top.innovation_b;
    format!(
        "Rekomendasi kolaborasi terbaik saat ini adalah antara \"{}\" ({}) dan \"{}\" ({}) dengan skor kecocokan {}%. Kedua inovasi berada di tahap {} dengan tingkat kematangan {}.",
        a.title,
        a.domain,
        b.title,
        b.domain,
        top.percentage(),
        a.stage,
        a.maturity_label
    )
}

/// Short summary for the retry action; nothing to say without recommendations.
pub fn retry_reply(top: Option<&CollaborationRecommendation>) -> Option<String> {
    top.map(|top| {
        format!(
            "Rekomendasi teratas: kolaborasi \"{}\" dan \"{}\" dengan skor {}%.",
            top.innovation_a.title,
            top.innovation_b.title,
            top.percentage()
        )
    })
}
