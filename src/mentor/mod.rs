pub mod classifier;
pub mod conversation;
pub mod quiz;
pub mod session;
pub mod study_plan;
pub mod subject;
pub mod timeline;

use chrono::{DateTime, Utc};
use rand::Rng;

use subject::Subject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    Response,
    Quiz,
    StudyPlan,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub subject: Option<Subject>,
    pub kind: Option<MessageKind>,
}

impl Message {
    pub fn user(text: impl Into<String>, subject: Option<Subject>) -> Self {
        Self {
            id: new_message_id(),
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            subject,
            kind: None,
        }
    }

    pub fn assistant(text: impl Into<String>, subject: Option<Subject>, kind: MessageKind) -> Self {
        Self {
            id: new_message_id(),
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            subject,
            kind: Some(kind),
        }
    }
}

// Opaque: only uniqueness within a session matters.
fn new_message_id() -> String {
    format!("{:016x}", rand::thread_rng().gen::<u64>())
}
