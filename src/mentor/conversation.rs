use crate::mentor::{Message, Sender};

/// Append-only transcript of one session. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn from_sender(&self, sender: Sender) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.sender == sender)
    }

    /// The whole transcript as a pretty-printed JSON array, oldest first.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self.messages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::subject::Subject;
    use crate::mentor::MessageKind;

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut log = ConversationLog::default();
        let first = Message::user("hi", None);
        let second = Message::assistant("hello", None, MessageKind::Response);
        log.append(first.clone());
        log.append(second.clone());
        log.append(first.clone());

        assert_eq!(log.messages(), &[first.clone(), second, first]);
        assert_eq!(log.from_sender(Sender::User).count(), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn transcript_json_keeps_order_and_field_names() {
        let mut log = ConversationLog::default();
        log.append(Message::user("plan please", Some(Subject::Science)));
        log.append(Message::assistant(
            "Science Mastery Plan",
            Some(Subject::Science),
            MessageKind::StudyPlan,
        ));

        let json = log.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["sender"], "user");
        assert_eq!(entries[0]["subject"], "science");
        assert!(entries[0]["kind"].is_null());
        assert_eq!(entries[1]["sender"], "assistant");
        assert_eq!(entries[1]["kind"], "study-plan");
        assert_eq!(entries[1]["text"], "Science Mastery Plan");
        assert!(entries[1]["timestamp"].is_string());
    }

    #[test]
    fn empty_log_exports_an_empty_array() {
        let log = ConversationLog::default();
        assert!(log.is_empty());
        assert_eq!(log.to_json().unwrap(), "[]");
    }
}
