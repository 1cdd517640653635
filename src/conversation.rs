use serde::{Deserialize, Serialize};

/// Greeting seeded into every new conversation.
pub const GREETING: &str =
    "Hello! I'm your Technical Support Assistant. How can I help you today?";

/// A single entry in the conversation. Immutable once appended; insertion
/// order is display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// Ordered message history plus the busy gate. Append-only: user entries go
/// in through [`append_user_message`](Conversation::append_user_message),
/// assistant entries through [`complete_exchange`](Conversation::complete_exchange),
/// and nothing is ever edited or removed.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    busy: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                sender: Sender::Assistant,
                text: GREETING.to_string(),
            }],
            busy: false,
        }
    }

    /// Accept a user submission. The text is trimmed; blank input and
    /// anything submitted while an exchange is in flight are silently
    /// ignored. Returns whether the message was appended (and the busy
    /// gate closed behind it).
    pub fn append_user_message(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.busy {
            return false;
        }
        self.messages.push(Message {
            sender: Sender::User,
            text: trimmed.to_string(),
        });
        self.busy = true;
        true
    }

    /// Record the assistant's side of the exchange and reopen the gate.
    /// Called exactly once per accepted submission, whether the exchange
    /// produced a real reply or a fallback.
    pub fn complete_exchange(&mut self, reply: String) {
        self.messages.push(Message {
            sender: Sender::Assistant,
            text: reply,
        });
        self.busy = false;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversation_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].sender, Sender::Assistant);
        assert_eq!(conversation.messages()[0].text, GREETING);
        assert!(!conversation.is_busy());
    }

    #[test]
    fn append_accepts_trimmed_text_and_sets_busy() {
        let mut conversation = Conversation::new();
        assert!(conversation.append_user_message("  My printer won't connect  "));
        assert!(conversation.is_busy());
        let last = conversation.messages().last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.text, "My printer won't connect");
    }

    #[test]
    fn append_ignores_blank_input() {
        let mut conversation = Conversation::new();
        assert!(!conversation.append_user_message(""));
        assert!(!conversation.append_user_message("   \t\n"));
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_busy());
    }

    #[test]
    fn append_ignores_submission_while_busy() {
        let mut conversation = Conversation::new();
        assert!(conversation.append_user_message("first"));
        assert!(!conversation.append_user_message("second"));
        assert_eq!(conversation.messages().len(), 2);
        assert!(conversation.is_busy());
    }

    #[test]
    fn complete_exchange_appends_reply_and_clears_busy() {
        let mut conversation = Conversation::new();
        conversation.append_user_message("My printer won't connect");
        let before = conversation.messages().len();
        conversation.complete_exchange("Try restarting your device.".to_string());
        assert_eq!(conversation.messages().len(), before + 1);
        assert!(!conversation.is_busy());
        let last = conversation.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.text, "Try restarting your device.");
    }

    #[test]
    fn sequential_exchanges_keep_submission_order() {
        let mut conversation = Conversation::new();
        conversation.append_user_message("first question");
        conversation.complete_exchange("first answer".to_string());
        conversation.append_user_message("second question");
        conversation.complete_exchange("second answer".to_string());

        let texts: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                GREETING,
                "first question",
                "first answer",
                "second question",
                "second answer",
            ]
        );
    }
}
