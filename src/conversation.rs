// src/conversation.rs

use crate::models::{Message, Role};

/// The session's accumulated user/assistant message sequence.
///
/// Owned by the session context, created at session start and destroyed
/// with it. Mutated only by appending; `clear` resets it in full. The
/// system prompt is never stored here — it is synthesized per request
/// from the current configuration.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Conversation::default()
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

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Invariant check: only user/assistant entries, in chronological
    /// order. The push methods make anything else unrepresentable.
    pub fn last_role(&self) -> Option<Role> {
        self.messages.last().map(|m| m.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_preserve_order_and_roles() {
        let mut convo = Conversation::new();
        convo.push_user("Hi");
        convo.push_assistant("Hello!");
        convo.push_user("How are you?");

        let roles: Vec<Role> = convo.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(convo.messages()[1].content, "Hello!");
        assert!(!convo.messages().iter().any(|m| m.role == Role::System));
    }

    #[test]
    fn clear_empties_regardless_of_size() {
        let mut convo = Conversation::new();
        for i in 0..20 {
            convo.push_user(format!("q{i}"));
            convo.push_assistant(format!("a{i}"));
        }
        assert_eq!(convo.len(), 40);

        convo.clear();
        assert!(convo.is_empty());
        assert_eq!(convo.last_role(), None);
    }
}
