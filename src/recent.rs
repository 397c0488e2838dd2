//! Recently seen guild messages, kept so a deletion can still say who wrote what.  Lost across
//! sessions.

use crate::event::DeletedMessage;
use serenity::all::MessageId;
use std::collections::{HashMap, VecDeque};

pub struct RecentMessages {
    capacity: usize,
    /// Oldest first
    order: VecDeque<MessageId>,
    messages: HashMap<MessageId, DeletedMessage>,
}

impl RecentMessages {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            messages: HashMap::with_capacity(capacity),
        }
    }

    /// Remember a message, forgetting the oldest one once full.
    pub fn insert(&mut self, id: MessageId, message: DeletedMessage) {
        if self.capacity == 0 {
            return;
        }
        if self.messages.insert(id, message).is_some() {
            return;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.messages.remove(&oldest);
            }
        }
    }

    /// Record an edit, if the message is still remembered.
    pub fn update(&mut self, id: MessageId, content: String) {
        if let Some(message) = self.messages.get_mut(&id) {
            message.content = content;
        }
    }

    /// Forget a message, handing back what was remembered about it.
    pub fn take(&mut self, id: MessageId) -> Option<DeletedMessage> {
        let message = self.messages.remove(&id)?;
        self.order.retain(|kept| *kept != id);
        Some(message)
    }
}
