//! Owned user/channel/member directory for mention resolution.
//!
//! The original client kept these dictionaries as process-wide statics; here
//! they are an explicitly owned value with a single writer (whatever layer
//! ingests directory updates) and read-only lookups for resolvers.

use std::collections::HashMap;

use crate::types::{Channel, Member, User};

#[derive(Debug, Default)]
/// Public struct `Directory` used across Quill components.
pub struct Directory {
    users: HashMap<String, User>,
    channels: HashMap<String, Channel>,
    members: HashMap<(String, String), Member>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn insert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id.clone(), channel);
    }

    pub fn insert_member(&mut self, member: Member) {
        self.members
            .insert((member.server_id.clone(), member.user_id.clone()), member);
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn channel(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.get(channel_id)
    }

    pub fn member(&self, server_id: &str, user_id: &str) -> Option<&Member> {
        self.members
            .get(&(server_id.to_string(), user_id.to_string()))
    }
}
