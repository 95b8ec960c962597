//! Mention resolution for the markdown rendering layer.
//!
//! Pure lookups against an owned [`Directory`]; absence always degrades to
//! the raw mention tag, so rendering never fails on a cold cache.

use quill_api::Directory;

/// Resolves a user mention to a display label.
///
/// Precedence: server-scoped member nickname, then global username, then the
/// raw `<@id>` tag when the user is unknown.
pub fn resolve_user_mention(directory: &Directory, user_id: &str, server_id: Option<&str>) -> String {
    let nickname = server_id
        .and_then(|server_id| directory.member(server_id, user_id))
        .and_then(|member| member.nickname.as_deref());
    if let Some(nickname) = nickname {
        return nickname.to_string();
    }
    if let Some(user) = directory.user(user_id) {
        return user.username.clone();
    }
    format!("<@{user_id}>")
}

/// Resolves a channel mention to `#name`, or the raw `<#id>` tag when the
/// channel is unknown or unnamed.
pub fn resolve_channel_mention(directory: &Directory, channel_id: &str) -> String {
    directory
        .channel(channel_id)
        .and_then(|channel| channel.name.as_deref())
        .map(|name| format!("#{name}"))
        .unwrap_or_else(|| format!("<#{channel_id}>"))
}

#[cfg(test)]
mod tests {
    use quill_api::{Channel, Directory, Member, User};

    use super::{resolve_channel_mention, resolve_user_mention};

    fn directory() -> Directory {
        let mut directory = Directory::new();
        directory.insert_user(User {
            id: "U1".to_string(),
            username: "ada".to_string(),
            display_name: None,
        });
        directory.insert_member(Member {
            server_id: "S1".to_string(),
            user_id: "U1".to_string(),
            nickname: Some("Countess".to_string()),
        });
        directory.insert_member(Member {
            server_id: "S2".to_string(),
            user_id: "U1".to_string(),
            nickname: None,
        });
        directory.insert_channel(Channel {
            id: "C1".to_string(),
            name: Some("general".to_string()),
        });
        directory.insert_channel(Channel {
            id: "C2".to_string(),
            name: None,
        });
        directory
    }

    #[test]
    fn nickname_wins_inside_its_server() {
        let directory = directory();
        assert_eq!(
            resolve_user_mention(&directory, "U1", Some("S1")),
            "Countess"
        );
    }

    #[test]
    fn username_used_without_server_context_or_nickname() {
        let directory = directory();
        assert_eq!(resolve_user_mention(&directory, "U1", None), "ada");
        // Membership exists in S2 but carries no nickname.
        assert_eq!(resolve_user_mention(&directory, "U1", Some("S2")), "ada");
        // Unknown server context falls back to the global username too.
        assert_eq!(resolve_user_mention(&directory, "U1", Some("S9")), "ada");
    }

    #[test]
    fn unknown_user_degrades_to_raw_tag() {
        let directory = directory();
        assert_eq!(resolve_user_mention(&directory, "U9", Some("S1")), "<@U9>");
        assert_eq!(resolve_user_mention(&directory, "U9", None), "<@U9>");
    }

    #[test]
    fn channel_resolution_prefixes_hash() {
        let directory = directory();
        assert_eq!(resolve_channel_mention(&directory, "C1"), "#general");
    }

    #[test]
    fn unnamed_or_unknown_channel_degrades_to_raw_tag() {
        let directory = directory();
        assert_eq!(resolve_channel_mention(&directory, "C2"), "<#C2>");
        assert_eq!(resolve_channel_mention(&directory, "C9"), "<#C9>");
    }
}
