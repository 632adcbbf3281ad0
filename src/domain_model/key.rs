//! Key-space layout shared with every other client of the same store.
//!
//! | key                 | type    | contents                         |
//! |---------------------|---------|----------------------------------|
//! | `user:{id}`         | hash    | `name`, `login`                  |
//! | `user:{id}:friends` | set     | friend user ids                  |
//! | `message:{id}`      | hash    | `user_id`, `text`, `timestamp`   |
//! | `message:next_id`   | integer | last issued message id           |

use crate::domain_model::MessageId;

pub const USER_PREFIX: &str = "user:";
pub const USER_PATTERN: &str = "user:*";
pub const FRIENDS_SUFFIX: &str = ":friends";

pub const MESSAGE_PREFIX: &str = "message:";
pub const MESSAGE_PATTERN: &str = "message:*";
pub const MESSAGE_NEXT_ID: &str = "message:next_id";

pub mod field {
    pub const NAME: &str = "name";
    pub const LOGIN: &str = "login";

    pub const USER_ID: &str = "user_id";
    pub const TEXT: &str = "text";
    pub const TIMESTAMP: &str = "timestamp";
}

pub fn user_key(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

pub fn friends_key(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}{FRIENDS_SUFFIX}")
}

pub fn message_key(message_id: MessageId) -> String {
    format!("{MESSAGE_PREFIX}{message_id}")
}

/// Extracts the id from a primary `user:{id}` key. Derived keys such as
/// `user:{id}:friends` return `None`.
pub fn user_id_from_key(key: &str) -> Option<&str> {
    let rest = key.strip_prefix(USER_PREFIX)?;
    if rest.is_empty() || rest.contains(':') {
        return None;
    }
    Some(rest)
}

/// True for `message:*` keys that hold a message record, i.e. anything but the counter.
pub fn is_message_record_key(key: &str) -> bool {
    key.starts_with(MESSAGE_PREFIX) && key != MESSAGE_NEXT_ID
}
