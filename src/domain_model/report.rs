use crate::domain_model::MessageRecord;
use serde::Serialize;

pub const REPORT_HEADERS: [&str; 5] = ["ID", "Name", "Login", "Friends", "Messages"];

pub const MISSING_FIELD: &str = "N/A";
pub const NO_FRIENDS: &str = "no friends";
pub const NO_MESSAGES: &str = "no messages";

/// One row of the all-users dump: a user hash joined with its friend set
/// and the messages it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserReport {
    pub user_id: String,
    pub name: Option<String>,
    pub login: Option<String>,
    pub friends: Vec<String>,
    pub messages: Vec<MessageRecord>,
}

impl UserReport {
    pub fn cells(&self) -> [String; 5] {
        let friends = if self.friends.is_empty() {
            NO_FRIENDS.to_string()
        } else {
            self.friends.join(", ")
        };
        let messages = if self.messages.is_empty() {
            NO_MESSAGES.to_string()
        } else {
            self.messages
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        };
        [
            self.user_id.clone(),
            self.name.as_deref().unwrap_or(MISSING_FIELD).to_string(),
            self.login.as_deref().unwrap_or(MISSING_FIELD).to_string(),
            friends,
            messages,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_columns_use_placeholders() {
        let report = UserReport {
            user_id: "3".to_string(),
            name: None,
            login: None,
            friends: vec![],
            messages: vec![],
        };
        assert_eq!(
            report.cells(),
            ["3", "N/A", "N/A", "no friends", "no messages"].map(String::from)
        );
    }

    #[test]
    fn filled_columns_are_joined() {
        let message = |text: &str| MessageRecord {
            key: "message:1".to_string(),
            user_id: "1".to_string(),
            text: text.to_string(),
            timestamp: None,
        };
        let report = UserReport {
            user_id: "1".to_string(),
            name: Some("Ann".to_string()),
            login: Some("ann1".to_string()),
            friends: vec!["2".to_string(), "10".to_string()],
            messages: vec![message("hi"), message("bye")],
        };
        assert_eq!(
            report.cells(),
            ["1", "Ann", "ann1", "2, 10", "hi\nbye"].map(String::from)
        );
    }
}
