use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    #[error("user id must not be empty")]
    Empty,
    #[error("user id must not contain ':' (got {0:?})")]
    Separator(String),
}

impl FromStr for UserId {
    type Err = UserIdError;

    // ':' separates key namespaces, so `user:{id}` must stay distinguishable
    // from derived keys like `user:{id}:friends`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(UserIdError::Empty);
        }
        if s.contains(':') {
            return Err(UserIdError::Separator(s.to_string()));
        }
        Ok(UserId(s.to_string()))
    }
}

/// A user id whose `user:{id}` record was observed to exist.
///
/// Only the graph service hands these out, right after its existence check.
/// The record may still disappear later; holders must tolerate that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    id: UserId,
}

impl VerifiedUser {
    pub(crate) fn new(id: UserId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub name: Option<String>,
    pub login: Option<String>,
}

/// Sorts raw ids numerically when every id is a digit string and
/// lexicographically otherwise.
pub fn sort_ids(ids: &mut [String]) {
    if ids.iter().all(|id| is_digits(id)) {
        ids.sort_by(|a, b| cmp_digits(a, b));
    } else {
        ids.sort();
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// Compares without parsing so arbitrarily long ids cannot overflow.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let ta = a.trim_start_matches('0');
    let tb = b.trim_start_matches('0');
    ta.len()
        .cmp(&tb.len())
        .then_with(|| ta.cmp(tb))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn user_id_rejects_empty_and_separator() {
        assert_eq!("".parse::<UserId>(), Err(UserIdError::Empty));
        assert_eq!("   ".parse::<UserId>(), Err(UserIdError::Empty));
        assert_eq!(
            "1:friends".parse::<UserId>(),
            Err(UserIdError::Separator("1:friends".to_string()))
        );
        assert_eq!("42".parse::<UserId>().unwrap().as_str(), "42");
        assert_eq!("ann".parse::<UserId>().unwrap().to_string(), "ann");
    }

    #[test]
    fn digit_ids_sort_numerically() {
        let mut ids = strings(&["10", "2", "1", "007", "33"]);
        sort_ids(&mut ids);
        assert_eq!(ids, strings(&["1", "2", "007", "10", "33"]));
    }

    #[test]
    fn mixed_ids_sort_lexicographically() {
        let mut ids = strings(&["10", "bob", "2"]);
        sort_ids(&mut ids);
        assert_eq!(ids, strings(&["10", "2", "bob"]));
    }

    #[test]
    fn huge_digit_ids_do_not_overflow() {
        let big = "9".repeat(40);
        let mut ids = vec![big.clone(), "3".to_string()];
        sort_ids(&mut ids);
        assert_eq!(ids, vec!["3".to_string(), big]);
    }
}
