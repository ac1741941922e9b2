use std::fmt;

use serde::Deserialize;

/// Subject line of every availability change email
pub const EMAIL_SUBJECT: &str = "WDW Availability Change";

/// Errors raised while building or sending a notification email
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// An address in the send configuration could not be parsed
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress {
        /// Address as written in the configuration
        address: String,
        /// Parser error
        reason: String,
    },

    /// The message could not be assembled
    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    /// SMTP connection, authentication or delivery failure
    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// One or more email addresses.
///
/// Accepts either a single string, which may hold several comma separated
/// addresses, or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RecipientsRepr")]
pub struct Recipients(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipientsRepr {
    One(String),
    Many(Vec<String>),
}

impl From<RecipientsRepr> for Recipients {
    fn from(repr: RecipientsRepr) -> Self {
        let raw = match repr {
            RecipientsRepr::One(s) => vec![s],
            RecipientsRepr::Many(list) => list,
        };

        Recipients(raw.iter().flat_map(|s| split_addresses(s)).collect())
    }
}

/// Split a comma separated address list, ignoring commas inside quoted
/// display names and angle brackets.
fn split_addresses(list: &str) -> Vec<String> {
    let mut addresses = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_brackets = false;

    for c in list.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => in_brackets = true,
            '>' if !in_quotes => in_brackets = false,
            ',' if !in_quotes && !in_brackets => {
                addresses.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    addresses.push(current);

    addresses
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Recipients {
    /// Recipients from a list of addresses
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Recipients(addresses.into_iter().map(Into::into).collect())
    }

    /// True when there are no addresses
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the addresses
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// SMTP account and recipients for change notifications
#[derive(Clone, Deserialize)]
pub struct SendConfig {
    /// SMTP server host, reached over implicit TLS
    pub host: String,
    /// Account user name, also used as the sender address
    pub user: String,
    /// Account password
    pub password: String,
    /// Sender display name
    pub name: String,
    /// Primary recipients
    pub to: Recipients,
    /// Copied recipients
    #[serde(default)]
    pub cc: Recipients,
}

impl fmt::Debug for SendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("to", &self.to)
            .field("cc", &self.cc)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipients_from_string() {
        let recipients: Recipients =
            serde_json::from_str(r#""a@example.com, b@example.com""#).unwrap();

        assert_eq!(recipients, Recipients::new(["a@example.com", "b@example.com"]));
    }

    #[test]
    fn test_recipients_with_comma_in_display_name() {
        let recipients: Recipients = serde_json::from_str(
            r#""\"Doe, Jane\" <jane@example.com>, b@example.com""#,
        )
        .unwrap();

        assert_eq!(
            recipients.iter().collect::<Vec<_>>(),
            vec!["\"Doe, Jane\" <jane@example.com>", "b@example.com"]
        );
    }

    #[test]
    fn test_recipients_from_list() {
        let recipients: Recipients =
            serde_json::from_str(r#"["a@example.com", " ", "B <b@example.com>"]"#).unwrap();

        assert_eq!(
            recipients.iter().collect::<Vec<_>>(),
            vec!["a@example.com", "B <b@example.com>"]
        );
    }

    #[test]
    fn test_send_config_cc_optional() {
        let config: SendConfig = serde_json::from_str(
            r#"{
                "host": "smtp.example.com",
                "user": "bot@example.com",
                "password": "hunter2",
                "name": "Park Bot",
                "to": "me@example.com"
            }"#,
        )
        .unwrap();

        assert!(config.cc.is_empty());
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
