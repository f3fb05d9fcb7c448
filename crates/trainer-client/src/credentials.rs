//! Login credentials and the password-grant form body
//!
//! The service authenticates through an OAuth2 "password" grant posted as
//! `application/x-www-form-urlencoded`:
//!
//! ```text
//! grant_type=password&username=<email>&password=<password>&scope=&client_id=string&client_secret=string
//! ```
//!
//! Values are percent-encoded except for the unreserved characters and `@`,
//! so an ordinary email address goes over the wire as typed.

use serde::{Deserialize, Serialize};

/// Percent-encode a single form value, keeping `@` literal
fn encode_form_value(value: &str) -> String {
    urlencoding::encode(value).replace("%40", "@")
}

/// OAuth client identification sent with every login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClient {
    /// Client id
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
}

impl Default for OAuthClient {
    fn default() -> Self {
        Self {
            client_id: "string".to_string(),
            client_secret: "string".to_string(),
        }
    }
}

impl OAuthClient {
    /// Create client credentials
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Email and password entered by the user
///
/// Only ever used to build one request body; never persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredential {
    /// Account email, sent as the `username` field
    pub email: String,
    /// Plain password
    pub password: String,
}

impl std::fmt::Debug for LoginCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginCredential {
    /// Create credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Form body using the placeholder client credentials
    ///
    /// `None` means the body could not be encoded. Any valid UTF-8 input
    /// encodes, control characters included.
    ///
    /// # Examples
    /// ```
    /// use trainer_client::LoginCredential;
    ///
    /// let body = LoginCredential::new("a@b.com", "p").to_request_body().unwrap();
    /// assert_eq!(
    ///     body,
    ///     "grant_type=password&username=a@b.com&password=p&scope=&client_id=string&client_secret=string"
    /// );
    /// ```
    pub fn to_request_body(&self) -> Option<String> {
        self.to_request_body_for(&OAuthClient::default())
    }

    /// Form body for a specific OAuth client
    pub fn to_request_body_for(&self, client: &OAuthClient) -> Option<String> {
        let fields = [
            ("grant_type", "password"),
            ("username", self.email.as_str()),
            ("password", self.password.as_str()),
            ("scope", ""),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
        ];

        let pairs: Vec<String> = fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode_form_value(value)))
            .collect();
        Some(pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_request_body() {
        let credential = LoginCredential::new("a@b.com", "p");
        assert_eq!(
            credential.to_request_body().as_deref(),
            Some("grant_type=password&username=a@b.com&password=p&scope=&client_id=string&client_secret=string")
        );
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let credential = LoginCredential::new("x+y@b.com", "p&q=r s");
        let body = credential.to_request_body().unwrap();
        assert!(body.contains("username=x%2By@b.com"));
        assert!(body.contains("password=p%26q%3Dr%20s"));
        assert_eq!(body.matches('&').count(), 5);
    }

    #[test]
    fn test_non_ascii_is_utf8_percent_encoded() {
        let credential = LoginCredential::new("a@b.com", "pä");
        let body = credential.to_request_body().unwrap();
        assert!(body.contains("password=p%C3%A4"));
    }

    #[test]
    fn test_control_characters_are_percent_encoded() {
        let credential = LoginCredential::new("a@b.com", "pass\tword\n\u{0}");
        let body = credential.to_request_body().unwrap();
        assert!(body.contains("password=pass%09word%0A%00&"));
    }

    #[test]
    fn test_literal_percent_sequence_is_not_mistaken_for_at_sign() {
        let credential = LoginCredential::new("a@b.com", "%40");
        let body = credential.to_request_body().unwrap();
        assert!(body.contains("password=%2540&"));
    }

    #[test]
    fn test_custom_client() {
        let credential = LoginCredential::new("a@b.com", "p");
        let body = credential
            .to_request_body_for(&OAuthClient::new("mobile", "s3cret"))
            .unwrap();
        assert!(body.ends_with("client_id=mobile&client_secret=s3cret"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let credential = LoginCredential::new("a@b.com", "hunter2");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("a@b.com"));
    }
}
