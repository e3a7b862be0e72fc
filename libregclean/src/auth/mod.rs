//! Registry credentials.
//!
//! Only HTTP Basic authentication is supported: when credentials are set the
//! `Authorization` header is attached to every request, with no token
//! negotiation.


/// Credentials for registry authentication.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// No authentication (anonymous access)
    #[default]
    Anonymous,

    /// HTTP Basic authentication with username and password
    Basic {
        /// Username for authentication
        username: String,
        /// Password for authentication
        password: String,
    },
}

impl Credentials {
    /// Creates Basic authentication credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::auth::Credentials;
    ///
    /// let creds = Credentials::basic("username", "password");
    /// assert!(!creds.is_anonymous());
    /// ```
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds credentials from an optional user/password pair.
    ///
    /// An absent or empty username means anonymous access; an absent password
    /// is sent as the empty string.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Self {
        match username {
            Some(user) if !user.is_empty() => Self::basic(user, password.unwrap_or_default()),
            _ => Self::Anonymous,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns the username, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Basic { username, .. } => Some(username),
        }
    }

    /// Returns the Authorization header value for these credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::auth::Credentials;
    ///
    /// let creds = Credentials::basic("user", "pass");
    /// assert_eq!(creds.to_header_value().as_deref(), Some("Basic dXNlcjpwYXNz"));
    /// ```
    pub fn to_header_value(&self) -> Option<String> {
        match self {
            Self::Anonymous => None,
            Self::Basic { username, password } => {
                use base64::{Engine as _, engine::general_purpose};
                let credentials = format!("{}:{}", username, password);
                let encoded = general_purpose::STANDARD.encode(credentials);
                Some(format!("Basic {}", encoded))
            }
        }
    }
}

// Hand-written so passwords never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
