//! Message model for clubboard.

/// A posted message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    /// Unique message ID.
    pub id: i64,
    /// Author's username as it was when the message was posted.
    pub name: String,
    /// Message text.
    pub body: String,
    /// Club (category) label.
    pub club: String,
    /// Address of the client that posted the message, when known.
    pub ip: Option<String>,
    /// Post timestamp (UTC).
    pub posted: String,
}

/// Data for creating a new message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Author display name.
    pub name: String,
    /// Message text.
    pub body: String,
    /// Club label.
    pub club: String,
    /// Origin IP address.
    pub ip: Option<String>,
}

impl NewMessage {
    /// Create a new message without an origin address.
    pub fn new(
        name: impl Into<String>,
        body: impl Into<String>,
        club: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            club: club.into(),
            ip: None,
        }
    }

    /// Set the origin IP address.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }
}
