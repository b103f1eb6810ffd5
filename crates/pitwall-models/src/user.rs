//! User records.
//!
//! Users are owned by the website; this service only reads them to resolve
//! drivers and post authors.

use serde::{Deserialize, Serialize};

/// A user as read from the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Document id.
    pub id: String,
    /// Login email; stored lowercased by the website.
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}
