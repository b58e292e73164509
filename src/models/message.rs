//! Message model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::utils::helpers;

/// Author of a room message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "user_id", rename_all = "lowercase")]
pub enum MessageSender {
    System,
    User(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: MessageSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// System-authored entry, used for room creation and join notices
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            id: format!("sys_{}", helpers::generate_uuid()),
            sender: MessageSender::System,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn from_user(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: helpers::generate_uuid(),
            sender: MessageSender::User(user_id.into()),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.sender == MessageSender::System
    }
}
