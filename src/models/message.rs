use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome to My Todo APP";
pub const DELETED_MESSAGE: &str = "Todo Successfully deleted";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
