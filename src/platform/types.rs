//! Wire types of the chat-platform shim.
//!
//! Interactions are delivered as webhook POSTs and answered in the HTTP
//! response; lifecycle actions go out through the platform REST API.

use serde::{Deserialize, Serialize};

use crate::bot::dispatcher::Reply;
use crate::wiki::search::Candidate;

/// Inbound interaction kinds.
pub const INTERACTION_PING: u8 = 1;
pub const INTERACTION_COMMAND: u8 = 2;
pub const INTERACTION_AUTOCOMPLETE: u8 = 4;

/// Outbound response kinds.
pub const RESPONSE_PONG: u8 = 1;
pub const RESPONSE_MESSAGE: u8 = 4;
pub const RESPONSE_AUTOCOMPLETE: u8 = 8;

/// Message flag marking a reply visible only to the invoking user.
const EPHEMERAL_FLAG: u64 = 1 << 6;

/// Permission bit required to invoke the command (message management).
const MANAGE_MESSAGES: u64 = 1 << 13;

/// String option type in the command schema.
const OPTION_STRING: u8 = 3;

/// An inbound interaction payload.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionRequest {
    #[serde(rename = "type")]
    pub kind: u8,
    /// Absent when the interaction does not originate from a community.
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub data: Option<InteractionData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl InteractionRequest {
    /// The submitted/typed value of the named option, if present.
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .options
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_deref())
    }
}

/// An outbound interaction response, serialized into the webhook reply body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Candidate>>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_PONG,
            data: None,
        }
    }

    pub fn message(reply: Reply) -> Self {
        Self {
            kind: RESPONSE_MESSAGE,
            data: Some(ResponseData {
                content: Some(reply.content),
                flags: reply.ephemeral.then_some(EPHEMERAL_FLAG),
                choices: None,
            }),
        }
    }

    pub fn choices(candidates: Vec<Candidate>) -> Self {
        Self {
            kind: RESPONSE_AUTOCOMPLETE,
            data: Some(ResponseData {
                choices: Some(candidates),
                ..ResponseData::default()
            }),
        }
    }
}

/// The command schema registered per community.
#[derive(Debug, Clone, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    /// Serialized as a string per the platform's permission encoding.
    pub default_member_permissions: String,
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub autocomplete: bool,
}

/// The single `wiki` command with its autocompleting `query` option.
pub fn wiki_command() -> CommandDefinition {
    CommandDefinition {
        name: "wiki".to_string(),
        description: "Search the wiki".to_string(),
        default_member_permissions: MANAGE_MESSAGES.to_string(),
        options: vec![CommandOption {
            kind: OPTION_STRING,
            name: "query".to_string(),
            description: "Page to look up".to_string(),
            required: true,
            autocomplete: true,
        }],
    }
}

/// Lifecycle webhook payload (community join notifications).
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleEvent {
    #[serde(rename = "type")]
    pub kind: String,
    /// Present on community-scoped events only.
    #[serde(default)]
    pub guild_id: Option<String>,
}

/// Event kind emitted when the bot is added to a community.
pub const EVENT_COMMUNITY_JOIN: &str = "GUILD_JOIN";
