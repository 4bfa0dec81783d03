//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are optional at the serde level so that a missing field
//! surfaces as a validation message naming the field, rather than a generic
//! deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author fields as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Request to update a post. `id` must repeat the path id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as returned to clients, with the author flattened to one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}
