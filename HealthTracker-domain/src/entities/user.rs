use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// An operator account in the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DirectoryUser {
    /// Directory-assigned identifier
    pub id: u32,

    /// Login name
    #[serde(rename = "user")]
    pub username: String,

    /// Display name
    #[serde(rename = "fullName")]
    pub full_name: String,

    pub gender: String,

    pub email: String,
}

/// Editable fields of a directory user; everything but the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct UserFields {
    /// Login name
    #[serde(rename = "user")]
    pub username: String,

    /// Display name
    #[serde(rename = "fullName")]
    pub full_name: String,

    pub gender: String,

    pub email: String,
}

impl UserFields {
    /// Attach an id to these fields
    pub fn with_id(self, id: u32) -> DirectoryUser {
        DirectoryUser {
            id,
            username: self.username,
            full_name: self.full_name,
            gender: self.gender,
            email: self.email,
        }
    }
}
