use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display data for a student, as handed over by the identity provider.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub display_name: String,
    pub username: String,
}

/// A roster line for the teacher view
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: String,
    #[serde(flatten)]
    pub profile: StudentProfile,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct SelectionResponse {
    pub id: Option<String>,
}

/// Which view the client should open after login
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Teach,
    Code,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct LoginResponse {
    pub view: View,
}
