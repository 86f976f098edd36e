use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Session claims --

/// Signed session claims. Canonical definition lives here so the login
/// handler (minting) and the per-request session check (verification) share
/// one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth forms --

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// -- Schedule forms --

#[derive(Debug, Deserialize)]
pub struct CreateScheduleForm {
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenScheduleForm {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RenamePasswordForm {
    pub password: String,
}

// -- Button forms --

/// Shared by the add and edit flows. Both fields default to empty so a form
/// that omits the assignee still parses.
#[derive(Debug, Deserialize)]
pub struct ButtonForm {
    #[serde(default)]
    pub particulars: String,
    #[serde(default)]
    pub participant: String,
}
