//! Team metadata: display name and logo for a participant id.

use serde::{Deserialize, Serialize};

/// Unique identifier for a team (caller-supplied slug, e.g. `red-dragons`).
/// Participant order in the configuration is authoritative for seeding.
pub type TeamId = String;

/// Display metadata for a team. The engine itself only ever sees the id;
/// name and logo are resolved by the presentation layer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Path or URL to a logo image, if the team has one.
    #[serde(default)]
    pub logo: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: None,
        }
    }
}
