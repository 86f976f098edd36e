use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display color for a board slot. Derived from the assignee field on every
/// write: an unclaimed slot renders lightgreen, a claimed one pink. Nothing
/// else is allowed to set it.
pub fn slot_color(participant: &str) -> &'static str {
    if participant.is_empty() {
        "lightgreen"
    } else {
        "pink"
    }
}

/// A password-addressable board of assignment slots. The password is both
/// the lookup key and the shared access credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub password: String,
}

/// One assignment slot: a label, an optional assignee, and the color
/// derived from the assignee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Button {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub particulars: String,
    pub participant: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclaimed_slot_is_lightgreen() {
        assert_eq!(slot_color(""), "lightgreen");
    }

    #[test]
    fn claimed_slot_is_pink() {
        assert_eq!(slot_color("bob"), "pink");
        // Whitespace counts as an assignee, matching the write path which
        // never trims.
        assert_eq!(slot_color(" "), "pink");
    }
}
