//! Typed collision notifications.
//!
//! Consumers that simulate contacts against generated collision boxes report
//! back with these events. Only identity and classification travel.

use serde::{Deserialize, Serialize};

/// Classification of the other party in a contact.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionTag {
    /// Player-controlled body
    Player = 0,
    /// Another generated character
    Character = 1,
    /// Static world geometry
    Environment = 2,
    /// Moving projectile
    Projectile = 3,
    /// Trigger volume
    Trigger = 4,
}

/// Contact phase between a character's collision box and something else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CollisionEvent {
    /// Contact started
    Enter {
        /// Other body's identifier
        other_id: String,
        /// Other body's classification
        other_tag: CollisionTag,
    },
    /// Contact persists
    Stay {
        /// Other body's identifier
        other_id: String,
        /// Other body's classification
        other_tag: CollisionTag,
    },
    /// Contact ended
    Exit {
        /// Other body's identifier
        other_id: String,
        /// Other body's classification
        other_tag: CollisionTag,
    },
}

impl CollisionEvent {
    /// Identifier of the other party.
    #[must_use]
    pub fn other_id(&self) -> &str {
        match self {
            Self::Enter { other_id, .. } | Self::Stay { other_id, .. } | Self::Exit { other_id, .. } => {
                other_id
            }
        }
    }

    /// Classification of the other party.
    #[must_use]
    pub fn other_tag(&self) -> CollisionTag {
        match self {
            Self::Enter { other_tag, .. } | Self::Stay { other_tag, .. } | Self::Exit { other_tag, .. } => {
                *other_tag
            }
        }
    }

    /// True for the first contact frame.
    #[must_use]
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let event = CollisionEvent::Exit {
            other_id: "wolf-1".into(),
            other_tag: CollisionTag::Character,
        };
        assert_eq!(event.other_id(), "wolf-1");
        assert_eq!(event.other_tag(), CollisionTag::Character);
        assert!(!event.is_enter());
    }
}
