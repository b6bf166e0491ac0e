//! Event payloads emitted when published configuration changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to each event emitted on the bus.
pub type EventId = u64;

/// Configuration change notifications consumed by live-reload collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigEvent {
    /// A new global public view was published.
    GlobalPublished {
        /// Fingerprint of the new public JSON.
        fingerprint: String,
    },
    /// A board's public view was published.
    BoardPublished {
        /// Board identifier.
        board: String,
        /// Fingerprint of the board's new public JSON.
        fingerprint: String,
    },
    /// A board and its configuration were removed.
    BoardRemoved {
        /// Board identifier.
        board: String,
    },
    /// The whole board set was replaced.
    BoardsReloaded {
        /// Number of boards now listed.
        count: usize,
    },
}

impl ConfigEvent {
    /// Machine-friendly discriminator, matching the serialized `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::GlobalPublished { .. } => "global_published",
            Self::BoardPublished { .. } => "board_published",
            Self::BoardRemoved { .. } => "board_removed",
            Self::BoardsReloaded { .. } => "boards_reloaded",
        }
    }

    /// Board the event concerns, if any.
    #[must_use]
    pub fn board(&self) -> Option<&str> {
        match self {
            Self::BoardPublished { board, .. } | Self::BoardRemoved { board } => Some(board),
            Self::GlobalPublished { .. } | Self::BoardsReloaded { .. } => None,
        }
    }
}

/// Metadata wrapper tracking the event id and emission timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Sequential identifier assigned by the bus.
    pub id: EventId,
    /// Time the event was published.
    pub timestamp: DateTime<Utc>,
    /// Event payload.
    pub event: ConfigEvent,
}
