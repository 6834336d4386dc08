//! Record types held in the store document
//!
//! Wire names are `camelCase` to match what browser clients send and what the
//! durable JSON file already contains.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reaction a voter can leave on an image
///
/// Closed set; unknown values fail deserialization instead of being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    /// Thumbs up
    Like,
    /// Heart
    Love,
}

/// The two poll options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollChoice {
    /// The team wins the cup
    Win,
    /// The team does not
    Lose,
}

/// A gallery image record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Creation-time-derived identifier, unique and monotonically increasing
    pub id: i64,
    /// Public URL of the stored object
    pub url: String,
    /// Object-storage key used for remote deletion
    pub storage_key: String,
    /// Caller-supplied caption, may be empty
    #[serde(default)]
    pub caption: String,
    /// Voter id to the reaction they last chose
    #[serde(default)]
    pub reactions: BTreeMap<String, ReactionKind>,
    /// Count of `like` entries in the reaction map
    #[serde(default)]
    pub likes: u32,
    /// Count of `love` entries in the reaction map
    #[serde(default)]
    pub loves: u32,
    /// Identifier asserted by the uploader
    pub user_id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Image {
    /// Recomputes the denormalized counters from the reaction map
    ///
    /// Runs after every reaction change and when loading the document, so
    /// the counters never drift from the map.
    pub fn recount(&mut self) {
        self.likes = self
            .reactions
            .values()
            .map(|kind| u32::from(*kind == ReactionKind::Like))
            .sum();
        self.loves = self
            .reactions
            .values()
            .map(|kind| u32::from(*kind == ReactionKind::Love))
            .sum();
    }
}

/// A fan comment record, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Creation-time-derived identifier
    pub id: i64,
    /// Identifier asserted by the author
    pub user_id: String,
    /// Trimmed, non-empty comment body
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Counters for the two-option match poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollTally {
    /// Votes for winning the cup
    #[serde(default)]
    pub win: u64,
    /// Votes against
    #[serde(default)]
    pub lose: u64,
}

impl PollTally {
    /// Adds one vote for `choice`
    pub const fn record(&mut self, choice: PollChoice) {
        match choice {
            PollChoice::Win => self.win += 1,
            PollChoice::Lose => self.lose += 1,
        }
    }
}

/// The aggregate persisted as one JSON document
///
/// Images and comments are ordered newest first. Missing sections parse as
/// empty so partially written files from older versions still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Gallery images, newest first
    #[serde(default)]
    pub images: Vec<Image>,
    /// Fan comments, newest first
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Poll counters
    #[serde(default)]
    pub polls: PollTally,
}
