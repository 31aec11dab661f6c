//! Vote direction and per-entity vote counters.

use std::fmt;

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    /// Increments `upvotes`.
    Up,
    /// Increments `downvotes`.
    Down,
}

impl Vote {
    /// Path segment and log label for this vote direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "upvote",
            Self::Down => "downvote",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upvote and downvote counters of a post or comment.
///
/// Counters only ever grow; there is no way to withdraw a vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    upvotes: u32,
    downvotes: u32,
}

impl VoteTally {
    /// Tally with the given counts.
    #[must_use]
    pub const fn new(upvotes: u32, downvotes: u32) -> Self {
        Self { upvotes, downvotes }
    }

    /// Number of upvotes.
    #[must_use]
    pub const fn upvotes(self) -> u32 {
        self.upvotes
    }

    /// Number of downvotes.
    #[must_use]
    pub const fn downvotes(self) -> u32 {
        self.downvotes
    }

    /// Return the tally with one more vote in the given direction.
    ///
    /// Saturates at `u32::MAX`.
    #[must_use]
    pub const fn record(self, vote: Vote) -> Self {
        match vote {
            Vote::Up => Self {
                upvotes: self.upvotes.saturating_add(1),
                ..self
            },
            Vote::Down => Self {
                downvotes: self.downvotes.saturating_add(1),
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Vote::Up, VoteTally::new(4, 2))]
    #[case(Vote::Down, VoteTally::new(3, 3))]
    fn record_increments_only_one_counter(#[case] vote: Vote, #[case] expected: VoteTally) {
        assert_eq!(VoteTally::new(3, 2).record(vote), expected);
    }

    #[rstest]
    fn record_saturates() {
        let tally = VoteTally::new(u32::MAX, 0).record(Vote::Up);
        assert_eq!(tally.upvotes(), u32::MAX);
    }
}
