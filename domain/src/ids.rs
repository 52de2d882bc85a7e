//! Typed identifiers for the core record collections.
//!
//! Ids are allocated by the stores; `0` is never a valid persisted id and is
//! used as the placeholder on records that have not been inserted yet.

use serde::{Deserialize, Serialize};

/// Unique identifier for a director (persona definition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectorId(pub i64);

/// Unique identifier for a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(pub i64);

/// Unique identifier for a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementId(pub i64);

macro_rules! impl_id_display {
    ($($ty:ident),+) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<i64> for $ty {
                fn from(id: i64) -> Self {
                    Self(id)
                }
            }
        )+
    };
}

impl_id_display!(DirectorId, MeetingId, StatementId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(MeetingId(42).to_string(), "42");
        assert_eq!(DirectorId::from(7), DirectorId(7));
    }
}
