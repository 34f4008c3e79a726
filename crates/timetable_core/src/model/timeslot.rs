//! Weekly time slot reference data.
//!
//! # Invariants
//! - Days are the five weekdays in calendar order.
//! - Slots are ordered by day, then by period number.
//! - The slot set is shared by every classroom and never deleted.

use serde::{Deserialize, Serialize};

pub type TimeSlotId = i64;

/// Teaching day. Declaration order is the scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Zero-based position within the teaching week.
    pub fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.as_str() == value)
    }
}

/// One (day, period) cell of the teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub day: Weekday,
    pub period_number: u8,
}

#[cfg(test)]
mod tests {
    use super::Weekday;

    #[test]
    fn weekday_round_trips_through_text() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::parse(day.as_str()), Some(day));
        }
        assert_eq!(Weekday::parse("Saturday"), None);
    }

    #[test]
    fn weekday_index_matches_declaration_order() {
        let indexes: Vec<usize> = Weekday::ALL.iter().map(|day| day.index()).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
        assert!(Weekday::Monday < Weekday::Friday);
    }
}
