//! # Schedule Module
//!
//! Weekly recurring open-hour windows and the math that decides whether
//! "now" falls inside them.
//!
//! ## Why Minute Integers?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE TIME-COMPARISON PROBLEM                                            │
//! │                                                                         │
//! │  Comparing "08:00" < "13:00" < "22:00" as strings works by accident    │
//! │  and breaks the moment a row carries "8:00" or garbage.                │
//! │                                                                         │
//! │  OUR SOLUTION: minute-of-day integers                                   │
//! │    "08:00" → 480     "13:00" → 780     "22:00" → 1320                  │
//! │    Malformed input → no integer → every range test is false            │
//! │    (closed, never accidentally open)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Slot Semantics
//! A slot is the half-open interval `[start, end)`: open at its first
//! minute, closed at its last. `{08:00, 12:00}` is open at minute 480 and
//! closed at minute 720.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Weekday
// =============================================================================

/// Day of the week, Monday-first, keyed by the unabbreviated English name.
///
/// This is the single canonicalization point for weekday keys: raw rows may
/// carry any casing ("MONDAY", "monday"); everything downstream works with
/// this enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday-first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical long English name ("Monday").
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Case-insensitive parse of an unabbreviated weekday name.
    pub fn parse(raw: &str) -> Option<Weekday> {
        let raw = raw.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(raw))
    }

    /// The weekday of an injected instant.
    pub fn of(now: &DateTime<Utc>) -> Weekday {
        match now.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Time-of-Day Helpers
// =============================================================================

/// Parses a 24-hour `"HH:MM"` string to a minute-of-day in `[0, 1440)`.
///
/// Malformed input ("8am", "25:00", "") yields `None`, which makes every
/// range test using it evaluate false - closed, never accidentally open.
///
/// ## Example
/// ```rust
/// use savor_core::schedule::to_minutes;
///
/// assert_eq!(to_minutes("08:00"), Some(480));
/// assert_eq!(to_minutes("23:59"), Some(1439));
/// assert_eq!(to_minutes("24:00"), None);
/// assert_eq!(to_minutes("noon"), None);
/// ```
pub fn to_minutes(raw: &str) -> Option<u32> {
    let (hours, minutes) = raw.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Minute-of-day of an injected instant (hour × 60 + minute).
#[inline]
pub fn minutes_of(now: &DateTime<Utc>) -> u32 {
    now.hour() * 60 + now.minute()
}

// =============================================================================
// Slot
// =============================================================================

/// One open window within a day, bounds as `"HH:MM"` strings.
///
/// Either bound may be absent (category rows persist fixed slot pairs and
/// leave unused slots null); a slot with a missing or malformed bound is
/// never open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Slot {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Slot {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Slot {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Parsed bounds, or `None` when either bound is absent or malformed.
    fn bounds(&self) -> Option<(u32, u32)> {
        let start = to_minutes(self.start.as_deref()?)?;
        let end = to_minutes(self.end.as_deref()?)?;
        Some((start, end))
    }

    /// Whether `minute` falls inside the half-open interval `[start, end)`.
    pub fn contains(&self, minute: u32) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= minute && minute < end,
            None => false,
        }
    }

    /// The end minute of this slot, if it contains `minute`.
    pub fn closing_minute(&self, minute: u32) -> Option<u32> {
        let (start, end) = self.bounds()?;
        (start <= minute && minute < end).then_some(end)
    }
}

// =============================================================================
// Day Windows
// =============================================================================

/// The open windows of a single day, in one of the two persisted shapes.
///
/// Category-tier rows always carry exactly two optional slots; item rows
/// carry an arbitrary ordered list. Both answer the same question: is this
/// minute inside any open slot?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum DayWindows {
    /// Fixed two-slot shape (main category, category, subcategory tiers).
    Paired {
        slot1: Option<Slot>,
        slot2: Option<Slot>,
    },
    /// Arbitrary slot list (item tier).
    Listed(Vec<Slot>),
}

impl DayWindows {
    /// A day entry with no open windows (present but closed all day).
    pub const fn closed_paired() -> Self {
        DayWindows::Paired {
            slot1: None,
            slot2: None,
        }
    }

    /// Both shapes flatten to "the slots present for this day".
    fn slots(&self) -> Vec<&Slot> {
        match self {
            DayWindows::Paired { slot1, slot2 } => slot1.iter().chain(slot2.iter()).collect(),
            DayWindows::Listed(slots) => slots.iter().collect(),
        }
    }

    /// Whether any slot of this day contains `minute`.
    pub fn is_open_at(&self, minute: u32) -> bool {
        self.slots().iter().any(|slot| slot.contains(minute))
    }

    /// End minute of the first slot containing `minute`, if any.
    pub fn closing_minute(&self, minute: u32) -> Option<u32> {
        self.slots()
            .iter()
            .find_map(|slot| slot.closing_minute(minute))
    }
}

// =============================================================================
// Weekly Schedule
// =============================================================================

/// A weekly recurring schedule owned by one catalog entity.
///
/// ## Absence Semantics (the part everyone gets wrong)
/// ```text
/// no schedule record at all        → unrestricted, always open
/// record, no entry for today       → closed today
/// record, today's entry, no slots  → closed today
/// ```
/// The first rule lives in [`is_schedule_open`] (which takes an
/// `Option<&WeeklySchedule>`); the other two live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeeklySchedule {
    /// Id of the owning catalog entity (unique per tier).
    pub owner_id: String,

    /// Per-day windows; days without an entry are closed.
    pub days: BTreeMap<Weekday, DayWindows>,
}

impl WeeklySchedule {
    pub fn new(owner_id: impl Into<String>) -> Self {
        WeeklySchedule {
            owner_id: owner_id.into(),
            days: BTreeMap::new(),
        }
    }

    /// Whether this schedule is open at `minute` on `day`.
    ///
    /// A missing day entry means closed that day.
    pub fn is_open(&self, day: Weekday, minute: u32) -> bool {
        self.days
            .get(&day)
            .is_some_and(|windows| windows.is_open_at(minute))
    }
}

/// Whether an optionally-present schedule is open at `minute` on `day`.
///
/// No schedule record means unrestricted: always open.
pub fn is_schedule_open(schedule: Option<&WeeklySchedule>, day: Weekday, minute: u32) -> bool {
    match schedule {
        Some(schedule) => schedule.is_open(day, minute),
        None => true,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
