//! # Activation Module
//!
//! Instantaneous active/inactive state of a catalog entity.
//!
//! ## The Rule
//! ```text
//! effective_active = active_flag
//!                  OR (tier supports reactivation
//!                      AND reactivate_on parses
//!                      AND reactivate_on <= now)
//! ```
//!
//! A reactivation timestamp that fails to parse contributes `false` to the
//! right-hand term: an operator typo keeps the entity hidden rather than
//! resurrecting it (fails closed, not open).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::{CatalogEntity, Tier};

/// Parses a reactivation timestamp to an absolute instant.
///
/// Accepts RFC 3339 first, then the bare date-time and date forms admin
/// tooling has historically written. Bare forms are read as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Whether `entity` counts as active at `now`.
///
/// For tiers without reactivation support (subcategories, items) this is
/// the explicit flag alone. For main categories and categories, a reached
/// `reactivate_on` overrides a false flag.
pub fn is_effectively_active(entity: &CatalogEntity, tier: Tier, now: DateTime<Utc>) -> bool {
    if entity.active {
        return true;
    }
    if !tier.supports_reactivation() {
        return false;
    }
    entity
        .reactivate_on
        .as_deref()
        .and_then(parse_instant)
        .is_some_and(|instant| instant <= now)
}

// =============================================================================
// Unit Tests
// =============================================================================
