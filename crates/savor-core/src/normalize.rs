//! # Normalization Module
//!
//! Converts heterogeneous raw rows into canonical typed entities.
//!
//! ## What Raw Rows Look Like
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Raw Row Encodings (all accepted)                     │
//! │                                                                         │
//! │  Plain:        { "id": "cat-1", "name": "Mains", "active": true }      │
//! │                                                                         │
//! │  Tagged:       { "categoryId": {"S": "cat-1"},                         │
//! │                  "name": {"S": "Mains"},                               │
//! │                  "active": {"BOOL": true} }                            │
//! │                                                                         │
//! │  Stringly:     { "id": "cat-1", "name": "Mains", "active": "TRUE" }    │
//! │                                                                         │
//! │  Schedules:    { "Monday": {"M": {"slot1": {"M": {                     │
//! │                    "start": {"S": "08:00"}, "end": {"S": "12:00"}}}}}} │
//! │                                                                         │
//! │  One canonicalization step unwraps the tags; every lookup site         │
//! │  downstream sees only canonical types.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation Rules
//! - missing id or name        → row rejected (batch fns drop + log)
//! - unrecognized active value → defaults to true
//! - empty/blank parent or reactivation string → treated as absent
//! - anything else malformed   → field degrades to its default, never panics

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{NormalizeError, NormalizeResult};
use crate::schedule::{DayWindows, Slot, Weekday, WeeklySchedule};
use crate::types::{CatalogEntity, MenuItem, Tier};

// =============================================================================
// Tagged-Wrapper Canonicalization
// =============================================================================

/// Attribute tags that wrap a single inner value (`{"S": "08:00"}`,
/// `{"M": {...}}`, `{"L": [...]}`, `{"BOOL": true}`, `{"N": "2.5"}`).
const VALUE_TAGS: [&str; 5] = ["S", "N", "BOOL", "M", "L"];

/// Peels tagged wrappers until a plain value remains.
///
/// A wrapper is an object with exactly one key drawn from [`VALUE_TAGS`].
/// Anything else passes through untouched, so plain rows are unaffected.
fn untag(value: &Value) -> &Value {
    let mut current = value;
    while let Value::Object(map) = current {
        if map.len() != 1 {
            break;
        }
        let Some((key, inner)) = map.iter().next() else {
            break;
        };
        if !VALUE_TAGS.contains(&key.as_str()) {
            break;
        }
        current = inner;
    }
    current
}

/// A trimmed, non-empty string field; blank and non-string values degrade
/// to `None`.
fn str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    let trimmed = untag(map.get(key)?).as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Loosely-typed active flag: native bool, tagged `{"BOOL": b}`, or a
/// case-insensitive `"true"`/`"false"` string. Unrecognized or absent
/// defaults to true.
fn bool_flag(value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return true;
    };
    match untag(value) {
        Value::Bool(flag) => *flag,
        // "false" (any case) is the only string that clears the flag;
        // "true" and unrecognized strings both land on the default.
        Value::String(raw) => !raw.trim().eq_ignore_ascii_case("false"),
        _ => true,
    }
}

/// Display price: plain number, numeric string, or tagged `{"N": "..."}`.
fn price_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    match untag(map.get(key)?) {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

/// Row id: a generic `id` field, falling back to the tier-specific alias.
fn row_id(map: &Map<String, Value>, tier: Tier) -> Option<String> {
    str_field(map, "id").or_else(|| str_field(map, tier.id_alias()))
}

fn as_row(raw: &Value, tier: Tier) -> NormalizeResult<&Map<String, Value>> {
    untag(raw)
        .as_object()
        .ok_or(NormalizeError::NotAnObject { tier })
}

// =============================================================================
// Entity Normalization
// =============================================================================

/// Normalizes one raw main-category/category/subcategory row.
///
/// Rejects rows missing id or name; every other field degrades to a
/// default. This function never panics on any JSON input.
pub fn normalize_entity(raw: &Value, tier: Tier) -> NormalizeResult<CatalogEntity> {
    let map = as_row(raw, tier)?;
    let id = row_id(map, tier).ok_or(NormalizeError::MissingId {
        tier,
        alias: tier.id_alias(),
    })?;
    let name = str_field(map, "name").ok_or_else(|| NormalizeError::MissingName {
        tier,
        id: id.clone(),
    })?;

    Ok(CatalogEntity {
        id,
        name,
        active: bool_flag(map.get("active")),
        reactivate_on: str_field(map, "reactivateOn"),
        parent_id: str_field(map, "parentId").or_else(|| str_field(map, "parentCategoryId")),
    })
}

/// Normalizes one raw item row.
pub fn normalize_item(raw: &Value) -> NormalizeResult<MenuItem> {
    let tier = Tier::Item;
    let map = as_row(raw, tier)?;
    let id = row_id(map, tier).ok_or(NormalizeError::MissingId {
        tier,
        alias: tier.id_alias(),
    })?;
    let name = str_field(map, "name").ok_or_else(|| NormalizeError::MissingName {
        tier,
        id: id.clone(),
    })?;

    Ok(MenuItem {
        id,
        name,
        price: price_field(map, "price"),
        description: str_field(map, "description"),
        active: bool_flag(map.get("active")),
        category_id: str_field(map, "categoryId"),
        category_name: str_field(map, "category"),
        subcategory_id: str_field(map, "subcategoryId"),
        subcategory_name: str_field(map, "subcategoryName"),
    })
}

// =============================================================================
// Schedule Normalization
// =============================================================================

fn decode_slot(value: &Value) -> Option<Slot> {
    let map = untag(value).as_object()?;
    Some(Slot {
        start: str_field(map, "start"),
        end: str_field(map, "end"),
    })
}

/// Category-tier day shape: exactly two optional slots.
fn decode_paired(value: &Value) -> Option<DayWindows> {
    let map = untag(value).as_object()?;
    Some(DayWindows::Paired {
        slot1: map.get("slot1").and_then(decode_slot),
        slot2: map.get("slot2").and_then(decode_slot),
    })
}

/// Item-tier day shape: an ordered list of slots.
fn decode_listed(value: &Value) -> Option<DayWindows> {
    let slots = untag(value).as_array()?;
    Some(DayWindows::Listed(
        slots.iter().filter_map(decode_slot).collect(),
    ))
}

/// Normalizes one raw schedule row for `tier`.
///
/// Weekday keys are matched case-insensitively; non-weekday keys (the id
/// fields, bookkeeping columns) are skipped. A day whose value cannot be
/// decoded is treated as absent, which downstream means closed.
pub fn normalize_schedule(raw: &Value, tier: Tier) -> NormalizeResult<WeeklySchedule> {
    let map = as_row(raw, tier)?;
    let owner_id = row_id(map, tier).ok_or(NormalizeError::MissingId {
        tier,
        alias: tier.id_alias(),
    })?;

    let mut schedule = WeeklySchedule::new(owner_id);
    for (key, value) in map {
        let Some(day) = Weekday::parse(key) else {
            continue;
        };
        let windows = match tier {
            Tier::Item => decode_listed(value),
            _ => decode_paired(value),
        };
        if let Some(windows) = windows {
            schedule.days.insert(day, windows);
        }
    }
    Ok(schedule)
}

// =============================================================================
// Batch Normalization
// =============================================================================
// The batch functions are the public face of this module for the data-access
// collaborator: they never raise, they drop malformed rows and log why.

/// Normalizes a batch of entity rows, dropping (and logging) rejects.
pub fn normalize_entities(rows: &[Value], tier: Tier) -> Vec<CatalogEntity> {
    rows.iter()
        .filter_map(|raw| match normalize_entity(raw, tier) {
            Ok(entity) => Some(entity),
            Err(reason) => {
                debug!(%tier, %reason, "dropping malformed entity row");
                None
            }
        })
        .collect()
}

/// Normalizes a batch of item rows, dropping (and logging) rejects.
pub fn normalize_items(rows: &[Value]) -> Vec<MenuItem> {
    rows.iter()
        .filter_map(|raw| match normalize_item(raw) {
            Ok(item) => Some(item),
            Err(reason) => {
                debug!(%reason, "dropping malformed item row");
                None
            }
        })
        .collect()
}

/// Normalizes a batch of schedule rows for `tier`, dropping (and logging)
/// rejects.
pub fn normalize_schedules(rows: &[Value], tier: Tier) -> Vec<WeeklySchedule> {
    rows.iter()
        .filter_map(|raw| match normalize_schedule(raw, tier) {
            Ok(schedule) => Some(schedule),
            Err(reason) => {
                debug!(%tier, %reason, "dropping malformed schedule row");
                None
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
