//! # Domain Types
//!
//! Core domain types used throughout Savor Menu.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Hierarchy (4 tiers)                        │
//! │                                                                         │
//! │  ┌───────────────┐     ┌──────────────┐     ┌───────────────┐          │
//! │  │ MainCategory  │ ◄── │   Category   │ ◄── │  Subcategory  │          │
//! │  │ ───────────── │     │ ──────────── │     │ ───────────── │          │
//! │  │ id            │     │ id           │     │ id            │          │
//! │  │ active        │     │ active       │     │ active        │          │
//! │  │ reactivate_on │     │ reactivate_on│     │ (flag only)   │          │
//! │  └───────────────┘     └──────────────┘     └───────┬───────┘          │
//! │                               ▲                     │                   │
//! │                               │      ┌──────────────▼──┐               │
//! │                               └──────│    MenuItem     │               │
//! │                                      │  ─────────────  │               │
//! │                                      │  id, active     │               │
//! │                                      │  category ref   │               │
//! │                                      │  subcategory ref│               │
//! │                                      └─────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Reference Pattern
//! Items reference their category and subcategory two ways:
//! - by id (`category_id`, `subcategory_id`) - preferred, exact
//! - by free text (`category_name`, `subcategory_name`) - legacy rows,
//!   matched case-insensitively against entity names

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::schedule::WeeklySchedule;
use crate::selection::SchedulerSelection;

// =============================================================================
// Tier
// =============================================================================

/// One level of the four-tier catalog hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    MainCategory,
    Category,
    Subcategory,
    Item,
}

impl Tier {
    /// The tier-specific id key raw rows may carry instead of a generic `id`.
    #[inline]
    pub const fn id_alias(&self) -> &'static str {
        match self {
            Tier::MainCategory => "mainCategoryId",
            Tier::Category => "categoryId",
            Tier::Subcategory => "subcategoryId",
            Tier::Item => "itemId",
        }
    }

    /// Whether entities at this tier honor a scheduled reactivation
    /// timestamp.
    ///
    /// ## Why Asymmetric?
    /// Only main categories and categories support `reactivate_on`.
    /// Subcategories and items are flag-only. This mirrors confirmed
    /// product behavior; do not "fix" without checking intent.
    #[inline]
    pub const fn supports_reactivation(&self) -> bool {
        matches!(self, Tier::MainCategory | Tier::Category)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::MainCategory => "main category",
            Tier::Category => "category",
            Tier::Subcategory => "subcategory",
            Tier::Item => "item",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Catalog Entity
// =============================================================================

/// A canonical catalog entity at the main-category, category, or
/// subcategory tier.
///
/// Produced by the normalizer from loosely-typed raw rows; by the time a
/// value of this type exists, id and name are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntity {
    /// Unique identifier within the tier.
    pub id: String,

    /// Display name shown in navigation and listings.
    pub name: String,

    /// Explicit active flag (soft disable).
    pub active: bool,

    /// Timestamp after which the entity counts as active even while
    /// `active` is false. Only honored at tiers where
    /// [`Tier::supports_reactivation`] is true.
    pub reactivate_on: Option<String>,

    /// Parent entity id (category → main category, subcategory → category).
    pub parent_id: Option<String>,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A sellable item, the leaf of the hierarchy.
///
/// Items have no reactivation mechanism: `active` alone decides their
/// instantaneous state (the visibility cascade then layers schedule and
/// ancestor checks on top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier.
    pub id: String,

    /// Display name shown to the customer.
    pub name: String,

    /// Display price. Never consulted by visibility; pass-through only.
    pub price: Option<f64>,

    /// Optional description for item details.
    pub description: Option<String>,

    /// Explicit active flag. False hides the item unconditionally.
    pub active: bool,

    /// Category reference by id (preferred).
    pub category_id: Option<String>,

    /// Category reference by free text (legacy rows).
    pub category_name: Option<String>,

    /// Subcategory reference by id (preferred).
    pub subcategory_id: Option<String>,

    /// Subcategory reference by free text (legacy rows).
    pub subcategory_name: Option<String>,
}

impl MenuItem {
    /// Whether the item declares any subcategory reference at all.
    ///
    /// Items without one skip the subcategory gate entirely (vacuously
    /// satisfied); items with one must resolve it.
    pub fn declares_subcategory(&self) -> bool {
        let non_empty = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        non_empty(&self.subcategory_id) || non_empty(&self.subcategory_name)
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// Everything one resolution batch needs, supplied fresh per call.
///
/// ## Lifecycle
/// The engine holds no state between resolutions. Upstream data access
/// assembles a snapshot (possibly from concurrent fetches), hands it to
/// [`crate::resolver::MenuResolver::new`], and discards it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogSnapshot {
    pub main_categories: Vec<CatalogEntity>,
    pub categories: Vec<CatalogEntity>,
    pub subcategories: Vec<CatalogEntity>,
    pub items: Vec<MenuItem>,

    /// Weekly schedules per tier, keyed internally by owning-entity id.
    pub main_category_schedules: Vec<WeeklySchedule>,
    pub category_schedules: Vec<WeeklySchedule>,
    pub subcategory_schedules: Vec<WeeklySchedule>,
    pub item_schedules: Vec<WeeklySchedule>,

    /// Per-tier allow-lists gating schedule enforcement (empty = enforce
    /// every schedule row).
    #[serde(default)]
    pub main_category_selection: SchedulerSelection,
    #[serde(default)]
    pub category_selection: SchedulerSelection,
    #[serde(default)]
    pub subcategory_selection: SchedulerSelection,
    #[serde(default)]
    pub item_selection: SchedulerSelection,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_id_alias() {
        assert_eq!(Tier::MainCategory.id_alias(), "mainCategoryId");
        assert_eq!(Tier::Item.id_alias(), "itemId");
    }

    #[test]
    fn test_reactivation_support_is_asymmetric() {
        assert!(Tier::MainCategory.supports_reactivation());
        assert!(Tier::Category.supports_reactivation());
        assert!(!Tier::Subcategory.supports_reactivation());
        assert!(!Tier::Item.supports_reactivation());
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::MainCategory.to_string(), "main category");
        assert_eq!(Tier::Subcategory.to_string(), "subcategory");
    }

    #[test]
    fn test_declares_subcategory() {
        let mut item = MenuItem {
            id: "i-1".to_string(),
            name: "Cola".to_string(),
            price: Some(2.5),
            description: None,
            active: true,
            category_id: Some("cat-1".to_string()),
            category_name: None,
            subcategory_id: None,
            subcategory_name: None,
        };
        assert!(!item.declares_subcategory());

        item.subcategory_name = Some("   ".to_string());
        assert!(!item.declares_subcategory());

        item.subcategory_name = Some("Drinks".to_string());
        assert!(item.declares_subcategory());

        item.subcategory_name = None;
        item.subcategory_id = Some("sub-1".to_string());
        assert!(item.declares_subcategory());
    }
}
