//! # savor-core: Pure Business Logic for Savor Menu
//!
//! This crate is the **heart** of Savor Menu: the single source of truth
//! for whether a catalog item should be shown to a customer at a given
//! instant. All logic is pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Savor Menu Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront / Admin Frontends                   │   │
//! │  │      Listings ──► Category Nav ──► Item Detail ──► Checkout    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Data-Access Services (out of scope)            │   │
//! │  │    fetch catalog rows, schedule rows, scheduler selections      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CatalogSnapshot + "now"                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ savor-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌───────────┐ ┌───────────┐ ┌────────────┐ ┌──────────────┐  │   │
//! │  │  │ normalize │ │ schedule  │ │ activation │ │   resolver   │  │   │
//! │  │  │ raw rows  │ │ weekly    │ │ flag +     │ │ 4-tier       │  │   │
//! │  │  │ → typed   │ │ windows   │ │ reactivate │ │ cascade      │  │   │
//! │  │  └───────────┘ └───────────┘ └────────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO WALL CLOCK            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Tier, CatalogEntity, MenuItem, snapshot)
//! - [`schedule`] - Weekly windows and time-of-day math
//! - [`normalize`] - Raw-row canonicalization (tagged wrappers, aliases)
//! - [`activation`] - Instantaneous active state with reactivation
//! - [`selection`] - Per-tier schedule enforcement allow-lists
//! - [`resolver`] - The hierarchy cascade producing visibility
//! - [`error`] - Normalization error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every resolution is deterministic - same snapshot
//!    and same "now" always produce the same answer
//! 2. **Injected Time**: The crate never reads the wall clock; callers pass
//!    `DateTime<Utc>` explicitly
//! 3. **Degrade, Don't Throw**: Malformed rows are dropped, malformed times
//!    fail closed, dangling references fail open - nothing panics
//! 4. **One Copy of the Rules**: Every consumer goes through
//!    [`resolver::MenuResolver`]; there is no second implementation
//!
//! ## Example Usage
//!
//! ```rust
//! use savor_core::resolver::MenuResolver;
//! use savor_core::types::CatalogSnapshot;
//! use chrono::Utc;
//!
//! let resolver = MenuResolver::new(CatalogSnapshot::default());
//! let visible = resolver.visible_items(Utc::now());
//! assert!(visible.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod activation;
pub mod error;
pub mod normalize;
pub mod resolver;
pub mod schedule;
pub mod selection;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use savor_core::MenuResolver` instead of
// `use savor_core::resolver::MenuResolver`

pub use error::{NormalizeError, NormalizeResult};
pub use resolver::MenuResolver;
pub use schedule::{Slot, Weekday, WeeklySchedule};
pub use selection::SchedulerSelection;
pub use types::{CatalogEntity, CatalogSnapshot, MenuItem, Tier};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minutes in one day; minute-of-day values live in `[0, MINUTES_PER_DAY)`.
///
/// ## Why a constant?
/// Time-of-day comparisons happen all over the schedule math; naming the
/// bound keeps the `to_minutes` contract visible at the crate root.
pub const MINUTES_PER_DAY: u32 = 1440;
