//! # Hierarchy Resolver
//!
//! The orchestrator: cascades activation and schedule checks bottom-up
//! through the four-tier hierarchy to answer "should this item be shown
//! right now?".
//!
//! ## The Visibility Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   is_item_visible(item, now)                            │
//! │                                                                         │
//! │  1. item.active flag            false → NOT VISIBLE (full stop)        │
//! │          │                                                              │
//! │  2. category gate               must resolve, be Active (reactivation  │
//! │     ├── main category Active?   counts), with main category Active     │
//! │     ├── main schedule open?     and both schedules open                │
//! │     └── category schedule open?                                        │
//! │          │                                                              │
//! │  3. subcategory gate            only if the item declares one:         │
//! │     ├── must resolve            flag-only active check, schedule open  │
//! │     └── subcategory schedule open?                                     │
//! │          │                                                              │
//! │  4. item schedule gate          own record must be open; no record     │
//! │          │                      means unrestricted                     │
//! │          ▼                                                              │
//! │       VISIBLE                                                           │
//! │                                                                         │
//! │  Dangling references (a parent id absent from the loaded set) fail     │
//! │  OPEN; explicit inactive flags and closed schedules fail CLOSED.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! A [`MenuResolver`] is built once per snapshot, holds only immutable
//! indexes, and exposes `&self` methods. Identical inputs always produce
//! identical output; concurrent callers need no coordination.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::trace;

use crate::activation::is_effectively_active;
use crate::schedule::{is_schedule_open, minutes_of, Weekday, WeeklySchedule};
use crate::selection::filter_schedules;
use crate::types::{CatalogEntity, CatalogSnapshot, MenuItem, Tier};

/// A non-empty trimmed reference, or nothing.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Id-keyed index into an entity list; first occurrence wins.
fn index_by_id(entities: &[CatalogEntity]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(entities.len());
    for (position, entity) in entities.iter().enumerate() {
        index.entry(entity.id.clone()).or_insert(position);
    }
    index
}

/// Lowercased-name index into an entity list; first occurrence wins.
fn index_by_name(entities: &[CatalogEntity]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(entities.len());
    for (position, entity) in entities.iter().enumerate() {
        index.entry(entity.name.to_lowercase()).or_insert(position);
    }
    index
}

/// Owner-id-keyed schedule map; first row wins (owner ids are unique per
/// tier, duplicates would be upstream corruption).
fn index_schedules(schedules: Vec<WeeklySchedule>) -> HashMap<String, WeeklySchedule> {
    let mut index = HashMap::with_capacity(schedules.len());
    for schedule in schedules {
        index.entry(schedule.owner_id.clone()).or_insert(schedule);
    }
    index
}

// =============================================================================
// Menu Resolver
// =============================================================================

/// Immutable per-snapshot resolution engine.
///
/// Construction applies the scheduler selections and builds every index
/// once; afterwards each lookup is a map hit instead of a linear scan.
#[derive(Debug)]
pub struct MenuResolver {
    main_categories: Vec<CatalogEntity>,
    categories: Vec<CatalogEntity>,
    subcategories: Vec<CatalogEntity>,
    items: Vec<MenuItem>,

    main_by_id: HashMap<String, usize>,
    category_by_id: HashMap<String, usize>,
    subcategory_by_id: HashMap<String, usize>,
    subcategory_by_name: HashMap<String, usize>,

    main_schedules: HashMap<String, WeeklySchedule>,
    category_schedules: HashMap<String, WeeklySchedule>,
    subcategory_schedules: HashMap<String, WeeklySchedule>,
    item_schedules: HashMap<String, WeeklySchedule>,

    /// Lowercased owning-subcategory name → owner id, for schedule lookup
    /// when an item only carries a free-text subcategory reference.
    subcategory_schedule_owner_by_name: HashMap<String, String>,
}

impl MenuResolver {
    /// Builds the resolver for one snapshot.
    ///
    /// Schedule rows excluded by a tier's non-empty selection are discarded
    /// here, which downstream reads as "no schedule record" (unrestricted).
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        let main_schedules = filter_schedules(
            snapshot.main_category_schedules,
            &snapshot.main_category_selection,
        );
        let category_schedules =
            filter_schedules(snapshot.category_schedules, &snapshot.category_selection);
        let subcategory_schedules = filter_schedules(
            snapshot.subcategory_schedules,
            &snapshot.subcategory_selection,
        );
        let item_schedules = filter_schedules(snapshot.item_schedules, &snapshot.item_selection);

        let subcategory_by_id = index_by_id(&snapshot.subcategories);
        let mut subcategory_schedule_owner_by_name = HashMap::new();
        for schedule in &subcategory_schedules {
            if let Some(&position) = subcategory_by_id.get(&schedule.owner_id) {
                subcategory_schedule_owner_by_name
                    .entry(snapshot.subcategories[position].name.to_lowercase())
                    .or_insert_with(|| schedule.owner_id.clone());
            }
        }

        MenuResolver {
            main_by_id: index_by_id(&snapshot.main_categories),
            category_by_id: index_by_id(&snapshot.categories),
            subcategory_by_id,
            subcategory_by_name: index_by_name(&snapshot.subcategories),
            main_schedules: index_schedules(main_schedules),
            category_schedules: index_schedules(category_schedules),
            subcategory_schedules: index_schedules(subcategory_schedules),
            item_schedules: index_schedules(item_schedules),
            subcategory_schedule_owner_by_name,
            main_categories: snapshot.main_categories,
            categories: snapshot.categories,
            subcategories: snapshot.subcategories,
            items: snapshot.items,
        }
    }

    // -------------------------------------------------------------------------
    // Reference Resolution
    // -------------------------------------------------------------------------

    /// Resolves an item's category: by id when present, else by free text
    /// matched against category ids first, then names (case-insensitive),
    /// first structural hit in input order.
    fn resolve_category(&self, item: &MenuItem) -> Option<&CatalogEntity> {
        if let Some(id) = non_empty(&item.category_id) {
            return self
                .category_by_id
                .get(id)
                .map(|&position| &self.categories[position]);
        }
        let query = non_empty(&item.category_name)?;
        self.categories
            .iter()
            .find(|category| category.id == query)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|category| category.name.eq_ignore_ascii_case(query))
            })
    }

    /// Resolves an item's subcategory: by id when present, else via the
    /// lowercased-name index.
    fn resolve_subcategory(&self, item: &MenuItem) -> Option<&CatalogEntity> {
        if let Some(id) = non_empty(&item.subcategory_id) {
            return self
                .subcategory_by_id
                .get(id)
                .map(|&position| &self.subcategories[position]);
        }
        let name = non_empty(&item.subcategory_name)?;
        self.subcategory_by_name
            .get(&name.to_lowercase())
            .map(|&position| &self.subcategories[position])
    }

    /// Subcategory schedule lookup: id-keyed first, then the name-keyed
    /// index joined through the owning subcategory.
    fn subcategory_schedule(
        &self,
        id: Option<&str>,
        name: Option<&str>,
    ) -> Option<&WeeklySchedule> {
        if let Some(schedule) = id.and_then(|id| self.subcategory_schedules.get(id)) {
            return Some(schedule);
        }
        let owner = self
            .subcategory_schedule_owner_by_name
            .get(&name?.to_lowercase())?;
        self.subcategory_schedules.get(owner)
    }

    fn main_category_of(&self, category: &CatalogEntity) -> Option<&CatalogEntity> {
        let parent_id = non_empty(&category.parent_id)?;
        self.main_by_id
            .get(parent_id)
            .map(|&position| &self.main_categories[position])
    }

    // -------------------------------------------------------------------------
    // Gates
    // -------------------------------------------------------------------------

    /// The category gate: the category itself Active, its main category
    /// (when resolvable) Active with an open schedule, and the category's
    /// own schedule open. A dangling main-category reference imposes no
    /// constraint.
    fn category_gate(&self, category: &CatalogEntity, day: Weekday, minute: u32, now: DateTime<Utc>) -> bool {
        if !is_effectively_active(category, Tier::Category, now) {
            return false;
        }
        if let Some(main) = self.main_category_of(category) {
            if !is_effectively_active(main, Tier::MainCategory, now) {
                return false;
            }
            if !is_schedule_open(self.main_schedules.get(&main.id), day, minute) {
                return false;
            }
        }
        is_schedule_open(self.category_schedules.get(&category.id), day, minute)
    }

    /// The subcategory gate for an item that declares a subcategory
    /// reference: the subcategory must resolve, have its flag set (no
    /// reactivation at this tier), and have an open schedule. The parent
    /// category was already vetted by the category gate.
    fn subcategory_gate(&self, item: &MenuItem, day: Weekday, minute: u32) -> bool {
        let Some(subcategory) = self.resolve_subcategory(item) else {
            trace!(item = %item.id, "subcategory reference did not resolve");
            return false;
        };
        if !subcategory.active {
            return false;
        }
        let schedule = self.subcategory_schedule(
            Some(subcategory.id.as_str()),
            Some(subcategory.name.as_str()),
        );
        is_schedule_open(schedule, day, minute)
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Whether `item` should be shown to a customer at `now`.
    ///
    /// Gates are evaluated in order and short-circuit on the first failure;
    /// see the module docs for the cascade.
    pub fn is_item_visible(&self, item: &MenuItem, now: DateTime<Utc>) -> bool {
        // Flag only at this tier: no reactivation, no schedule can save it.
        if !item.active {
            return false;
        }

        let day = Weekday::of(&now);
        let minute = minutes_of(&now);

        let Some(category) = self.resolve_category(item) else {
            trace!(item = %item.id, "category reference did not resolve");
            return false;
        };
        if !self.category_gate(category, day, minute, now) {
            trace!(item = %item.id, category = %category.id, "category gate closed");
            return false;
        }

        if item.declares_subcategory() && !self.subcategory_gate(item, day, minute) {
            trace!(item = %item.id, "subcategory gate closed");
            return false;
        }

        is_schedule_open(self.item_schedules.get(&item.id), day, minute)
    }

    /// The snapshot's items filtered to those visible at `now`, in input
    /// order.
    pub fn visible_items(&self, now: DateTime<Utc>) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| self.is_item_visible(item, now))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Derived Views
    // -------------------------------------------------------------------------

    /// Categories currently open for navigation, in input order.
    ///
    /// Uses exactly the category gate of the visibility cascade, so menus
    /// and item listings can never disagree.
    pub fn open_categories(&self, now: DateTime<Utc>) -> Vec<&CatalogEntity> {
        let day = Weekday::of(&now);
        let minute = minutes_of(&now);
        self.categories
            .iter()
            .filter(|category| self.category_gate(category, day, minute, now))
            .collect()
    }

    /// Subcategories currently open for navigation, in input order.
    ///
    /// Flag-only active check at this tier; the parent category (when
    /// resolvable) must be Active; the subcategory's schedule must be open.
    pub fn open_subcategories(&self, now: DateTime<Utc>) -> Vec<&CatalogEntity> {
        let day = Weekday::of(&now);
        let minute = minutes_of(&now);
        self.subcategories
            .iter()
            .filter(|subcategory| {
                if !subcategory.active {
                    return false;
                }
                if let Some(parent_id) = non_empty(&subcategory.parent_id) {
                    if let Some(&position) = self.category_by_id.get(parent_id) {
                        if !is_effectively_active(&self.categories[position], Tier::Category, now)
                        {
                            return false;
                        }
                    }
                    // Dangling parent id: no constraint.
                }
                let schedule = self.subcategory_schedule(
                    Some(subcategory.id.as_str()),
                    Some(subcategory.name.as_str()),
                );
                is_schedule_open(schedule, day, minute)
            })
            .collect()
    }

    /// Minutes until the item's governing schedule closes, for
    /// near-term-closing indicators.
    ///
    /// Scans in priority order (item → subcategory → category → main
    /// category) for the most specific schedule with an entry for today,
    /// then returns `slot_end − now` for the slot containing now. No
    /// containing slot in that first schedule means no indicator - the
    /// scan does not continue to less specific tiers.
    pub fn minutes_until_closing(&self, item: &MenuItem, now: DateTime<Utc>) -> Option<u32> {
        let day = Weekday::of(&now);
        let minute = minutes_of(&now);

        let subcategory = self.resolve_subcategory(item);
        let subcategory_schedule = self.subcategory_schedule(
            subcategory
                .map(|sub| sub.id.as_str())
                .or(non_empty(&item.subcategory_id)),
            subcategory
                .map(|sub| sub.name.as_str())
                .or(non_empty(&item.subcategory_name)),
        );
        let category = self.resolve_category(item);
        let category_schedule =
            category.and_then(|category| self.category_schedules.get(&category.id));
        let main_schedule = category
            .and_then(|category| self.main_category_of(category))
            .and_then(|main| self.main_schedules.get(&main.id));

        [
            self.item_schedules.get(&item.id),
            subcategory_schedule,
            category_schedule,
            main_schedule,
        ]
        .into_iter()
        .flatten()
        .find(|schedule| schedule.days.contains_key(&day))
        .and_then(|schedule| schedule.days[&day].closing_minute(minute))
        .map(|closing| closing - minute)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{DayWindows, Slot};
    use crate::selection::SchedulerSelection;
    use chrono::TimeZone;

    // 2026-03-02 is a Monday; 13:00 is minute 780.
    fn monday_at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    fn entity(id: &str, name: &str, active: bool, parent_id: Option<&str>) -> CatalogEntity {
        CatalogEntity {
            id: id.to_string(),
            name: name.to_string(),
            active,
            reactivate_on: None,
            parent_id: parent_id.map(str::to_string),
        }
    }

    fn item(id: &str, category_id: Option<&str>) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: id.to_string(),
            price: None,
            description: None,
            active: true,
            category_id: category_id.map(str::to_string),
            category_name: None,
            subcategory_id: None,
            subcategory_name: None,
        }
    }

    fn paired_schedule(owner: &str, day: Weekday, slot1: Slot, slot2: Option<Slot>) -> WeeklySchedule {
        let mut schedule = WeeklySchedule::new(owner);
        schedule.days.insert(
            day,
            DayWindows::Paired {
                slot1: Some(slot1),
                slot2,
            },
        );
        schedule
    }

    fn snapshot_with_category() -> CatalogSnapshot {
        CatalogSnapshot {
            main_categories: vec![entity("main-1", "Food", true, None)],
            categories: vec![entity("cat-1", "Mains", true, Some("main-1"))],
            items: vec![item("i-1", Some("cat-1"))],
            ..CatalogSnapshot::default()
        }
    }

    #[test]
    fn scenario_a_everything_active_nothing_scheduled() {
        let resolver = MenuResolver::new(snapshot_with_category());
        assert!(resolver.is_item_visible(&item("i-1", Some("cat-1")), monday_at(13, 0)));
    }

    #[test]
    fn scenario_b_reactivation_reopens_category() {
        let mut snapshot = snapshot_with_category();
        snapshot.categories[0].active = false;
        snapshot.categories[0].reactivate_on = Some("2026-03-01T00:00:00Z".to_string());
        let resolver = MenuResolver::new(snapshot);
        assert!(resolver.is_item_visible(&item("i-1", Some("cat-1")), monday_at(13, 0)));
    }

    #[test]
    fn scenario_c_category_closed_between_slots() {
        let mut snapshot = snapshot_with_category();
        snapshot.category_schedules = vec![paired_schedule(
            "cat-1",
            Weekday::Monday,
            Slot::new("08:00", "12:00"),
            Some(Slot::new("16:00", "22:00")),
        )];
        let resolver = MenuResolver::new(snapshot);
        let i = item("i-1", Some("cat-1"));
        assert!(!resolver.is_item_visible(&i, monday_at(13, 0))); // minute 780, the gap
        assert!(resolver.is_item_visible(&i, monday_at(9, 0)));
        assert!(resolver.is_item_visible(&i, monday_at(21, 59)));
        assert!(!resolver.is_item_visible(&i, monday_at(22, 0))); // end exclusive
    }

    #[test]
    fn scenario_d_subcategory_matched_by_name_case_insensitively() {
        let mut snapshot = snapshot_with_category();
        snapshot.subcategories = vec![entity("sub-1", "drinks", true, Some("cat-1"))];
        let mut i = item("i-1", Some("cat-1"));
        i.subcategory_name = Some("Drinks".to_string());
        let resolver = MenuResolver::new(snapshot);
        assert!(resolver.is_item_visible(&i, monday_at(13, 0)));
    }

    #[test]
    fn scenario_e_unselected_schedule_rows_are_discarded() {
        let mut snapshot = snapshot_with_category();
        snapshot.categories.push(entity("cat-2", "Late Night", true, None));
        // cat-2 has a stored schedule that would be closed on Monday noon...
        snapshot.category_schedules = vec![paired_schedule(
            "cat-2",
            Weekday::Sunday,
            Slot::new("23:00", "23:59"),
            None,
        )];
        // ...but the selection only enforces cat-1, so the row is discarded.
        snapshot.category_selection = SchedulerSelection::of(["cat-1"]);
        let resolver = MenuResolver::new(snapshot);
        assert!(resolver.is_item_visible(&item("i-2", Some("cat-2")), monday_at(12, 0)));
    }

    #[test]
    fn inactive_item_is_never_visible() {
        let resolver = MenuResolver::new(snapshot_with_category());
        let mut i = item("i-1", Some("cat-1"));
        i.active = false;
        // No schedule content can save an inactive item.
        assert!(!resolver.is_item_visible(&i, monday_at(13, 0)));
    }

    #[test]
    fn item_with_unresolvable_category_is_not_visible() {
        let resolver = MenuResolver::new(snapshot_with_category());
        assert!(!resolver.is_item_visible(&item("i-x", Some("cat-missing")), monday_at(13, 0)));
        assert!(!resolver.is_item_visible(&item("i-y", None), monday_at(13, 0)));
    }

    #[test]
    fn free_text_category_prefers_id_over_name() {
        let mut snapshot = snapshot_with_category();
        // A category whose *name* collides with another category's *id*.
        snapshot.categories.push(entity("Mains", "Specials", false, None));
        let mut i = item("i-1", None);
        i.category_name = Some("Mains".to_string());
        let resolver = MenuResolver::new(snapshot);
        // "Mains" hits the id of the inactive category first, so the gate
        // closes even though an active category named "Mains" exists.
        assert!(!resolver.is_item_visible(&i, monday_at(13, 0)));
    }

    #[test]
    fn dangling_main_category_reference_fails_open() {
        let mut snapshot = snapshot_with_category();
        snapshot.main_categories.clear(); // cat-1 now points at nothing
        let resolver = MenuResolver::new(snapshot);
        assert!(resolver.is_item_visible(&item("i-1", Some("cat-1")), monday_at(13, 0)));
    }

    #[test]
    fn inactive_main_category_closes_the_gate() {
        let mut snapshot = snapshot_with_category();
        snapshot.main_categories[0].active = false;
        let resolver = MenuResolver::new(snapshot);
        assert!(!resolver.is_item_visible(&item("i-1", Some("cat-1")), monday_at(13, 0)));
    }

    #[test]
    fn main_category_schedule_gates_the_whole_branch() {
        let mut snapshot = snapshot_with_category();
        snapshot.main_category_schedules = vec![paired_schedule(
            "main-1",
            Weekday::Tuesday,
            Slot::new("08:00", "22:00"),
            None,
        )];
        let resolver = MenuResolver::new(snapshot);
        // Schedule exists but has no Monday entry → closed today.
        assert!(!resolver.is_item_visible(&item("i-1", Some("cat-1")), monday_at(13, 0)));
    }

    #[test]
    fn declared_but_missing_subcategory_fails_closed() {
        let mut i = item("i-1", Some("cat-1"));
        i.subcategory_name = Some("Ghost".to_string());
        let resolver = MenuResolver::new(snapshot_with_category());
        assert!(!resolver.is_item_visible(&i, monday_at(13, 0)));
    }

    #[test]
    fn inactive_subcategory_ignores_reactivation() {
        let mut snapshot = snapshot_with_category();
        let mut sub = entity("sub-1", "Drinks", false, Some("cat-1"));
        sub.reactivate_on = Some("2026-03-01T00:00:00Z".to_string()); // reached, but flag-only tier
        snapshot.subcategories = vec![sub];
        let mut i = item("i-1", Some("cat-1"));
        i.subcategory_id = Some("sub-1".to_string());
        let resolver = MenuResolver::new(snapshot);
        assert!(!resolver.is_item_visible(&i, monday_at(13, 0)));
    }

    #[test]
    fn subcategory_schedule_found_through_name_index() {
        let mut snapshot = snapshot_with_category();
        snapshot.subcategories = vec![entity("sub-1", "Drinks", true, Some("cat-1"))];
        let mut schedule = WeeklySchedule::new("sub-1");
        schedule
            .days
            .insert(Weekday::Monday, DayWindows::closed_paired());
        snapshot.subcategory_schedules = vec![schedule];
        let mut i = item("i-1", Some("cat-1"));
        i.subcategory_name = Some("DRINKS".to_string());
        let resolver = MenuResolver::new(snapshot);
        // The sub resolves by name; its schedule says closed all Monday.
        assert!(!resolver.is_item_visible(&i, monday_at(13, 0)));
    }

    #[test]
    fn item_own_schedule_is_the_last_gate() {
        let mut snapshot = snapshot_with_category();
        let mut schedule = WeeklySchedule::new("i-1");
        schedule.days.insert(
            Weekday::Monday,
            DayWindows::Listed(vec![Slot::new("18:00", "22:00")]),
        );
        snapshot.item_schedules = vec![schedule];
        let resolver = MenuResolver::new(snapshot);
        let i = item("i-1", Some("cat-1"));
        assert!(!resolver.is_item_visible(&i, monday_at(13, 0)));
        assert!(resolver.is_item_visible(&i, monday_at(19, 0)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut snapshot = snapshot_with_category();
        snapshot.category_schedules = vec![paired_schedule(
            "cat-1",
            Weekday::Monday,
            Slot::new("08:00", "12:00"),
            None,
        )];
        let resolver = MenuResolver::new(snapshot);
        let i = item("i-1", Some("cat-1"));
        let now = monday_at(9, 30);
        let first = resolver.is_item_visible(&i, now);
        let second = resolver.is_item_visible(&i, now);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn visible_items_filters_in_input_order() {
        let mut snapshot = snapshot_with_category();
        let mut hidden = item("i-2", Some("cat-1"));
        hidden.active = false;
        snapshot.items.push(hidden);
        snapshot.items.push(item("i-3", Some("cat-1")));
        let resolver = MenuResolver::new(snapshot);
        let visible = resolver.visible_items(monday_at(13, 0));
        let ids: Vec<&str> = visible.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["i-1", "i-3"]);
    }

    #[test]
    fn open_categories_view_matches_the_category_gate() {
        let mut snapshot = snapshot_with_category();
        snapshot.categories.push(entity("cat-2", "Closed Now", true, None));
        snapshot.category_schedules = vec![paired_schedule(
            "cat-2",
            Weekday::Monday,
            Slot::new("16:00", "22:00"),
            None,
        )];
        let resolver = MenuResolver::new(snapshot);
        let open = resolver.open_categories(monday_at(13, 0));
        let ids: Vec<&str> = open.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["cat-1"]);

        let open_evening = resolver.open_categories(monday_at(17, 0));
        assert_eq!(open_evening.len(), 2);
    }

    #[test]
    fn open_subcategories_respects_parent_activation() {
        let mut snapshot = snapshot_with_category();
        snapshot.categories[0].active = false; // parent of sub-1 goes dark
        snapshot.subcategories = vec![
            entity("sub-1", "Drinks", true, Some("cat-1")),
            entity("sub-2", "Orphan", true, Some("cat-missing")),
        ];
        let resolver = MenuResolver::new(snapshot);
        let open = resolver.open_subcategories(monday_at(13, 0));
        let ids: Vec<&str> = open.iter().map(|s| s.id.as_str()).collect();
        // sub-1 closed by its inactive parent; sub-2's dangling parent is
        // no constraint.
        assert_eq!(ids, ["sub-2"]);
    }

    #[test]
    fn minutes_until_closing_uses_most_specific_schedule() {
        let mut snapshot = snapshot_with_category();
        snapshot.category_schedules = vec![paired_schedule(
            "cat-1",
            Weekday::Monday,
            Slot::new("08:00", "22:00"),
            None,
        )];
        let mut item_schedule = WeeklySchedule::new("i-1");
        item_schedule.days.insert(
            Weekday::Monday,
            DayWindows::Listed(vec![Slot::new("11:00", "14:00")]),
        );
        snapshot.item_schedules = vec![item_schedule];
        let resolver = MenuResolver::new(snapshot);
        let i = item("i-1", Some("cat-1"));
        // Item schedule wins over the category's longer window.
        assert_eq!(resolver.minutes_until_closing(&i, monday_at(13, 0)), Some(60));
        // A different item falls through to the category schedule.
        let other = item("i-9", Some("cat-1"));
        assert_eq!(
            resolver.minutes_until_closing(&other, monday_at(13, 0)),
            Some(540) // 22:00 − 13:00
        );
    }

    #[test]
    fn minutes_until_closing_absent_when_first_tier_has_no_containing_slot() {
        let mut snapshot = snapshot_with_category();
        // The item's own schedule has a Monday entry, but now is outside it;
        // the scan must NOT fall through to the category schedule.
        let mut item_schedule = WeeklySchedule::new("i-1");
        item_schedule.days.insert(
            Weekday::Monday,
            DayWindows::Listed(vec![Slot::new("18:00", "22:00")]),
        );
        snapshot.item_schedules = vec![item_schedule];
        snapshot.category_schedules = vec![paired_schedule(
            "cat-1",
            Weekday::Monday,
            Slot::new("08:00", "22:00"),
            None,
        )];
        let resolver = MenuResolver::new(snapshot);
        let i = item("i-1", Some("cat-1"));
        assert_eq!(resolver.minutes_until_closing(&i, monday_at(13, 0)), None);
    }

    #[test]
    fn minutes_until_closing_absent_without_any_schedule() {
        let resolver = MenuResolver::new(snapshot_with_category());
        let i = item("i-1", Some("cat-1"));
        assert_eq!(resolver.minutes_until_closing(&i, monday_at(13, 0)), None);
    }
}
