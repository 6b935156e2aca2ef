// ── Generic resource store state ──
//
// Shared state shape and atomic transitions for every resource store.
// A store applies exactly one transition per lifecycle phase
// (started → succeeded | failed); observers never see partial state.

use std::collections::HashMap;
use std::hash::Hash;

use strum::IntoEnumIterator;

use shopkeep_api::types::{
    Category, Order, Permission, Product, ResourceId, Role, Tag, User,
};

/// Anything with a server-assigned integer identity.
pub trait Entity {
    fn id(&self) -> ResourceId;
}

macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> ResourceId {
                self.id
            }
        })+
    };
}

impl_entity!(Category, Tag, Product, Order, User, Role, Permission);

/// Per-operation in-flight flags, keyed by a fixed enum rather than an
/// open string map so the set of operations is checked at compile time.
#[derive(Debug, Clone)]
pub struct OpFlags<Op> {
    flags: HashMap<Op, bool>,
}

impl<Op: Eq + Hash> PartialEq for OpFlags<Op> {
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
    }
}

impl<Op> Default for OpFlags<Op> {
    fn default() -> Self {
        Self {
            flags: HashMap::new(),
        }
    }
}

impl<Op: Copy + Eq + Hash + IntoEnumIterator> OpFlags<Op> {
    /// Whether the given operation has a request outstanding.
    pub fn is_busy(&self, op: Op) -> bool {
        self.flags.get(&op).copied().unwrap_or(false)
    }

    /// Whether any operation on this store is outstanding.
    pub fn any_busy(&self) -> bool {
        self.flags.values().any(|busy| *busy)
    }

    pub(crate) fn set(&mut self, op: Op, busy: bool) {
        self.flags.insert(op, busy);
    }

    /// Force every flag off.
    pub(crate) fn reset(&mut self) {
        for op in Op::iter() {
            self.flags.insert(op, false);
        }
    }
}

/// State owned by one resource store.
///
/// `items` keeps fetch/insertion order: order carries no meaning, but a
/// stable sequence keeps renders stable. No two entries ever share an
/// `id` — list fetches replace wholesale and updates replace in place.
#[derive(Debug, Clone)]
pub struct ResourceState<T, Op> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub in_flight: OpFlags<Op>,
    /// Most recent failure, cleared when the next operation starts.
    pub last_error: Option<String>,
}

impl<T: PartialEq, Op: Eq + Hash> PartialEq for ResourceState<T, Op> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
            && self.selected == other.selected
            && self.in_flight == other.in_flight
            && self.last_error == other.last_error
    }
}

impl<T, Op> Default for ResourceState<T, Op> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            in_flight: OpFlags::default(),
            last_error: None,
        }
    }
}

impl<T, Op> ResourceState<T, Op>
where
    T: Entity + Clone,
    Op: Copy + Eq + Hash + IntoEnumIterator,
{
    // ── Lifecycle transitions ────────────────────────────────────────

    /// Request issued: flag on, stale error cleared.
    pub(crate) fn begin(&mut self, op: Op) {
        self.in_flight.set(op, true);
        self.last_error = None;
    }

    pub(crate) fn fail(&mut self, op: Op, message: String) {
        self.in_flight.set(op, false);
        self.last_error = Some(message);
    }

    /// List fetch succeeded: replace the whole collection.
    pub(crate) fn finish_list(&mut self, op: Op, items: Vec<T>) {
        self.in_flight.set(op, false);
        self.items = items;
    }

    /// List fetch failed: record the error and drop the cached items
    /// rather than keep showing stale data.
    pub(crate) fn fail_list(&mut self, op: Op, message: String) {
        self.in_flight.set(op, false);
        self.last_error = Some(message);
        self.items.clear();
    }

    pub(crate) fn finish_detail(&mut self, op: Op, item: T) {
        self.in_flight.set(op, false);
        self.selected = Some(item);
    }

    /// Create succeeded: append and leave the form deselected.
    pub(crate) fn finish_created(&mut self, op: Op, item: T) {
        self.in_flight.set(op, false);
        self.items.push(item);
        self.selected = None;
    }

    /// Update succeeded: replace the matching entry in place (same
    /// position; no match leaves `items` untouched) and deselect.
    pub(crate) fn finish_updated(&mut self, op: Op, item: &T) {
        self.in_flight.set(op, false);
        replace_by_id(&mut self.items, item);
        self.selected = None;
    }

    /// Relationship-edit variant: replace in place, and refresh the
    /// selection only when the edited item was the one selected.
    pub(crate) fn finish_refreshed(&mut self, op: Op, item: &T) {
        self.in_flight.set(op, false);
        replace_by_id(&mut self.items, item);
        if self.selected.as_ref().is_some_and(|s| s.id() == item.id()) {
            self.selected = Some(item.clone());
        }
    }

    pub(crate) fn finish_deleted(&mut self, op: Op, id: ResourceId) {
        self.in_flight.set(op, false);
        self.items.retain(|item| item.id() != id);
    }

    // ── Synchronous local operations ─────────────────────────────────

    pub(crate) fn set_selected(&mut self, item: T) {
        self.selected = Some(item);
    }

    pub(crate) fn clear_selected(&mut self) {
        self.selected = None;
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn reset_ops(&mut self) {
        self.in_flight.reset();
    }
}

/// Replace the entry whose id matches `item`, keeping its position.
/// No-op when the id is absent.
pub(crate) fn replace_by_id<T: Entity + Clone>(items: &mut [T], item: &T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
        *slot = item.clone();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        id: ResourceId,
        label: String,
    }

    impl Entity for Widget {
        fn id(&self) -> ResourceId {
            self.id
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
    enum WidgetOp {
        List,
        Create,
        Update,
        Delete,
    }

    fn widget(id: ResourceId, label: &str) -> Widget {
        Widget {
            id,
            label: label.into(),
        }
    }

    fn seeded() -> ResourceState<Widget, WidgetOp> {
        let mut state = ResourceState::default();
        state.finish_list(
            WidgetOp::List,
            vec![widget(1, "a"), widget(2, "b"), widget(3, "c")],
        );
        state
    }

    #[test]
    fn begin_raises_flag_and_clears_error() {
        let mut state = seeded();
        state.fail(WidgetOp::Create, "boom".into());
        assert_eq!(state.last_error.as_deref(), Some("boom"));

        state.begin(WidgetOp::Create);
        assert!(state.in_flight.is_busy(WidgetOp::Create));
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn created_item_is_appended_and_selection_cleared() {
        let mut state = seeded();
        state.set_selected(widget(2, "b"));

        state.begin(WidgetOp::Create);
        state.finish_created(WidgetOp::Create, widget(4, "d"));

        assert_eq!(state.items.len(), 4);
        assert_eq!(state.items[3], widget(4, "d"));
        assert_eq!(state.selected, None);
        assert!(!state.in_flight.is_busy(WidgetOp::Create));
    }

    #[test]
    fn update_replaces_in_place_and_keeps_order() {
        let mut state = seeded();
        state.finish_updated(WidgetOp::Update, &widget(2, "b2"));

        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[1], widget(2, "b2"));
        assert_eq!(state.items[0], widget(1, "a"));
        assert_eq!(state.items[2], widget(3, "c"));
    }

    #[test]
    fn update_with_unknown_id_leaves_items_unchanged() {
        let mut state = seeded();
        let before = state.items.clone();
        state.finish_updated(WidgetOp::Update, &widget(99, "ghost"));
        assert_eq!(state.items, before);
    }

    #[test]
    fn refreshed_updates_selection_only_when_it_matched() {
        let mut state = seeded();
        state.set_selected(widget(2, "b"));
        state.finish_refreshed(WidgetOp::Update, &widget(2, "b2"));
        assert_eq!(state.selected, Some(widget(2, "b2")));

        state.finish_refreshed(WidgetOp::Update, &widget(3, "c2"));
        assert_eq!(state.selected, Some(widget(2, "b2")));
    }

    #[test]
    fn delete_removes_exactly_the_matching_entry() {
        let mut state = seeded();
        state.finish_deleted(WidgetOp::Delete, 2);

        assert_eq!(state.items, vec![widget(1, "a"), widget(3, "c")]);
    }

    #[test]
    fn failed_list_resets_items_to_empty() {
        let mut state = seeded();
        state.begin(WidgetOp::List);
        state.fail_list(WidgetOp::List, "server unavailable".into());

        assert!(state.items.is_empty());
        assert_eq!(state.last_error.as_deref(), Some("server unavailable"));
    }

    #[test]
    fn clear_selected_is_idempotent() {
        let mut state = seeded();
        state.set_selected(widget(1, "a"));

        state.clear_selected();
        let once = state.clone();
        state.clear_selected();
        assert_eq!(state, once);
    }

    #[test]
    fn reset_ops_forces_every_flag_off() {
        let mut state = seeded();
        state.begin(WidgetOp::Create);
        state.begin(WidgetOp::Delete);
        assert!(state.in_flight.any_busy());

        state.reset_ops();
        assert!(!state.in_flight.any_busy());
    }
}
