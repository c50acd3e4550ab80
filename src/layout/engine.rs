//! Drag-and-drop widget reordering and layout persistence.
//!
//! The engine owns the container: the ordered sequence of widget
//! identifiers whose order equals the visual top-to-bottom render order at
//! all times outside an in-progress drag gesture. It also owns the drag
//! session, the single currently-dragged identifier that lives between
//! drag-start and drag-end.
//!
//! # Invariants
//!
//! 1. A drag gesture is well-formed: exactly one `begin_drag` followed by
//!    zero or more `drop_target`/`apply_drop` calls, ending in `end_drag`.
//! 2. `apply_drop` is a pure reordering: the container afterwards is a
//!    permutation of the container before (no identifier is duplicated,
//!    created, or destroyed).
//! 3. `drop_target` has no side effects and may be called on every drag
//!    tick.
//! 4. Persistence is idempotent: two consecutive `persist_layout` calls
//!    with no intervening reorder store byte-identical records.
//!
//! The persisted record is a JSON array of identifiers under the
//! `dashboardLayout` preference key. On restore, a malformed record is
//! treated as absent and identifiers that no longer name a widget are
//! skipped; the dashboard always renders, at worst in default order.

use crate::store::{keys, PrefStore, StoreError};

/// Result of computing where a dragged widget should be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Insert the dragged widget immediately before this widget.
    Before(String),
    /// Append the dragged widget at the end of the container.
    End,
}

/// A widget's position on screen, as measured during the last render pass.
///
/// Slots are supplied to [`LayoutEngine::drop_target`] in container order;
/// the midpoint is the vertical center row of the widget's rendered area.
#[derive(Debug, Clone, Copy)]
pub struct WidgetSlot<'a> {
    /// Stable widget identifier.
    pub id: &'a str,
    /// Vertical midpoint of the widget's rendered area, in screen rows.
    pub midpoint_y: u16,
}

/// Maintains visual widget order consistent with drag gestures and makes it
/// durable across restarts.
#[derive(Debug)]
pub struct LayoutEngine {
    /// Container: ordered widget identifiers, top to bottom.
    order: Vec<String>,
    /// Drag session: the widget currently being dragged, if any.
    dragging: Option<String>,
}

impl LayoutEngine {
    /// Creates an engine with the given default container order.
    pub fn new<I, S>(default_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: default_order.into_iter().map(Into::into).collect(),
            dragging: None,
        }
    }

    /// Current container order, top to bottom.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Identifier of the widget currently being dragged, if a drag session
    /// is active.
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Returns `true` if `id` is the widget currently being dragged.
    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging.as_deref() == Some(id)
    }

    /// Begins a drag session for `id`.
    ///
    /// Returns `false` without starting a session if `id` is not in the
    /// container or another session is already active. The gesture model
    /// (one pointer, one drag at a time) makes the latter unreachable in
    /// practice, but a stray event must not corrupt the session.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        if self.dragging.is_some() || !self.order.iter().any(|w| w == id) {
            return false;
        }
        self.dragging = Some(id.to_string());
        true
    }

    /// Computes the insertion position for the active drag at `pointer_y`.
    ///
    /// Among all slots except the dragged widget, each candidate's offset is
    /// `pointer_y - midpoint`. Only candidates with a negative offset (the
    /// pointer is above their midpoint) are considered, and the one whose
    /// offset is closest to zero wins. Ties go to the first candidate in
    /// container order. If the pointer is below every midpoint the result
    /// is [`DropTarget::End`].
    ///
    /// Pure function of the pointer position and the supplied slots; safe to
    /// call on every drag tick.
    pub fn drop_target(&self, pointer_y: u16, slots: &[WidgetSlot<'_>]) -> DropTarget {
        let mut best: Option<(i32, &str)> = None;
        for slot in slots {
            if self.dragging.as_deref() == Some(slot.id) {
                continue;
            }
            let offset = i32::from(pointer_y) - i32::from(slot.midpoint_y);
            if offset >= 0 {
                continue;
            }
            // Strictly-greater comparison keeps the first candidate on ties.
            match best {
                Some((best_offset, _)) if offset <= best_offset => {}
                _ => best = Some((offset, slot.id)),
            }
        }
        match best {
            Some((_, id)) => DropTarget::Before(id.to_string()),
            None => DropTarget::End,
        }
    }

    /// Moves `dragged` to immediately precede the target widget, or to the
    /// container end for [`DropTarget::End`].
    ///
    /// A pure reordering: the resulting sequence is a permutation of the
    /// prior sequence with `dragged` relocated. Unknown identifiers and a
    /// target equal to the dragged widget are no-ops.
    pub fn apply_drop(&mut self, dragged: &str, target: &DropTarget) {
        if let DropTarget::Before(target_id) = target {
            if target_id == dragged {
                return;
            }
        }
        let Some(from) = self.order.iter().position(|w| w == dragged) else {
            return;
        };
        let widget = self.order.remove(from);
        match target {
            DropTarget::Before(target_id) => {
                match self.order.iter().position(|w| w == target_id) {
                    Some(to) => self.order.insert(to, widget),
                    // Target vanished between computation and application;
                    // put the widget back where it was.
                    None => self.order.insert(from, widget),
                }
            }
            DropTarget::End => self.order.push(widget),
        }
    }

    /// Ends the drag session and persists the resulting order.
    ///
    /// The session is cleared unconditionally, even if persistence fails.
    pub fn end_drag(&mut self, store: &mut PrefStore) -> Result<(), StoreError> {
        self.dragging = None;
        self.persist_layout(store)
    }

    /// Serializes the container order to the layout record.
    ///
    /// Idempotent: calling twice with no intervening reorder stores an
    /// identical record.
    pub fn persist_layout(&self, store: &mut PrefStore) -> Result<(), StoreError> {
        let record = serde_json::to_string(&self.order).map_err(|e| StoreError::EncodeError {
            message: e.to_string(),
        })?;
        store.set(keys::DASHBOARD_LAYOUT, record);
        store.save()
    }

    /// Restores the container order from the stored layout record.
    ///
    /// An absent record is a no-op (the container keeps its default order).
    /// A malformed record is treated as absent. Identifiers in the record
    /// that name an existing widget come first, in record order; identifiers
    /// naming no widget are skipped; widgets the record never mentions keep
    /// their relative order and follow the record-matched widgets.
    ///
    /// Must run exactly once at startup, before any drag can occur.
    pub fn restore_layout(&mut self, store: &PrefStore) {
        let Some(raw) = store.get(keys::DASHBOARD_LAYOUT) else {
            return;
        };
        let record: Vec<String> = match serde_json::from_str(raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("malformed layout record, keeping default order: {}", e);
                return;
            }
        };

        let mut rebuilt: Vec<String> = Vec::with_capacity(self.order.len());
        for id in record {
            if self.order.iter().any(|w| *w == id) {
                // A repeated identifier moves to its later position,
                // matching repeated append semantics.
                rebuilt.retain(|w| *w != id);
                rebuilt.push(id);
            }
        }
        for id in &self.order {
            if !rebuilt.iter().any(|w| w == id) {
                rebuilt.push(id.clone());
            }
        }
        self.order = rebuilt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(["a", "b", "c", "d"])
    }

    fn order_of(engine: &LayoutEngine) -> Vec<&str> {
        engine.order().iter().map(String::as_str).collect()
    }

    fn temp_prefs() -> (tempfile::TempDir, PrefStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = PrefStore::open(dir.path().join("prefs.json"));
        (dir, store)
    }

    // -- Drag session ------------------------------------------------------

    #[test]
    fn begin_drag_records_session() {
        let mut eng = engine();
        assert!(eng.begin_drag("b"));
        assert_eq!(eng.dragging(), Some("b"));
        assert!(eng.is_dragging("b"));
        assert!(!eng.is_dragging("a"));
    }

    #[test]
    fn begin_drag_unknown_widget_is_rejected() {
        let mut eng = engine();
        assert!(!eng.begin_drag("nope"));
        assert_eq!(eng.dragging(), None);
    }

    #[test]
    fn begin_drag_while_active_is_rejected() {
        let mut eng = engine();
        assert!(eng.begin_drag("a"));
        assert!(!eng.begin_drag("b"));
        assert_eq!(eng.dragging(), Some("a"));
    }

    #[test]
    fn end_drag_clears_session_unconditionally() {
        let (_dir, mut store) = temp_prefs();
        let mut eng = engine();
        eng.begin_drag("a");
        eng.end_drag(&mut store).expect("persist should succeed");
        assert_eq!(eng.dragging(), None);
    }

    // -- drop_target -------------------------------------------------------

    fn slots_100_200_300() -> [(&'static str, u16); 3] {
        [("a", 100), ("b", 200), ("c", 300)]
    }

    fn as_slots<'a>(raw: &'a [(&'a str, u16)]) -> Vec<WidgetSlot<'a>> {
        raw.iter()
            .map(|&(id, midpoint_y)| WidgetSlot { id, midpoint_y })
            .collect()
    }

    #[test]
    fn drop_target_picks_nearest_midpoint_below_pointer() {
        let mut eng = LayoutEngine::new(["a", "b", "c", "x"]);
        eng.begin_drag("x");
        let raw = slots_100_200_300();
        let target = eng.drop_target(180, &as_slots(&raw));
        assert_eq!(target, DropTarget::Before("b".to_string()));
    }

    #[test]
    fn drop_target_below_all_midpoints_is_end() {
        let mut eng = LayoutEngine::new(["a", "b", "c", "x"]);
        eng.begin_drag("x");
        let raw = slots_100_200_300();
        assert_eq!(eng.drop_target(500, &as_slots(&raw)), DropTarget::End);
    }

    #[test]
    fn drop_target_above_all_midpoints_is_first_widget() {
        let mut eng = LayoutEngine::new(["a", "b", "c", "x"]);
        eng.begin_drag("x");
        let raw = slots_100_200_300();
        let target = eng.drop_target(50, &as_slots(&raw));
        assert_eq!(target, DropTarget::Before("a".to_string()));
    }

    #[test]
    fn drop_target_exact_midpoint_is_not_a_candidate() {
        // offset == 0 is not negative, so the pointer sitting exactly on a
        // midpoint falls through to the next widget below.
        let mut eng = LayoutEngine::new(["a", "b", "c", "x"]);
        eng.begin_drag("x");
        let raw = slots_100_200_300();
        let target = eng.drop_target(200, &as_slots(&raw));
        assert_eq!(target, DropTarget::Before("c".to_string()));
    }

    #[test]
    fn drop_target_tie_breaks_to_first_in_container_order() {
        let mut eng = LayoutEngine::new(["a", "b", "x"]);
        eng.begin_drag("x");
        let raw = [("a", 200), ("b", 200)];
        let target = eng.drop_target(150, &as_slots(&raw));
        assert_eq!(target, DropTarget::Before("a".to_string()));
    }

    #[test]
    fn drop_target_excludes_dragged_widget() {
        let mut eng = engine();
        eng.begin_drag("b");
        let raw = slots_100_200_300();
        // Pointer at 180 would select "b", but "b" is being dragged, so the
        // next candidate below wins.
        let target = eng.drop_target(180, &as_slots(&raw));
        assert_eq!(target, DropTarget::Before("c".to_string()));
    }

    #[test]
    fn drop_target_is_pure() {
        let mut eng = engine();
        eng.begin_drag("a");
        let before = eng.order().to_vec();
        let raw = slots_100_200_300();
        for y in [0, 150, 250, 500] {
            let _ = eng.drop_target(y, &as_slots(&raw));
        }
        assert_eq!(eng.order(), before.as_slice());
        assert_eq!(eng.dragging(), Some("a"));
    }

    // -- apply_drop --------------------------------------------------------

    #[test]
    fn apply_drop_before_moves_widget() {
        let mut eng = engine();
        eng.apply_drop("d", &DropTarget::Before("b".to_string()));
        assert_eq!(order_of(&eng), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn apply_drop_end_appends_widget() {
        let mut eng = engine();
        eng.apply_drop("a", &DropTarget::End);
        assert_eq!(order_of(&eng), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn apply_drop_is_a_permutation() {
        let mut eng = engine();
        let moves = [
            ("a", DropTarget::End),
            ("c", DropTarget::Before("b".to_string())),
            ("d", DropTarget::Before("c".to_string())),
            ("b", DropTarget::End),
            ("a", DropTarget::Before("a".to_string())),
        ];
        for (dragged, target) in moves {
            let mut before = eng.order().to_vec();
            eng.apply_drop(dragged, &target);
            let mut after = eng.order().to_vec();
            before.sort();
            after.sort();
            assert_eq!(before, after, "container must stay a permutation");
        }
    }

    #[test]
    fn apply_drop_onto_itself_is_a_no_op() {
        let mut eng = engine();
        eng.apply_drop("b", &DropTarget::Before("b".to_string()));
        assert_eq!(order_of(&eng), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn apply_drop_unknown_dragged_is_a_no_op() {
        let mut eng = engine();
        eng.apply_drop("zzz", &DropTarget::End);
        assert_eq!(order_of(&eng), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn apply_drop_unknown_target_restores_position() {
        let mut eng = engine();
        eng.apply_drop("c", &DropTarget::Before("zzz".to_string()));
        assert_eq!(order_of(&eng), vec!["a", "b", "c", "d"]);
    }

    // -- Persistence -------------------------------------------------------

    #[test]
    fn persist_layout_is_idempotent() {
        let (_dir, mut store) = temp_prefs();
        let eng = engine();
        eng.persist_layout(&mut store).expect("first persist");
        let first = store.get(keys::DASHBOARD_LAYOUT).map(str::to_string);
        eng.persist_layout(&mut store).expect("second persist");
        let second = store.get(keys::DASHBOARD_LAYOUT).map(str::to_string);
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn persist_then_restore_round_trips() {
        let (_dir, mut store) = temp_prefs();
        let mut eng = engine();
        eng.apply_drop("d", &DropTarget::Before("a".to_string()));
        eng.apply_drop("b", &DropTarget::End);
        let saved = eng.order().to_vec();
        eng.persist_layout(&mut store).expect("persist");

        // Fresh engine with the default order, as after a restart.
        let mut fresh = engine();
        fresh.restore_layout(&store);
        assert_eq!(fresh.order(), saved.as_slice());
    }

    #[test]
    fn end_drag_persists_layout() {
        let (_dir, mut store) = temp_prefs();
        let mut eng = engine();
        eng.begin_drag("a");
        eng.apply_drop("a", &DropTarget::End);
        eng.end_drag(&mut store).expect("end_drag persists");
        assert_eq!(
            store.get(keys::DASHBOARD_LAYOUT),
            Some(r#"["b","c","d","a"]"#)
        );
    }

    // -- Restore -----------------------------------------------------------

    fn store_with_record(record: &str) -> (tempfile::TempDir, PrefStore) {
        let (dir, mut store) = temp_prefs();
        store.set(keys::DASHBOARD_LAYOUT, record);
        (dir, store)
    }

    #[test]
    fn restore_orders_record_matched_widgets_first() {
        let (_dir, store) = store_with_record(r#"["c","a"]"#);
        let mut eng = engine();
        eng.restore_layout(&store);
        assert_eq!(order_of(&eng), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn restore_skips_stale_identifiers() {
        let (_dir, store) = store_with_record(r#"["c","z","a"]"#);
        let mut eng = engine();
        eng.restore_layout(&store);
        assert_eq!(order_of(&eng), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn restore_with_absent_record_keeps_default_order() {
        let (_dir, store) = temp_prefs();
        let mut eng = engine();
        eng.restore_layout(&store);
        assert_eq!(order_of(&eng), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn restore_with_malformed_record_keeps_default_order() {
        for bad in ["not json", "{\"a\":1}", "[1,2,3]", ""] {
            let (_dir, store) = store_with_record(bad);
            let mut eng = engine();
            eng.restore_layout(&store);
            assert_eq!(order_of(&eng), vec!["a", "b", "c", "d"], "record: {bad:?}");
        }
    }

    #[test]
    fn restore_with_full_record_applies_exact_order() {
        let (_dir, store) = store_with_record(r#"["d","c","b","a"]"#);
        let mut eng = engine();
        eng.restore_layout(&store);
        assert_eq!(order_of(&eng), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn restore_with_duplicate_identifier_keeps_later_position() {
        let (_dir, store) = store_with_record(r#"["b","c","b"]"#);
        let mut eng = engine();
        eng.restore_layout(&store);
        assert_eq!(order_of(&eng), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn restore_is_a_permutation_of_the_container() {
        let (_dir, store) = store_with_record(r#"["d","z","b"]"#);
        let mut eng = engine();
        eng.restore_layout(&store);
        let mut ids = order_of(&eng);
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }
}
