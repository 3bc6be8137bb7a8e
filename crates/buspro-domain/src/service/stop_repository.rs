//! Stop repository: the in-memory roster with its selected cell
//!
//! Every mutating call writes the whole `RouteState` through the injected
//! `RouteStateRepository` before returning. Reads never touch storage.

use buspro_types::{Direction, Result, RouteSlot};
use uuid::Uuid;

use crate::model::stop::validate_name;
use crate::model::{RouteState, Stop, StopDraft};
use crate::repository::RouteStateRepository;

/// Prompt shown before a stop is removed
pub const DELETE_PROMPT: &str = "Remove this student permanently?";

/// Pending removal of one stop
///
/// Obtained from [`StopRepository::request_delete`]; pass it to
/// [`StopRepository::delete`] once the user confirms, or drop it to cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete only happens when the confirmation is passed to StopRepository::delete"]
pub struct DeleteConfirmation {
    route: RouteSlot,
    direction: Direction,
    id: String,
    name: String,
}

impl DeleteConfirmation {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name of the stop about to be removed
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> String {
        format!("{} ({})", DELETE_PROMPT, self.name)
    }
}

/// In-progress drag of one stop within a cell
///
/// `index` always tracks the dragged item's latest position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    route: RouteSlot,
    direction: Direction,
    index: usize,
}

impl DragSession {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Owner of the route state, the current selection and the navigation target
pub struct StopRepository<R> {
    store: R,
    state: RouteState,
    route: RouteSlot,
    direction: Direction,
    nav_target: Option<String>,
}

impl<R: RouteStateRepository> StopRepository<R> {
    /// Load the stored state; selection starts at Morning / Go to School
    pub fn open(store: R) -> Self {
        let state = store.load();
        Self::with_state(store, state)
    }

    /// Use an already loaded state
    pub fn with_state(store: R, state: RouteState) -> Self {
        Self {
            store,
            state,
            route: RouteSlot::default(),
            direction: Direction::default(),
            nav_target: None,
        }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    pub fn selection(&self) -> (RouteSlot, Direction) {
        (self.route, self.direction)
    }

    /// Switch the selected cell and return its stops
    pub fn select(&mut self, route: RouteSlot, direction: Direction) -> &[Stop] {
        if (route, direction) != self.selection() {
            self.nav_target = None;
        }
        self.route = route;
        self.direction = direction;
        self.current()
    }

    /// Stops of the selected cell, in drive order
    pub fn current(&self) -> &[Stop] {
        self.state.cell(self.route, self.direction)
    }

    /// Find a stop in the selected cell
    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.current().iter().find(|s| s.id == id)
    }

    fn current_mut(&mut self) -> &mut Vec<Stop> {
        self.state.cell_mut(self.route, self.direction)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.state)
    }

    /// Id not used by any stop in any cell
    fn fresh_id(&self) -> String {
        loop {
            let id = format!("stop-{}", Uuid::new_v4().simple());
            if !self.state.contains_id(&id) {
                return id;
            }
        }
    }

    /// Append a new stop to the selected cell
    pub fn create(&mut self, draft: StopDraft) -> Result<Stop> {
        validate_name(&draft.name)?;

        let stop = Stop::from_draft(self.fresh_id(), draft);
        self.current_mut().push(stop.clone());
        self.persist()?;

        tracing::info!(
            id = %stop.id,
            route = %self.route,
            direction = %self.direction,
            "stop created"
        );
        Ok(stop)
    }

    /// Replace the stop with the same id in place, or append it
    ///
    /// An appended record keeps its id unless another cell already uses it,
    /// in which case it gets a fresh one. Returns the record as stored.
    pub fn update(&mut self, stop: Stop) -> Result<Stop> {
        validate_name(&stop.name)?;

        if let Some(slot) = self.current_mut().iter_mut().find(|s| s.id == stop.id) {
            *slot = stop.clone();
            self.persist()?;
            tracing::info!(id = %stop.id, "stop updated");
            return Ok(stop);
        }

        let mut stop = stop;
        if stop.id.trim().is_empty() || self.state.contains_id(&stop.id) {
            stop.id = self.fresh_id();
        }
        self.current_mut().push(stop.clone());
        self.persist()?;
        tracing::info!(id = %stop.id, "stop appended on update");
        Ok(stop)
    }

    /// Start the confirmation step for removing a stop of the selected cell
    ///
    /// Returns `None` when the id is not in the cell.
    pub fn request_delete(&self, id: &str) -> Option<DeleteConfirmation> {
        self.get(id).map(|stop| DeleteConfirmation {
            route: self.route,
            direction: self.direction,
            id: stop.id.clone(),
            name: stop.name.clone(),
        })
    }

    /// Remove a confirmed stop from the selected cell
    ///
    /// A stop that has disappeared since the request, or a confirmation
    /// taken on a cell that is no longer selected, is a no-op.
    pub fn delete(&mut self, confirmation: DeleteConfirmation) -> Result<Option<Stop>> {
        if (confirmation.route, confirmation.direction) != self.selection() {
            tracing::debug!(id = %confirmation.id, "delete confirmation for another cell ignored");
            return Ok(None);
        }
        let cell = self.current_mut();
        let Some(pos) = cell.iter().position(|s| s.id == confirmation.id) else {
            return Ok(None);
        };
        let removed = cell.remove(pos);

        if self.nav_target.as_deref() == Some(removed.id.as_str()) {
            self.nav_target = None;
        }
        self.persist()?;
        tracing::info!(id = %removed.id, "stop deleted");
        Ok(Some(removed))
    }

    /// Move the stop at `from` to `to` within the selected cell
    ///
    /// Returns `false` without saving when either index is out of range or
    /// the two are equal.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool> {
        let len = self.current().len();
        if from >= len || to >= len || from == to {
            return Ok(false);
        }

        let list = self.current_mut();
        let item = list.remove(from);
        list.insert(to, item);
        self.persist()?;
        tracing::debug!(from, to, "stops reordered");
        Ok(true)
    }

    /// Pick up the stop at `index` in the selected cell
    pub fn begin_drag(&self, index: usize) -> Option<DragSession> {
        (index < self.current().len()).then_some(DragSession {
            route: self.route,
            direction: self.direction,
            index,
        })
    }

    /// Drag the picked-up stop over position `target`
    ///
    /// Each call is one reorder relative to the item's latest position. A
    /// session started on a different cell than the selected one is ignored.
    pub fn drag_over(&mut self, session: &mut DragSession, target: usize) -> Result<bool> {
        if (session.route, session.direction) != self.selection() {
            return Ok(false);
        }
        let moved = self.reorder(session.index, target)?;
        if moved {
            session.index = target;
        }
        Ok(moved)
    }

    /// Select a stop as the navigation target, or clear it if already selected
    pub fn toggle_navigation_target(&mut self, id: &str) -> Option<&Stop> {
        if self.nav_target.as_deref() == Some(id) {
            self.nav_target = None;
        } else if self.get(id).is_some() {
            self.nav_target = Some(id.to_string());
        }
        self.navigation_target()
    }

    /// Currently selected navigation target in the selected cell
    pub fn navigation_target(&self) -> Option<&Stop> {
        self.nav_target.as_deref().and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_state;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    /// In-memory port that counts saves
    #[derive(Default)]
    struct RecordingStore {
        saved: RefCell<Option<RouteState>>,
        saves: Cell<usize>,
    }

    impl RouteStateRepository for RecordingStore {
        fn load(&self) -> RouteState {
            self.saved.borrow().clone().unwrap_or_else(seed_state)
        }

        fn save(&self, state: &RouteState) -> Result<()> {
            *self.saved.borrow_mut() = Some(state.clone());
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    fn seeded() -> StopRepository<RecordingStore> {
        StopRepository::open(RecordingStore::default())
    }

    fn letters(repo: &StopRepository<RecordingStore>) -> StopRepository<RecordingStore> {
        let mut state = repo.state().clone();
        *state.cell_mut(RouteSlot::Morning, Direction::ToSchool) = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|n| Stop {
                id: n.to_string(),
                name: n.to_string(),
                ..Default::default()
            })
            .collect();
        StopRepository::with_state(RecordingStore::default(), state)
    }

    fn ids(repo: &StopRepository<RecordingStore>) -> Vec<String> {
        repo.current().iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_create_then_delete_restores_order() {
        let mut repo = seeded();
        let before = ids(&repo);
        assert_eq!(before.len(), 5);

        let created = repo
            .create(StopDraft::named("Mia").with_address("1 Elm St"))
            .unwrap();
        assert_eq!(repo.current().len(), 6);
        let last = repo.current().last().unwrap();
        assert_eq!(last.id, created.id);
        assert_eq!(last.address, "1 Elm St");

        let confirmation = repo.request_delete(&created.id).unwrap();
        let removed = repo.delete(confirmation).unwrap();
        assert_eq!(removed.unwrap().name, "Mia");
        assert_eq!(ids(&repo), before);
        assert_eq!(repo.store().saves.get(), 2);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut repo = seeded();
        assert!(repo.create(StopDraft::named("   ")).is_err());
        assert!(repo.create(StopDraft::default()).is_err());
        assert_eq!(repo.current().len(), 5);
        assert_eq!(repo.store().saves.get(), 0);
    }

    #[test]
    fn test_create_ids_are_globally_unique() {
        let mut repo = seeded();
        for route in RouteSlot::ALL {
            for direction in Direction::ALL {
                repo.select(route, direction);
                repo.create(StopDraft::named("New")).unwrap();
            }
        }
        let all: Vec<_> = repo
            .state()
            .cells()
            .flat_map(|(_, _, stops)| stops.iter().map(|s| s.id.clone()))
            .collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 24);
        assert_eq!(unique.len(), 24);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut repo = seeded();
        let mut stop = repo.current()[2].clone();
        stop.notes = "Moved to the corner".to_string();
        let before = ids(&repo);

        repo.update(stop).unwrap();
        assert_eq!(ids(&repo), before);
        assert_eq!(repo.current()[2].notes, "Moved to the corner");
    }

    #[test]
    fn test_update_unknown_id_appends() {
        let mut repo = seeded();
        let stop = Stop {
            id: "new-1700000000".to_string(),
            name: "Zoe".to_string(),
            ..Default::default()
        };
        let stored = repo.update(stop).unwrap();
        assert_eq!(stored.id, "new-1700000000");
        assert_eq!(repo.current().len(), 6);
        assert_eq!(repo.current()[5].name, "Zoe");
    }

    #[test]
    fn test_update_with_id_from_other_cell_gets_fresh_id() {
        let mut repo = seeded();
        repo.select(RouteSlot::Afternoon, Direction::ToSchool);
        let foreign = Stop {
            id: "m-back-1".to_string(),
            name: "Copy".to_string(),
            ..Default::default()
        };
        let stored = repo.update(foreign).unwrap();
        assert_ne!(stored.id, "m-back-1");
        assert_eq!(repo.current().len(), 6);
        assert_eq!(
            repo.state().cell(RouteSlot::Morning, Direction::FromSchool)[0].name,
            "Alex Johnson"
        );
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let mut repo = seeded();
        let mut stop = repo.current()[0].clone();
        stop.name = " ".to_string();
        assert!(repo.update(stop).is_err());
        assert_eq!(repo.current()[0].name, "Alex Johnson");
    }

    #[test]
    fn test_delete_absent_id_is_noop() {
        let mut repo = seeded();
        assert!(repo.request_delete("missing").is_none());

        let confirmation = repo.request_delete("3").unwrap();
        assert_eq!(repo.delete(confirmation.clone()).unwrap().unwrap().id, "3");
        assert!(repo.delete(confirmation).unwrap().is_none());
        assert_eq!(repo.current().len(), 4);
        assert_eq!(repo.store().saves.get(), 1);
    }

    #[test]
    fn test_delete_only_touches_selected_cell() {
        let mut repo = seeded();
        repo.select(RouteSlot::Morning, Direction::FromSchool);
        let confirmation = repo.request_delete("m-back-2").unwrap();
        repo.delete(confirmation).unwrap();
        assert_eq!(repo.current().len(), 4);
        assert_eq!(repo.state().cell(RouteSlot::Morning, Direction::ToSchool).len(), 5);
        assert!(repo.request_delete("2").is_none());
    }

    #[test]
    fn test_reorder_first_to_last() {
        let mut repo = letters(&seeded());
        assert!(repo.reorder(0, 4).unwrap());
        assert_eq!(ids(&repo), vec!["B", "C", "D", "E", "A"]);
    }

    #[test]
    fn test_reorder_last_to_first() {
        let mut repo = letters(&seeded());
        assert!(repo.reorder(4, 1).unwrap());
        assert_eq!(ids(&repo), vec!["A", "E", "B", "C", "D"]);
    }

    #[test]
    fn test_reorder_invalid_or_same_index_is_noop() {
        let mut repo = letters(&seeded());
        assert!(!repo.reorder(2, 2).unwrap());
        assert!(!repo.reorder(5, 0).unwrap());
        assert!(!repo.reorder(0, 9).unwrap());
        assert_eq!(ids(&repo), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(repo.store().saves.get(), 0);
    }

    #[test]
    fn test_drag_moves_relative_to_latest_position() {
        let mut repo = letters(&seeded());
        let mut drag = repo.begin_drag(0).unwrap();
        for target in 1..5 {
            assert!(repo.drag_over(&mut drag, target).unwrap());
        }
        assert_eq!(drag.index(), 4);
        assert_eq!(ids(&repo), vec!["B", "C", "D", "E", "A"]);
        assert_eq!(repo.store().saves.get(), 4);

        // hovering over its own slot does nothing
        assert!(!repo.drag_over(&mut drag, 4).unwrap());
        assert!(repo.begin_drag(5).is_none());
    }

    #[test]
    fn test_drag_ignored_after_selection_change() {
        let mut repo = seeded();
        let mut drag = repo.begin_drag(0).unwrap();
        repo.select(RouteSlot::Afternoon, Direction::FromSchool);
        assert!(!repo.drag_over(&mut drag, 3).unwrap());
        assert_eq!(repo.current()[0].id, "a-back-1");
    }

    #[test]
    fn test_delete_ignored_after_selection_change() {
        let mut repo = seeded();
        let confirmation = repo.request_delete("3").unwrap();
        repo.select(RouteSlot::Afternoon, Direction::FromSchool);

        assert!(repo.delete(confirmation).unwrap().is_none());
        assert_eq!(
            repo.state().cell(RouteSlot::Morning, Direction::ToSchool).len(),
            5
        );
        assert_eq!(repo.current().len(), 5);
        assert_eq!(repo.store().saves.get(), 0);
    }

    #[test]
    fn test_select_does_not_mutate() {
        let mut repo = seeded();
        let before = repo.state().clone();
        let stops = repo.select(RouteSlot::Afternoon, Direction::ToSchool);
        assert_eq!(stops[0].id, "a-to-1");
        assert_eq!(repo.state(), &before);
        assert_eq!(repo.store().saves.get(), 0);
    }

    #[test]
    fn test_navigation_target_toggle() {
        let mut repo = seeded();
        assert_eq!(repo.toggle_navigation_target("2").unwrap().name, "Emma Rodriguez");
        assert!(repo.toggle_navigation_target("2").is_none());
        assert!(repo.toggle_navigation_target("nope").is_none());

        repo.toggle_navigation_target("4");
        let confirmation = repo.request_delete("4").unwrap();
        repo.delete(confirmation).unwrap();
        assert!(repo.navigation_target().is_none());
    }

    #[test]
    fn test_operation_history_multiset() {
        let mut repo = seeded();
        let a = repo.create(StopDraft::named("A")).unwrap();
        let b = repo.create(StopDraft::named("B")).unwrap();
        repo.reorder(6, 0).unwrap();
        let mut edited = a.clone();
        edited.name = "A2".to_string();
        repo.update(edited).unwrap();
        let confirmation = repo.request_delete("1").unwrap();
        repo.delete(confirmation).unwrap();

        let got: HashSet<_> = ids(&repo).into_iter().collect();
        let expected: HashSet<_> = ["2", "3", "4", "5"]
            .iter()
            .map(|s| s.to_string())
            .chain([a.id.clone(), b.id.clone()])
            .collect();
        assert_eq!(got, expected);
        assert_eq!(repo.current()[0].id, b.id);
        assert_eq!(repo.store().load(), *repo.state());
    }
}
