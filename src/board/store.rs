use crate::clipboard::Clipboard;
use crate::format::to_result_text;
use crate::model::{Person, PersonId, Roster, ZoneId};
use super::notice::{copy_to_clipboard, Notice};
use super::state::AssignmentMap;

/// A user action in select-then-place mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectPerson(PersonId),
    AssignToZone(ZoneId),
    UnassignPerson(PersonId),
    UnassignSelected,
    ResetAll,
}

/// Assignments plus the person waiting to be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub assign: AssignmentMap,
    pub selected: Option<PersonId>,
}

impl BoardState {
    pub fn new(roster: &Roster) -> Self {
        Self {
            assign: AssignmentMap::empty_for(roster.people()),
            selected: None,
        }
    }
}

/// Computes the next state from one snapshot of the current one.
///
/// Actions naming an unknown person or zone leave the state unchanged.
/// Only `ResetAll` produces a notice.
pub fn reduce(roster: &Roster, state: &BoardState, action: &Action) -> (BoardState, Option<Notice>) {
    let mut next = state.clone();

    match action {
        Action::SelectPerson(pid) => {
            if roster.person(pid).is_some() {
                next.selected = if state.selected.as_ref() == Some(pid) {
                    None
                } else {
                    Some(pid.clone())
                };
            }
        }
        Action::AssignToZone(zone_id) => {
            if let Some(selected) = &state.selected {
                if roster.zone(zone_id).is_some() {
                    next.assign.place(selected, zone_id);
                }
            }
        }
        Action::UnassignPerson(pid) => {
            next.assign.unassign(pid);
            if state.selected.as_ref() == Some(pid) {
                next.selected = None;
            }
        }
        Action::UnassignSelected => {
            if let Some(selected) = &state.selected {
                next.assign.unassign(selected);
            }
        }
        Action::ResetAll => {
            return (BoardState::new(roster), Some(Notice::ResetDone));
        }
    }

    (next, None)
}

/// Owns the roster and the board state for one session
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    roster: Roster,
    state: BoardState,
}

impl AssignmentStore {
    pub fn new(roster: Roster) -> Self {
        let state = BoardState::new(&roster);
        Self { roster, state }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.state.assign
    }

    pub fn selected(&self) -> Option<&Person> {
        self.state.selected.as_deref().and_then(|pid| self.roster.person(pid))
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Notice> {
        tracing::debug!(?action, "dispatch");
        let (next, notice) = reduce(&self.roster, &self.state, &action);
        self.state = next;
        notice
    }

    pub fn select_person(&mut self, pid: &str) {
        self.dispatch(Action::SelectPerson(pid.to_string()));
    }

    pub fn assign_to_zone(&mut self, zone_id: &str) {
        self.dispatch(Action::AssignToZone(zone_id.to_string()));
    }

    pub fn unassign_person(&mut self, pid: &str) {
        self.dispatch(Action::UnassignPerson(pid.to_string()));
    }

    pub fn unassign_selected(&mut self) {
        self.dispatch(Action::UnassignSelected);
    }

    pub fn reset_all(&mut self) -> Notice {
        self.dispatch(Action::ResetAll).unwrap_or(Notice::ResetDone)
    }

    /// Roster members without a zone, in roster order
    pub fn unassigned_people(&self) -> Vec<&Person> {
        self.roster
            .people()
            .iter()
            .filter(|p| !self.state.assign.is_assigned(&p.id))
            .collect()
    }

    pub fn result_text(&self) -> String {
        to_result_text(&self.roster, &self.state.assign)
    }

    /// Copies the result text. State is only borrowed, so a failed write cannot touch it.
    pub fn copy_result(&self, clipboard: &mut dyn Clipboard) -> Notice {
        copy_to_clipboard(clipboard, self.result_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::model::Zone;

    fn store() -> AssignmentStore {
        let people = vec![
            Person::new("a", "Alice"),
            Person::new("b", "Bob"),
            Person::new("c", "Cleo"),
        ];
        let zones = vec![
            Zone::new("z1", "Lounge").with_order(1),
            Zone::new("z2", "Shower(1)").with_order(2),
            Zone::new("z3", "Shower(2)").with_order(3),
        ];
        AssignmentStore::new(Roster::new(people, zones).unwrap())
    }

    fn assert_one_occupant_per_zone(store: &AssignmentStore) {
        let mut zones: Vec<&str> = store.assignments().pairs().map(|(_, z)| z).collect();
        let total = zones.len();
        zones.sort();
        zones.dedup();
        assert_eq!(zones.len(), total, "a zone has two occupants: {:?}", store.assignments());
    }

    #[test]
    fn selecting_twice_clears_selection() {
        let mut s = store();
        s.select_person("a");
        assert_eq!(s.selected().map(|p| p.id.as_str()), Some("a"));
        s.select_person("a");
        assert!(s.selected().is_none());
        s.select_person("a");
        s.select_person("b");
        assert_eq!(s.selected().map(|p| p.id.as_str()), Some("b"));
    }

    #[test]
    fn assign_without_selection_is_a_no_op() {
        let mut s = store();
        let before = s.state().clone();
        s.assign_to_zone("z1");
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn selection_survives_assignment() {
        let mut s = store();
        s.select_person("a");
        s.assign_to_zone("z1");
        assert_eq!(s.assignments().zone_of("a"), Some("z1"));
        assert_eq!(s.selected().map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn assigning_to_an_occupied_zone_swaps_out_the_occupant() {
        let mut s = store();
        s.select_person("a");
        s.assign_to_zone("z1");
        s.select_person("c");
        s.assign_to_zone("z2");

        s.select_person("b");
        s.assign_to_zone("z1");

        assert_eq!(s.assignments().zone_of("b"), Some("z1"));
        assert_eq!(s.assignments().zone_of("a"), None);
        assert_eq!(s.assignments().zone_of("c"), Some("z2"));
    }

    #[test]
    fn unknown_zone_is_ignored() {
        let mut s = store();
        s.select_person("a");
        s.assign_to_zone("nowhere");
        assert_eq!(s.assignments().zone_of("a"), None);
    }

    #[test]
    fn unassign_person_clears_matching_selection() {
        let mut s = store();
        s.select_person("a");
        s.assign_to_zone("z1");
        s.unassign_person("a");
        assert_eq!(s.assignments().zone_of("a"), None);
        assert!(s.selected().is_none());
    }

    #[test]
    fn unassign_person_is_idempotent() {
        let mut s = store();
        s.select_person("b");
        s.assign_to_zone("z3");
        s.unassign_person("b");
        let once = s.state().clone();
        s.unassign_person("b");
        assert_eq!(s.state(), &once);
    }

    #[test]
    fn unassign_selected_keeps_selection() {
        let mut s = store();
        s.unassign_selected();
        s.select_person("a");
        s.assign_to_zone("z2");
        s.unassign_selected();
        assert_eq!(s.assignments().zone_of("a"), None);
        assert_eq!(s.selected().map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn reset_clears_everything_and_notifies_once() {
        let mut s = store();
        s.select_person("a");
        s.assign_to_zone("z1");
        s.select_person("b");
        s.assign_to_zone("z2");

        let notice = s.reset_all();
        assert_eq!(notice, Notice::ResetDone);
        assert_eq!(s.assignments().assigned_count(), 0);
        assert!(s.selected().is_none());
        assert_eq!(s.unassigned_people().len(), 3);
    }

    #[test]
    fn unassigned_people_keep_roster_order() {
        let mut s = store();
        s.select_person("b");
        s.assign_to_zone("z1");
        let names: Vec<&str> = s.unassigned_people().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Cleo"]);
    }

    #[test]
    fn invariant_holds_under_rapid_reassignment() {
        let mut s = store();
        let script = [
            ("a", "z1"), ("b", "z1"), ("c", "z1"), ("a", "z2"), ("b", "z2"),
            ("c", "z3"), ("a", "z3"), ("a", "z3"), ("b", "z1"), ("c", "z2"),
        ];
        for (pid, zid) in script {
            s.select_person(pid);
            s.assign_to_zone(zid);
            assert_one_occupant_per_zone(&s);
            if pid == "b" {
                s.unassign_person("c");
                assert_one_occupant_per_zone(&s);
            }
            s.select_person(pid);
        }
        s.reset_all();
        assert_one_occupant_per_zone(&s);
    }

    #[test]
    fn copy_result_reports_success_with_text() {
        let mut s = store();
        s.select_person("a");
        s.assign_to_zone("z3");
        let mut clipboard = MemoryClipboard::default();

        let notice = s.copy_result(&mut clipboard);
        assert_eq!(notice, Notice::Copied { text: "Alice - Shower deputy".to_string() });
        assert_eq!(clipboard.contents(), Some("Alice - Shower deputy"));
    }

    #[test]
    fn failed_copy_leaves_state_alone() {
        let mut s = store();
        s.select_person("a");
        s.assign_to_zone("z1");
        let before = s.state().clone();

        let notice = s.copy_result(&mut MemoryClipboard::failing());
        assert!(notice.is_failure());
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn reduce_is_pure() {
        let s = store();
        let state = s.state().clone();
        let (next, notice) = reduce(s.roster(), &state, &Action::SelectPerson("a".to_string()));
        assert_eq!(state.selected, None);
        assert_eq!(next.selected.as_deref(), Some("a"));
        assert!(notice.is_none());
    }
}
