use crate::clipboard::Clipboard;
use crate::format::to_result_text;
use crate::model::{Person, PersonId, Roster, ZoneId};
use super::notice::{copy_to_clipboard, Notice};
use super::state::ZoneMap;

/// A user action in range-then-fill mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeAction {
    PickZoneIndex(usize),
    PickPerson(PersonId),
    UnassignZone(ZoneId),
    Reset,
}

/// Zone occupants plus the marked start and end of the range.
/// Indices point into the zones sorted by order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeState {
    pub assign: ZoneMap,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl RangeState {
    pub fn new(roster: &Roster) -> Self {
        Self {
            assign: ZoneMap::empty_for(roster.zones()),
            start: None,
            end: None,
        }
    }

    /// (low, high) once both ends are marked
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) if s <= e => Some((s, e)),
            (Some(s), Some(e)) => Some((e, s)),
            _ => None,
        }
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.bounds().map(|(s, e)| idx >= s && idx <= e).unwrap_or(false)
    }
}

/// Fill-in-order assignment over a marked stretch of zones
#[derive(Debug, Clone)]
pub struct RangeStore {
    roster: Roster,
    ordered: Vec<ZoneId>,
    state: RangeState,
}

impl RangeStore {
    pub fn new(roster: Roster) -> Self {
        let ordered = roster.zones_in_order().iter().map(|z| z.id.clone()).collect();
        let state = RangeState::new(&roster);
        Self { roster, ordered, state }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> &RangeState {
        &self.state
    }

    /// Zone ids in display order
    pub fn ordered_zone_ids(&self) -> &[ZoneId] {
        &self.ordered
    }

    pub fn zone_ids_in_range(&self) -> &[ZoneId] {
        match self.state.bounds() {
            Some((s, e)) => &self.ordered[s..=e],
            None => &[],
        }
    }

    pub fn next_empty_zone_id(&self) -> Option<&str> {
        self.zone_ids_in_range()
            .iter()
            .find(|zid| self.state.assign.occupant(zid).is_none())
            .map(String::as_str)
    }

    /// People not occupying any zone, in roster order
    pub fn available_people(&self) -> Vec<&Person> {
        self.roster
            .people()
            .iter()
            .filter(|p| self.state.assign.zone_of_person(&p.id).is_none())
            .collect()
    }

    pub fn dispatch(&mut self, action: RangeAction) -> Option<Notice> {
        tracing::debug!(?action, "dispatch");
        match action {
            RangeAction::PickZoneIndex(idx) => {
                if idx >= self.ordered.len() {
                    return None;
                }
                let state = &mut self.state;
                match (state.start, state.end) {
                    (None, _) => state.start = Some(idx),
                    (Some(_), None) => state.end = Some(idx),
                    (Some(_), Some(_)) => {
                        state.start = Some(idx);
                        state.end = None;
                    }
                }
                None
            }
            RangeAction::PickPerson(pid) => {
                if self.roster.person(&pid).is_none() {
                    return None;
                }
                if let Some(zone_id) = self.next_empty_zone_id().map(str::to_string) {
                    self.state.assign.fill(&zone_id, &pid);
                }
                None
            }
            RangeAction::UnassignZone(zone_id) => {
                self.state.assign.clear_zone(&zone_id);
                None
            }
            RangeAction::Reset => {
                self.state = RangeState::new(&self.roster);
                Some(Notice::ResetDone)
            }
        }
    }

    pub fn pick_zone_index(&mut self, idx: usize) {
        self.dispatch(RangeAction::PickZoneIndex(idx));
    }

    pub fn pick_person(&mut self, pid: &str) {
        self.dispatch(RangeAction::PickPerson(pid.to_string()));
    }

    pub fn unassign_zone(&mut self, zone_id: &str) {
        self.dispatch(RangeAction::UnassignZone(zone_id.to_string()));
    }

    pub fn reset(&mut self) -> Notice {
        self.dispatch(RangeAction::Reset).unwrap_or(Notice::ResetDone)
    }

    pub fn result_text(&self) -> String {
        let map = self.state.assign.to_assignment_map(self.roster.people());
        to_result_text(&self.roster, &map)
    }

    pub fn copy_result(&self, clipboard: &mut dyn Clipboard) -> Notice {
        copy_to_clipboard(clipboard, self.result_text())
    }
}
