use std::collections::{BTreeMap, HashMap};
use serde::Serialize;

use crate::model::{Person, PersonId, Roster, Zone, ZoneId};

/// person -> zone (or unassigned), one entry per person on the roster.
///
/// The map is keyed by person, so "one occupant per zone" is not guaranteed
/// by its shape. Every mutator here keeps it anyway: `place` evicts whoever
/// held the target zone in the same update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AssignmentMap {
    slots: BTreeMap<PersonId, Option<ZoneId>>,
}

impl AssignmentMap {
    /// Everyone unassigned
    pub fn empty_for(people: &[Person]) -> Self {
        Self {
            slots: people.iter().map(|p| (p.id.clone(), None)).collect(),
        }
    }

    pub fn contains_person(&self, person_id: &str) -> bool {
        self.slots.contains_key(person_id)
    }

    pub fn zone_of(&self, person_id: &str) -> Option<&str> {
        self.slots.get(person_id).and_then(|z| z.as_deref())
    }

    pub fn occupant_of(&self, zone_id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, z)| z.as_deref() == Some(zone_id))
            .map(|(p, _)| p.as_str())
    }

    pub fn is_assigned(&self, person_id: &str) -> bool {
        self.zone_of(person_id).is_some()
    }

    /// Puts `person_id` into `zone_id`, unassigning any other occupant of that zone.
    /// Returns false (and changes nothing) for a person outside the map.
    pub fn place(&mut self, person_id: &str, zone_id: &str) -> bool {
        if !self.contains_person(person_id) {
            return false;
        }

        let evicted = self
            .occupant_of(zone_id)
            .filter(|p| *p != person_id)
            .map(str::to_string);
        if let Some(evicted) = evicted {
            self.slots.insert(evicted, None);
        }
        self.slots.insert(person_id.to_string(), Some(zone_id.to_string()));
        true
    }

    pub fn unassign(&mut self, person_id: &str) {
        if let Some(slot) = self.slots.get_mut(person_id) {
            *slot = None;
        }
    }

    pub fn clear(&mut self) {
        for slot in self.slots.values_mut() {
            *slot = None;
        }
    }

    /// (person, zone) for every assigned person, in person id order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots
            .iter()
            .filter_map(|(p, z)| z.as_deref().map(|z| (p.as_str(), z)))
    }

    pub fn assigned_count(&self) -> usize {
        self.pairs().count()
    }

    /// zone id -> occupants in roster order, with an entry for every zone
    pub fn group_by_zone<'a>(&self, roster: &'a Roster) -> HashMap<&'a str, Vec<&'a Person>> {
        let mut grouped: HashMap<&'a str, Vec<&'a Person>> = roster
            .zones()
            .iter()
            .map(|z| (z.id.as_str(), Vec::new()))
            .collect();
        for person in roster.people() {
            if let Some(zone_id) = self.zone_of(&person.id) {
                if let Some(occupants) = grouped.get_mut(zone_id) {
                    occupants.push(person);
                }
            }
        }
        grouped
    }

    /// The zone-keyed view of the same relation
    pub fn to_zone_map(&self, zones: &[Zone]) -> ZoneMap {
        let mut map = ZoneMap::empty_for(zones);
        for (person_id, zone_id) in self.pairs() {
            map.fill(zone_id, person_id);
        }
        map
    }
}

/// zone -> person (or empty), one entry per zone.
///
/// The dual of [`AssignmentMap`]: `fill` refuses to place a person who
/// already occupies another zone, and never overwrites an occupied zone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ZoneMap {
    slots: BTreeMap<ZoneId, Option<PersonId>>,
}

impl ZoneMap {
    pub fn empty_for(zones: &[Zone]) -> Self {
        Self {
            slots: zones.iter().map(|z| (z.id.clone(), None)).collect(),
        }
    }

    pub fn occupant(&self, zone_id: &str) -> Option<&str> {
        self.slots.get(zone_id).and_then(|p| p.as_deref())
    }

    pub fn zone_of_person(&self, person_id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, p)| p.as_deref() == Some(person_id))
            .map(|(z, _)| z.as_str())
    }

    /// Places a person into an empty zone. Returns whether anything changed.
    pub fn fill(&mut self, zone_id: &str, person_id: &str) -> bool {
        if self.zone_of_person(person_id).is_some() {
            return false;
        }
        match self.slots.get_mut(zone_id) {
            Some(slot) if slot.is_none() => {
                *slot = Some(person_id.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn clear_zone(&mut self, zone_id: &str) {
        if let Some(slot) = self.slots.get_mut(zone_id) {
            *slot = None;
        }
    }

    pub fn clear(&mut self) {
        for slot in self.slots.values_mut() {
            *slot = None;
        }
    }

    /// The person-keyed view, for formatting
    pub fn to_assignment_map(&self, people: &[Person]) -> AssignmentMap {
        let mut map = AssignmentMap::empty_for(people);
        for (zone_id, person_id) in &self.slots {
            if let Some(person_id) = person_id {
                map.place(person_id, zone_id);
            }
        }
        map
    }
}
