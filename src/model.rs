use std::collections::{HashMap, HashSet};
use serde::{Serialize, Deserialize};

use crate::error::SeedError;

pub type PersonId = String;
pub type ZoneId = String;

/// A person on the cleaning roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// A physical area to be cleaned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl Zone {
    pub fn new(id: impl Into<ZoneId>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), order: None }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Sort key for display and output: the declared order, or the list position
    pub fn sort_key(&self, position: usize) -> u64 {
        self.order.map(u64::from).unwrap_or(position as u64)
    }
}

/// The fixed people and zones of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
    zones: Vec<Zone>,
}

impl Roster {
    /// Builds a roster, rejecting duplicate person or zone ids
    pub fn new(people: Vec<Person>, zones: Vec<Zone>) -> Result<Self, SeedError> {
        let mut seen = HashSet::new();
        for person in &people {
            if !seen.insert(person.id.as_str()) {
                return Err(SeedError::DuplicatePerson(person.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for zone in &zones {
            if !seen.insert(zone.id.as_str()) {
                return Err(SeedError::DuplicateZone(zone.id.clone()));
            }
        }

        Ok(Self { people, zones })
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Zones sorted by their sort key; equal keys keep list order
    pub fn zones_in_order(&self) -> Vec<&Zone> {
        let mut ordered: Vec<(u64, &Zone)> = self.zones
            .iter()
            .enumerate()
            .map(|(i, z)| (z.sort_key(i), z))
            .collect();
        ordered.sort_by_key(|(key, _)| *key);
        ordered.into_iter().map(|(_, z)| z).collect()
    }

    /// zone id -> sort key
    pub fn zone_ranks(&self) -> HashMap<&str, u64> {
        self.zones
            .iter()
            .enumerate()
            .map(|(i, z)| (z.id.as_str(), z.sort_key(i)))
            .collect()
    }
}
