use crate::board::AssignmentMap;
use crate::classify::{numbered_role_name, split_numbered};
use crate::model::Roster;

/// Result label for a zone: `"Shower(1)"` becomes `"Shower senior"`,
/// anything without a slot number is returned unchanged.
pub fn pretty_zone_label(label: &str) -> String {
    match split_numbered(label) {
        Some((base, n)) => format!("{} {}", base, numbered_role_name(n)),
        None => label.to_string(),
    }
}

/// One line of the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub name: String,
    pub zone_label: String,
    pub order: u64,
}

/// Assigned pairings sorted by zone order. Zones missing from the roster are skipped.
pub fn result_rows(roster: &Roster, map: &AssignmentMap) -> Vec<ResultRow> {
    let ranks = roster.zone_ranks();

    let mut rows: Vec<ResultRow> = roster
        .people()
        .iter()
        .filter_map(|person| {
            let zone_id = map.zone_of(&person.id)?;
            let zone = roster.zone(zone_id)?;
            Some(ResultRow {
                name: person.name.clone(),
                zone_label: pretty_zone_label(&zone.label),
                order: ranks.get(zone_id).copied().unwrap_or(u64::MAX),
            })
        })
        .collect();
    rows.sort_by_key(|r| r.order);
    rows
}

/// The copyable summary: `"<name> - <zone>"` per line, no trailing newline
pub fn to_result_text(roster: &Roster, map: &AssignmentMap) -> String {
    result_rows(roster, map)
        .iter()
        .map(|row| format!("{} - {}", row.name, row.zone_label))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Zone};

    fn roster(zones: Vec<Zone>) -> Roster {
        Roster::new(vec![Person::new("alice", "Alice"), Person::new("bob", "Bob")], zones).unwrap()
    }

    #[test]
    fn unassigned_people_are_omitted() {
        let roster = roster(vec![
            Zone::new("z1", "Lounge").with_order(1),
            Zone::new("z2", "Gym").with_order(2),
        ]);
        let mut map = AssignmentMap::empty_for(roster.people());
        map.place("alice", "z2");

        assert_eq!(to_result_text(&roster, &map), "Alice - Gym");
    }

    #[test]
    fn rows_follow_zone_order_not_roster_order() {
        let roster = roster(vec![
            Zone::new("z1", "Lounge").with_order(2),
            Zone::new("z2", "Gym").with_order(1),
        ]);
        let mut map = AssignmentMap::empty_for(roster.people());
        map.place("alice", "z1");
        map.place("bob", "z2");

        assert_eq!(to_result_text(&roster, &map), "Bob - Gym\nAlice - Lounge");
    }

    #[test]
    fn list_position_is_the_fallback_order() {
        let roster = roster(vec![Zone::new("z1", "Lounge"), Zone::new("z2", "Gym")]);
        let mut map = AssignmentMap::empty_for(roster.people());
        map.place("alice", "z2");
        map.place("bob", "z1");

        assert_eq!(to_result_text(&roster, &map), "Bob - Lounge\nAlice - Gym");
    }

    #[test]
    fn numbered_labels_get_role_names() {
        let roster = roster(vec![Zone::new("s3", "Shower(3)")]);
        let mut map = AssignmentMap::empty_for(roster.people());
        map.place("bob", "s3");

        assert_eq!(to_result_text(&roster, &map), "Bob - Shower junior");
    }

    #[test]
    fn pretty_label_trims_the_base() {
        assert_eq!(pretty_zone_label("Shower (2)"), "Shower deputy");
        assert_eq!(pretty_zone_label("Gym(12)"), "Gym Slot 12");
        assert_eq!(pretty_zone_label("Left-dryer"), "Left-dryer");
    }

    #[test]
    fn nobody_assigned_is_empty_text() {
        let roster = roster(vec![Zone::new("z1", "Lounge")]);
        let map = AssignmentMap::empty_for(roster.people());
        assert_eq!(to_result_text(&roster, &map), "");
    }
}
