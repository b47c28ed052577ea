use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use chrono::Local;

use crate::board::{AssignmentMap, Notice, RangeStore};
use crate::classify::classify_zones;
use crate::model::{Person, Roster};

/// Occupant name, or `[EMPTY]`
fn occupant_label(occupant: Option<&Person>) -> String {
    match occupant {
        Some(person) => format!("{} ({})", person.name, person.id),
        None => "[EMPTY]".to_string(),
    }
}

/// Renders the board: single zones, then each group with its role slots
pub fn render_board(roster: &Roster, map: &AssignmentMap, selected: Option<&Person>) -> String {
    let occupants = map.group_by_zone(roster);
    let first = |zone_id: &str| occupants.get(zone_id).and_then(|o| o.first().copied());
    let classification = classify_zones(roster.zones());
    let mut out = String::new();

    if !classification.singles.is_empty() {
        let _ = writeln!(out, "== Zones ==");
        for zone in &classification.singles {
            let _ = writeln!(out, "  [{}] {} -> {}", zone.id, zone.label, occupant_label(first(zone.id.as_str())));
        }
    }

    for group in &classification.groups {
        let _ = writeln!(out, "== {} ==", group.base_label);
        for item in &group.items {
            let _ = writeln!(
                out,
                "  [{}] {} -> {}",
                item.zone.id,
                item.role_label,
                occupant_label(first(item.zone.id.as_str()))
            );
        }
    }

    let waiting: Vec<String> = roster
        .people()
        .iter()
        .filter(|p| !map.is_assigned(&p.id))
        .map(|p| format!("{} ({})", p.name, p.id))
        .collect();
    if waiting.is_empty() {
        let _ = writeln!(out, "\nEveryone is assigned.");
    } else {
        let _ = writeln!(out, "\nUnassigned ({}): {}", waiting.len(), waiting.join(", "));
    }

    match selected {
        Some(person) => {
            let _ = writeln!(out, "Selected: {} ({})", person.name, person.id);
        }
        None => {
            let _ = writeln!(out, "Selected: -");
        }
    }

    out
}

/// Renders range mode: every zone in order with its index, range markers and occupant
pub fn render_range_board(store: &RangeStore) -> String {
    let roster = store.roster();
    let state = store.state();
    let mut out = String::new();

    let _ = writeln!(out, "== Zones (pick start/end by index) ==");
    for (idx, zone_id) in store.ordered_zone_ids().iter().enumerate() {
        let Some(zone) = roster.zone(zone_id) else { continue };
        let marker = match (state.start == Some(idx), state.end == Some(idx)) {
            (true, true) => "S/E",
            (true, false) => "S",
            (false, true) => "E",
            _ if state.contains(idx) => "*",
            _ => "",
        };
        let occupant = state.assign.occupant(zone_id).and_then(|pid| roster.person(pid));
        let _ = writeln!(out, "{:>3} {:<3} {} -> {}", idx, marker, zone.label, occupant_label(occupant));
    }

    let available: Vec<String> = store
        .available_people()
        .iter()
        .map(|p| format!("{} ({})", p.name, p.id))
        .collect();
    let _ = writeln!(out, "\nAvailable ({}): {}", available.len(), available.join(", "));
    match store.next_empty_zone_id().and_then(|zid| roster.zone(zid)) {
        Some(zone) => {
            let _ = writeln!(out, "Next zone: {}", zone.label);
        }
        None => {
            let _ = writeln!(out, "Next zone: -");
        }
    }

    out
}

/// Renders the classification of the configured zones
pub fn render_classification(roster: &Roster) -> String {
    let classification = classify_zones(roster.zones());
    let mut out = String::new();

    let _ = writeln!(out, "Singles ({}):", classification.singles.len());
    for zone in &classification.singles {
        let _ = writeln!(out, "  {} [{}]", zone.label, zone.id);
    }
    let _ = writeln!(out, "Groups ({}):", classification.groups.len());
    for group in &classification.groups {
        let roles: Vec<String> = group
            .items
            .iter()
            .map(|i| format!("{} [{}]", i.role_label, i.zone.id))
            .collect();
        let _ = writeln!(out, "  {}: {}", group.base_label, roles.join(", "));
    }
    out
}

/// A notice as two lines: title, then indented description
pub fn format_notice(notice: &Notice) -> String {
    let marker = if notice.is_failure() { "!!" } else { "**" };
    format!(
        "{} {}\n   {}",
        marker,
        notice.title(),
        notice.description().replace('\n', "\n   ")
    )
}

/// Writes the result to a file under a dated header
pub fn write_result_to_file<P: AsRef<Path>>(
    path: P,
    result_text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;

    writeln!(file, "** Cleaning assignments ({}) **", Local::now().format("%Y-%m-%d"))?;
    if !result_text.is_empty() {
        writeln!(file, "{}", result_text)?;
    }

    Ok(())
}
