//! Buckets zone labels into display groups.
//!
//! Each rule is a pattern plus two extractors: one for the group key and one
//! for the role label shown inside the group. Rules run in table order and
//! the first match wins; a label no rule matches is a single zone.

use std::collections::HashMap;
use std::sync::LazyLock;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::model::Zone;

static NUMBERED: LazyLock<Regex> = LazyLock::new(|| compile(r"^(.*)\((\d+)\)$"));

static RULES: LazyLock<Vec<LabelRule>> = LazyLock::new(|| {
    vec![
        LabelRule {
            name: "numbered",
            pattern: NUMBERED.clone(),
            group: GroupKey::Capture(1),
            role: RoleLabel::Numbered(2),
        },
        LabelRule {
            name: "corridor",
            pattern: compile(
                r"^(Corridor-[0-9]+)\s+(main-sweep|right-sweep|right-mop|left-sweep|left-mop)$",
            ),
            group: GroupKey::Capture(1),
            role: RoleLabel::Capture(2),
        },
        LabelRule {
            name: "stairwell",
            pattern: compile(r"^((?i:left|right|center)-stairs)\s+(sweep|mop)$"),
            group: GroupKey::Capture(1),
            role: RoleLabel::Capture(2),
        },
        LabelRule {
            name: "dryer",
            pattern: compile(r"^(?i)(left|right)-dryer$"),
            group: GroupKey::Fixed("dryer"),
            role: RoleLabel::Lowercase(1),
        },
    ]
});

fn compile(pattern: &str) -> Regex {
    // The patterns are literals above; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid label pattern {pattern}: {e}"))
}

enum GroupKey {
    Capture(usize),
    Fixed(&'static str),
}

enum RoleLabel {
    /// A slot number mapped through `numbered_role_name`; also the sort key
    Numbered(usize),
    Capture(usize),
    Lowercase(usize),
}

struct LabelRule {
    name: &'static str,
    pattern: Regex,
    group: GroupKey,
    role: RoleLabel,
}

impl LabelRule {
    fn apply(&self, label: &str) -> Option<LabelMatch> {
        let caps = self.pattern.captures(label)?;

        let group_key = match self.group {
            GroupKey::Capture(i) => capture(&caps, i)?.trim().to_string(),
            GroupKey::Fixed(key) => key.to_string(),
        };

        let (role_label, sort_key) = match self.role {
            RoleLabel::Numbered(i) => {
                let n: u32 = capture(&caps, i)?.parse().ok()?;
                (numbered_role_name(n), Some(n))
            }
            RoleLabel::Capture(i) => (capture(&caps, i)?.to_string(), None),
            RoleLabel::Lowercase(i) => (capture(&caps, i)?.to_lowercase(), None),
        };

        Some(LabelMatch { rule: self.name, group_key, role_label, sort_key })
    }
}

fn capture<'t>(caps: &Captures<'t>, i: usize) -> Option<&'t str> {
    caps.get(i).map(|m| m.as_str())
}

/// Role name for a numbered slot
pub fn numbered_role_name(n: u32) -> String {
    match n {
        1 => "senior".to_string(),
        2 => "deputy".to_string(),
        3 => "junior".to_string(),
        4 => "junior (bleach)".to_string(),
        _ => format!("Slot {}", n),
    }
}

/// Splits `"<base>(<n>)"` into the trimmed base and `n`
pub fn split_numbered(label: &str) -> Option<(&str, u32)> {
    let caps = NUMBERED.captures(label)?;
    let base = caps.get(1)?.as_str().trim();
    let n = caps.get(2)?.as_str().parse().ok()?;
    Some((base, n))
}

/// How one label was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatch {
    pub rule: &'static str,
    pub group_key: String,
    pub role_label: String,
    pub sort_key: Option<u32>,
}

/// Runs the rule table against a single label
pub fn classify_label(label: &str) -> Option<LabelMatch> {
    let label = label.trim();
    RULES.iter().find_map(|rule| rule.apply(label))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupItem<'a> {
    pub zone: &'a Zone,
    pub role_label: String,
    pub sort_key: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneGroup<'a> {
    pub base_label: String,
    pub items: Vec<GroupItem<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Classification<'a> {
    pub singles: Vec<&'a Zone>,
    pub groups: Vec<ZoneGroup<'a>>,
}

/// Partitions zones into singles and groups.
///
/// Groups come out in order of first appearance. Within a group items are
/// sorted by slot number when any item has one, otherwise by role label.
pub fn classify_zones(zones: &[Zone]) -> Classification<'_> {
    let mut singles = Vec::new();
    let mut groups: Vec<ZoneGroup<'_>> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for zone in zones {
        let Some(m) = classify_label(&zone.label) else {
            singles.push(zone);
            continue;
        };

        let idx = *group_index.entry(m.group_key.clone()).or_insert_with(|| {
            groups.push(ZoneGroup { base_label: m.group_key.clone(), items: Vec::new() });
            groups.len() - 1
        });
        groups[idx].items.push(GroupItem {
            zone,
            role_label: m.role_label,
            sort_key: m.sort_key,
        });
    }

    for group in &mut groups {
        if group.items.iter().any(|i| i.sort_key.is_some()) {
            group.items.sort_by_key(|i| i.sort_key.unwrap_or(0));
        } else {
            group.items.sort_by(|a, b| a.role_label.cmp(&b.role_label));
        }
    }

    Classification { singles, groups }
}
