pub mod share;
pub mod state;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

// --- Types (matching the frontend's wire shapes) ---

/// The five fixed guest categories. Wire names keep the frontend's
/// `guest-…` spelling so imported rosters stay readable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GuestCategory {
    #[serde(rename = "guest-bride-family")]
    BrideFamily,
    #[serde(rename = "guest-groom-family")]
    GroomFamily,
    #[serde(rename = "guest-bride-friends")]
    BrideFriends,
    #[serde(rename = "guest-groom-friends")]
    GroomFriends,
    #[serde(rename = "guest-common-friends")]
    CommonFriends,
}

impl GuestCategory {
    pub const ALL: [GuestCategory; 5] = [
        GuestCategory::BrideFamily,
        GuestCategory::GroomFamily,
        GuestCategory::BrideFriends,
        GuestCategory::GroomFriends,
        GuestCategory::CommonFriends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuestCategory::BrideFamily => "guest-bride-family",
            GuestCategory::GroomFamily => "guest-groom-family",
            GuestCategory::BrideFriends => "guest-bride-friends",
            GuestCategory::GroomFriends => "guest-groom-friends",
            GuestCategory::CommonFriends => "guest-common-friends",
        }
    }
}

impl std::str::FromStr for GuestCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GuestCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown guest category: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub category: GuestCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TableShape {
    Circle,
    Rectangle,
}

impl std::str::FromStr for TableShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(TableShape::Circle),
            "rectangle" => Ok(TableShape::Rectangle),
            other => Err(format!("unknown table shape: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub id: String,
    pub shape: TableShape,
    pub capacity: u32,
}

impl Table {
    /// Seat labels are derived from capacity, never stored: `seat-1..seat-N`.
    pub fn seat_labels(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.capacity).map(|n| format!("seat-{}", n))
    }

    /// True only for the canonical `seat-<n>` spelling; "seat-007" or
    /// "seat-+1" would otherwise create phantom keys no renderer reads.
    pub fn has_seat(&self, label: &str) -> bool {
        let Some(n) = label.strip_prefix("seat-") else {
            return false;
        };
        match n.parse::<u32>() {
            Ok(v) => n == v.to_string() && v >= 1 && v <= self.capacity,
            Err(_) => false,
        }
    }
}

/// `tableId -> (seat label -> guestId)`. A guest id appears in at most one
/// seat across the whole map; `state::SeatingState` enforces this.
pub type Assignments = HashMap<String, HashMap<String, String>>;

/// A named snapshot of tables + assignments. The guest roster is not part of
/// the snapshot; seat entries whose guest has since been removed are dropped
/// at render time, not treated as errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub name: String,
    pub tables: Vec<Table>,
    pub assignments: Assignments,
}

// --- Storage ---

/// Resolve the data directory (~/.banquet/), honoring the BANQUET_DATA_DIR
/// override used by tests and portable installs.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BANQUET_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".banquet")
}

/// Atomic write (temp file + rename) so a crash mid-write never leaves a
/// half-serialized key behind.
fn write_key(key: &str, data: &str) -> Result<(), String> {
    let dir = data_dir();
    fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    let tmp = dir.join(format!(".{}.tmp", key));
    let path = dir.join(format!("{}.json", key));
    fs::write(&tmp, data).map_err(|e| e.to_string())?;
    fs::rename(&tmp, &path).map_err(|e| e.to_string())
}

/// Read a key, treating a missing or malformed file as "no data".
fn read_key<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let path = data_dir().join(format!("{}.json", key));
    let raw = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            eprintln!("[banquet-core] malformed {}: {} (falling back to empty)", key, e);
            None
        }
    }
}

/// Read the guest roster. Missing or corrupt data yields an empty roster.
pub fn read_roster() -> Vec<Guest> {
    read_key("roster").unwrap_or_default()
}

pub fn write_roster(guests: &[Guest]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(guests).map_err(|e| e.to_string())?;
    write_key("roster", &json)
}

// --- Variants ---

fn variant_key(name: &str) -> String {
    format!("variant_{}", name)
}

/// List saved variant names in save order.
pub fn list_variants() -> Vec<String> {
    read_key("variant_names").unwrap_or_default()
}

pub fn read_variant(name: &str) -> Result<Variant, String> {
    let path = data_dir().join(format!("{}.json", variant_key(name)));
    let raw = fs::read_to_string(&path).map_err(|e| e.to_string())?;
    serde_json::from_str(&raw).map_err(|e| e.to_string())
}

/// Save a variant. An existing variant of the same name is replaced in place;
/// a new name is appended to the index.
pub fn write_variant(variant: &Variant) -> Result<(), String> {
    let json = serde_json::to_string_pretty(variant).map_err(|e| e.to_string())?;
    write_key(&variant_key(&variant.name), &json)?;
    let mut names = list_variants();
    if !names.iter().any(|n| n == &variant.name) {
        names.push(variant.name.clone());
        write_names(&names)?;
    }
    Ok(())
}

/// Delete a variant by name. Absent variants are not an error.
pub fn delete_variant(name: &str) -> Result<(), String> {
    let path = data_dir().join(format!("{}.json", variant_key(name)));
    if path.exists() {
        fs::remove_file(&path).map_err(|e| e.to_string())?;
    }
    let mut names = list_variants();
    names.retain(|n| n != name);
    write_names(&names)
}

fn write_names(names: &[String]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(names).map_err(|e| e.to_string())?;
    write_key("variant_names", &json)
}

// --- Suggestion settings ---

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuggestSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

pub fn read_settings() -> SuggestSettings {
    read_key("settings").unwrap_or_default()
}

pub fn write_settings(settings: &SuggestSettings) -> Result<(), String> {
    let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
    write_key("settings", &json)
}

pub fn suggest_configured(settings: &SuggestSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns BANQUET_DATA_DIR; the env var is process-wide, so all
    // storage assertions live here.
    #[test]
    fn storage_round_trips_roster_and_variants() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("BANQUET_DATA_DIR", dir.path());

        // missing files fall back to empty
        assert!(read_roster().is_empty());
        assert!(list_variants().is_empty());

        let roster = vec![Guest {
            id: "g1".to_string(),
            name: "Ada".to_string(),
            category: GuestCategory::CommonFriends,
            group: None,
        }];
        write_roster(&roster).unwrap();
        assert_eq!(read_roster(), roster);

        let mut variant = Variant {
            name: "plan-a".to_string(),
            tables: vec![Table {
                id: "table-1".to_string(),
                shape: TableShape::Circle,
                capacity: 8,
            }],
            assignments: HashMap::from([(
                "table-1".to_string(),
                HashMap::from([("seat-1".to_string(), "g1".to_string())]),
            )]),
        };
        write_variant(&variant).unwrap();
        assert_eq!(list_variants(), vec!["plan-a".to_string()]);
        assert_eq!(read_variant("plan-a").unwrap(), variant);

        // saving under the same name replaces, not appends
        variant.tables[0].capacity = 6;
        write_variant(&variant).unwrap();
        assert_eq!(list_variants(), vec!["plan-a".to_string()]);
        assert_eq!(read_variant("plan-a").unwrap().tables[0].capacity, 6);

        delete_variant("plan-a").unwrap();
        assert!(list_variants().is_empty());
        assert!(read_variant("plan-a").is_err());
        // deleting again is still fine
        delete_variant("plan-a").unwrap();

        // corrupt roster degrades to empty, not an error
        fs::write(dir.path().join("roster.json"), "{ not json").unwrap();
        assert!(read_roster().is_empty());

        std::env::remove_var("BANQUET_DATA_DIR");
    }

    #[test]
    fn seat_labels_derive_from_capacity() {
        let table = Table {
            id: "table-1".to_string(),
            shape: TableShape::Rectangle,
            capacity: 4,
        };
        let labels: Vec<String> = table.seat_labels().collect();
        assert_eq!(labels, vec!["seat-1", "seat-2", "seat-3", "seat-4"]);
        assert!(table.has_seat("seat-4"));
        assert!(!table.has_seat("seat-5"));
        assert!(!table.has_seat("seat-0"));
        assert!(!table.has_seat("bench-1"));
        // only the canonical spelling counts
        assert!(!table.has_seat("seat-004"));
        assert!(!table.has_seat("seat-+4"));
        assert!(!table.has_seat("seat- 4"));
    }

    #[test]
    fn category_wire_names_round_trip() {
        for category in GuestCategory::ALL {
            let wire = serde_json::to_string(&category).unwrap();
            assert_eq!(wire, format!("\"{}\"", category.as_str()));
            let parsed: GuestCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("guest-of-honor".parse::<GuestCategory>().is_err());
    }
}
