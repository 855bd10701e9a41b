use std::collections::HashMap;

use crate::{Assignments, Guest, GuestCategory, Table, TableShape, Variant};

/// Proposal shape returned by the suggestion service: new tables plus
/// per-table guest lists. Array index maps to seat label (0 -> seat-1).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct SeatingProposal {
    pub tables: Vec<Table>,
    pub assignments: HashMap<String, Vec<String>>,
}

/// The live seating chart: guest roster, table roster, and the guest-to-seat
/// assignment map. All transitions preserve the at-most-one-seat invariant;
/// invalid inputs are dropped silently rather than surfaced as errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatingState {
    pub guests: Vec<Guest>,
    pub tables: Vec<Table>,
    pub assignments: Assignments,
    pub active_variant: Option<String>,
}

impl SeatingState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Guests ---

    /// Ad-hoc guest add. Blank names are a no-op.
    pub fn add_guest(&mut self, name: &str, category: GuestCategory) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.guests.push(Guest {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            category,
            group: None,
        });
    }

    /// Import guests from pasted text: one entry per line, names joined by
    /// semicolons on a single line form a party that gets a shared group tag.
    /// Ids are deterministic (`<category>_<normalized name>`); an id already
    /// on the roster is skipped.
    pub fn import_guests(&mut self, category: GuestCategory, text: &str) {
        let mut group_counter = self
            .guests
            .iter()
            .filter_map(|g| {
                g.group
                    .as_deref()
                    .and_then(|gr| gr.strip_prefix("group_"))
                    .and_then(|n| n.parse::<u64>().ok())
            })
            .max()
            .unwrap_or(0);

        for line in text.split('\n') {
            let names: Vec<&str> = line
                .split(';')
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect();
            if names.is_empty() {
                continue;
            }
            let group = if names.len() > 1 {
                group_counter += 1;
                Some(format!("group_{}", group_counter))
            } else {
                None
            };
            for name in names {
                let id = import_id(category, name);
                if self.guests.iter().any(|g| g.id == id) {
                    continue;
                }
                self.guests.push(Guest {
                    id,
                    name: name.to_string(),
                    category,
                    group: group.clone(),
                });
            }
        }
    }

    /// Rename a guest in place. The only mutation a guest supports.
    pub fn rename_guest(&mut self, id: &str, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if let Some(guest) = self.guests.iter_mut().find(|g| g.id == id) {
            guest.name = name.to_string();
        }
    }

    /// Remove a guest and every seat entry referencing them. Scan-and-delete
    /// across all tables; fine at this scale.
    pub fn remove_guest(&mut self, id: &str) {
        self.guests.retain(|g| g.id != id);
        for seats in self.assignments.values_mut() {
            seats.retain(|_, gid| gid != id);
        }
    }

    // --- Tables ---

    /// Add a table. Rectangle capacity is normalized to an even number >= 2
    /// (seats split across two long sides); a circle below one seat is dropped.
    pub fn add_table(&mut self, shape: TableShape, capacity: u32) {
        let capacity = match shape {
            // round up to even; cap the half so doubling cannot overflow
            TableShape::Rectangle => (capacity.div_ceil(2).min(u32::MAX / 2) * 2).max(2),
            TableShape::Circle => {
                if capacity < 1 {
                    return;
                }
                capacity
            }
        };
        let id = self.next_table_id();
        self.tables.push(Table { id, shape, capacity });
    }

    /// Remove a table and its assignment sub-map. Absent id is a no-op.
    pub fn remove_table(&mut self, id: &str) {
        self.tables.retain(|t| t.id != id);
        self.assignments.remove(id);
    }

    /// Bulk generation sized to a head count: rectangles of 20 while at least
    /// 16 guests remain, circles of 8 while at least 6 remain, then one small
    /// circle for the rest. Replaces the current table roster.
    pub fn generate_tables(&mut self, guest_count: u32) {
        self.tables.clear();
        self.assignments.clear();
        let mut remaining = guest_count;
        while remaining > 0 {
            if remaining >= 16 {
                self.add_table(TableShape::Rectangle, 20);
                remaining = remaining.saturating_sub(20);
            } else if remaining >= 6 {
                self.add_table(TableShape::Circle, 8);
                remaining = remaining.saturating_sub(8);
            } else {
                self.add_table(TableShape::Circle, remaining);
                remaining = 0;
            }
        }
    }

    /// Generate the next table ID by scanning existing tables.
    fn next_table_id(&self) -> String {
        let max = self
            .tables
            .iter()
            .filter_map(|t| t.id.strip_prefix("table-").and_then(|s| s.parse::<u64>().ok()))
            .max()
            .unwrap_or(0);
        format!("table-{}", max + 1)
    }

    // --- Assignments ---

    /// Seat a guest. Unknown table or seat label drops the call. Any seat the
    /// guest already holds is cleared first (at-most-one-seat); whoever held
    /// the target seat is bumped to unassigned, not swapped.
    pub fn assign(&mut self, table_id: &str, guest_id: &str, seat: &str) {
        let Some(table) = self.tables.iter().find(|t| t.id == table_id) else {
            return;
        };
        if !table.has_seat(seat) {
            return;
        }
        for seats in self.assignments.values_mut() {
            seats.retain(|_, gid| gid != guest_id);
        }
        self.assignments
            .entry(table_id.to_string())
            .or_default()
            .insert(seat.to_string(), guest_id.to_string());
    }

    /// Clear one exact seat if occupied.
    pub fn unassign(&mut self, table_id: &str, seat: &str) {
        if let Some(seats) = self.assignments.get_mut(table_id) {
            seats.remove(seat);
        }
    }

    /// Guests not referenced by any seat, in roster order.
    pub fn unassigned_guests(&self) -> Vec<&Guest> {
        self.guests
            .iter()
            .filter(|g| !self.is_seated(&g.id))
            .collect()
    }

    fn is_seated(&self, guest_id: &str) -> bool {
        self.assignments
            .values()
            .any(|seats| seats.values().any(|gid| gid == guest_id))
    }

    /// Seat -> guest view of one table, for rendering. Seat entries whose
    /// guest id no longer resolves (e.g. a guest removed after the variant
    /// was saved) are dropped silently.
    pub fn seated_guests(&self, table_id: &str) -> HashMap<String, &Guest> {
        let Some(seats) = self.assignments.get(table_id) else {
            return HashMap::new();
        };
        seats
            .iter()
            .filter_map(|(seat, gid)| {
                let guest = self.guests.iter().find(|g| &g.id == gid)?;
                Some((seat.clone(), guest))
            })
            .collect()
    }

    // --- Variants ---

    /// Snapshot the current layout under a name. Tables and assignments only;
    /// the roster lives outside the snapshot.
    pub fn snapshot(&self, name: &str) -> Variant {
        Variant {
            name: name.to_string(),
            tables: self.tables.clone(),
            assignments: self.assignments.clone(),
        }
    }

    /// Replace the live layout with a saved one.
    pub fn restore(&mut self, variant: &Variant) {
        self.tables = variant.tables.clone();
        self.assignments = variant.assignments.clone();
        self.active_variant = Some(variant.name.clone());
    }

    /// Empty-selection sentinel: clear tables and assignments.
    pub fn clear_layout(&mut self) {
        self.tables.clear();
        self.assignments.clear();
        self.active_variant = None;
    }

    // --- Suggestions ---

    /// Apply a suggestion wholesale: the proposed tables and assignments
    /// replace the live ones (they were built from the unassigned guests, so
    /// previously seated guests are dropped with the old layout). Entries for
    /// unknown tables or beyond a table's capacity are discarded, and a guest
    /// id keeps only its first seat in proposal table order — the
    /// at-most-one-seat invariant holds no matter what the service sent.
    pub fn apply_proposal(&mut self, proposal: &SeatingProposal) {
        let mut assignments = Assignments::new();
        let mut seated: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for table in &proposal.tables {
            let Some(guest_ids) = proposal.assignments.get(&table.id) else {
                continue;
            };
            let mut seats = HashMap::new();
            for (i, gid) in guest_ids.iter().take(table.capacity as usize).enumerate() {
                if !seated.insert(gid.as_str()) {
                    continue;
                }
                seats.insert(format!("seat-{}", i + 1), gid.clone());
            }
            if !seats.is_empty() {
                assignments.insert(table.id.clone(), seats);
            }
        }
        self.tables = proposal.tables.clone();
        self.assignments = assignments;
    }

    /// Land the outcome of a suggestion request: a proposal replaces the
    /// layout, a failure is handed back with the chart exactly as it was.
    pub fn apply_outcome(&mut self, outcome: Result<SeatingProposal, String>) -> Result<(), String> {
        let proposal = outcome?;
        self.apply_proposal(&proposal);
        Ok(())
    }
}

/// Deterministic id for imported guests: category prefix plus the lowercased
/// name with whitespace collapsed to underscores.
pub fn import_id(category: GuestCategory, name: &str) -> String {
    let normalized: String = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}", category.as_str(), normalized)
}
