//! Data models and types for the seatplan-core API.
//!
//! This module contains the public data structures used to describe a seating
//! problem, configure the solve, and receive results. Everything is designed
//! to round-trip through JSON for easy integration with the HTTP service.
//!
//! Deserialization is strict: unknown fields are rejected, and numeric fields
//! do not coerce: `"capacity": 6.0` and `"capacity": "6"` are both invalid
//! where an integer is required.

use serde::{Deserialize, Serialize};

/// A circular table with a fixed number of seats.
///
/// Seats are numbered `0..capacity` and arranged in a cycle: the neighbors of
/// seat `s` are `(s - 1) mod capacity` and `(s + 1) mod capacity`. There is
/// no "first" seat in any structural sense.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct TableIn {
    /// Unique identifier for this table (must be unique across all tables)
    pub id: String,
    /// Number of seats; must be at least 2
    pub capacity: u32,
    /// Optional display label (e.g. "Head table")
    #[serde(default)]
    pub label: Option<String>,
}

/// A guest to be seated.
///
/// Declaring a `partner_id` requests seat adjacency: both guests must name
/// each other (the relationship is validated to be symmetric), and the solver
/// places them in neighboring seats at the same table.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct GuestIn {
    /// Unique identifier for this guest (must be unique across all guests)
    pub id: String,
    /// Display name, echoed back in the response
    pub name: String,
    /// Optional id of this guest's partner; partners sit in adjacent seats
    #[serde(default)]
    pub partner_id: Option<String>,
}

/// A set of guests bound to the same table.
///
/// Every member of a group is seated at one table; which table is left to
/// the solver. Groups of size 1 are allowed and act as individual
/// participants in the affinity graph. A guest may belong to at most one
/// group.
///
/// Setting `adjacent` additionally forces the group onto a contiguous block
/// of seats (wrap-around counts as contiguous).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct GroupIn {
    /// Unique identifier for this group (must be unique across all groups)
    pub id: String,
    /// Non-empty list of member guest ids
    pub guest_ids: Vec<String>,
    /// When true, members occupy consecutive seats at their table
    #[serde(default)]
    pub adjacent: bool,
}

/// A signed seating preference between two groups.
///
/// `score` must be −1, 0, or +1:
/// - `+1` rewards placing the two groups at the same table,
/// - `−1` rewards separating them,
/// - `0` is admitted but contributes nothing.
///
/// Edges are unordered and sparse; duplicate edges for the same pair sum.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct AffinityEdgeIn {
    /// First group id
    pub a: String,
    /// Second group id (must differ from `a`)
    pub b: String,
    /// Preference: −1, 0, or +1
    pub score: i8,
}

/// Knobs for a single solve call.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SolveOptions {
    /// Wall-clock budget in seconds; the best incumbent found within the
    /// budget is returned
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: f64,
    /// Number of parallel search workers inside the solver
    #[serde(default = "default_num_workers")]
    pub num_workers: u32,
    /// When false, the guest count must exactly equal the total seat count
    #[serde(default = "default_allow_empty_seats")]
    pub allow_empty_seats: bool,
}

fn default_time_limit_seconds() -> f64 {
    5.0
}

fn default_num_workers() -> u32 {
    1
}

fn default_allow_empty_seats() -> bool {
    true
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            time_limit_seconds: default_time_limit_seconds(),
            num_workers: default_num_workers(),
            allow_empty_seats: default_allow_empty_seats(),
        }
    }
}

/// Complete input for one optimization call.
///
/// # Example
///
/// ```no_run
/// use seatplan_core::models::*;
///
/// let request = OptimizeRequest {
///     tables: vec![TableIn { id: "t1".to_string(), capacity: 4, label: None }],
///     guests: vec![GuestIn { id: "alice".to_string(), name: "Alice".to_string(), partner_id: None }],
///     groups: vec![],
///     affinities: vec![],
///     options: SolveOptions::default(),
/// };
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct OptimizeRequest {
    /// All tables with their capacities
    pub tables: Vec<TableIn>,
    /// All guests to be seated
    pub guests: Vec<GuestIn>,
    /// Same-table groups (defaults to none)
    #[serde(default)]
    pub groups: Vec<GroupIn>,
    /// Sparse affinity edges between groups (defaults to none)
    #[serde(default)]
    pub affinities: Vec<AffinityEdgeIn>,
    /// Solve options (defaults apply field-wise)
    #[serde(default)]
    pub options: SolveOptions,
}

/// Terminal solver status.
///
/// Only `Optimal` and `Feasible` carry an objective value and populated
/// tables. `Infeasible` means the constraints admit no assignment; `Unknown`
/// means the time budget expired before any assignment was found;
/// `ModelInvalid` indicates an internal encoding defect.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
    ModelInvalid,
}

/// One seat of a solved table: the seat index plus the guest occupying it,
/// or `None`/`None` for an empty seat.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SeatAssignment {
    /// Position around the table, `0..capacity`
    pub seat_index: u32,
    /// Id of the seated guest, if any
    pub guest_id: Option<String>,
    /// Display name of the seated guest, if any
    pub guest_name: Option<String>,
}

/// A solved table: exactly `capacity` seats, in seat-index order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TableAssignment {
    /// Id of the table from the request
    pub table_id: String,
    /// One entry per seat, `seats[k].seat_index == k`
    pub seats: Vec<SeatAssignment>,
}

/// Backend search statistics for one solve call.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SolverStats {
    /// Simplex iterations performed by the backend
    pub conflicts: i64,
    /// Branch-and-bound nodes explored
    pub branches: i64,
    /// Wall-clock time spent inside the solver
    pub wall_time_seconds: f64,
}

/// The result of one optimization call.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OptimizeResponse {
    /// Terminal solver status
    pub status: SolverStatus,
    /// Total achieved affinity; present only for `Optimal`/`Feasible`
    pub objective_value: Option<i64>,
    /// Seat-by-seat assignment per table; empty unless a solution exists
    pub tables: Vec<TableAssignment>,
    /// Backend statistics, populated for every status
    pub solver_stats: SolverStats,
}

impl OptimizeResponse {
    /// Formats the seating plan as a human-readable string, one table per
    /// block, one seat per line.
    ///
    /// # Example Output
    ///
    /// ```text
    /// ========== t1 ==========
    /// seat 0: Alice
    /// seat 1: Bob
    /// seat 2: (empty)
    /// ```
    pub fn display(&self) -> String {
        let mut output = String::new();
        for table in &self.tables {
            output.push_str(&format!("========== {} ==========\n", table.table_id));
            for seat in &table.seats {
                let name = seat.guest_name.as_deref().unwrap_or("(empty)");
                output.push_str(&format!("seat {}: {}\n", seat.seat_index, name));
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_when_omitted() {
        let request: OptimizeRequest = serde_json::from_str(
            r#"{
                "tables": [{"id": "t1", "capacity": 4}],
                "guests": [{"id": "g1", "name": "Alice"}]
            }"#,
        )
        .unwrap();

        assert_eq!(request.options.time_limit_seconds, 5.0);
        assert_eq!(request.options.num_workers, 1);
        assert!(request.options.allow_empty_seats);
        assert!(request.groups.is_empty());
        assert!(request.affinities.is_empty());
    }

    #[test]
    fn capacity_rejects_float() {
        let result: Result<TableIn, _> =
            serde_json::from_str(r#"{"id": "t1", "capacity": 6.0}"#);
        assert!(result.is_err(), "float capacity must not coerce to integer");
    }

    #[test]
    fn capacity_rejects_string() {
        let result: Result<TableIn, _> =
            serde_json::from_str(r#"{"id": "t1", "capacity": "6"}"#);
        assert!(result.is_err(), "string capacity must not coerce to integer");
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<GuestIn, _> =
            serde_json::from_str(r#"{"id": "g1", "name": "Alice", "table": "t1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&SolverStatus::ModelInvalid).unwrap(),
            "\"MODEL_INVALID\""
        );
        assert_eq!(
            serde_json::to_string(&SolverStatus::Optimal).unwrap(),
            "\"OPTIMAL\""
        );
    }
}
