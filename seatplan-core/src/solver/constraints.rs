//! Decision variables and constraint builders.
//!
//! Two boolean variable layers share the model:
//!
//! - `x[g][t][s]`: guest `g` sits at table `t` in seat `s`;
//! - `y[g][t]`: guest `g` sits at table `t` in any seat.
//!
//! The `y` layer decouples "which table" from "which seat within it", which
//! keeps group cohesion and affinity co-location linear instead of quadratic
//! in seats. Seat adjacency is circular everywhere: seat `s` neighbors
//! `(s - 1) mod cap` and `(s + 1) mod cap`.

use good_lp::{constraint, Constraint, Expression, ProblemVariables, Variable, VariableDefinition};

use super::mapping::ProblemMapping;
use super::SolveError;

/// The shared boolean variable families of one seating model.
pub(crate) struct SeatingVars {
    /// `x[guest][table][seat]`
    pub x: Vec<Vec<Vec<Variable>>>,
    /// `y[guest][table]`
    pub y: Vec<Vec<Variable>>,
}

impl SeatingVars {
    /// Declares one `x` variable per (guest, table, seat) and one `y` per
    /// (guest, table).
    pub fn declare(vars: &mut ProblemVariables, mapping: &ProblemMapping) -> Self {
        let mut x = Vec::with_capacity(mapping.num_guests());
        let mut y = Vec::with_capacity(mapping.num_guests());
        for g in 0..mapping.num_guests() {
            let mut x_row = Vec::with_capacity(mapping.num_tables());
            let mut y_row = Vec::with_capacity(mapping.num_tables());
            for table in &mapping.tables {
                let t = table.index;
                y_row.push(vars.add(
                    VariableDefinition::new()
                        .binary()
                        .name(format!("y_{g}_{t}")),
                ));
                let seats = (0..table.capacity)
                    .map(|s| {
                        vars.add(
                            VariableDefinition::new()
                                .binary()
                                .name(format!("x_{g}_{t}_{s}")),
                        )
                    })
                    .collect();
                x_row.push(seats);
            }
            x.push(x_row);
            y.push(y_row);
        }
        SeatingVars { x, y }
    }
}

/// C1 and C2: every guest occupies exactly one seat, and every seat hosts at
/// most one guest.
pub(crate) fn add_assignment_constraints(
    cons: &mut Vec<Constraint>,
    seating: &SeatingVars,
    mapping: &ProblemMapping,
) {
    for g in 0..mapping.num_guests() {
        let mut seats_of_guest = Expression::default();
        for table in &mapping.tables {
            for s in 0..table.capacity as usize {
                seats_of_guest += seating.x[g][table.index][s];
            }
        }
        cons.push(constraint!(seats_of_guest == 1));
    }

    for table in &mapping.tables {
        for s in 0..table.capacity as usize {
            let mut guests_at_seat = Expression::default();
            for g in 0..mapping.num_guests() {
                guests_at_seat += seating.x[g][table.index][s];
            }
            cons.push(constraint!(guests_at_seat <= 1));
        }
    }
}

/// C3: `y[g][t]` equals the boolean OR over that table's seat variables.
///
/// Linearized as `y ≥ x[s]` for every seat plus `y ≤ Σ x[s]`; together with
/// C1 this pins `y` to exactly the occupied table.
pub(crate) fn add_table_link_constraints(
    cons: &mut Vec<Constraint>,
    seating: &SeatingVars,
    mapping: &ProblemMapping,
) {
    for g in 0..mapping.num_guests() {
        for table in &mapping.tables {
            let t = table.index;
            let mut any_seat = Expression::default();
            for s in 0..table.capacity as usize {
                cons.push(constraint!(seating.y[g][t] - seating.x[g][t][s] >= 0));
                any_seat += seating.x[g][t][s];
            }
            cons.push(constraint!(seating.y[g][t] - any_seat <= 0));
        }
    }
}

/// C4: all members of a group share a table with the group representative,
/// without naming which table.
pub(crate) fn add_group_cohesion_constraints(
    cons: &mut Vec<Constraint>,
    seating: &SeatingVars,
    mapping: &ProblemMapping,
) {
    for group in &mapping.groups {
        if group.guest_indices.len() < 2 {
            continue;
        }
        let rep = group.representative();
        for &member in &group.guest_indices[1..] {
            for t in 0..mapping.num_tables() {
                cons.push(constraint!(seating.y[member][t] - seating.y[rep][t] == 0));
            }
        }
    }
}

/// C5′: partners occupy neighboring seats.
///
/// For every table and seat: if `a` sits at `(t, s)`, then `b` sits at
/// `(t, s − 1)` or `(t, s + 1)` (mod capacity), and symmetrically. Sharing a
/// table is implied.
pub(crate) fn add_partner_adjacency_constraints(
    cons: &mut Vec<Constraint>,
    seating: &SeatingVars,
    mapping: &ProblemMapping,
) {
    for &(a, b) in &mapping.partner_pairs {
        for table in &mapping.tables {
            let t = table.index;
            let cap = table.capacity as usize;
            for s in 0..cap {
                let left = (s + cap - 1) % cap;
                let right = (s + 1) % cap;
                cons.push(constraint!(
                    seating.x[b][t][left] + seating.x[b][t][right] - seating.x[a][t][s] >= 0
                ));
                cons.push(constraint!(
                    seating.x[a][t][left] + seating.x[a][t][right] - seating.x[b][t][s] >= 0
                ));
            }
        }
    }
}

/// C5: an adjacent group occupies one contiguous circular block of seats.
///
/// One block indicator `b[t][s]` exists per candidate start seat on every
/// table large enough for the group; exactly one indicator is chosen. A
/// chosen block forces every member into some block seat and every block
/// seat to host some member. Cohesion (C4) is posted independently and is
/// not assumed here.
pub(crate) fn add_adjacent_block_constraints(
    vars: &mut ProblemVariables,
    cons: &mut Vec<Constraint>,
    seating: &SeatingVars,
    mapping: &ProblemMapping,
) -> Result<(), SolveError> {
    for group in &mapping.groups {
        let n = group.guest_indices.len();
        if !group.adjacent || n < 2 {
            continue;
        }

        let mut block_choice = Expression::default();
        let mut any_candidate = false;
        for table in &mapping.tables {
            let t = table.index;
            let cap = table.capacity as usize;
            if cap < n {
                continue;
            }
            // Circular blocks: every seat is a valid start.
            for start in 0..cap {
                let block = vars.add(
                    VariableDefinition::new()
                        .binary()
                        .name(format!("block_{}_{t}_{start}", group.index)),
                );
                any_candidate = true;
                block_choice += block;

                for &member in &group.guest_indices {
                    let mut member_in_block = Expression::default();
                    for k in 0..n {
                        member_in_block += seating.x[member][t][(start + k) % cap];
                    }
                    cons.push(constraint!(member_in_block - block >= 0));
                }
                for k in 0..n {
                    let seat = (start + k) % cap;
                    let mut seat_taken_by_member = Expression::default();
                    for &member in &group.guest_indices {
                        seat_taken_by_member += seating.x[member][t][seat];
                    }
                    cons.push(constraint!(seat_taken_by_member - block >= 0));
                }
            }
        }

        if !any_candidate {
            // Unreachable: validation rejects groups larger than every table.
            return Err(SolveError::ModelBuild {
                message: format!(
                    "no table can host the {n}-seat block of group '{}'",
                    group.id
                ),
            });
        }
        cons.push(constraint!(block_choice == 1));
    }
    Ok(())
}
