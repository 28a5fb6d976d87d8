//! Reads the solved assignment back into the response DTO.

use good_lp::Solution;

use crate::models::{
    OptimizeResponse, SeatAssignment, SolverStats, SolverStatus, TableAssignment,
};

use super::constraints::SeatingVars;
use super::mapping::ProblemMapping;

/// Renders the solved `x` layer as seat-indexed table assignments.
///
/// Binary variables come back as floats, so occupancy is read with a 0.5
/// threshold. Each seat holds at most one guest by construction (C2); the
/// scan stops at the first occupant.
pub(crate) fn extract_solution<S: Solution>(
    solution: &S,
    status: SolverStatus,
    objective_value: i64,
    stats: SolverStats,
    seating: &SeatingVars,
    mapping: &ProblemMapping,
) -> OptimizeResponse {
    let mut tables = Vec::with_capacity(mapping.num_tables());
    for table in &mapping.tables {
        let t = table.index;
        let mut seats = Vec::with_capacity(table.capacity as usize);
        for s in 0..table.capacity as usize {
            let occupant = (0..mapping.num_guests())
                .find(|&g| solution.value(seating.x[g][t][s]) >= 0.5);
            let seat = match occupant {
                Some(g) => {
                    let guest = &mapping.guests[g];
                    SeatAssignment {
                        seat_index: s as u32,
                        guest_id: Some(guest.id.clone()),
                        guest_name: Some(guest.name.clone()),
                    }
                }
                None => SeatAssignment {
                    seat_index: s as u32,
                    guest_id: None,
                    guest_name: None,
                },
            };
            seats.push(seat);
        }
        tables.push(TableAssignment {
            table_id: table.id.clone(),
            seats,
        });
    }

    OptimizeResponse {
        status,
        objective_value: Some(objective_value),
        tables,
        solver_stats: stats,
    }
}
