//! Seating model construction and solve orchestration.
//!
//! The solver converts the string-keyed request into dense integer indices
//! (`mapping`), declares the boolean decision variables and posts the
//! constraints (`constraints`), installs the affinity objective
//! (`objective`), drives the CBC backend once, and reads the assignment back
//! out (`extract`).

mod constraints;
mod extract;
mod mapping;
mod objective;

pub use mapping::{create_mapping, GroupInfo, GuestInfo, ProblemMapping, TableInfo};

use std::time::Instant;

use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{ProblemVariables, ResolutionError, Solution, SolverModel};
use serde::Serialize;
use thiserror::Error;

use crate::models::{OptimizeRequest, OptimizeResponse, SolverStats, SolverStatus};
use constraints::SeatingVars;

/// Errors raised while validating a request or building the model.
///
/// Every variant except [`SolveError::ModelBuild`] describes invalid input
/// and carries the offending identifier. `ModelBuild` is a programmer error:
/// an encoding invariant was violated after validation passed.
///
/// Infeasibility and exhausted time budgets are *not* errors; they are
/// reported as [`crate::models::SolverStatus`] values in the response.
#[derive(Error, Debug, Serialize)]
pub enum SolveError {
    /// Two tables, guests, or groups share an id.
    #[error("duplicate {entity} id '{id}'")]
    DuplicateId { entity: &'static str, id: String },

    /// A group, partner declaration, or affinity referenced an unknown guest.
    #[error("guest '{id}' not found in {context}")]
    GuestNotFound { id: String, context: String },

    /// An affinity edge referenced an unknown group.
    #[error("group '{id}' not found in {context}")]
    GroupNotFound { id: String, context: String },

    /// A group has more members than the largest table has seats.
    #[error("group '{id}' has {size} members but the largest table seats {max_capacity}")]
    GroupTooLarge {
        id: String,
        size: usize,
        max_capacity: u32,
    },

    /// The same guest appears twice inside one group.
    #[error("guest '{guest_id}' listed more than once in group '{group_id}'")]
    DuplicateGroupMember { group_id: String, guest_id: String },

    /// A guest belongs to two different groups.
    #[error("guest '{guest_id}' belongs to more than one group")]
    GuestInMultipleGroups { guest_id: String },

    /// A group was declared with no members.
    #[error("group '{group_id}' has no members")]
    EmptyGroup { group_id: String },

    /// A guest declared themselves as their own partner.
    #[error("guest '{guest_id}' cannot be their own partner")]
    SelfPartner { guest_id: String },

    /// One guest names a partner who does not name them back.
    #[error("asymmetric partners: '{a}' names '{b}' but '{b}' does not name '{a}'")]
    AsymmetricPartner { a: String, b: String },

    /// An affinity edge connects a group to itself.
    #[error("affinity edge connects group '{group_id}' to itself")]
    SelfAffinity { group_id: String },

    /// An affinity score outside {−1, 0, +1}.
    #[error("affinity score {score} for ('{a}', '{b}') must be -1, 0, or 1")]
    InvalidAffinityScore { a: String, b: String, score: i8 },

    /// A table capacity below the minimum of 2.
    #[error("table '{table_id}' capacity {capacity} is below the minimum of 2")]
    InvalidCapacity { table_id: String, capacity: u32 },

    /// A solve option outside its valid range.
    #[error("invalid option: {message}")]
    InvalidOption { message: String },

    /// Aggregate capacity cannot host the guest list.
    #[error("{message}")]
    Capacity { message: String },

    /// An internal encoding invariant was violated; not a user error.
    #[error("model build failed: {message}")]
    ModelBuild { message: String },
}

impl SolveError {
    /// True for errors caused by the request (HTTP 422 territory); false for
    /// internal defects (HTTP 500 territory).
    pub fn is_validation(&self) -> bool {
        !matches!(self, SolveError::ModelBuild { .. })
    }
}

/// Validates, builds, solves, and extracts a single seating instance.
///
/// The model is constructed fresh on every call and dropped on return; the
/// only blocking point is the backend invocation itself, bounded by
/// `options.time_limit_seconds`. A caller-side cancellation (e.g. a dropped
/// HTTP request) is not transmitted into the backend.
pub fn solve_seating(request: &OptimizeRequest) -> Result<OptimizeResponse, SolveError> {
    let mapping = create_mapping(request)?;

    let mut vars = ProblemVariables::new();
    let seating = SeatingVars::declare(&mut vars, &mapping);

    let mut cons = Vec::new();
    constraints::add_assignment_constraints(&mut cons, &seating, &mapping);
    constraints::add_table_link_constraints(&mut cons, &seating, &mapping);
    constraints::add_group_cohesion_constraints(&mut cons, &seating, &mapping);
    constraints::add_partner_adjacency_constraints(&mut cons, &seating, &mapping);
    constraints::add_adjacent_block_constraints(&mut vars, &mut cons, &seating, &mapping)?;

    let objective =
        objective::build_objective(&mut vars, &mut cons, &seating, &mapping, &request.affinities)?;

    let mut problem = vars.maximise(objective.clone()).using(coin_cbc);
    problem.set_parameter("logLevel", "0");
    problem.set_parameter(
        "seconds",
        &format!("{}", request.options.time_limit_seconds),
    );
    problem.set_parameter("threads", &format!("{}", request.options.num_workers));
    for constraint in cons {
        problem = problem.with(constraint);
    }

    {
        let model = problem.as_inner();
        log::debug!(
            "seating model built: {} columns, {} rows",
            model.num_cols(),
            model.num_rows()
        );
    }

    let started = Instant::now();
    let outcome = problem.solve();
    let wall_time_seconds = started.elapsed().as_secs_f64();

    match outcome {
        Ok(solution) => {
            let cbc = solution.model();
            let status = if cbc.is_proven_optimal() {
                SolverStatus::Optimal
            } else {
                SolverStatus::Feasible
            };
            let stats = SolverStats {
                conflicts: cbc.iteration_count() as i64,
                branches: cbc.node_count() as i64,
                wall_time_seconds,
            };
            let objective_value = solution.eval(objective.clone()).round() as i64;
            log::info!(
                "solve finished: {:?}, objective {}, {:.3}s",
                status,
                objective_value,
                wall_time_seconds
            );
            Ok(extract::extract_solution(
                &solution,
                status,
                objective_value,
                stats,
                &seating,
                &mapping,
            ))
        }
        Err(err) => {
            let status = match &err {
                ResolutionError::Infeasible => SolverStatus::Infeasible,
                // The objective is a bounded sum of indicators, so an
                // unbounded model means the encoding itself is broken.
                ResolutionError::Unbounded => SolverStatus::ModelInvalid,
                _ => SolverStatus::Unknown,
            };
            log::info!(
                "solve finished without a solution: {:?} ({err}), {:.3}s",
                status,
                wall_time_seconds
            );
            Ok(OptimizeResponse {
                status,
                objective_value: None,
                tables: Vec::new(),
                solver_stats: SolverStats {
                    conflicts: 0,
                    branches: 0,
                    wall_time_seconds,
                },
            })
        }
    }
}
