//! # Seatplan-Core: Wedding Seating Optimization Engine
//!
//! This crate turns a seating problem (circular tables with fixed capacities,
//! guests, groups that must share a table, and signed pairwise affinities
//! between groups) into a 0/1 integer program, hands it to the CBC solver,
//! and reads the result back as a seat-by-seat plan.
//!
//! The pipeline is linear and synchronous: validate and index the input,
//! declare the decision variables, post the constraints, install the affinity
//! objective, solve once under a wall-clock budget, extract. No state is
//! shared between calls.
//!
//! ## Quick Example
//!
//! ```no_run
//! use seatplan_core::{solve, models::*};
//!
//! let request = OptimizeRequest {
//!     tables: vec![
//!         TableIn { id: "t1".to_string(), capacity: 2, label: None },
//!         TableIn { id: "t2".to_string(), capacity: 2, label: None },
//!     ],
//!     guests: vec![
//!         GuestIn { id: "alice".to_string(), name: "Alice".to_string(), partner_id: None },
//!         GuestIn { id: "bob".to_string(), name: "Bob".to_string(), partner_id: None },
//!     ],
//!     groups: vec![
//!         GroupIn { id: "g_alice".to_string(), guest_ids: vec!["alice".to_string()], adjacent: false },
//!         GroupIn { id: "g_bob".to_string(), guest_ids: vec!["bob".to_string()], adjacent: false },
//!     ],
//!     affinities: vec![
//!         AffinityEdgeIn { a: "g_alice".to_string(), b: "g_bob".to_string(), score: 1 },
//!     ],
//!     options: SolveOptions::default(),
//! };
//!
//! match solve(&request) {
//!     Ok(response) => println!("{:?}:\n{}", response.status, response.display()),
//!     Err(e) => eprintln!("invalid request: {e}"),
//! }
//! ```

pub mod models;
pub mod solver;

pub use solver::SolveError;

use crate::models::{OptimizeRequest, OptimizeResponse};

/// Solves a seating optimization request.
///
/// This is the main entry point of the library. The request is validated
/// first; no solver work happens unless validation passes. The returned
/// response carries the terminal solver status; infeasibility and exhausted
/// time budgets are *statuses*, not errors.
///
/// # Errors
///
/// Returns a [`SolveError`] when the request itself is invalid:
/// duplicate ids, references to unknown guests or groups, groups larger than
/// any table, asymmetric partner declarations, or capacity that cannot host
/// every guest. [`SolveError::ModelBuild`] indicates an internal encoding
/// bug rather than bad input.
pub fn solve(request: &OptimizeRequest) -> Result<OptimizeResponse, SolveError> {
    solver::solve_seating(request)
}
