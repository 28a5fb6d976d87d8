//! Affinity objective construction.
//!
//! Each affinity edge with a nonzero score contributes a co-location
//! indicator `c` that is 1 exactly when the two groups share a table. The
//! objective maximizes `Σ score · c`; negative scores therefore reward
//! separation. Co-location variables are memoized per canonical unordered
//! pair, and duplicate edges sum into a single coefficient.

use std::collections::BTreeMap;

use good_lp::{constraint, Constraint, Expression, ProblemVariables, VariableDefinition};

use crate::models::AffinityEdgeIn;

use super::constraints::SeatingVars;
use super::mapping::ProblemMapping;
use super::SolveError;

/// Builds the linear maximization objective over co-location indicators.
///
/// For a pair of groups with representatives `ra` and `rb`, one auxiliary
/// `same_t = y[ra][t] ∧ y[rb][t]` is introduced per table, and
/// `c = max_t same_t`. The conjunction and the max are linearized as
///
/// ```text
/// same_t ≤ y[ra][t]      same_t ≤ y[rb][t]      same_t ≥ y[ra][t] + y[rb][t] − 1
/// c ≥ same_t (∀t)        c ≤ Σ_t same_t
/// ```
///
/// Using the representative is valid because cohesion forces every member of
/// a group onto the representative's table.
///
/// With no scored edge, the objective is the constant 0 and the solver
/// simply returns a feasible assignment.
pub(crate) fn build_objective(
    vars: &mut ProblemVariables,
    cons: &mut Vec<Constraint>,
    seating: &SeatingVars,
    mapping: &ProblemMapping,
    affinities: &[AffinityEdgeIn],
) -> Result<Expression, SolveError> {
    // Sum duplicate and reversed edges into one weight per canonical pair.
    // BTreeMap keeps variable declaration order deterministic.
    let mut weights: BTreeMap<(usize, usize), i64> = BTreeMap::new();
    for edge in affinities {
        if edge.score == 0 {
            continue;
        }
        let a = *mapping.group_id_to_index.get(&edge.a).ok_or_else(|| {
            SolveError::ModelBuild {
                message: format!("affinity group '{}' missing from mapping", edge.a),
            }
        })?;
        let b = *mapping.group_id_to_index.get(&edge.b).ok_or_else(|| {
            SolveError::ModelBuild {
                message: format!("affinity group '{}' missing from mapping", edge.b),
            }
        })?;
        *weights.entry((a.min(b), a.max(b))).or_insert(0) += i64::from(edge.score);
    }

    let mut objective = Expression::default();
    for (&(a, b), &weight) in &weights {
        if weight == 0 {
            // +1 and −1 edges for the same pair cancelled out.
            continue;
        }
        let rep_a = mapping.groups[a].representative();
        let rep_b = mapping.groups[b].representative();

        let colocated = vars.add(
            VariableDefinition::new()
                .binary()
                .name(format!("coloc_{a}_{b}")),
        );
        let mut any_table = Expression::default();
        for t in 0..mapping.num_tables() {
            let same = vars.add(
                VariableDefinition::new()
                    .binary()
                    .name(format!("same_{a}_{b}_{t}")),
            );
            cons.push(constraint!(same - seating.y[rep_a][t] <= 0));
            cons.push(constraint!(same - seating.y[rep_b][t] <= 0));
            cons.push(constraint!(
                seating.y[rep_a][t] + seating.y[rep_b][t] - same <= 1
            ));
            cons.push(constraint!(colocated - same >= 0));
            any_table += same;
        }
        cons.push(constraint!(colocated - any_table <= 0));

        objective += colocated * weight as f64;
    }

    Ok(objective)
}
