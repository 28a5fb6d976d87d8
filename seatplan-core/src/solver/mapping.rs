//! Validation and id-to-index mapping.
//!
//! The model layer keys everything by dense integer indices. This module
//! validates the request (uniqueness, references, capacity feasibility) and
//! builds the contiguous index mappings; nothing solver-related is allocated
//! unless validation succeeds.

use std::collections::{HashMap, HashSet};

use crate::models::OptimizeRequest;

use super::SolveError;

/// Table metadata, indexed by dense table index.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub id: String,
    pub index: usize,
    pub capacity: u32,
    pub label: Option<String>,
}

/// Guest metadata, indexed by dense guest index.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestInfo {
    pub id: String,
    pub index: usize,
    pub name: String,
}

/// Group metadata, indexed by dense group index.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupInfo {
    pub id: String,
    pub index: usize,
    /// Member guest indices; the first entry is the group's representative.
    pub guest_indices: Vec<usize>,
    /// Whether the group must occupy a contiguous seat block.
    pub adjacent: bool,
}

impl GroupInfo {
    /// The representative guest index used for affinity co-location. Valid
    /// because cohesion forces every member onto the representative's table.
    pub fn representative(&self) -> usize {
        self.guest_indices[0]
    }
}

/// Complete mapping from request ids to dense solver indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemMapping {
    pub tables: Vec<TableInfo>,
    pub guests: Vec<GuestInfo>,
    pub groups: Vec<GroupInfo>,
    pub guest_id_to_index: HashMap<String, usize>,
    pub table_id_to_index: HashMap<String, usize>,
    pub group_id_to_index: HashMap<String, usize>,
    /// Deduplicated partner pairs as `(low, high)` guest indices.
    pub partner_pairs: Vec<(usize, usize)>,
    pub total_seats: usize,
    pub max_capacity: u32,
}

impl ProblemMapping {
    pub fn num_guests(&self) -> usize {
        self.guests.len()
    }

    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }
}

fn check_unique_ids<'a, I>(ids: I, entity: &'static str) -> Result<(), SolveError>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SolveError::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn check_options(request: &OptimizeRequest) -> Result<(), SolveError> {
    for table in &request.tables {
        if table.capacity < 2 {
            return Err(SolveError::InvalidCapacity {
                table_id: table.id.clone(),
                capacity: table.capacity,
            });
        }
    }
    let options = &request.options;
    if !options.time_limit_seconds.is_finite() || options.time_limit_seconds <= 0.0 {
        return Err(SolveError::InvalidOption {
            message: format!(
                "time_limit_seconds must be a positive number, got {}",
                options.time_limit_seconds
            ),
        });
    }
    if options.num_workers < 1 {
        return Err(SolveError::InvalidOption {
            message: "num_workers must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Resolves `partner_id` declarations into canonical `(low, high)` pairs.
///
/// Every declaration must reference an existing guest, must not be a
/// self-reference, and must be reciprocated by the partner.
fn build_partner_pairs(
    request: &OptimizeRequest,
    guest_id_to_index: &HashMap<String, usize>,
) -> Result<Vec<(usize, usize)>, SolveError> {
    let partner_of: HashMap<&str, &str> = request
        .guests
        .iter()
        .filter_map(|g| g.partner_id.as_deref().map(|p| (g.id.as_str(), p)))
        .collect();

    let mut pairs = Vec::new();
    let mut seen = HashSet::new();
    for guest in &request.guests {
        let Some(partner_id) = guest.partner_id.as_deref() else {
            continue;
        };
        if partner_id == guest.id {
            return Err(SolveError::SelfPartner {
                guest_id: guest.id.clone(),
            });
        }
        let Some(&partner_index) = guest_id_to_index.get(partner_id) else {
            return Err(SolveError::GuestNotFound {
                id: partner_id.to_string(),
                context: format!("partner declaration of guest '{}'", guest.id),
            });
        };
        if partner_of.get(partner_id) != Some(&guest.id.as_str()) {
            return Err(SolveError::AsymmetricPartner {
                a: guest.id.clone(),
                b: partner_id.to_string(),
            });
        }
        let guest_index = guest_id_to_index[&guest.id];
        let pair = (
            guest_index.min(partner_index),
            guest_index.max(partner_index),
        );
        if seen.insert(pair) {
            pairs.push(pair);
        }
    }
    Ok(pairs)
}

fn build_group_infos(
    request: &OptimizeRequest,
    guest_id_to_index: &HashMap<String, usize>,
) -> Result<Vec<GroupInfo>, SolveError> {
    let mut groups = Vec::with_capacity(request.groups.len());
    let mut membership: HashSet<usize> = HashSet::new();

    for (index, group) in request.groups.iter().enumerate() {
        if group.guest_ids.is_empty() {
            return Err(SolveError::EmptyGroup {
                group_id: group.id.clone(),
            });
        }
        let mut guest_indices = Vec::with_capacity(group.guest_ids.len());
        let mut local: HashSet<usize> = HashSet::new();
        for guest_id in &group.guest_ids {
            let Some(&guest_index) = guest_id_to_index.get(guest_id) else {
                return Err(SolveError::GuestNotFound {
                    id: guest_id.clone(),
                    context: format!("group '{}'", group.id),
                });
            };
            if !local.insert(guest_index) {
                return Err(SolveError::DuplicateGroupMember {
                    group_id: group.id.clone(),
                    guest_id: guest_id.clone(),
                });
            }
            if !membership.insert(guest_index) {
                return Err(SolveError::GuestInMultipleGroups {
                    guest_id: guest_id.clone(),
                });
            }
            guest_indices.push(guest_index);
        }
        groups.push(GroupInfo {
            id: group.id.clone(),
            index,
            guest_indices,
            adjacent: group.adjacent,
        });
    }
    Ok(groups)
}

fn check_affinities(
    request: &OptimizeRequest,
    group_id_to_index: &HashMap<String, usize>,
) -> Result<(), SolveError> {
    for edge in &request.affinities {
        if edge.a == edge.b {
            return Err(SolveError::SelfAffinity {
                group_id: edge.a.clone(),
            });
        }
        for endpoint in [&edge.a, &edge.b] {
            if !group_id_to_index.contains_key(endpoint) {
                return Err(SolveError::GroupNotFound {
                    id: endpoint.clone(),
                    context: "affinity edge".to_string(),
                });
            }
        }
        if !(-1..=1).contains(&edge.score) {
            return Err(SolveError::InvalidAffinityScore {
                a: edge.a.clone(),
                b: edge.b.clone(),
                score: edge.score,
            });
        }
    }
    Ok(())
}

/// Validates the request and builds the dense index mapping.
///
/// Checks run in order: uniqueness, option sanity, reference validity,
/// size/capacity feasibility. The function is pure: calling it twice on the
/// same request yields the same mapping.
pub fn create_mapping(request: &OptimizeRequest) -> Result<ProblemMapping, SolveError> {
    check_unique_ids(request.tables.iter().map(|t| t.id.as_str()), "table")?;
    check_unique_ids(request.guests.iter().map(|g| g.id.as_str()), "guest")?;
    check_unique_ids(request.groups.iter().map(|g| g.id.as_str()), "group")?;

    check_options(request)?;

    let tables: Vec<TableInfo> = request
        .tables
        .iter()
        .enumerate()
        .map(|(index, t)| TableInfo {
            id: t.id.clone(),
            index,
            capacity: t.capacity,
            label: t.label.clone(),
        })
        .collect();
    let table_id_to_index: HashMap<String, usize> =
        tables.iter().map(|t| (t.id.clone(), t.index)).collect();

    let guests: Vec<GuestInfo> = request
        .guests
        .iter()
        .enumerate()
        .map(|(index, g)| GuestInfo {
            id: g.id.clone(),
            index,
            name: g.name.clone(),
        })
        .collect();
    let guest_id_to_index: HashMap<String, usize> =
        guests.iter().map(|g| (g.id.clone(), g.index)).collect();

    // Reference checks, in order: group membership, partner declarations,
    // affinity endpoints.
    let groups = build_group_infos(request, &guest_id_to_index)?;
    let group_id_to_index: HashMap<String, usize> =
        groups.iter().map(|g| (g.id.clone(), g.index)).collect();
    let partner_pairs = build_partner_pairs(request, &guest_id_to_index)?;
    check_affinities(request, &group_id_to_index)?;

    let total_seats: usize = tables.iter().map(|t| t.capacity as usize).sum();
    let max_capacity = tables.iter().map(|t| t.capacity).max().unwrap_or(0);

    for group in &groups {
        if group.guest_indices.len() > max_capacity as usize {
            return Err(SolveError::GroupTooLarge {
                id: group.id.clone(),
                size: group.guest_indices.len(),
                max_capacity,
            });
        }
    }

    if total_seats < guests.len() {
        return Err(SolveError::Capacity {
            message: format!(
                "{} guests cannot be seated on {} total seats",
                guests.len(),
                total_seats
            ),
        });
    }
    if !request.options.allow_empty_seats && guests.len() != total_seats {
        return Err(SolveError::Capacity {
            message: format!(
                "empty seats are disallowed but {} guests do not fill {} seats",
                guests.len(),
                total_seats
            ),
        });
    }

    Ok(ProblemMapping {
        tables,
        guests,
        groups,
        guest_id_to_index,
        table_id_to_index,
        group_id_to_index,
        partner_pairs,
        total_seats,
        max_capacity,
    })
}
