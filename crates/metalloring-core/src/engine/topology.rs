use super::error::EngineError;
use std::collections::HashMap;

pub const ALLOWED_RING_SIZES: [usize; 2] = [5, 6];

/// The raw index groups supplied by a caller, all 1-based.
///
/// This mirrors what a user types on the command line; any combination may be
/// present. [`Topology::from_roles`] decides whether the combination is one of
/// the two supported shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignment {
    pub ring1: Option<Vec<usize>>,
    pub ring2: Option<Vec<usize>>,
    pub ring3: Option<Vec<usize>>,
    pub metal1: Option<usize>,
    pub metal2: Option<usize>,
}

/// A validated ring: 5 or 6 atom serials in caller-supplied bonding order.
///
/// The order is treated as a cycle, so the last member is bonded to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingGroup {
    members: Vec<usize>,
}

impl RingGroup {
    pub fn new(name: &str, members: Vec<usize>) -> Result<Self, EngineError> {
        if !ALLOWED_RING_SIZES.contains(&members.len()) {
            return Err(EngineError::InvalidTopology(format!(
                "{} must have 5 or 6 atoms, got {}",
                name,
                members.len()
            )));
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at cyclic position `i` (wrapping modulo the ring length).
    pub fn cyclic(&self, i: usize) -> usize {
        self.members[i % self.members.len()]
    }

    /// Every window of four consecutive members around the cycle, starting at
    /// each member in turn.
    pub fn torsion_windows(&self) -> impl Iterator<Item = [usize; 4]> + '_ {
        (0..self.members.len()).map(move |i| {
            [
                self.cyclic(i),
                self.cyclic(i + 1),
                self.cyclic(i + 2),
                self.cyclic(i + 3),
            ]
        })
    }
}

/// The two supported arrangements of rings and metals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topology {
    /// Ring-Metal-Ring (metallocene).
    TwoRing {
        ring1: RingGroup,
        ring2: RingGroup,
        metal1: usize,
    },
    /// Ring-Metal-Ring-Metal-Ring (inverse sandwich).
    ThreeRing {
        ring1: RingGroup,
        ring2: RingGroup,
        ring3: RingGroup,
        metal1: usize,
        metal2: usize,
    },
}

impl Topology {
    /// Builds a topology from caller-supplied role groups.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTopology`] when the groups match neither
    /// supported shape, when a ring has a disallowed size, when an index is
    /// used twice, or when an index lies outside `1..=atom_count`.
    pub fn from_roles(roles: RoleAssignment, atom_count: usize) -> Result<Self, EngineError> {
        let topology = match roles {
            RoleAssignment {
                ring1: Some(ring1),
                ring2: Some(ring2),
                ring3: None,
                metal1: Some(metal1),
                metal2: None,
            } => Topology::TwoRing {
                ring1: RingGroup::new("ring1", ring1)?,
                ring2: RingGroup::new("ring2", ring2)?,
                metal1,
            },
            RoleAssignment {
                ring1: Some(ring1),
                ring2: Some(ring2),
                ring3: Some(ring3),
                metal1: Some(metal1),
                metal2: Some(metal2),
            } => Topology::ThreeRing {
                ring1: RingGroup::new("ring1", ring1)?,
                ring2: RingGroup::new("ring2", ring2)?,
                ring3: RingGroup::new("ring3", ring3)?,
                metal1,
                metal2,
            },
            other => return Err(EngineError::InvalidTopology(describe_mismatch(&other))),
        };

        topology.check_indices(atom_count)?;
        Ok(topology)
    }

    pub fn rings(&self) -> Vec<&RingGroup> {
        match self {
            Topology::TwoRing { ring1, ring2, .. } => vec![ring1, ring2],
            Topology::ThreeRing {
                ring1,
                ring2,
                ring3,
                ..
            } => vec![ring1, ring2, ring3],
        }
    }

    pub fn metals(&self) -> Vec<usize> {
        match self {
            Topology::TwoRing { metal1, .. } => vec![*metal1],
            Topology::ThreeRing { metal1, metal2, .. } => vec![*metal1, *metal2],
        }
    }

    /// Every role-bearing index paired with the name of its role.
    fn labeled_indices(&self) -> Vec<(String, usize)> {
        let mut indices = Vec::new();
        for (n, ring) in self.rings().into_iter().enumerate() {
            for &member in ring.members() {
                indices.push((format!("ring{}", n + 1), member));
            }
        }
        for (n, metal) in self.metals().into_iter().enumerate() {
            indices.push((format!("metal{}", n + 1), metal));
        }
        indices
    }

    fn check_indices(&self, atom_count: usize) -> Result<(), EngineError> {
        let mut seen: HashMap<usize, String> = HashMap::new();
        for (role, index) in self.labeled_indices() {
            if index == 0 || index > atom_count {
                return Err(EngineError::InvalidTopology(format!(
                    "{} refers to atom {}, but the structure has atoms 1..={}",
                    role, index, atom_count
                )));
            }
            if let Some(previous) = seen.insert(index, role.clone()) {
                return Err(EngineError::InvalidTopology(if previous == role {
                    format!("atom {} appears more than once in {}", index, role)
                } else {
                    format!("atom {} is assigned to both {} and {}", index, previous, role)
                }));
            }
        }
        Ok(())
    }
}

fn describe_mismatch(roles: &RoleAssignment) -> String {
    let mut present: Vec<&str> = Vec::new();
    if roles.ring1.is_some() {
        present.push("ring1");
    }
    if roles.ring2.is_some() {
        present.push("ring2");
    }
    if roles.ring3.is_some() {
        present.push("ring3");
    }
    if roles.metal1.is_some() {
        present.push("metal1");
    }
    if roles.metal2.is_some() {
        present.push("metal2");
    }
    let supplied = if present.is_empty() {
        "nothing".to_string()
    } else {
        present.join(", ")
    };
    format!(
        "supplied {}; expected ring1, ring2, metal1 (two rings) or ring1, ring2, ring3, metal1, metal2 (three rings)",
        supplied
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_ring_roles() -> RoleAssignment {
        RoleAssignment {
            ring1: Some(vec![1, 2, 3, 4, 5]),
            ring2: Some(vec![6, 7, 8, 9, 10]),
            metal1: Some(11),
            ..Default::default()
        }
    }

    fn three_ring_roles() -> RoleAssignment {
        RoleAssignment {
            ring1: Some(vec![1, 2, 3, 4, 5]),
            ring2: Some(vec![6, 7, 8, 9, 10, 11]),
            ring3: Some(vec![12, 13, 14, 15, 16]),
            metal1: Some(17),
            metal2: Some(18),
        }
    }

    fn assert_invalid(result: Result<Topology, EngineError>, needle: &str) {
        match result {
            Err(EngineError::InvalidTopology(message)) => {
                assert!(message.contains(needle), "'{message}' lacks '{needle}'")
            }
            other => panic!("expected InvalidTopology, got {:?}", other),
        }
    }

    #[test]
    fn two_ring_roles_produce_two_ring_topology() {
        let topology = Topology::from_roles(two_ring_roles(), 11).unwrap();
        assert!(matches!(topology, Topology::TwoRing { metal1: 11, .. }));
        assert_eq!(topology.rings().len(), 2);
        assert_eq!(topology.metals(), vec![11]);
    }

    #[test]
    fn three_ring_roles_produce_three_ring_topology() {
        let topology = Topology::from_roles(three_ring_roles(), 18).unwrap();
        assert!(matches!(
            topology,
            Topology::ThreeRing {
                metal1: 17,
                metal2: 18,
                ..
            }
        ));
        assert_eq!(topology.rings()[1].len(), 6);
    }

    #[test]
    fn missing_middle_ring_is_invalid() {
        let roles = RoleAssignment {
            ring2: None,
            ..three_ring_roles()
        };
        assert_invalid(Topology::from_roles(roles, 18), "ring1, ring3, metal1, metal2");

        let roles = RoleAssignment {
            ring1: Some(vec![1, 2, 3, 4, 5]),
            ring3: Some(vec![6, 7, 8, 9, 10]),
            metal1: Some(11),
            ..Default::default()
        };
        assert_invalid(Topology::from_roles(roles, 11), "supplied ring1, ring3, metal1");
    }

    #[test]
    fn three_rings_without_second_metal_is_invalid() {
        let roles = RoleAssignment {
            metal2: None,
            ..three_ring_roles()
        };
        assert_invalid(Topology::from_roles(roles, 18), "expected");
    }

    #[test]
    fn two_rings_with_second_metal_is_invalid() {
        let roles = RoleAssignment {
            metal2: Some(12),
            ..two_ring_roles()
        };
        assert_invalid(Topology::from_roles(roles, 12), "metal2");
    }

    #[test]
    fn empty_assignment_is_invalid() {
        assert_invalid(
            Topology::from_roles(RoleAssignment::default(), 10),
            "supplied nothing",
        );
    }

    #[test]
    fn ring_of_disallowed_size_is_invalid() {
        let roles = RoleAssignment {
            ring2: Some(vec![6, 7, 8, 9]),
            ..two_ring_roles()
        };
        assert_invalid(Topology::from_roles(roles, 11), "ring2 must have 5 or 6 atoms, got 4");

        let roles = RoleAssignment {
            ring1: Some(vec![1, 2, 3, 4, 5, 12, 13]),
            ..two_ring_roles()
        };
        assert_invalid(Topology::from_roles(roles, 13), "got 7");
    }

    #[test]
    fn index_shared_between_roles_is_invalid() {
        let roles = RoleAssignment {
            metal1: Some(3),
            ..two_ring_roles()
        };
        assert_invalid(
            Topology::from_roles(roles, 11),
            "atom 3 is assigned to both ring1 and metal1",
        );
    }

    #[test]
    fn index_repeated_within_ring_is_invalid() {
        let roles = RoleAssignment {
            ring1: Some(vec![1, 2, 3, 4, 1]),
            ..two_ring_roles()
        };
        assert_invalid(
            Topology::from_roles(roles, 11),
            "atom 1 appears more than once in ring1",
        );
    }

    #[test]
    fn out_of_range_indices_are_invalid() {
        assert_invalid(Topology::from_roles(two_ring_roles(), 10), "metal1 refers to atom 11");

        let roles = RoleAssignment {
            ring1: Some(vec![0, 2, 3, 4, 5]),
            ..two_ring_roles()
        };
        assert_invalid(Topology::from_roles(roles, 11), "ring1 refers to atom 0");
    }

    #[test]
    fn torsion_windows_wrap_around_the_ring() {
        let ring = RingGroup::new("ring2", vec![6, 7, 8, 9, 10]).unwrap();
        let windows: Vec<[usize; 4]> = ring.torsion_windows().collect();
        assert_eq!(
            windows,
            vec![
                [6, 7, 8, 9],
                [7, 8, 9, 10],
                [8, 9, 10, 6],
                [9, 10, 6, 7],
                [10, 6, 7, 8],
            ]
        );
    }
}
