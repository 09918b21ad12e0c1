//! Collision grouping and merge resolution
//!
//! Colliding pairs found during force accumulation are unioned into
//! [`CollisionGroups`], a disjoint-set forest over body indices. Each
//! resulting group of two or more bodies is then collapsed by
//! [`merge_group`] into a single body with a fresh id.

use crate::error::{Error, Result};
use crate::simulation::body::{BodyId, MassiveBody};
use crate::simulation::params::StaticMerge;
use crate::simulation::vector::Vector;

/// Disjoint-set over the indices `0..n` of one tick's body slice
#[derive(Debug, Clone)]
pub struct CollisionGroups {
    parent: Vec<usize>,
    size: Vec<usize>,
    any: bool,
}

impl CollisionGroups {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            any: false,
        }
    }

    /// Whether any pair was flagged this tick
    pub fn has_collisions(&self) -> bool {
        self.any
    }

    /// Representative of the group containing `i`, compressing the path on the way
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Flag `a` and `b` as colliding; joins their groups if they differ
    pub fn union(&mut self, a: usize, b: usize) {
        self.any = true;
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        // union by size, smaller tree under larger
        let (big, small) = if self.size[ra] >= self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }

    /// Every group with at least two members.
    ///
    /// Members are listed in ascending index order and groups are ordered by
    /// their smallest member, so the output only depends on the union calls.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut by_root: Vec<Vec<usize>> = vec![Vec::new(); n];
        for i in 0..n {
            let r = self.find(i);
            by_root[r].push(i);
        }
        let mut groups: Vec<Vec<usize>> = by_root.into_iter().filter(|g| g.len() >= 2).collect();
        groups.sort_by_key(|g| g[0]);
        groups
    }
}

/// Collapse `members` into a single body carrying id `id`.
///
/// - mass is the sum of member masses (clamped like any other body)
/// - without static members: position is the mass-weighted centroid and
///   velocity conserves momentum
/// - with a static member: the product is static with zero velocity, placed
///   according to `policy`
pub fn merge_group<const D: usize>(
    id: BodyId,
    members: &[&MassiveBody<D>],
    policy: StaticMerge,
) -> Result<MassiveBody<D>> {
    if members.len() < 2 {
        return Err(Error::InvalidParam(format!(
            "a merge needs at least two bodies, got {}",
            members.len()
        )));
    }

    let total_mass: f64 = members.iter().map(|b| b.mass()).sum();
    let any_static = members.iter().any(|b| b.is_static());

    if any_static {
        let position = match policy {
            StaticMerge::Origin => Vector::zeros(),
            StaticMerge::Anchor => {
                let anchors: Vec<&&MassiveBody<D>> = members.iter().filter(|b| b.is_static()).collect();
                if anchors.len() == 1 {
                    anchors[0].position()
                } else {
                    let m: f64 = anchors.iter().map(|b| b.mass()).sum();
                    weighted_sum(anchors.iter().map(|b| (b.mass(), b.position()))).div(m)?
                }
            }
        };
        return MassiveBody::new(id, position, Vector::zeros(), total_mass, true);
    }

    let position = weighted_sum(members.iter().map(|b| (b.mass(), b.position()))).div(total_mass)?;
    let velocity = weighted_sum(members.iter().map(|b| (b.mass(), b.velocity()))).div(total_mass)?;

    MassiveBody::new(id, position, velocity, total_mass, false)
}

fn weighted_sum<const D: usize>(terms: impl Iterator<Item = (f64, Vector<D>)>) -> Vector<D> {
    terms.fold(Vector::zeros(), |acc, (w, v)| acc + v * w)
}
