//! Smallest set of smallest rings (SSSR) and its symmetrized form.
//!
//! Candidate rings are Horton cycles: for every root atom and bond, the
//! two shortest paths from the root to the bond ends closed by the bond,
//! plus, for even rings, two shortest paths meeting at a common far atom.
//! Candidates are taken smallest first and kept only when their bond set
//! is linearly independent (over GF(2)) of the rings already kept, until
//! the cyclomatic number is reached.
//!
//! The SSSR of a symmetric cage is not unique (cubane has six equivalent
//! faces but only five independent ones). The symmetrized set adds back
//! every relevant ring, one that is not a sum of strictly smaller rings,
//! no larger than the largest SSSR ring.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::molecule::Bond;

/// Find the SSSR. Each ring is returned as a cycle of atom indices in
/// bond order, starting at its lowest index.
pub fn find_sssr(n_atoms: usize, bonds: &[Bond], adjacency: &[Vec<(usize, usize)>]) -> Vec<Vec<usize>> {
    let target = cyclomatic_number(n_atoms, bonds.len(), adjacency);
    if target == 0 {
        return Vec::new();
    }
    let candidates = horton_candidates(n_atoms, bonds, adjacency);
    select_sssr(&candidates, target, bonds.len(), adjacency)
}

/// SSSR followed by the symmetry-equivalent rings it had to leave out.
pub fn find_symmetrized_sssr(n_atoms: usize, bonds: &[Bond], adjacency: &[Vec<(usize, usize)>]) -> Vec<Vec<usize>> {
    let target = cyclomatic_number(n_atoms, bonds.len(), adjacency);
    if target == 0 {
        return Vec::new();
    }
    let candidates = horton_candidates(n_atoms, bonds, adjacency);
    let mut rings = select_sssr(&candidates, target, bonds.len(), adjacency);
    let Some(largest) = rings.iter().map(Vec::len).max() else {
        return rings;
    };
    for ring in relevant_rings(&candidates, largest, bonds.len(), adjacency) {
        if !rings.contains(&ring) {
            rings.push(ring);
        }
    }
    rings
}

/// Unique candidate cycles, smallest first.
fn horton_candidates(n_atoms: usize, bonds: &[Bond], adjacency: &[Vec<(usize, usize)>]) -> Vec<Vec<usize>> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut push = |cycle: Vec<usize>| {
        let ring = normalize(cycle);
        if seen.insert(ring.clone()) {
            candidates.push(ring);
        }
    };
    for root in 0..n_atoms {
        let (parent, dist) = bfs_tree(root, adjacency);
        for bond in bonds {
            if let Some(cycle) = horton_cycle(root, bond, &parent) {
                push(cycle);
            }
        }
        for far in 0..n_atoms {
            if dist[far] == usize::MAX || dist[far] == 0 {
                continue;
            }
            let before: Vec<usize> = adjacency[far]
                .iter()
                .map(|&(nb, _)| nb)
                .filter(|&nb| dist[nb] != usize::MAX && dist[nb] + 1 == dist[far])
                .collect();
            for (i, &p) in before.iter().enumerate() {
                for &q in &before[i + 1..] {
                    if let Some(cycle) = even_cycle(root, p, far, q, &parent) {
                        push(cycle);
                    }
                }
            }
        }
    }
    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    candidates
}

fn select_sssr(
    candidates: &[Vec<usize>],
    target: usize,
    n_bonds: usize,
    adjacency: &[Vec<(usize, usize)>],
) -> Vec<Vec<usize>> {
    let mut basis: Vec<Option<Vec<u64>>> = vec![None; n_bonds];
    let mut rings = Vec::with_capacity(target);
    for ring in candidates {
        if rings.len() == target {
            break;
        }
        let mut vector = bond_vector(ring, n_bonds, adjacency);
        if reduce_into_basis(&mut vector, &mut basis) {
            rings.push(ring.clone());
        }
    }

    if rings.len() < target {
        debug!(found = rings.len(), expected = target, "Incomplete ring set");
    }
    rings
}

/// Candidates up to `max_len` atoms that are independent of every
/// strictly smaller candidate.
fn relevant_rings(
    candidates: &[Vec<usize>],
    max_len: usize,
    n_bonds: usize,
    adjacency: &[Vec<(usize, usize)>],
) -> Vec<Vec<usize>> {
    let mut smaller: Vec<Option<Vec<u64>>> = vec![None; n_bonds];
    let mut relevant = Vec::new();
    let mut start = 0;
    while start < candidates.len() && candidates[start].len() <= max_len {
        let len = candidates[start].len();
        let end = candidates[start..]
            .iter()
            .position(|r| r.len() != len)
            .map_or(candidates.len(), |offset| start + offset);
        let vectors: Vec<Vec<u64>> = candidates[start..end]
            .iter()
            .map(|r| bond_vector(r, n_bonds, adjacency))
            .collect();
        for (ring, vector) in candidates[start..end].iter().zip(&vectors) {
            if reduce(&mut vector.clone(), &smaller).is_some() {
                relevant.push(ring.clone());
            }
        }
        for mut vector in vectors {
            reduce_into_basis(&mut vector, &mut smaller);
        }
        start = end;
    }
    relevant
}

/// Number of independent cycles: bonds - atoms + connected components.
pub fn cyclomatic_number(n_atoms: usize, n_bonds: usize, adjacency: &[Vec<(usize, usize)>]) -> usize {
    let mut visited = vec![false; n_atoms];
    let mut components = 0;
    for start in 0..n_atoms {
        if visited[start] {
            continue;
        }
        components += 1;
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(node) = stack.pop() {
            for &(nb, _) in &adjacency[node] {
                if !visited[nb] {
                    visited[nb] = true;
                    stack.push(nb);
                }
            }
        }
    }
    (n_bonds + components).saturating_sub(n_atoms)
}

/// Shortest-path tree and distances from `root`; unreached atoms keep
/// `usize::MAX` in both.
fn bfs_tree(root: usize, adjacency: &[Vec<(usize, usize)>]) -> (Vec<usize>, Vec<usize>) {
    let mut parent = vec![usize::MAX; adjacency.len()];
    let mut dist = vec![usize::MAX; adjacency.len()];
    parent[root] = root;
    dist[root] = 0;
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        for &(nb, _) in &adjacency[node] {
            if parent[nb] == usize::MAX {
                parent[nb] = node;
                dist[nb] = dist[node] + 1;
                queue.push_back(nb);
            }
        }
    }
    (parent, dist)
}

fn path_to_root(mut node: usize, parent: &[usize]) -> Vec<usize> {
    let mut path = vec![node];
    while parent[node] != node {
        node = parent[node];
        path.push(node);
    }
    path
}

/// Cycle root -> a, a-b, b -> root, if the two tree paths meet only at root.
fn horton_cycle(root: usize, bond: &Bond, parent: &[usize]) -> Option<Vec<usize>> {
    if parent[bond.a] == usize::MAX || parent[bond.b] == usize::MAX {
        return None;
    }
    // Tree edges close nothing
    if parent[bond.a] == bond.b || parent[bond.b] == bond.a {
        return None;
    }
    let path_a = path_to_root(bond.a, parent);
    let path_b = path_to_root(bond.b, parent);
    let on_a: HashSet<usize> = path_a.iter().copied().collect();
    if path_b.iter().any(|n| *n != root && on_a.contains(n)) {
        return None;
    }
    let mut cycle: Vec<usize> = path_a.into_iter().rev().collect();
    cycle.extend(&path_b[..path_b.len() - 1]);
    Some(cycle)
}

/// Cycle root -> p, p-far-q, q -> root, if the two tree paths meet only at root.
fn even_cycle(root: usize, p: usize, far: usize, q: usize, parent: &[usize]) -> Option<Vec<usize>> {
    let path_p = path_to_root(p, parent);
    let path_q = path_to_root(q, parent);
    let on_p: HashSet<usize> = path_p.iter().copied().collect();
    if path_q.iter().any(|n| *n != root && on_p.contains(n)) {
        return None;
    }
    let mut cycle: Vec<usize> = path_p.into_iter().rev().collect();
    cycle.push(far);
    cycle.extend(&path_q[..path_q.len() - 1]);
    Some(cycle)
}

/// Rotate the cycle to start at its smallest atom and walk toward the
/// smaller of its two neighbors, so equal rings compare equal.
fn normalize(mut ring: Vec<usize>) -> Vec<usize> {
    let Some(min_pos) = ring.iter().enumerate().min_by_key(|&(_, &a)| a).map(|(i, _)| i) else {
        return ring;
    };
    ring.rotate_left(min_pos);
    if ring.len() > 2 && ring[ring.len() - 1] < ring[1] {
        ring[1..].reverse();
    }
    ring
}

fn bond_vector(ring: &[usize], n_bonds: usize, adjacency: &[Vec<(usize, usize)>]) -> Vec<u64> {
    let mut bits = vec![0u64; n_bonds.div_ceil(64)];
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        if let Some(&(_, bi)) = adjacency[a].iter().find(|&&(nb, _)| nb == b) {
            bits[bi / 64] |= 1u64 << (bi % 64);
        }
    }
    bits
}

fn highest_bit(bits: &[u64]) -> Option<usize> {
    bits.iter()
        .enumerate()
        .rev()
        .find(|&(_, &w)| w != 0)
        .map(|(i, &w)| i * 64 + 63 - w.leading_zeros() as usize)
}

/// Eliminate `vector` against the basis. Returns the free pivot when
/// it is independent, `None` when it reduces to zero.
fn reduce(vector: &mut [u64], basis: &[Option<Vec<u64>>]) -> Option<usize> {
    while let Some(pivot) = highest_bit(vector) {
        match &basis[pivot] {
            Some(row) => {
                for (v, r) in vector.iter_mut().zip(row) {
                    *v ^= r;
                }
            }
            None => return Some(pivot),
        }
    }
    None
}

/// Gaussian elimination step. Returns true (and extends the basis) when
/// `vector` is independent of the current basis.
fn reduce_into_basis(vector: &mut [u64], basis: &mut [Option<Vec<u64>>]) -> bool {
    match reduce(vector, basis) {
        Some(pivot) => {
            basis[pivot] = Some(vector.to_vec());
            true
        }
        None => false,
    }
}
