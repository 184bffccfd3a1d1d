//! Breadth-first searches over indexed adjacency lists.

use std::collections::VecDeque;

use crate::algorithms::AlgorithmError;

/// Computes hop distances from `index` to every node, `-1` marks unreachable nodes.
///
/// When `members` is supplied, the search never leaves the nodes flagged in it.
fn distances_from(index: usize, indices: &[Vec<usize>], members: Option<&[bool]>) -> Vec<i64> {
    let num_nodes = indices.len();

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut deltas: Vec<i64> = vec![-1; num_nodes];

    deltas[index] = 0;
    queue.push_back(index);

    while let Some(current) = queue.pop_front() {
        for &next in &indices[current] {
            if deltas[next] != -1 {
                continue;
            }
            if members.is_some_and(|members| !members[next]) {
                continue;
            }

            deltas[next] = deltas[current] + 1;
            queue.push_back(next);
        }
    }

    deltas
}

/// Returns which nodes can be reached from `index`.
pub(crate) fn reachable(index: usize, indices: &[Vec<usize>]) -> Vec<bool> {
    distances_from(index, indices, None)
        .into_iter()
        .map(|delta| delta != -1)
        .collect()
}

/// Computes the diameter of the subgraph induced by `nodes`.
///
/// Every node of the subgraph must be reachable from every other one.
pub(crate) fn diameter(indices: &[Vec<usize>], nodes: &[usize]) -> Result<usize, AlgorithmError> {
    if nodes.is_empty() {
        return Err(AlgorithmError::EmptyGraph);
    }

    let mut members = vec![false; indices.len()];
    for &node in nodes {
        members[node] = true;
    }

    let mut diameter = 0;
    for &source in nodes {
        let deltas = distances_from(source, indices, Some(&members));

        for &node in nodes {
            match deltas[node] {
                -1 => return Err(AlgorithmError::NotConnected),
                delta => diameter = diameter.max(delta as usize),
            }
        }
    }

    Ok(diameter)
}

/// Partitions the nodes into connected components, largest first.
///
/// Components of equal size keep the order of their lowest node index.
pub(crate) fn components(indices: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let num_nodes = indices.len();
    let mut assigned = vec![false; num_nodes];
    let mut components = Vec::new();

    for start in 0..num_nodes {
        if assigned[start] {
            continue;
        }

        let component: Vec<usize> = distances_from(start, indices, None)
            .into_iter()
            .enumerate()
            .filter(|(_, delta)| *delta != -1)
            .map(|(node, _)| node)
            .collect();

        for &node in &component {
            assigned[node] = true;
        }

        components.push(component);
    }

    // Stable, so ties stay in discovery order.
    components.sort_by(|a, b| b.len().cmp(&a.len()));
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 - 1 - 2 - 3, 4 - 5, 6
    fn indices() -> Vec<Vec<usize>> {
        vec![
            vec![1],
            vec![0, 2],
            vec![1, 3],
            vec![2],
            vec![5],
            vec![4],
            vec![],
        ]
    }

    #[test]
    fn distances() {
        assert_eq!(
            distances_from(0, &indices(), None),
            vec![0, 1, 2, 3, -1, -1, -1]
        );
    }

    #[test]
    fn restricted_distances() {
        let members = [true, true, false, true, false, false, false];
        assert_eq!(
            distances_from(0, &indices(), Some(&members)),
            vec![0, 1, -1, -1, -1, -1, -1]
        );
    }

    #[test]
    fn path_diameter() {
        assert_eq!(diameter(&indices(), &[0, 1, 2, 3]), Ok(3));
        assert_eq!(diameter(&indices(), &[4, 5]), Ok(1));
        assert_eq!(diameter(&indices(), &[6]), Ok(0));
    }

    #[test]
    fn disconnected_diameter() {
        assert_eq!(
            diameter(&indices(), &[0, 1, 2, 3, 4, 5, 6]),
            Err(AlgorithmError::NotConnected)
        );
        assert_eq!(diameter(&indices(), &[]), Err(AlgorithmError::EmptyGraph));
    }

    #[test]
    fn connected_components() {
        assert_eq!(
            components(&indices()),
            vec![vec![0, 1, 2, 3], vec![4, 5], vec![6]]
        );
    }

    #[test]
    fn reachability() {
        assert_eq!(
            reachable(4, &indices()),
            vec![false, false, false, false, true, true, false]
        );
    }
}
