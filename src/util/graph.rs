use {
    num::Zero,
    std::{
        cmp::Ordering,
        collections::{BinaryHeap, HashMap},
        hash::Hash,
        ops::Add,
    },
};

pub struct OpenSetElement<V, C>(pub V, pub C);

impl<V: Clone + PartialEq, C: Clone + Ord> PartialEq for OpenSetElement<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<V: Clone + PartialEq, C: Clone + Ord> PartialOrd for OpenSetElement<V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Clone + PartialEq, C: Clone + Ord> Eq for OpenSetElement<V, C> {}

impl<V: Clone + PartialEq, C: Clone + Ord> Ord for OpenSetElement<V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the order so that cost is minimized when popping from the heap
        other.1.cmp(&self.1)
    }
}

pub struct DijkstraState<V, C> {
    open_set_heap: BinaryHeap<OpenSetElement<V, C>>,
    best_costs: HashMap<V, C>,
    neighbors: Vec<OpenSetElement<V, C>>,
}

impl<V, C> DijkstraState<V, C> {
    fn clear(&mut self) {
        self.open_set_heap.clear();
        self.best_costs.clear();
        self.neighbors.clear();
    }
}

impl<V, C> Default for DijkstraState<V, C>
where
    OpenSetElement<V, C>: Ord,
{
    fn default() -> Self {
        Self {
            open_set_heap: Default::default(),
            best_costs: Default::default(),
            neighbors: Default::default(),
        }
    }
}

/// An implementation of https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm returning the minimal
/// cost from the start vertex to the end vertex
///
/// The open set tolerates duplicate insertions: whenever a cheaper path to a vertex is found, a
/// fresh element is pushed, and any element popped with a cost exceeding the best known cost for
/// its vertex is discarded as stale. The best-known-cost map and the heap are both owned by
/// `DijkstraState`, so implementors only describe the graph.
pub trait Dijkstra {
    type Vertex: Clone + Eq + Hash;
    type Cost: Add<Self::Cost, Output = Self::Cost> + Clone + Ord + Sized + Zero;

    fn start(&self) -> &Self::Vertex;
    fn is_end(&self, vertex: &Self::Vertex) -> bool;

    /// The cost is from `vertex` to the neighbor. `neighbors` is cleared by the caller.
    fn neighbors(
        &self,
        vertex: &Self::Vertex,
        neighbors: &mut Vec<OpenSetElement<Self::Vertex, Self::Cost>>,
    );

    /// Invoked once per popped element that survives the staleness check, in nondecreasing cost
    /// order.
    fn visit_vertex(&mut self, _vertex: &Self::Vertex, _cost: Self::Cost) {}

    fn run_internal(
        &mut self,
        state: &mut DijkstraState<Self::Vertex, Self::Cost>,
    ) -> Option<Self::Cost> {
        state.clear();

        let start: Self::Vertex = self.start().clone();

        state
            .best_costs
            .insert(start.clone(), Self::Cost::zero());
        state
            .open_set_heap
            .push(OpenSetElement(start, Self::Cost::zero()));

        while let Some(OpenSetElement(current, start_to_current)) = state.open_set_heap.pop() {
            if self.is_end(&current) {
                return Some(start_to_current);
            }

            if state
                .best_costs
                .get(&current)
                .map_or(false, |best_cost| *best_cost < start_to_current)
            {
                // A cheaper path to this vertex was found after this element was pushed.
                continue;
            }

            self.visit_vertex(&current, start_to_current.clone());

            state.neighbors.clear();
            self.neighbors(&current, &mut state.neighbors);

            for OpenSetElement(neighbor, current_to_neighbor) in state.neighbors.drain(..) {
                let start_to_neighbor: Self::Cost =
                    start_to_current.clone() + current_to_neighbor;

                if state
                    .best_costs
                    .get(&neighbor)
                    .map_or(true, |best_cost| start_to_neighbor < *best_cost)
                {
                    state
                        .best_costs
                        .insert(neighbor.clone(), start_to_neighbor.clone());
                    state
                        .open_set_heap
                        .push(OpenSetElement(neighbor, start_to_neighbor));
                }
            }
        }

        None
    }

    fn run(&mut self) -> Option<Self::Cost> {
        self.run_internal(&mut DijkstraState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EdgeListSearch {
        start: usize,
        end: usize,
        edges: Vec<Vec<(usize, u32)>>,
        visited: Vec<(usize, u32)>,
    }

    impl Dijkstra for EdgeListSearch {
        type Vertex = usize;
        type Cost = u32;

        fn start(&self) -> &usize {
            &self.start
        }

        fn is_end(&self, vertex: &usize) -> bool {
            *vertex == self.end
        }

        fn neighbors(&self, vertex: &usize, neighbors: &mut Vec<OpenSetElement<usize, u32>>) {
            neighbors.extend(
                self.edges[*vertex]
                    .iter()
                    .map(|&(neighbor, cost)| OpenSetElement(neighbor, cost)),
            );
        }

        fn visit_vertex(&mut self, vertex: &usize, cost: u32) {
            self.visited.push((*vertex, cost));
        }
    }

    /// Vertex 1 is first reached at cost 10, then improved to cost 5 through vertex 2, leaving a
    /// stale element in the open set. Vertex 5 is unreachable.
    fn edge_list_search(end: usize) -> EdgeListSearch {
        EdgeListSearch {
            start: 0_usize,
            end,
            edges: vec![
                vec![(1_usize, 10_u32), (2_usize, 2_u32)],
                vec![(3_usize, 1_u32)],
                vec![(1_usize, 3_u32), (3_usize, 100_u32)],
                vec![(4_usize, 1_u32)],
                vec![],
                vec![],
            ],
            visited: Vec::new(),
        }
    }

    #[test]
    fn test_run_returns_minimal_cost() {
        assert_eq!(edge_list_search(4_usize).run(), Some(7_u32));
    }

    #[test]
    fn test_run_start_is_end() {
        assert_eq!(edge_list_search(0_usize).run(), Some(0_u32));
    }

    #[test]
    fn test_run_unreachable_end() {
        assert_eq!(edge_list_search(5_usize).run(), None);
    }

    #[test]
    fn test_run_is_deterministic() {
        assert_eq!(
            edge_list_search(4_usize).run(),
            edge_list_search(4_usize).run()
        );
    }

    #[test]
    fn test_visited_costs_are_nondecreasing() {
        let mut search: EdgeListSearch = edge_list_search(4_usize);

        search.run();

        assert!(search
            .visited
            .windows(2_usize)
            .all(|window| window[0_usize].1 <= window[1_usize].1));

        // The stale cost-10 element for vertex 1 was discarded, not visited.
        assert_eq!(
            search.visited.iter().filter(|(vertex, _)| *vertex == 1_usize).count(),
            1_usize
        );
    }
}
