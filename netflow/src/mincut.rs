//! Greedy minimum-cardinality cut on top of a solved max flow.
//!
//! Candidates are the forward edges ranked by saturated capacity
//! (`capacity + flow`, descending) with ties going to the smaller id. Each
//! candidate is logically removed and the max flow re-solved from scratch;
//! the removal is kept only if the flow drops by exactly the edge's initial
//! capacity. This needs up to one full Dinic run per edge and is a heuristic:
//! every accepted edge accounts for exactly its own capacity, but the set is
//! not proven to have globally minimum cardinality.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::basetypes::ResidualGraph;
use crate::maxflow::Dinic;
use crate::FlowNum;

/// Returns the indices of the accepted cut edges in acceptance order.
///
/// On return the removed mask is clear and the residual graph holds a
/// maximum flow again.
pub fn extract_min_cut<NUM: FlowNum>(
    graph: &mut ResidualGraph<NUM>,
    source: usize,
    sink: usize,
    max_flow: NUM,
) -> Vec<usize> {
    let ranked: Vec<usize> = graph
        .originals()
        .iter()
        .copied()
        .filter(|&e| graph.edge(e).initial_capacity > NUM::zero())
        .sorted_by(|&a, &b| {
            let (ea, eb) = (graph.edge(a), graph.edge(b));
            let saturated_a = ea.capacity + ea.flow();
            let saturated_b = eb.capacity + eb.flow();
            saturated_b.cmp(&saturated_a).then(ea.id.cmp(&eb.id))
        })
        .collect();

    let mut remaining = max_flow;
    let mut cut = Vec::new();
    for e in ranked {
        if remaining == NUM::zero() {
            break;
        }
        graph.set_removed(e, true);
        graph.reset();
        let reduced = Dinic::new(graph, source, sink).run();

        let capacity = graph.edge(e).initial_capacity;
        if remaining - reduced == capacity {
            debug!(edge = graph.edge(e).id, %capacity, flow = %reduced, "cut edge accepted");
            remaining = reduced;
            cut.push(e);
        } else {
            debug!(edge = graph.edge(e).id, %capacity, flow = %reduced, "cut edge rejected");
            graph.set_removed(e, false);
        }
    }

    if remaining > NUM::zero() {
        warn!(%remaining, "cut candidates exhausted before flow reached zero");
    }

    graph.clear_removed();
    graph.reset();
    Dinic::new(graph, source, sink).run();
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlowEdge;
    use petgraph::graph::{DiGraph, NodeIndex};

    fn residual(n: usize, arcs: &[(usize, usize, i32)]) -> ResidualGraph<i32> {
        let mut graph = DiGraph::<u32, FlowEdge<i32>>::new();
        for i in 0..n {
            graph.add_node(i as u32);
        }
        for &(u, v, cap) in arcs {
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), FlowEdge::with_capacity(cap));
        }
        ResidualGraph::from_graph(&graph, false).unwrap()
    }

    fn ids(graph: &ResidualGraph<i32>, cut: &[usize]) -> Vec<usize> {
        cut.iter().map(|&e| graph.edge(e).id).collect()
    }

    #[test]
    fn diamond_cut_matches_flow() {
        let mut graph = residual(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)]);
        let flow = Dinic::new(&mut graph, 0, 3).run();
        assert_eq!(flow, 4);

        let cut = extract_min_cut(&mut graph, 0, 3, flow);
        assert_eq!(ids(&graph, &cut), vec![1, 2]);
        let total: i32 = cut.iter().map(|&e| graph.edge(e).initial_capacity).sum();
        assert_eq!(total, flow);
    }

    #[test]
    fn larger_capacity_tried_first() {
        // four unit edges out of the source against four wide edges into the sink
        let mut graph = residual(
            6,
            &[(0, 1, 1), (0, 2, 1), (0, 3, 1), (0, 4, 1), (1, 5, 9), (2, 5, 9), (3, 5, 9), (4, 5, 9)],
        );
        let flow = Dinic::new(&mut graph, 0, 5).run();
        assert_eq!(flow, 4);
        let cut = extract_min_cut(&mut graph, 0, 5, flow);
        assert_eq!(ids(&graph, &cut), vec![0, 1, 2, 3]);

        let mut graph = residual(3, &[(0, 1, 2), (0, 1, 2), (1, 2, 4)]);
        let flow = Dinic::new(&mut graph, 0, 2).run();
        let cut = extract_min_cut(&mut graph, 0, 2, flow);
        assert_eq!(ids(&graph, &cut), vec![2]);
    }

    #[test]
    fn ties_go_to_smaller_id() {
        let mut graph = residual(3, &[(0, 1, 5), (1, 2, 5)]);
        let flow = Dinic::new(&mut graph, 0, 2).run();
        let cut = extract_min_cut(&mut graph, 0, 2, flow);
        assert_eq!(ids(&graph, &cut), vec![0]);
    }

    #[test]
    fn leaves_max_flow_in_place() {
        let mut graph = residual(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)]);
        let flow = Dinic::new(&mut graph, 0, 3).run();
        extract_min_cut(&mut graph, 0, 3, flow);

        assert!(graph.edges().iter().enumerate().all(|(e, _)| !graph.is_removed(e)));
        assert_eq!(graph.excess(3), flow);
        assert_eq!(graph.excess(1), 0);
        assert_eq!(graph.excess(2), 0);
    }

    #[test]
    fn zero_flow_gives_empty_cut() {
        let mut graph = residual(3, &[(0, 1, 5)]);
        let flow = Dinic::new(&mut graph, 0, 2).run();
        assert!(extract_min_cut(&mut graph, 0, 2, flow).is_empty());
    }
}
