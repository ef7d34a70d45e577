use netflow::{FlowEdge, MaxFlow, MaxFlowOptions};
use petgraph::graph::{DiGraph, NodeIndex};

fn graph_from(n: usize, arcs: &[(usize, usize, i64)]) -> DiGraph<u32, FlowEdge<i64>> {
    let mut graph = DiGraph::new();
    for i in 0..n {
        graph.add_node(i as u32);
    }
    for &(u, v, cap) in arcs {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), FlowEdge::with_capacity(cap));
    }
    graph
}

#[test]
fn diamond_flow_equals_cut() {
    let graph = graph_from(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)]);
    let solved = MaxFlow::with_options(&graph, 0, 3, &MaxFlowOptions::with_min_cut()).unwrap();

    assert_eq!(solved.max_flow(), 4);
    assert_eq!(solved.min_cut_capacity(), Some(4));
    let cut: Vec<_> = solved
        .min_cut_edges()
        .unwrap()
        .iter()
        .map(|e| (e.from, e.to))
        .collect();
    assert_eq!(cut, vec![(0, 2), (1, 3)]);
}

#[test]
fn flow_graph_reports_used_edges() {
    let graph = graph_from(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (2, 1, 9)]);
    let solved = MaxFlow::new(&graph, 0, 3).unwrap();
    let flow = solved.flow_graph();

    assert_eq!(flow.node_count(), 4);
    let into_sink: i64 = flow
        .edges_directed(NodeIndex::new(3), petgraph::Direction::Incoming)
        .map(|e| e.weight().flow)
        .sum();
    assert_eq!(into_sink, solved.max_flow());
    assert!(flow.edge_weights().all(|w| w.flow > 0 && w.flow <= w.capacity));
}

#[test]
fn classic_six_node_graph() {
    let graph = graph_from(
        6,
        &[
            (0, 1, 13),
            (0, 3, 11),
            (1, 2, 7),
            (1, 4, 9),
            (3, 2, 3),
            (3, 4, 11),
            (2, 5, 17),
            (4, 5, 15),
        ],
    );
    let solved = MaxFlow::with_options(&graph, 0, 5, &MaxFlowOptions::with_min_cut()).unwrap();
    assert_eq!(solved.max_flow(), 24);
    assert_eq!(solved.min_cut_capacity(), Some(24));
    assert_eq!(solved.source(), 0);
    assert_eq!(solved.sink(), 5);
}

#[test]
fn zero_capacity_graph() {
    let graph = graph_from(3, &[(0, 1, 0), (1, 2, 0)]);
    let solved = MaxFlow::with_options(&graph, 0, 2, &MaxFlowOptions::with_min_cut()).unwrap();
    assert_eq!(solved.max_flow(), 0);
    assert_eq!(solved.min_cut_edges(), Some(&[][..]));
}

#[test]
fn works_with_i32_capacities() {
    let mut graph = DiGraph::<(), FlowEdge<i32>>::new();
    let s = graph.add_node(());
    let t = graph.add_node(());
    graph.add_edge(s, t, FlowEdge::with_capacity(i32::MAX / 2));
    graph.add_edge(s, t, FlowEdge::with_capacity(5));
    assert_eq!(MaxFlow::new(&graph, 0, 1).unwrap().max_flow(), i32::MAX / 2 + 5);
}
