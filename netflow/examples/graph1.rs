use netflow::{FlowEdge, MaxFlow, MaxFlowOptions, MinCostFlow};
use petgraph::dot::Dot;
use petgraph::graph::*;
use std::time::Instant;

fn main() -> netflow::Result<()> {
    let mut graph = DiGraph::<u32, FlowEdge<i64>>::new();
    let n0 = graph.add_node(0);
    let n1 = graph.add_node(1);
    let n2 = graph.add_node(2);
    let n3 = graph.add_node(3);
    let n4 = graph.add_node(4);
    let n5 = graph.add_node(5);
    graph.add_edge(n0, n1, FlowEdge::new(13, 1));
    graph.add_edge(n0, n3, FlowEdge::new(11, 1));
    graph.add_edge(n1, n2, FlowEdge::new(7, 1));
    graph.add_edge(n1, n4, FlowEdge::new(9, 1));
    graph.add_edge(n3, n2, FlowEdge::new(3, 1));
    graph.add_edge(n3, n4, FlowEdge::new(11, 1));
    graph.add_edge(n2, n5, FlowEdge::new(17, 1));
    graph.add_edge(n4, n5, FlowEdge::new(15, 1));

    let start = Instant::now();
    let max_flow = MaxFlow::with_options(&graph, 0, 5, &MaxFlowOptions::with_min_cut())?;
    println!("max flow = {}, time = {}us", max_flow.max_flow(), start.elapsed().as_micros());
    for edge in max_flow.min_cut_edges().unwrap_or_default() {
        println!("cut {} -> {} ({})", edge.from, edge.to, edge.initial_capacity);
    }

    let start = Instant::now();
    let min_cost = MinCostFlow::with_target(&graph, 0, 5, 16)?;
    println!(
        "flow = {}, cost = {}, time = {}us",
        min_cost.flow(),
        min_cost.cost(),
        start.elapsed().as_micros()
    );
    println!("{:?}", Dot::new(&min_cost.flow_graph()));
    Ok(())
}
