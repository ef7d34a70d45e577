//! Minimum-cost flow by successive shortest augmenting paths.
//!
//! Shortest paths come from SPFA, which tolerates the negative costs of
//! reversal edges but not negative cycles. Negative cycles present in the
//! input are therefore canceled before the first augmentation. Augmenting
//! along a shortest path never creates a new negative cycle, and SPFA fails
//! with [`FlowError::NegativeCycle`] instead of looping if one shows up anyway.

use std::collections::VecDeque;

use petgraph::graph::DiGraph;
use tracing::{debug, info, trace};

use crate::basetypes::ResidualGraph;
use crate::error::{FlowError, Result};
use crate::options::MinCostFlowOptions;
use crate::{FlowEdge, FlowNum};

/// Distances and predecessor edges of one SPFA run.
#[derive(Debug, Clone)]
pub struct ShortestPaths<NUM: FlowNum> {
    pub dist: Vec<Option<NUM>>,
    pub parent_edge: Vec<Option<usize>>,
}

impl<NUM: FlowNum> ShortestPaths<NUM> {
    /// Edges of the recorded path from the search root to `target`.
    pub fn path_to(&self, graph: &ResidualGraph<NUM>, target: usize) -> Option<Vec<usize>> {
        self.dist[target]?;
        let mut path = Vec::new();
        let mut v = target;
        while let Some(e) = self.parent_edge[v] {
            path.push(e);
            if path.len() > graph.vertex_count() {
                return None;
            }
            v = graph.edge(e).from;
        }
        path.reverse();
        Some(path)
    }
}

/// SPFA from `source` over usable edges.
pub fn shortest_path<NUM: FlowNum>(
    graph: &ResidualGraph<NUM>,
    source: usize,
) -> Result<ShortestPaths<NUM>> {
    let n = graph.vertex_count();
    let mut dist: Vec<Option<NUM>> = vec![None; n];
    let mut parent_edge = vec![None; n];
    let mut on_queue = vec![false; n];
    let mut enqueued = vec![0usize; n];
    let mut queue = VecDeque::new();

    dist[source] = Some(NUM::zero());
    queue.push_back(source);
    on_queue[source] = true;
    enqueued[source] = 1;

    while let Some(u) = queue.pop_front() {
        on_queue[u] = false;
        let Some(du) = dist[u] else { continue };

        for &e in graph.adjacency(u) {
            if !graph.is_usable(e) {
                continue;
            }
            let edge = graph.edge(e);
            let candidate = du + edge.unit_cost();
            if dist[edge.to].map_or(true, |dv| candidate < dv) {
                dist[edge.to] = Some(candidate);
                parent_edge[edge.to] = Some(e);
                if !on_queue[edge.to] {
                    enqueued[edge.to] += 1;
                    if enqueued[edge.to] > n {
                        return Err(FlowError::NegativeCycle { vertex: edge.to });
                    }
                    queue.push_back(edge.to);
                    on_queue[edge.to] = true;
                }
            }
        }
    }

    Ok(ShortestPaths { dist, parent_edge })
}

// Floyd-Warshall over usable edges; returns a vertex whose self-distance
// drops below zero. Every finite entry is the cost of a real walk, so such a
// vertex lies on a negative closed walk.
fn negative_cycle_vertex<NUM: FlowNum>(graph: &ResidualGraph<NUM>) -> Option<usize> {
    let n = graph.vertex_count();
    let mut dist: Vec<Vec<Option<NUM>>> = vec![vec![None; n]; n];
    for (e, edge) in graph.edges().iter().enumerate() {
        if !graph.is_usable(e) {
            continue;
        }
        let cost = edge.unit_cost();
        if edge.from == edge.to && cost < NUM::zero() {
            return Some(edge.from);
        }
        let slot = &mut dist[edge.from][edge.to];
        if slot.map_or(true, |d| cost < d) {
            *slot = Some(cost);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(dik) = dist[i][k] else { continue };
            for j in 0..n {
                let Some(dkj) = dist[k][j] else { continue };
                let through = dik + dkj;
                if dist[i][j].map_or(true, |d| through < d) {
                    dist[i][j] = Some(through);
                    if i == j && through < NUM::zero() {
                        return Some(i);
                    }
                }
            }
        }
    }
    None
}

// Bellman-Ford from `start`; a vertex still relaxed in round n sits behind a
// negative cycle of the predecessor graph.
fn negative_cycle_from<NUM: FlowNum>(graph: &ResidualGraph<NUM>, start: usize) -> Option<Vec<usize>> {
    let n = graph.vertex_count();
    let mut dist: Vec<Option<NUM>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    dist[start] = Some(NUM::zero());

    let mut last = None;
    for _ in 0..n {
        last = None;
        for (e, edge) in graph.edges().iter().enumerate() {
            if !graph.is_usable(e) {
                continue;
            }
            let Some(du) = dist[edge.from] else { continue };
            let candidate = du + edge.unit_cost();
            if dist[edge.to].map_or(true, |dv| candidate < dv) {
                dist[edge.to] = Some(candidate);
                parent[edge.to] = Some(e);
                last = Some(edge.to);
            }
        }
        if last.is_none() {
            return None;
        }
    }

    let mut v = last?;
    for _ in 0..n {
        v = graph.edge(parent[v]?).from;
    }
    let mut cycle = Vec::new();
    let mut cur = v;
    loop {
        let e = parent[cur]?;
        cycle.push(e);
        cur = graph.edge(e).from;
        if cur == v {
            break;
        }
    }
    cycle.reverse();
    Some(cycle)
}

fn find_negative_cycle<NUM: FlowNum>(graph: &ResidualGraph<NUM>) -> Option<Vec<usize>> {
    let v = negative_cycle_vertex(graph)?;
    negative_cycle_from(graph, v)
}

/// Cancels every negative-cost cycle of usable edges and returns the change
/// in total cost (never positive).
///
/// With `saturate_negative_arcs`, and only if at least one cycle was
/// canceled, forward edges that still have negative cost and spare capacity
/// afterwards are filled to capacity as well.
pub fn cancel_negative_cycles<NUM: FlowNum>(
    graph: &mut ResidualGraph<NUM>,
    options: &MinCostFlowOptions<NUM>,
) -> NUM {
    let mut delta = NUM::zero();
    let mut canceled = 0usize;
    let has_negative_edge = (0..graph.edges().len())
        .any(|e| graph.is_usable(e) && graph.edge(e).unit_cost() < NUM::zero());

    if has_negative_edge {
        while let Some(cycle) = find_negative_cycle(graph) {
            let bottleneck = cycle
                .iter()
                .map(|&e| graph.edge(e).capacity)
                .min()
                .unwrap_or_else(NUM::zero);
            let cycle_cost = cycle
                .iter()
                .fold(NUM::zero(), |acc, &e| acc + graph.edge(e).unit_cost());
            for &e in &cycle {
                graph.push(e, bottleneck);
            }
            delta += cycle_cost * bottleneck;
            canceled += 1;
            debug!(len = cycle.len(), %cycle_cost, %bottleneck, "negative cycle canceled");
        }
        debug!(canceled, %delta, "cycle canceling done");
    }

    if options.saturate_negative_arcs && canceled > 0 {
        for i in 0..graph.originals().len() {
            let e = graph.originals()[i];
            let edge = graph.edge(e);
            let (amount, cost) = (edge.capacity, edge.unit_cost());
            if graph.is_usable(e) && cost < NUM::zero() {
                graph.push(e, amount);
                delta += amount * cost;
                debug!(edge = graph.edge(e).id, %amount, "negative edge saturated");
            }
        }
    }

    delta
}

/// Solved minimum-cost flow between two vertices.
#[derive(Debug, Clone)]
pub struct MinCostFlow<NUM: FlowNum> {
    residual: ResidualGraph<NUM>,
    source: usize,
    sink: usize,
    flow: NUM,
    cost: NUM,
    augmentations: usize,
}

impl<NUM: FlowNum> MinCostFlow<NUM> {
    /// Min-cost max-flow.
    pub fn new<N>(graph: &DiGraph<N, FlowEdge<NUM>>, source: usize, sink: usize) -> Result<Self> {
        Self::with_options(graph, source, sink, &MinCostFlowOptions::default())
    }

    /// Cheapest way to push `target` units, or as many as fit.
    pub fn with_target<N>(
        graph: &DiGraph<N, FlowEdge<NUM>>,
        source: usize,
        sink: usize,
        target: NUM,
    ) -> Result<Self> {
        let options = MinCostFlowOptions::default().with_target_flow(target);
        Self::with_options(graph, source, sink, &options)
    }

    pub fn with_options<N>(
        graph: &DiGraph<N, FlowEdge<NUM>>,
        source: usize,
        sink: usize,
        options: &MinCostFlowOptions<NUM>,
    ) -> Result<Self> {
        if let Some(target) = options.target_flow {
            if target < NUM::zero() {
                return Err(FlowError::InvalidTarget(target.to_string()));
            }
        }
        let mut residual = ResidualGraph::from_graph(graph, true)?;
        residual.check_terminals(source, sink)?;

        let mut cost = NUM::zero();
        if options.cancel_cycles {
            cost += cancel_negative_cycles(&mut residual, options);
        }

        let mut flow = NUM::zero();
        let mut augmentations = 0usize;
        loop {
            let remaining = options.target_flow.map(|target| target - flow);
            if remaining == Some(NUM::zero()) {
                break;
            }

            let paths = shortest_path(&residual, source)?;
            let Some(path_cost) = paths.dist[sink] else { break };
            let path = paths
                .path_to(&residual, sink)
                .ok_or(FlowError::NegativeCycle { vertex: sink })?;

            let mut amount = path
                .iter()
                .map(|&e| residual.edge(e).capacity)
                .min()
                .unwrap_or_else(NUM::zero);
            if let Some(remaining) = remaining {
                amount = amount.min(remaining);
            }
            for &e in &path {
                residual.push(e, amount);
            }

            cost += amount * path_cost;
            flow += amount;
            augmentations += 1;
            trace!(len = path.len(), %amount, %path_cost, "augmented");
        }

        info!(source, sink, %flow, %cost, augmentations, "min cost flow solved");
        Ok(MinCostFlow {
            residual,
            source,
            sink,
            flow,
            cost,
            augmentations,
        })
    }

    pub fn flow(&self) -> NUM {
        self.flow
    }

    pub fn cost(&self) -> NUM {
        self.cost
    }

    pub fn flow_and_cost(&self) -> (NUM, NUM) {
        (self.flow, self.cost)
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Number of shortest-path augmentations performed.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn residual_graph(&self) -> &ResidualGraph<NUM> {
        &self.residual
    }

    pub fn flow_graph(&self) -> DiGraph<u32, FlowEdge<NUM>> {
        self.residual.flow_graph()
    }
}
