use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::{FlowError, Result};
use crate::{FlowEdge, FlowNum};

/// One direction of a residual edge pair.
///
/// Both edges of a pair share `id`, the `EdgeIndex` of the input edge they
/// were built from. `reversal` indexes the twin in the same edge array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<NUM: FlowNum> {
    pub from: usize,
    pub to: usize,
    pub capacity: NUM,
    pub initial_capacity: NUM,
    /// `None` when the graph was built for max-flow only.
    pub cost: Option<NUM>,
    pub reversal: usize,
    pub id: usize,
    forward: bool,
}

impl<NUM: FlowNum> Edge<NUM> {
    pub fn flow(&self) -> NUM {
        self.initial_capacity - self.capacity
    }

    pub fn unit_cost(&self) -> NUM {
        self.cost.unwrap_or_else(NUM::zero)
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }
}

/// Forward/backward edge pairs in one contiguous array.
///
/// Input edge `k` owns indices `2k` (forward) and `2k + 1` (reversal).
/// Capacities only change through [`push`](Self::push), so
/// `capacity(e) + capacity(reversal(e))` is fixed for the graph's lifetime.
#[derive(Debug, Clone)]
pub struct ResidualGraph<NUM: FlowNum> {
    edges: Vec<Edge<NUM>>,
    adjacency: Vec<Vec<usize>>,
    removed: Vec<bool>,
    originals: Vec<usize>,
}

impl<NUM: FlowNum> ResidualGraph<NUM> {
    pub fn from_graph<N>(graph: &DiGraph<N, FlowEdge<NUM>>, with_costs: bool) -> Result<Self> {
        let node_count = graph.node_count();
        let mut edges = Vec::with_capacity(graph.edge_count() * 2);
        let mut adjacency = vec![Vec::new(); node_count];
        let mut originals = Vec::with_capacity(graph.edge_count());

        for arc in graph.edge_references() {
            let weight = arc.weight();
            if weight.capacity < NUM::zero() {
                return Err(FlowError::NegativeCapacity {
                    edge: arc.id().index(),
                    capacity: weight.capacity.to_string(),
                });
            }
            let (u, v) = (arc.source().index(), arc.target().index());
            let cost = if with_costs { Some(weight.cost) } else { None };
            let forward = edges.len();
            let backward = forward + 1;

            edges.push(Edge {
                from: u,
                to: v,
                capacity: weight.capacity,
                initial_capacity: weight.capacity,
                cost,
                reversal: backward,
                id: arc.id().index(),
                forward: true,
            });
            edges.push(Edge {
                from: v,
                to: u,
                capacity: NUM::zero(),
                initial_capacity: NUM::zero(),
                cost: cost.map(|c| -c),
                reversal: forward,
                id: arc.id().index(),
                forward: false,
            });
            adjacency[u].push(forward);
            adjacency[v].push(backward);
            originals.push(forward);
        }

        let removed = vec![false; edges.len()];
        Ok(ResidualGraph {
            edges,
            adjacency,
            removed,
            originals,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge(&self, e: usize) -> &Edge<NUM> {
        &self.edges[e]
    }

    pub fn edges(&self) -> &[Edge<NUM>] {
        &self.edges
    }

    /// Indices of the edges leaving `v`, forward and backward alike.
    pub fn adjacency(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    /// Indices of the forward edges, in input order.
    pub fn originals(&self) -> &[usize] {
        &self.originals
    }

    pub fn original_edges(&self) -> impl Iterator<Item = &Edge<NUM>> + '_ {
        self.originals.iter().map(move |&e| &self.edges[e])
    }

    /// Moves `amount` units of residual capacity from `e` to its reversal.
    pub fn push(&mut self, e: usize, amount: NUM) {
        self.edges[e].capacity -= amount;
        let rev = self.edges[e].reversal;
        self.edges[rev].capacity += amount;
    }

    /// Drops all flow: every edge gets its initial capacity back.
    pub fn reset(&mut self) {
        for edge in self.edges.iter_mut() {
            edge.capacity = edge.initial_capacity;
        }
    }

    pub fn set_removed(&mut self, e: usize, removed: bool) {
        self.removed[e] = removed;
    }

    pub fn is_removed(&self, e: usize) -> bool {
        self.removed[e]
    }

    pub fn clear_removed(&mut self) {
        self.removed.fill(false);
    }

    /// Positive residual capacity and not logically removed.
    pub fn is_usable(&self, e: usize) -> bool {
        !self.removed[e] && self.edges[e].capacity > NUM::zero()
    }

    /// Net flow entering `v` over the forward edges.
    pub fn excess(&self, v: usize) -> NUM {
        let mut excess = NUM::zero();
        for edge in self.original_edges() {
            if edge.to == v {
                excess += edge.flow();
            }
            if edge.from == v {
                excess -= edge.flow();
            }
        }
        excess
    }

    /// Sum of `flow * cost` over the forward edges.
    pub fn total_cost(&self) -> NUM {
        self.original_edges()
            .fold(NUM::zero(), |acc, edge| acc + edge.flow() * edge.unit_cost())
    }

    /// Forward edges carrying positive flow, as a petgraph graph whose node
    /// weights are the vertex indices.
    pub fn flow_graph(&self) -> DiGraph<u32, FlowEdge<NUM>> {
        let mut graph = DiGraph::with_capacity(self.vertex_count(), self.originals.len());
        for v in 0..self.vertex_count() {
            graph.add_node(v as u32);
        }
        for edge in self.original_edges() {
            if edge.flow() > NUM::zero() {
                graph.add_edge(
                    NodeIndex::new(edge.from),
                    NodeIndex::new(edge.to),
                    FlowEdge {
                        capacity: edge.initial_capacity,
                        cost: edge.unit_cost(),
                        flow: edge.flow(),
                    },
                );
            }
        }
        graph
    }

    pub(crate) fn check_vertex(&self, vertex: usize, role: &'static str) -> Result<()> {
        if vertex >= self.vertex_count() {
            return Err(FlowError::VertexOutOfRange {
                role,
                vertex,
                vertex_count: self.vertex_count(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_terminals(&self, source: usize, sink: usize) -> Result<()> {
        self.check_vertex(source, "source")?;
        self.check_vertex(sink, "sink")?;
        if source == sink {
            return Err(FlowError::SourceIsSink(source));
        }
        Ok(())
    }
}
