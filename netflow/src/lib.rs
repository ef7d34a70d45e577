//! Network-flow engine over petgraph graphs.
//!
//! * [`MaxFlow`] runs Dinic's blocking-flow algorithm and can extract a
//!   minimum-cardinality cut by re-solving with edges removed.
//! * [`MinCostFlow`] cancels negative cycles up front, then augments along
//!   SPFA shortest paths until the sink is unreachable or a target flow is met.
//!
//! Both solvers work on a [`ResidualGraph`] built from a
//! `DiGraph<N, FlowEdge<NUM>>`; capacities and costs are integers.
//!
//! ```
//! use netflow::{FlowEdge, MaxFlow};
//! use petgraph::graph::DiGraph;
//!
//! let mut graph = DiGraph::<u32, FlowEdge<i64>>::new();
//! let s = graph.add_node(0);
//! let a = graph.add_node(1);
//! let t = graph.add_node(2);
//! graph.add_edge(s, a, FlowEdge::with_capacity(4));
//! graph.add_edge(a, t, FlowEdge::with_capacity(3));
//!
//! let solved = MaxFlow::new(&graph, 0, 2).unwrap();
//! assert_eq!(solved.max_flow(), 3);
//! ```

use num_traits::{PrimInt, Signed};

pub mod basetypes;
pub mod error;
pub mod maxflow;
pub mod mincost;
pub mod mincut;
pub mod options;

pub use basetypes::{Edge, ResidualGraph};
pub use error::{FlowError, Result};
pub use maxflow::{Dinic, MaxFlow};
pub use mincost::{cancel_negative_cycles, shortest_path, MinCostFlow, ShortestPaths};
pub use mincut::extract_min_cut;
pub use options::{MaxFlowOptions, MinCostFlowOptions};

/// Edge weight of the graphs handed to the solvers.
///
/// `flow` is ignored on input; graphs produced by `flow_graph()` carry the
/// computed flow in it.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct FlowEdge<NUM: FlowNum> {
    pub capacity: NUM,
    pub cost: NUM,
    pub flow: NUM,
}

impl<NUM: FlowNum> FlowEdge<NUM> {
    pub fn new(capacity: NUM, cost: NUM) -> Self {
        FlowEdge {
            capacity,
            cost,
            flow: NUM::zero(),
        }
    }

    /// Zero-cost edge, for graphs that only feed the max-flow solver.
    pub fn with_capacity(capacity: NUM) -> Self {
        Self::new(capacity, NUM::zero())
    }
}

/// Signed primitive integer usable as a capacity and cost.
pub trait FlowNum:
    PrimInt
    + Signed
    + std::fmt::Debug
    + std::fmt::Display
    + std::ops::AddAssign
    + std::ops::SubAssign
    + Send
    + Sync
    + 'static
{
}

impl FlowNum for i32 {}
impl FlowNum for i64 {}
impl FlowNum for i128 {}
impl FlowNum for isize {}
