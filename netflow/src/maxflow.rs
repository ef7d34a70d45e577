//! Maximum flow via Dinic's blocking-flow algorithm.

use std::collections::VecDeque;

use petgraph::graph::DiGraph;
use tracing::{debug, info, trace};

use crate::basetypes::{Edge, ResidualGraph};
use crate::error::Result;
use crate::mincut::extract_min_cut;
use crate::options::MaxFlowOptions;
use crate::{FlowEdge, FlowNum};

const UNREACHED: usize = usize::MAX;

/// One Dinic run over a borrowed residual graph.
///
/// `run` does not reset the graph; it returns the flow pushed on top of
/// whatever the graph already carries.
pub struct Dinic<'g, NUM: FlowNum> {
    graph: &'g mut ResidualGraph<NUM>,
    source: usize,
    sink: usize,
    level: Vec<usize>,
    cursor: Vec<usize>,
    path: Vec<usize>,
}

impl<'g, NUM: FlowNum> Dinic<'g, NUM> {
    pub fn new(graph: &'g mut ResidualGraph<NUM>, source: usize, sink: usize) -> Self {
        let n = graph.vertex_count();
        Dinic {
            graph,
            source,
            sink,
            level: vec![UNREACHED; n],
            cursor: vec![0; n],
            path: Vec::new(),
        }
    }

    /// Builds the level graph. Returns false once the sink is unreachable.
    pub fn bfs(&mut self) -> bool {
        self.level.fill(UNREACHED);
        self.level[self.source] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(self.source);

        while let Some(u) = queue.pop_front() {
            if u == self.sink {
                break;
            }
            for &e in self.graph.adjacency(u) {
                if !self.graph.is_usable(e) {
                    continue;
                }
                let v = self.graph.edge(e).to;
                if self.level[v] == UNREACHED {
                    self.level[v] = self.level[u] + 1;
                    queue.push_back(v);
                }
            }
        }
        self.level[self.sink] != UNREACHED
    }

    fn next_admissible(&mut self, u: usize) -> Option<usize> {
        let adjacency = self.graph.adjacency(u);
        while self.cursor[u] < adjacency.len() {
            let e = adjacency[self.cursor[u]];
            if self.graph.is_usable(e) && self.level[self.graph.edge(e).to] == self.level[u] + 1 {
                return Some(e);
            }
            self.cursor[u] += 1;
        }
        None
    }

    /// Pushes flow along one source-sink path of the level graph and returns
    /// its bottleneck, or zero when the phase is blocked.
    pub fn augment(&mut self) -> NUM {
        self.path.clear();
        let mut u = self.source;
        loop {
            if u == self.sink {
                let bottleneck = self
                    .path
                    .iter()
                    .map(|&e| self.graph.edge(e).capacity)
                    .min()
                    .unwrap_or_else(NUM::zero);
                for &e in &self.path {
                    self.graph.push(e, bottleneck);
                }
                trace!(len = self.path.len(), %bottleneck, "augmenting path");
                return bottleneck;
            }

            match self.next_admissible(u) {
                Some(e) => {
                    self.path.push(e);
                    u = self.graph.edge(e).to;
                }
                // dead end: step back and skip the edge that led here
                None => match self.path.pop() {
                    Some(e) => {
                        u = self.graph.edge(e).from;
                        self.cursor[u] += 1;
                    }
                    None => return NUM::zero(),
                },
            }
        }
    }

    pub fn run(&mut self) -> NUM {
        let mut total = NUM::zero();
        let mut phase = 0usize;
        while self.bfs() {
            self.cursor.fill(0);
            phase += 1;
            loop {
                let pushed = self.augment();
                if pushed == NUM::zero() {
                    break;
                }
                total += pushed;
            }
            debug!(phase, sink_level = self.level[self.sink], flow = %total, "dinic phase");
        }
        total
    }
}

/// Solved maximum flow between two vertices.
#[derive(Debug, Clone)]
pub struct MaxFlow<NUM: FlowNum> {
    residual: ResidualGraph<NUM>,
    source: usize,
    sink: usize,
    max_flow: NUM,
    min_cut: Option<Vec<Edge<NUM>>>,
}

impl<NUM: FlowNum> MaxFlow<NUM> {
    pub fn new<N>(graph: &DiGraph<N, FlowEdge<NUM>>, source: usize, sink: usize) -> Result<Self> {
        Self::with_options(graph, source, sink, &MaxFlowOptions::default())
    }

    pub fn with_options<N>(
        graph: &DiGraph<N, FlowEdge<NUM>>,
        source: usize,
        sink: usize,
        options: &MaxFlowOptions,
    ) -> Result<Self> {
        let mut residual = ResidualGraph::from_graph(graph, false)?;
        residual.check_terminals(source, sink)?;

        let max_flow = Dinic::new(&mut residual, source, sink).run();
        let min_cut = if options.min_cut {
            let cut = extract_min_cut(&mut residual, source, sink, max_flow);
            Some(cut.into_iter().map(|e| residual.edge(e).clone()).collect())
        } else {
            None
        };
        info!(source, sink, %max_flow, "max flow solved");

        Ok(MaxFlow {
            residual,
            source,
            sink,
            max_flow,
            min_cut,
        })
    }

    pub fn max_flow(&self) -> NUM {
        self.max_flow
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Cut edges in acceptance order; `None` unless requested.
    pub fn min_cut_edges(&self) -> Option<&[Edge<NUM>]> {
        self.min_cut.as_deref()
    }

    pub fn min_cut_capacity(&self) -> Option<NUM> {
        self.min_cut.as_ref().map(|cut| {
            cut.iter()
                .fold(NUM::zero(), |acc, e| acc + e.initial_capacity)
        })
    }

    pub fn residual_graph(&self) -> &ResidualGraph<NUM> {
        &self.residual
    }

    pub fn flow_graph(&self) -> DiGraph<u32, FlowEdge<NUM>> {
        self.residual.flow_graph()
    }

    /// Resets the residual graph and solves it again from scratch.
    pub fn resolve(&mut self) -> NUM {
        self.residual.reset();
        let value = Dinic::new(&mut self.residual, self.source, self.sink).run();
        self.max_flow = value;
        value
    }
}
