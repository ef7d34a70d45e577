use anyhow::{anyhow, bail, Context, Result};
use netflow::FlowEdge;
use petgraph::graph::{DiGraph, NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    Max,
    Min,
}

/// A parsed DIMACS instance with 0-based vertices.
#[derive(Debug)]
pub struct Instance {
    pub kind: ProblemKind,
    pub graph: DiGraph<u32, FlowEdge<i64>>,
    pub source: usize,
    pub sink: usize,
    /// Total supply of a min-cost instance.
    pub target: Option<i64>,
}

fn field<T: std::str::FromStr>(fields: &[&str], i: usize, what: &str) -> Result<T> {
    fields
        .get(i)
        .ok_or_else(|| anyhow!("missing {what}"))?
        .parse::<T>()
        .map_err(|_| anyhow!("bad {what}: {:?}", fields[i]))
}

fn node(fields: &[&str], i: usize, node_count: usize) -> Result<usize> {
    let id: usize = field(fields, i, "node id")?;
    if id == 0 || id > node_count {
        bail!("node id {id} outside 1..={node_count}");
    }
    Ok(id - 1)
}

pub fn parse_dimacs(contents: &str) -> Result<Instance> {
    let mut kind = None;
    let mut graph = DiGraph::<u32, FlowEdge<i64>>::new();
    let mut source = None;
    let mut sink = None;
    let mut supplies: Vec<(usize, i64)> = vec![];
    let mut problem_line = 0;

    for (no, line) in contents.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let parsed: Result<()> = (|| {
            match fields.first().copied() {
                None | Some("c") => {}
                Some("p") => {
                    if kind.is_some() {
                        bail!("second problem line");
                    }
                    kind = Some(match fields.get(1).copied() {
                        Some("max") => ProblemKind::Max,
                        Some("min") => ProblemKind::Min,
                        other => bail!("unsupported problem type {other:?}"),
                    });
                    problem_line = no + 1;
                    let nodes: u32 = field(&fields, 2, "node count")?;
                    for i in 0..nodes {
                        graph.add_node(i);
                    }
                }
                Some("n") => {
                    let Some(kind) = kind else { bail!("node line before problem line") };
                    let v = node(&fields, 1, graph.node_count())?;
                    match kind {
                        ProblemKind::Max => match fields.get(2).copied() {
                            Some("s") => source = Some(v),
                            Some("t") => sink = Some(v),
                            other => bail!("bad node designator {other:?}"),
                        },
                        ProblemKind::Min => {
                            let supply: i64 = field(&fields, 2, "supply")?;
                            if supply != 0 {
                                supplies.push((v, supply));
                            }
                        }
                    }
                }
                Some("a") => {
                    let Some(kind) = kind else { bail!("arc line before problem line") };
                    let n = graph.node_count();
                    let (u, v) = (node(&fields, 1, n)?, node(&fields, 2, n)?);
                    let weight: FlowEdge<i64> = match kind {
                        ProblemKind::Max => FlowEdge::with_capacity(field(&fields, 3, "capacity")?),
                        ProblemKind::Min => {
                            let low: i64 = field(&fields, 3, "lower bound")?;
                            if low != 0 {
                                bail!("non-zero lower bound {low}");
                            }
                            FlowEdge::new(field(&fields, 4, "capacity")?, field(&fields, 5, "cost")?)
                        }
                    };
                    graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), weight);
                }
                Some(other) => bail!("unknown line type {other:?}"),
            }
            Ok(())
        })();
        parsed.with_context(|| format!("line {}", no + 1))?;
    }

    let kind = kind.ok_or_else(|| anyhow!("missing problem line"))?;
    match kind {
        ProblemKind::Max => Ok(Instance {
            kind,
            source: source.ok_or_else(|| anyhow!("missing source designator"))?,
            sink: sink.ok_or_else(|| anyhow!("missing sink designator"))?,
            graph,
            target: None,
        }),
        ProblemKind::Min => attach_terminals(graph, &supplies)
            .with_context(|| format!("problem on line {problem_line}")),
    }
}

// Supplies must balance demands. A single supply/demand pair maps onto
// source and sink directly; anything else gets a super source and super sink.
fn attach_terminals(
    mut graph: DiGraph<u32, FlowEdge<i64>>,
    supplies: &[(usize, i64)],
) -> Result<Instance> {
    let sources: Vec<_> = supplies.iter().filter(|(_, s)| *s > 0).copied().collect();
    let sinks: Vec<_> = supplies.iter().filter(|(_, s)| *s < 0).copied().collect();
    if sources.is_empty() || sinks.is_empty() {
        bail!("min-cost instance needs at least one supply and one demand node");
    }
    let total: i64 = sources.iter().map(|(_, s)| s).sum();
    let demand: i64 = sinks.iter().map(|(_, d)| -d).sum();
    if total != demand {
        bail!("unbalanced instance: supply {total}, demand {demand}");
    }

    if let ([(source, _)], [(sink, _)]) = (sources.as_slice(), sinks.as_slice()) {
        return Ok(Instance {
            kind: ProblemKind::Min,
            graph,
            source: *source,
            sink: *sink,
            target: Some(total),
        });
    }

    let super_source = graph.add_node(graph.node_count() as u32);
    let super_sink = graph.add_node(graph.node_count() as u32);
    for &(v, supply) in &sources {
        graph.add_edge(super_source, NodeIndex::new(v), FlowEdge::new(supply, 0));
    }
    for &(v, demand) in &sinks {
        graph.add_edge(NodeIndex::new(v), super_sink, FlowEdge::new(-demand, 0));
    }
    Ok(Instance {
        kind: ProblemKind::Min,
        graph,
        source: super_source.index(),
        sink: super_sink.index(),
        target: Some(total),
    })
}
