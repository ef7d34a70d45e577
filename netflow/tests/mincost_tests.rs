use netflow::{cancel_negative_cycles, FlowEdge, MinCostFlow, MinCostFlowOptions, ResidualGraph};
use petgraph::graph::{DiGraph, NodeIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Arc = (usize, usize, i64, i64);

fn graph_from(n: usize, arcs: &[Arc]) -> DiGraph<u32, FlowEdge<i64>> {
    let mut graph = DiGraph::new();
    for i in 0..n {
        graph.add_node(i as u32);
    }
    for &(u, v, cap, cost) in arcs {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), FlowEdge::new(cap, cost));
    }
    graph
}

fn random_arcs(rng: &mut StdRng, n: usize, m: usize, min_cost: i64) -> Vec<Arc> {
    (0..m)
        .map(|_| {
            (
                rng.gen_range(0..n),
                rng.gen_range(0..n),
                rng.gen_range(0..=2),
                rng.gen_range(min_cost..=6),
            )
        })
        .collect()
}

/// Cheapest cost for every feasible flow value, by enumerating all integer
/// edge flows. Index is the flow value.
fn brute_force(n: usize, arcs: &[Arc], source: usize, sink: usize) -> Vec<Option<i64>> {
    let mut best: Vec<Option<i64>> = Vec::new();
    let mut flows = vec![0i64; arcs.len()];
    loop {
        let mut excess = vec![0i64; n];
        let mut cost = 0;
        for (&(u, v, _, c), &f) in arcs.iter().zip(&flows) {
            excess[u] -= f;
            excess[v] += f;
            cost += f * c;
        }
        let balanced = (0..n).all(|v| v == source || v == sink || excess[v] == 0);
        if balanced && excess[sink] >= 0 {
            let value = excess[sink] as usize;
            if best.len() <= value {
                best.resize(value + 1, None);
            }
            best[value] = Some(best[value].map_or(cost, |b: i64| b.min(cost)));
        }

        // mixed-radix increment
        let mut i = 0;
        loop {
            if i == arcs.len() {
                return best;
            }
            if flows[i] < arcs[i].2 {
                flows[i] += 1;
                break;
            }
            flows[i] = 0;
            i += 1;
        }
    }
}

fn check_against_brute_force(min_cost: i64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for round in 0..60 {
        let n = rng.gen_range(3..=6);
        let m = rng.gen_range(1..=7);
        let arcs = random_arcs(&mut rng, n, m, min_cost);
        let graph = graph_from(n, &arcs);
        let (source, sink) = (0, n - 1);
        let best = brute_force(n, &arcs, source, sink);

        let solved = MinCostFlow::new(&graph, source, sink).unwrap();
        let max_value = best.len() - 1;
        assert_eq!(solved.flow() as usize, max_value, "round {round}: {arcs:?}");
        assert_eq!(Some(solved.cost()), best[max_value], "round {round}: {arcs:?}");

        for target in 0..max_value {
            let partial = MinCostFlow::with_target(&graph, source, sink, target as i64).unwrap();
            assert_eq!(partial.flow() as usize, target);
            assert_eq!(
                Some(partial.cost()),
                best[target],
                "round {round}, target {target}: {arcs:?}"
            );
        }
    }
}

#[test]
fn matches_brute_force_with_nonnegative_costs() {
    check_against_brute_force(0, 7);
}

#[test]
fn matches_brute_force_with_negative_costs() {
    check_against_brute_force(-3, 11);
}

#[test]
fn three_cycle_canceled_with_zero_target() {
    // cycle 0 -> 1 -> 2 -> 0 sits away from the terminals 3 and 4
    let arcs = [
        (0, 1, 5, -2),
        (1, 2, 5, -2),
        (2, 0, 5, -2),
        (3, 4, 2, 1),
    ];
    let graph = graph_from(5, &arcs);
    let solved = MinCostFlow::with_target(&graph, 3, 4, 0).unwrap();

    let cycle_cost: i64 = arcs[..3].iter().map(|a| a.3).sum();
    let bottleneck = arcs[..3].iter().map(|a| a.2).min().unwrap();
    assert_eq!(cycle_cost, 3 * -2);
    assert_eq!(solved.flow(), 0);
    assert_eq!(solved.cost(), cycle_cost * bottleneck);
    assert_eq!(brute_force(5, &arcs, 3, 4)[0], Some(solved.cost()));

    let circulated: Vec<_> = solved.flow_graph().edge_weights().map(|w| w.flow).collect();
    assert_eq!(circulated, vec![5, 5, 5]);
}

#[test]
fn canceling_is_exhaustive() {
    let graph = graph_from(
        4,
        &[(0, 1, 2, -1), (1, 0, 3, -1), (1, 2, 4, 1), (2, 3, 4, -4), (3, 1, 1, 1)],
    );
    let mut residual = ResidualGraph::from_graph(&graph, true).unwrap();
    let options = MinCostFlowOptions::default();
    let delta = cancel_negative_cycles(&mut residual, &options);

    assert_eq!(delta, residual.total_cost());
    assert!(delta < 0);
    assert_eq!(cancel_negative_cycles(&mut residual, &options), 0);
    for v in 0..4 {
        assert_eq!(residual.excess(v), 0);
    }
}
