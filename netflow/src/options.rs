//! Solver options.

use crate::FlowNum;

/// Options for [`MaxFlow`](crate::MaxFlow).
#[derive(Debug, Clone, Default)]
pub struct MaxFlowOptions {
    /// Extract a minimum-cardinality cut after solving.
    pub min_cut: bool,
}

impl MaxFlowOptions {
    pub fn with_min_cut() -> Self {
        Self { min_cut: true }
    }
}

/// Options for [`MinCostFlow`](crate::MinCostFlow).
#[derive(Debug, Clone)]
pub struct MinCostFlowOptions<NUM: FlowNum> {
    /// Stop once this much flow has been pushed. `None` means min-cost max-flow.
    pub target_flow: Option<NUM>,
    /// Run the negative-cycle canceling pass before augmenting.
    pub cancel_cycles: bool,
    /// After canceling, saturate every remaining usable negative-cost edge
    /// and book its cost. Breaks flow conservation at the endpoints of those
    /// edges.
    pub saturate_negative_arcs: bool,
}

impl<NUM: FlowNum> Default for MinCostFlowOptions<NUM> {
    fn default() -> Self {
        Self {
            target_flow: None,
            cancel_cycles: true,
            saturate_negative_arcs: false,
        }
    }
}

impl<NUM: FlowNum> MinCostFlowOptions<NUM> {
    pub fn with_target_flow(mut self, target: NUM) -> Self {
        self.target_flow = Some(target);
        self
    }

    pub fn with_negative_arc_saturation(mut self) -> Self {
        self.saturate_negative_arcs = true;
        self
    }
}
