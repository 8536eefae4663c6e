use crate::error::Result;
use crate::graph::Capacity;
use crate::max_flow::OperationCounts;
use crate::residual::{PositiveResidual, ResidualFlowGraph};
use crate::traversal::TraversalState;

/// Augments along shortest residual paths until the sink is cut off.
///
/// Each round is a plain breadth-first traversal of the residual graph,
/// restricted to edges with capacity left. The state is reset between rounds.
pub fn edmonds_karp(
    residual: &mut ResidualFlowGraph,
    source: usize,
    sink: usize,
    counts: &mut OperationCounts,
) -> Result<Capacity> {
    if source == sink {
        return Ok(0);
    }

    let mut state = TraversalState::new(residual.vertex_count());

    loop {
        state.reset();
        residual
            .graph()
            .breadth_first(source, &mut state, &mut PositiveResidual);

        let path = state.path(source, sink);
        if path.is_empty() {
            break;
        }

        let volume = residual.bottleneck(&path)?;
        residual.augment(&path, volume)?;
        counts.augmentations += 1;
        log::trace!("Augmenting {} along {:?}", volume, path);
    }

    Ok(residual.net_flow_out(source))
}
