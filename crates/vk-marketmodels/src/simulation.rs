//! Stepping a product along one path of curve states.

use crate::curve_state::CurveState;
use crate::multi_product::{CashFlowBuffer, MarketModelMultiProduct};
use vk_core::Result;

/// Drive `product` through `states`, one state per evolution step.
///
/// The product is reset first; the buffer is cleared before every step and a
/// copy of it is returned for each step taken.  Stepping stops when the
/// product reports completion.  If `states` runs out first the path is
/// truncated and only the steps taken are returned.
///
/// # Errors
/// Propagates the first error raised by the product or the curve states.
pub fn simulate_path<S: CurveState>(
    product: &mut dyn MarketModelMultiProduct,
    states: &[S],
) -> Result<Vec<CashFlowBuffer>> {
    let mut buffer = CashFlowBuffer::for_product(&*product);
    let mut steps = Vec::with_capacity(states.len());
    product.reset();
    for state in states {
        buffer.clear();
        let more = product.next_time_step(state, &mut buffer)?;
        steps.push(buffer.clone());
        if !more {
            return Ok(steps);
        }
    }
    tracing::debug!(steps = steps.len(), "path truncated before product completion");
    Ok(steps)
}
