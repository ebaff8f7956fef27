//! Several multi-step products driven as one.

use crate::curve_state::CurveState;
use crate::evolution_description::EvolutionDescription;
use crate::multi_product::{CashFlow, CashFlowBuffer, MarketModelMultiProduct};
use vk_core::{ensure, ensure_post, Result, Size, Time};

#[derive(Debug, Clone)]
struct Component {
    product: Box<dyn MarketModelMultiProduct>,
    // component time index -> composite time index
    time_indices: Vec<Size>,
    offset: Size,
    scratch: CashFlowBuffer,
    done: bool,
}

/// A composite of products sharing one [`EvolutionDescription`].
///
/// Component products are concatenated: product `p` of component `k` is
/// product `offset_k + p` of the composite.  Payment times are merged into
/// their sorted union and every recorded time index is remapped onto it.  A
/// component that has finished is skipped; the composite is done when all of
/// its components are.  A step either records the flows of every component or,
/// if one of them fails, leaves the caller's buffer untouched.
#[derive(Debug, Clone)]
pub struct MultiProductComposite {
    components: Vec<Component>,
    evolution: EvolutionDescription,
    payment_times: Vec<Time>,
    number_of_products: Size,
    max_flows: Size,
}

impl MultiProductComposite {
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) if `products`
    /// is empty or the products disagree on their evolution.
    pub fn new(products: Vec<Box<dyn MarketModelMultiProduct>>) -> Result<Self> {
        ensure!(!products.is_empty(), "no products given");
        let evolution = products[0].evolution().clone();
        for (k, product) in products.iter().enumerate().skip(1) {
            ensure!(
                *product.evolution() == evolution,
                "product {k} has a different evolution"
            );
        }

        let mut payment_times: Vec<Time> = products
            .iter()
            .flat_map(|p| p.possible_cash_flow_times().iter().copied())
            .collect();
        payment_times.sort_by(f64::total_cmp);
        payment_times.dedup();

        let mut offset = 0;
        let mut max_flows = 0;
        let components: Vec<Component> = products
            .into_iter()
            .map(|product| {
                let time_indices = product
                    .possible_cash_flow_times()
                    .iter()
                    .map(|&t| payment_times.partition_point(|&u| u < t))
                    .collect();
                let component = Component {
                    scratch: CashFlowBuffer::for_product(product.as_ref()),
                    time_indices,
                    offset,
                    done: false,
                    product,
                };
                offset += component.product.number_of_products();
                max_flows =
                    max_flows.max(component.product.max_number_of_cash_flows_per_product_per_step());
                component
            })
            .collect();

        Ok(Self {
            components,
            evolution,
            payment_times,
            number_of_products: offset,
            max_flows,
        })
    }

    /// Number of component products.
    pub fn number_of_components(&self) -> Size {
        self.components.len()
    }

    /// Index of the first composite product belonging to component `k`.
    pub fn offset(&self, k: Size) -> Option<Size> {
        self.components.get(k).map(|c| c.offset)
    }

    fn is_done(&self) -> bool {
        self.components.iter().all(|c| c.done)
    }
}

impl MarketModelMultiProduct for MultiProductComposite {
    fn evolution(&self) -> &EvolutionDescription {
        &self.evolution
    }

    fn possible_cash_flow_times(&self) -> &[Time] {
        &self.payment_times
    }

    fn number_of_products(&self) -> Size {
        self.number_of_products
    }

    fn max_number_of_cash_flows_per_product_per_step(&self) -> Size {
        self.max_flows
    }

    fn reset(&mut self) {
        for c in &mut self.components {
            c.product.reset();
            c.done = false;
        }
    }

    fn next_time_step(
        &mut self,
        state: &dyn CurveState,
        buffer: &mut CashFlowBuffer,
    ) -> Result<bool> {
        ensure_post!(!self.is_done(), "composite stepped after completion");
        let mut finished = Vec::with_capacity(self.components.len());
        for c in self.components.iter_mut().filter(|c| !c.done) {
            c.scratch.clear();
            finished.push(!c.product.next_time_step(state, &mut c.scratch)?);
        }
        for (c, done) in self
            .components
            .iter_mut()
            .filter(|c| !c.done)
            .zip(finished)
        {
            c.done = done;
            for p in 0..c.scratch.number_of_products() {
                for flow in c.scratch.flows(p) {
                    buffer.record(
                        c.offset + p,
                        CashFlow {
                            time_index: c.time_indices[flow.time_index],
                            amount: flow.amount,
                        },
                    )?;
                }
            }
        }
        Ok(!self.is_done())
    }

    fn clone_product(&self) -> Box<dyn MarketModelMultiProduct> {
        Box::new(self.clone())
    }
}
