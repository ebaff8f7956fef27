//! `CurveState`: the forward-rate curve at one simulation step.

use vk_core::{DiscountFactor, Rate, Real, Result, Size, Time};

/// A read-only snapshot of the forward curve over a fixed rate grid.
///
/// Products read curve states but never modify them; the simulation driver
/// owns and updates them.  Accessors fail for rates that are no longer alive
/// or that the state has not been set for.
pub trait CurveState: std::fmt::Debug + Send + Sync {
    /// The rate grid `T_0 < … < T_n`.
    fn rate_times(&self) -> &[Time];

    /// Accrual periods `T_{i+1} − T_i`.
    fn rate_taus(&self) -> &[Time];

    /// Number of forward rates (`n`).
    fn number_of_rates(&self) -> Size {
        self.rate_taus().len()
    }

    /// Simply-compounded forward rate over `[T_i, T_{i+1}]`.
    fn forward_rate(&self, i: Size) -> Result<Rate>;

    /// `P(T_i) / P(T_j)`.
    fn discount_ratio(&self, i: Size, j: Size) -> Result<DiscountFactor>;

    /// Par rate of the swap from `T_i` to `T_n`.
    fn coterminal_swap_rate(&self, i: Size) -> Result<Rate>;

    /// Annuity of the swap from `T_i` to `T_n`, in units of the bond
    /// maturing at `T_numeraire`.
    fn coterminal_swap_annuity(&self, numeraire: Size, i: Size) -> Result<Real>;
}
