/// How a fit stopped. Both outcomes carry a valid model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Total cost changed by less than `min_change` between two passes.
    Converged,
    /// `max_iter` passes ran without converging.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IterationState {
    /// Passes that ended without converging. The pass that converges is not
    /// counted, so a fit that is stable from the start reports 1.
    pub iteration: usize,
    pub converged: bool,
    /// Cost of the latest pass; `None` before the first one.
    pub cost: Option<f64>,
    pub previous_cost: Option<f64>,
    /// `|previous_cost - cost|`, infinite until two passes have run.
    pub delta: f64,
}

/// Decides, after every pass, whether the loop stops.
#[derive(Debug, Clone)]
pub struct ConvergenceController {
    max_iter: usize,
    min_change: f64,
    state: IterationState,
}

impl ConvergenceController {
    pub fn new(max_iter: usize, min_change: f64) -> Self {
        Self {
            max_iter,
            min_change,
            state: IterationState {
                delta: f64::INFINITY,
                ..Default::default()
            },
        }
    }

    /// Record the total cost of a completed pass.
    ///
    /// Returns `Some` when the loop has reached a terminal state. The first
    /// pass never converges because its delta is infinite.
    pub fn observe(&mut self, cost: f64) -> Option<Termination> {
        let state = &mut self.state;
        state.delta = match state.cost {
            Some(previous) => (previous - cost).abs(),
            None => f64::INFINITY,
        };
        state.previous_cost = state.cost;
        state.cost = Some(cost);

        if state.delta < self.min_change {
            state.converged = true;
            return Some(Termination::Converged);
        }
        state.iteration += 1;
        if state.iteration >= self.max_iter {
            return Some(Termination::Exhausted);
        }
        None
    }

    pub fn state(&self) -> &IterationState {
        &self.state
    }
}
