//! Iterative distance relaxation for vine chains.

use crate::chain::VineChain;

/// Gauss-Seidel relaxation of every adjacent-pair distance in a chain.
///
/// Purely geometric: each pass moves positions directly. More iterations get
/// closer to inextensible; `stiffness < 1` keeps some stretch on purpose.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSolver {
    pub iterations: usize,
}

impl ConstraintSolver {
    pub fn new(iterations: usize) -> Self {
        ConstraintSolver { iterations }
    }

    /// Run all passes.
    pub fn solve(&self, chain: &mut VineChain) {
        self.solve_observed(chain, |_| {});
    }

    /// Run all passes, calling `on_iteration` after each one.
    pub fn solve_observed<F: FnMut(usize)>(&self, chain: &mut VineChain, mut on_iteration: F) {
        for i in 0..self.iterations {
            let (particles, constraints) = chain.split_mut();
            for c in constraints.iter() {
                c.solve(particles);
            }
            on_iteration(i);
        }
    }
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        ConstraintSolver::new(3)
    }
}
