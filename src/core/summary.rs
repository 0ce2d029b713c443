use crate::{core::Point, DVector, Float};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A struct that holds the results of a finished (or aborted) optimization run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunSummary {
    /// The best position ever observed.
    pub x: Vec<Float>,
    /// The fitness at [`RunSummary::x`].
    pub fx: Float,
    /// One best-so-far entry per completed iteration.
    pub history: Vec<Point<DVector<Float>>>,
    /// A message that can be set by the algorithm.
    pub message: String,
    /// Flag that says whether the run completed its full iteration budget.
    pub converged: bool,
    /// The number of fitness evaluations.
    pub n_f_evals: usize,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "╒══════════════ RUN RESULTS ══════════════╕")?;
        writeln!(
            f,
            "│ status:     {:<28}│",
            if self.converged {
                "completed"
            } else {
                "incomplete"
            }
        )?;
        writeln!(f, "│ f(x):       {:<+28.6E}│", self.fx)?;
        writeln!(f, "│ #f(x):      {:<28}│", self.n_f_evals)?;
        writeln!(f, "│ iterations: {:<28}│", self.history.len())?;
        writeln!(f, "│ message:    {:<28}│", self.message)?;
        writeln!(f, "├─────────────────────────────────────────┤")?;
        for (i, v) in self.x.iter().enumerate() {
            writeln!(f, "│ x_{:<3}       {:<+28.6E}│", i, v)?;
        }
        write!(f, "╘═════════════════════════════════════════╛")
    }
}
