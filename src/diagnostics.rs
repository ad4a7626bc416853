//! Per-fit diagnostics: the warning/notice collector and the iteration summary.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use itertools::Itertools;

/// Append-only collector owned by a single fit.
///
/// Appends may come from worker threads; each one takes the lock, so no
/// message is lost. Appending never fails or aborts the computation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collector with messages raised before fitting started.
    pub fn with_messages(warnings: &[String], notices: &[String]) -> Self {
        Self {
            warnings: Mutex::new(warnings.to_vec()),
            notices: Mutex::new(notices.to_vec()),
        }
    }

    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        lock(&self.warnings).push(message);
    }

    /// Record an informational notice. Notices are not warnings.
    pub fn notice(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        lock(&self.notices).push(message);
    }

    pub fn has_warnings(&self) -> bool {
        !lock(&self.warnings).is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        lock(&self.warnings).clone()
    }

    pub fn notices(&self) -> Vec<String> {
        lock(&self.notices).clone()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        let warnings = self.warnings.into_inner().unwrap_or_else(PoisonError::into_inner);
        let notices = self.notices.into_inner().unwrap_or_else(PoisonError::into_inner);
        (warnings, notices)
    }
}

/// One row of the fit summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationSummary {
    /// 1-based pass number.
    pub iteration: usize,
    /// Total cost of the partition produced in this pass.
    pub cost: f64,
    /// Absolute change from the previous pass; infinite on the first pass.
    pub delta: f64,
    /// Clusters that ended the assignment step with no members.
    pub empty_clusters: usize,
}

/// Per-iteration record of a fit, renderable as a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitSummary {
    rows: Vec<IterationSummary>,
}

// Long tables are cut down to the first and last few passes.
const HEAD_ROWS: usize = 6;
const TAIL_ROWS: usize = 5;

impl FitSummary {
    pub(crate) fn push(&mut self, row: IterationSummary) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[IterationSummary] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn format_row(row: &IterationSummary) -> String {
    format!(
        "{:>6} | {:>16.5} | {:>16.5} | {:>5}",
        row.iteration, row.cost, row.delta, row.empty_clusters
    )
}

impl fmt::Display for FitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} | {:>16} | {:>16} | {:>5}",
            "Iter.", "Cost", "Delta", "Empty"
        )?;

        let body = if self.rows.len() > HEAD_ROWS + TAIL_ROWS {
            let head = self.rows[..HEAD_ROWS].iter().map(format_row);
            let tail = self.rows[self.rows.len() - TAIL_ROWS..].iter().map(format_row);
            head.chain(std::iter::once("...".to_string()))
                .chain(tail)
                .join("\n")
        } else {
            self.rows.iter().map(format_row).join("\n")
        };

        write!(f, "{}", body)
    }
}
