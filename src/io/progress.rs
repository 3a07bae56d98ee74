//! Progress reporting and cancellation for imports.
//!
//! An import is split into major steps (points, faces). Each step announces
//! its item count and ticks once per item. Any callback may answer
//! [`ControlFlow::Break`], which aborts the whole import with
//! [`FoamMeshError::Cancelled`].

use crate::mesh_error::FoamMeshError;
use std::ops::ControlFlow;

/// Host-side progress sink.
///
/// Every method has a default that continues, so implementors override only
/// what they track.
pub trait ImportProgress {
    fn begin_import(&mut self, _num_steps: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn begin_step(&mut self, _total: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called after every processed item.
    fn increment(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn end_step(&mut self) {}

    /// Called once with the overall outcome. Returning `false` on a
    /// successful import turns it into a cancellation.
    fn end_import(&mut self, success: bool) -> bool {
        success
    }
}

/// Discards all updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ImportProgress for NoProgress {}

/// Callback-driven progress.
///
/// The callback receives `(current, total, step)` where `step` names the
/// running step, and decides whether to continue.
pub struct Progress {
    callback: Box<dyn FnMut(usize, usize, &str) -> ControlFlow<()>>,
    steps: usize,
    step: usize,
    current: usize,
    total: usize,
}

/// Names of the major import steps, in order.
pub const STEP_NAMES: [&str; 2] = ["points", "faces"];

impl Progress {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(usize, usize, &str) -> ControlFlow<()> + 'static,
    {
        Self {
            callback: Box::new(callback),
            steps: 0,
            step: 0,
            current: 0,
            total: 0,
        }
    }

    /// Cancels once `limit` items of any step have been processed.
    pub fn cancel_after(limit: usize) -> Self {
        let mut seen = 0usize;
        Self::new(move |_, _, _| {
            seen += 1;
            if seen >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Index of the running major step.
    pub fn step(&self) -> usize {
        self.step
    }

    fn step_name(&self) -> &'static str {
        STEP_NAMES.get(self.step).copied().unwrap_or("import")
    }
}

impl ImportProgress for Progress {
    fn begin_import(&mut self, num_steps: usize) -> ControlFlow<()> {
        self.steps = num_steps;
        self.step = 0;
        ControlFlow::Continue(())
    }

    fn begin_step(&mut self, total: usize) -> ControlFlow<()> {
        self.current = 0;
        self.total = total;
        ControlFlow::Continue(())
    }

    fn increment(&mut self) -> ControlFlow<()> {
        self.current += 1;
        let name = self.step_name();
        (self.callback)(self.current, self.total, name)
    }

    fn end_step(&mut self) {
        self.step = (self.step + 1).min(self.steps);
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("step", &self.step)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

/// Runs `body` as one progress step of `total` items.
///
/// `end_step` is called whether or not `body` succeeds.
pub fn run_step<P, T, F>(progress: &mut P, total: usize, body: F) -> Result<T, FoamMeshError>
where
    P: ImportProgress + ?Sized,
    F: FnOnce(&mut P) -> Result<T, FoamMeshError>,
{
    if progress.begin_step(total).is_break() {
        return Err(FoamMeshError::Cancelled);
    }
    let result = body(progress);
    progress.end_step();
    result
}

/// Ticks `progress` once, mapping a break to [`FoamMeshError::Cancelled`].
#[inline]
pub fn tick<P: ImportProgress + ?Sized>(progress: &mut P) -> Result<(), FoamMeshError> {
    match progress.increment() {
        ControlFlow::Continue(()) => Ok(()),
        ControlFlow::Break(()) => Err(FoamMeshError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callback_sees_counts_and_step_names() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut progress = Progress::new(move |cur, total, name| {
            sink.borrow_mut().push((cur, total, name.to_string()));
            ControlFlow::Continue(())
        });
        let _ = progress.begin_import(2);
        run_step(&mut progress, 2, |p| {
            tick(p)?;
            tick(p)
        })
        .unwrap();
        run_step(&mut progress, 1, tick).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                (1, 2, "points".to_string()),
                (2, 2, "points".to_string()),
                (1, 1, "faces".to_string()),
            ]
        );
    }

    #[test]
    fn cancel_after_breaks_on_the_limit() {
        let mut progress = Progress::cancel_after(3);
        assert!(tick(&mut progress).is_ok());
        assert!(tick(&mut progress).is_ok());
        assert_eq!(tick(&mut progress), Err(FoamMeshError::Cancelled));
    }

    #[test]
    fn run_step_ends_step_on_failure() {
        struct Counter {
            ended: usize,
        }
        impl ImportProgress for Counter {
            fn end_step(&mut self) {
                self.ended += 1;
            }
        }
        let mut counter = Counter { ended: 0 };
        let result: Result<(), _> = run_step(&mut counter, 1, |_| Err(FoamMeshError::Cancelled));
        assert!(result.is_err());
        assert_eq!(counter.ended, 1);
        assert!(NoProgress.end_import(true));
    }
}
