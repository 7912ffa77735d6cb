use super::solver::OperatingPointSpec;

#[derive(Debug, Clone)]
pub enum Progress {
    SweepStart { total_points: u64 },
    PointStart { index: usize, spec: OperatingPointSpec },
    /// Boundary-layer residuals after one successful viscous step.
    Residual { iteration: usize, rms: f64, max: f64 },
    PointFinish { index: usize, converged: bool },
    SweepFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn default_reporter_discards_events() {
        ProgressReporter::new().report(Progress::SweepFinish);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let tag = match event {
                Progress::SweepStart { .. } => "start",
                Progress::Residual { .. } => "residual",
                Progress::SweepFinish => "finish",
                _ => "other",
            };
            seen.lock().unwrap().push(tag);
        }));
        reporter.report(Progress::SweepStart { total_points: 1 });
        reporter.report(Progress::Residual {
            iteration: 1,
            rms: 0.1,
            max: 0.3,
        });
        reporter.report(Progress::SweepFinish);
        drop(reporter);
        assert_eq!(seen.into_inner().unwrap(), vec!["start", "residual", "finish"]);
    }
}
