use foilsolve::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::SweepStart { total_points } => {
                    pb_guard.reset();
                    pb_guard.set_length(total_points);
                    pb_guard.set_position(0);
                    pb_guard.set_prefix("Sweep");
                    pb_guard.set_message("");
                }
                Progress::PointStart { spec, .. } => {
                    pb_guard.set_prefix(spec.to_string());
                    pb_guard.set_message("");
                }
                Progress::Residual { iteration, rms, .. } => {
                    if !pb_guard.is_finished() {
                        pb_guard.set_message(format!("iter {iteration:>3}  rms {rms:.2e}"));
                    }
                }
                Progress::PointFinish { converged, .. } => {
                    if !converged {
                        let label = pb_guard.prefix();
                        pb_guard.println(format!("  ✗ {label} did not converge"));
                    }
                    pb_guard.inc(1);
                }
                Progress::SweepFinish => {
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix:<22} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
