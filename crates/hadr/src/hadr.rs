use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hadr_pow::PowTables;

/// Process runtime shared by every hadr binary.
pub struct Hadr {
    app_name: String,
}

static HADR_STATIC: std::sync::OnceLock<HadrStatic> = std::sync::OnceLock::new();
static PROFILED_FRAMES: AtomicUsize = AtomicUsize::new(0);

struct HadrStatic {
    profiling: bool,
}

impl HadrStatic {
    fn init(profiling: bool) -> &'static Self {
        HADR_STATIC.get_or_init(|| {
            // A host application may already own the logger.
            let _ = env_logger::builder()
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .try_init();

            puffin::set_scopes_on(profiling);
            if profiling {
                puffin::GlobalProfiler::lock().add_sink(Box::new(
                    |frame: Arc<puffin::FrameData>| {
                        PROFILED_FRAMES.fetch_add(1, Ordering::Relaxed);
                        log::info!(
                            "Profiled frame {} spanning {:.3} ms.",
                            frame.frame_index(),
                            frame.duration_ns() as f64 * 1e-6
                        );
                    },
                ));
            }

            Self { profiling }
        })
    }
}

impl Hadr {
    pub fn new(app_name: &str) -> Self {
        Self::with_profiling(app_name, false)
    }

    /// Like [`Hadr::new`], additionally recording puffin scopes. Only the first
    /// call in a process decides whether profiling is on.
    pub fn with_profiling(app_name: &str, profiling: bool) -> Self {
        let statics = HadrStatic::init(profiling);
        log::info!(
            "{} started (profiling {}).",
            app_name,
            if statics.profiling { "on" } else { "off" }
        );

        Self {
            app_name: app_name.to_owned(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn profiling(&self) -> bool {
        HADR_STATIC.get().is_some_and(|statics| statics.profiling)
    }

    /// Closes the current profiler frame, handing its scopes to the logging sink.
    pub fn end_frame(&self) {
        if self.profiling() {
            puffin::GlobalProfiler::lock().new_frame();
        }
    }

    /// Frames delivered to the logging sink so far.
    pub fn profiled_frames(&self) -> usize {
        PROFILED_FRAMES.load(Ordering::Relaxed)
    }

    /// The shared power tables, built on first request.
    pub fn pow_tables(&self) -> &'static PowTables {
        PowTables::instance()
    }
}
