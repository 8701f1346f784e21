// src/progress.rs
/// Lightweight progress reporting for a pipeline run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of institutions selected.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One institution finished and was written out.
    fn item_done(&mut self, _school_code: &str, _kept: usize) {}

    /// One institution failed; the run carries on with the next.
    fn item_failed(&mut self, _school_code: &str, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Forwards progress events to `tracing`.
#[derive(Default)]
pub struct TracingProgress {
    total: usize,
    done: usize,
}

impl Progress for TracingProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        tracing::info!(sources = total, "run started");
    }

    fn log(&mut self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn item_done(&mut self, school_code: &str, kept: usize) {
        self.done += 1;
        tracing::info!(school = school_code, kept, "[{}/{}] done", self.done, self.total);
    }

    fn item_failed(&mut self, school_code: &str, error: &str) {
        self.done += 1;
        tracing::error!(school = school_code, "[{}/{}] failed: {error}", self.done, self.total);
    }

    fn finish(&mut self) {
        tracing::info!(sources = self.total, "run finished");
    }
}
