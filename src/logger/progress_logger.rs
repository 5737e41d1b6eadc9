use crate::config::constants::PROGRESS_LOG_STEP_PERCENT;
use crate::traits::progress_sink::ProgressSink;

/// Reports progress through the log, one line per completed step.
#[derive(Debug, Default)]
pub struct ProgressLogger {
    task: String,
    total: usize,
    done: usize,
    last_step: usize,
}

impl ProgressLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn done_units(&self) -> usize {
        self.done
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl ProgressSink for ProgressLogger {
    fn begin_task(&mut self, name: &str, total: usize) {
        self.task = name.to_string();
        self.total = total;
        self.done = 0;
        self.last_step = 0;
        log::info!("⏳ {} ({} items)", name, total);
    }

    fn worked(&mut self, units: usize) {
        self.done += units;
        if self.total == 0 {
            return;
        }

        let percent = self.done * 100 / self.total;
        let step = percent / PROGRESS_LOG_STEP_PERCENT;
        if step > self.last_step {
            self.last_step = step;
            log::info!("   {}: {}% ({}/{})", self.task, percent, self.done, self.total);
        }
    }

    fn done(&mut self) {
        log::debug!("{} finished after {} of {} items", self.task, self.done, self.total);
    }
}
