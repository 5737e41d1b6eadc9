/// Receives progress of a long running operation and tells it when to stop.
pub trait ProgressSink {
    fn begin_task(&mut self, name: &str, total: usize);

    fn worked(&mut self, units: usize);

    fn done(&mut self) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}
