#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    Started { task: String, total: usize },
    Worked { done: usize, total: usize },
    Finished { done: usize, total: usize },
}
