use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use crate::enums::progress_update::ProgressUpdate;
use crate::errors::{ExplorerError, ExplorerResult};
use crate::services::marker_projector::MarkerProjector;
use crate::structs::analysis_batch::AnalysisBatch;
use crate::structs::projection_summary::ProjectionSummary;
use crate::traits::progress_sink::ProgressSink;

/// Shared stop request, checked by the projection before every issue.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Progress sink that forwards to the owning task over a channel.
pub struct ChannelProgress {
    sender: UnboundedSender<ProgressUpdate>,
    cancel: CancelFlag,
    total: usize,
    done: usize,
}

impl ChannelProgress {
    pub fn new(sender: UnboundedSender<ProgressUpdate>, cancel: CancelFlag) -> Self {
        Self {
            sender,
            cancel,
            total: 0,
            done: 0,
        }
    }

    fn send(&self, update: ProgressUpdate) {
        // The owner may stop listening, the projection carries on regardless
        let _ = self.sender.send(update);
    }
}

impl ProgressSink for ChannelProgress {
    fn begin_task(&mut self, name: &str, total: usize) {
        self.total = total;
        self.done = 0;
        self.send(ProgressUpdate::Started {
            task: name.to_string(),
            total,
        });
    }

    fn worked(&mut self, units: usize) {
        self.done += units;
        self.send(ProgressUpdate::Worked {
            done: self.done,
            total: self.total,
        });
    }

    fn done(&mut self) {
        self.send(ProgressUpdate::Finished {
            done: self.done,
            total: self.total,
        });
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Runs batch projection off the async runtime.
pub struct ProjectionWorker;

impl ProjectionWorker {
    pub fn spawn(projector: MarkerProjector, batch: AnalysisBatch) -> ProjectionHandle {
        Self::spawn_with_cancel(projector, batch, CancelFlag::new())
    }

    pub fn spawn_with_cancel(projector: MarkerProjector, batch: AnalysisBatch, cancel: CancelFlag) -> ProjectionHandle {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut progress = ChannelProgress::new(sender, cancel.clone());

        log::debug!("Spawning marker generation for '{}'", batch.configuration);
        let task = tokio::task::spawn_blocking(move || projector.project_batch(&batch, &mut progress));

        ProjectionHandle {
            progress: receiver,
            cancel,
            task,
        }
    }
}

pub struct ProjectionHandle {
    progress: UnboundedReceiver<ProgressUpdate>,
    cancel: CancelFlag,
    task: JoinHandle<ExplorerResult<ProjectionSummary>>,
}

impl ProjectionHandle {
    pub fn cancel(&self) {
        log::info!("⏹️ Cancelling marker generation");
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Next progress update, `None` once the projection has finished.
    pub async fn next_progress(&mut self) -> Option<ProgressUpdate> {
        self.progress.recv().await
    }

    pub async fn wait(self) -> ExplorerResult<ProjectionSummary> {
        self.task
            .await
            .map_err(|e| ExplorerError::system_error("marker generation", &e.to_string()))?
    }

    /// Replay progress into a local sink until the projection ends, then return its result.
    pub async fn wait_with_progress(mut self, sink: &mut dyn ProgressSink) -> ExplorerResult<ProjectionSummary> {
        while let Some(update) = self.next_progress().await {
            match update {
                ProgressUpdate::Started { task, total } => sink.begin_task(&task, total),
                ProgressUpdate::Worked { .. } => sink.worked(1),
                ProgressUpdate::Finished { .. } => sink.done(),
            }
        }
        self.wait().await
    }
}
