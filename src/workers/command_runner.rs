use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::group_by::GroupBy;
use crate::enums::open_target::OpenTarget;
use crate::errors::{ExplorerError, ExplorerResult};
use crate::helpers::config_helper::ConfigHelper;
use crate::logger::progress_logger::ProgressLogger;
use crate::logger::tree_printer::TreePrinter;
use crate::services::workspace_session::WorkspaceSession;
use crate::structs::analysis_batch::AnalysisBatch;
use crate::structs::config::config::Config;
use crate::structs::issue::Issue;
use crate::structs::marker::MarkerId;
use crate::traits::annotation_store::AnnotationStore;
use crate::workers::projection_worker::ProjectionWorker;

pub struct CommandRunner {
    config: Config,
    config_path: Option<PathBuf>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> ExplorerResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Validate => self.validate_command(),
            Commands::Import { results, configuration } => self.import_command(&results, configuration).await,
            Commands::Tree { group_by, expand } => self.tree_command(group_by, expand),
            Commands::Reveal { marker } => self.reveal_command(marker),
            Commands::Fix { marker } => self.fix_command(marker),
            Commands::Delete { marker } => self.delete_command(marker),
            Commands::Clear => self.clear_command(),
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> ExplorerResult<()> {
        log::info!("🚀 Initializing issue-explorer configuration...");

        match ConfigManager::create_sample_config(self.config_path.as_deref()) {
            Ok(path) => {
                log::info!("✅ Configuration file created at {}", path.display());
                log::info!("📝 Point [workspace].root at the directory holding your projects.");
                log::info!("🔧 Run 'issue-explorer validate' to check your configuration.");
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                Err(e)
            }
        }
    }

    fn validate_command(&self) -> ExplorerResult<()> {
        log::info!("🔍 Validating issue-explorer configuration...");

        match ConfigManager::validate_config(&self.config) {
            Ok(()) => {
                log::info!("✅ Configuration is valid");
                log::info!("📁 Workspace: {}", self.config.workspace_root().display());
                log::info!("💾 Marker state: {}", self.config.state_file_path().display());
                log::info!(
                    "🌳 Grouping: {}",
                    self.config.explorer.grouping.iter().map(GroupBy::name).collect::<Vec<_>>().join(" → ")
                );
                Ok(())
            }
            Err(problems) => {
                log::info!("❌ Issues found:");
                for problem in &problems {
                    log::info!("   - {}", problem);
                }
                Err(ExplorerError::config_error(
                    &format!("{} configuration problems", problems.len()),
                    None,
                    Some("Fix the listed problems or run 'issue-explorer init' for a fresh sample"),
                ))
            }
        }
    }

    async fn import_command(&self, results: &Path, configuration: Option<String>) -> ExplorerResult<()> {
        log::info!("📥 Importing analysis results from {}", results.display());

        let batch = Self::read_batch(results, configuration)?;
        let session = WorkspaceSession::open(&self.config)?;

        let removed = session.projector().delete_all();
        if removed > 0 {
            log::info!("🧹 Replaced {} existing markers", removed);
        }

        let mut explorer = session.explorer(Box::new(TreePrinter::new(true)));
        let handle = ProjectionWorker::spawn(session.projector().clone(), batch);
        let cancel = handle.cancel_flag();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("⏹️ Interrupt received, stopping after the current issue");
                cancel.cancel();
            }
        });

        let mut progress = ProgressLogger::new();
        let result = handle.wait_with_progress(&mut progress).await;
        interrupt.abort();

        match result {
            Ok(summary) => {
                explorer.pump();
                session.save()?;
                log::info!(
                    "✅ {} of {} issues imported from '{}'",
                    summary.created_count(),
                    summary.total,
                    summary.configuration
                );
                if summary.is_partial() {
                    log::warn!(
                        "⚠️ {} issues have no marker, see the problems listed above",
                        summary.skipped.len() + summary.failures.len()
                    );
                }
                Ok(())
            }
            Err(ExplorerError::InterruptedBatch { written, total }) => {
                session.save()?;
                log::warn!("⚠️ Import interrupted, {} of {} markers kept", written, total);
                log::info!("💡 Run the import again to regenerate the remaining markers");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn tree_command(&self, group_by: Option<String>, expand: bool) -> ExplorerResult<()> {
        let session = WorkspaceSession::open(&self.config)?;
        let mut explorer = session.explorer(Box::new(TreePrinter::new(true).with_expanded(expand)));

        match group_by {
            Some(levels) => {
                let levels = GroupBy::parse_list(&levels)
                    .map_err(|e| ExplorerError::config_error(&e, Some("group_by"), None))?;
                explorer.set_grouping(levels);
                explorer.pump();
            }
            None => {
                explorer.reload()?;
            }
        }

        Ok(())
    }

    fn reveal_command(&self, marker: MarkerId) -> ExplorerResult<()> {
        let session = WorkspaceSession::open(&self.config)?;
        let mut explorer = session.explorer(Box::new(TreePrinter::new(false)));
        explorer.reload()?;
        explorer.show_issue(marker)?;

        if let Some(issue) = session.registry().resolve(marker) {
            log::info!("🏷️  {} [{}] {}", issue.title, issue.severity, if issue.is_fixed() { "(fixed)" } else { "" });
        }
        match explorer.open(marker) {
            Some(OpenTarget::Report(path)) => log::info!("📑 Opens report {}", path.display()),
            Some(OpenTarget::Source { resource, line }) => match line {
                Some(line) => log::info!("📄 Opens {} at line {}", resource, line),
                None => log::info!("📄 Opens {}", resource),
            },
            None => {}
        }
        Ok(())
    }

    fn fix_command(&self, marker: MarkerId) -> ExplorerResult<()> {
        let session = WorkspaceSession::open(&self.config)?;
        let current = session
            .store()
            .get(marker)
            .ok_or(ExplorerError::StaleIdentity { marker })?;
        let issue = session.registry().resolve(marker).ok_or_else(|| {
            ExplorerError::store_error("fix", Some(marker), "marker is not bound to an imported issue")
        })?;

        let mut explorer = session.explorer(Box::new(TreePrinter::new(false)));
        explorer.reload()?;

        let fixed = session.projector().mark_fixed(&current, &issue)?;
        explorer.pump();
        explorer.show_issue(fixed.id)?;
        session.save()?;

        log::info!("✅ '{}' is fixed, now tracked as {}", issue.title, fixed.id);
        Ok(())
    }

    fn delete_command(&self, marker: MarkerId) -> ExplorerResult<()> {
        let session = WorkspaceSession::open(&self.config)?;
        let mut explorer = session.explorer(Box::new(TreePrinter::new(false)));
        explorer.reload()?;

        session.projector().delete_marker(marker)?;
        explorer.pump();
        session.save()?;

        log::info!("🗑️ Deleted {}, {} issues left", marker, explorer.tree().leaf_count());
        Ok(())
    }

    fn clear_command(&self) -> ExplorerResult<()> {
        let session = WorkspaceSession::open(&self.config)?;
        session.projector().delete_all();
        session.save()
    }

    /// Accepts a full batch or a bare list of issues.
    fn read_batch(path: &Path, configuration: Option<String>) -> ExplorerResult<AnalysisBatch> {
        let content = fs::read_to_string(path)
            .map_err(|e| ExplorerError::file_error(&path.display().to_string(), "read", &e.to_string()))?;

        if let Ok(mut batch) = serde_json::from_str::<AnalysisBatch>(&content) {
            if let Some(name) = configuration {
                batch.configuration = name;
            }
            return Ok(batch);
        }

        let issues: Vec<Arc<Issue>> = serde_json::from_str(&content)?;
        let name = configuration.unwrap_or_else(ConfigHelper::default_configuration_name);
        let input = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| name.clone());
        Ok(AnalysisBatch::new(&name).with_input(&input, issues))
    }
}
