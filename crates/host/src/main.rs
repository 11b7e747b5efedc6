use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sulog_core::Configuration;
use sulog_host::cli::{selection_from_args, Cli, Commands};
use sulog_host::commands::{
    execute, report_failure, Command, CommandContext, DocumentRef, Outcome, WorkspaceRef, INSERT_CONSOLE,
    REMOVE_CONSOLES,
};
use sulog_host::config::{create_default_if_missing, default_config_path};
use sulog_host::notify::{Notifier, StderrNotifier};
use sulog_host::settings::FileSettings;
use sulog_host::watcher::{self, ConfigWatcher};
use sulog_host::workspace::{find_git_root, resolve_workspace, settings_root_for};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize structured logging (tracing); stdout is reserved for dry-run output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir()?;
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);

    match cli.command {
        Commands::Hello { name } => {
            let ctx = context(FileSettings::discover(cli.config, None), &notifier, false);
            Ok(finish(&execute(&ctx, Command::SayHello { name }).await))
        }

        Commands::Insert {
            file,
            line,
            from,
            to,
            selection,
            dry_run,
        } => {
            let root = file.as_deref().map_or_else(|| default_root(&cwd), settings_root_for);
            let ctx = context(FileSettings::discover(cli.config, Some(&root)), &notifier, dry_run);
            let document = match file.as_deref().map(DocumentRef::open_local).transpose() {
                Ok(document) => document,
                Err(e) => return Ok(finish(&report_failure(&ctx, INSERT_CONSOLE, &e))),
            };

            let command = Command::InsertConsole {
                document,
                selection: selection_from_args(line, from, to),
                text: selection,
            };
            let outcome = execute(&ctx, command).await;
            if let Outcome::Inserted(Some(inserted)) = &outcome {
                if dry_run {
                    print!("{}", inserted.insertion.text);
                }
                notifier.info(&format!(
                    "Inserted sulog console into {} at line {}; cursor at {}",
                    inserted.path,
                    inserted.insertion.start_line + 1,
                    inserted.insertion.cursor
                ));
            }
            Ok(finish(&outcome))
        }

        Commands::Remove {
            file: _,
            workspace: Some(dir),
            dry_run,
        } => {
            let root = resolve_workspace(dir.as_deref(), &cwd).ok();
            let settings_root = root.clone().unwrap_or_else(|| default_root(&cwd));
            let ctx = context(
                FileSettings::discover(cli.config, Some(&settings_root)),
                &notifier,
                dry_run,
            );

            let workspace = match root.as_deref().map(WorkspaceRef::open_local).transpose() {
                Ok(workspace) => workspace,
                Err(e) => return Ok(finish(&report_failure(&ctx, REMOVE_CONSOLES, &e))),
            };
            let outcome = execute(&ctx, Command::RemoveConsolesInWorkspace { workspace }).await;
            if let (true, Outcome::RemovedInWorkspace(report)) = (dry_run, &outcome) {
                for file in report.files.iter().filter(|file| file.changed) {
                    println!("{}\t{}", file.removed(), file.path);
                }
            }
            Ok(finish(&outcome))
        }

        Commands::Remove {
            file,
            workspace: None,
            dry_run,
        } => {
            let root = file.as_deref().map_or_else(|| default_root(&cwd), settings_root_for);
            let ctx = context(FileSettings::discover(cli.config, Some(&root)), &notifier, dry_run);
            let document = match file.as_deref().map(DocumentRef::open_local).transpose() {
                Ok(document) => document,
                Err(e) => return Ok(finish(&report_failure(&ctx, REMOVE_CONSOLES, &e))),
            };

            let outcome = execute(&ctx, Command::RemoveConsoles { document }).await;
            if let (true, Outcome::Removed(report)) = (dry_run, &outcome) {
                print!("{}", report.text);
            }
            Ok(finish(&outcome))
        }

        Commands::Config { json, init } => {
            if init {
                let path = cli.config.clone().unwrap_or_else(default_config_path);
                if create_default_if_missing(&path)? {
                    notifier.info(&format!("Created {}", path.display()));
                } else {
                    notifier.info(&format!("{} already exists", path.display()));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let settings = FileSettings::discover(cli.config, Some(&default_root(&cwd)));
            for path in settings.paths() {
                tracing::debug!(path = %path.display(), exists = path.exists(), "Settings file");
            }
            let config = match Configuration::resolve(&settings) {
                Ok(config) => config,
                Err(e) => {
                    notifier.error(&format!("Error loading sulog configuration: {e}"));
                    return Ok(ExitCode::FAILURE);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("[sulog]\n{}", toml::to_string(&config)?);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Watch { interval_ms } => {
            let settings = FileSettings::discover(cli.config, Some(&default_root(&cwd)));
            let interval = Duration::from_millis(interval_ms.max(1));
            let config_watcher = match ConfigWatcher::new(settings.paths().to_vec(), interval) {
                Ok(config_watcher) => config_watcher,
                Err(e) => {
                    notifier.error(&format!("Error watching sulog configuration: {e:#}"));
                    return Ok(ExitCode::FAILURE);
                }
            };
            match Configuration::resolve(&settings) {
                Ok(config) => config.log_summary(),
                Err(e) => tracing::warn!(error = %e, "Current settings could not be loaded"),
            }

            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                }
            };
            watcher::watch(
                config_watcher,
                &settings,
                notifier.as_ref(),
                interval,
                shutdown,
            )
            .await;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn context(settings: FileSettings, notifier: &Arc<dyn Notifier>, dry_run: bool) -> CommandContext {
    CommandContext {
        settings: Arc::new(settings),
        notifier: Arc::clone(notifier),
        dry_run,
    }
}

/// Git root enclosing the current directory, else the directory itself
fn default_root(cwd: &Path) -> PathBuf {
    find_git_root(cwd).unwrap_or_else(|| cwd.to_path_buf())
}

fn finish(outcome: &Outcome) -> ExitCode {
    if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
