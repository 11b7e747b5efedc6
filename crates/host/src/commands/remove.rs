use anyhow::{Context, Result};
use sulog_core::{Configuration, StatementPatterns};
use sulog_vfs::{find_script_files, WorkspaceFs};

use super::{CommandContext, DocumentRef, WorkspaceRef, REMOVE_CONSOLES};
use crate::error::CommandError;

/// Result of stripping one document
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub styled: usize,
    pub plain: usize,
    /// Document text after removal
    pub text: String,
    pub changed: bool,
}

impl FileReport {
    pub fn removed(&self) -> usize {
        self.styled + self.plain
    }
}

#[derive(Debug, Clone)]
pub struct WorkspaceReport {
    pub root: String,
    pub files: Vec<FileReport>,
}

impl WorkspaceReport {
    pub fn removed(&self) -> usize {
        self.files.iter().map(FileReport::removed).sum()
    }

    pub fn changed_files(&self) -> usize {
        self.files.iter().filter(|file| file.changed).count()
    }
}

/// Remove sulog statements from the active document
#[tracing::instrument(skip_all, fields(command = REMOVE_CONSOLES))]
pub async fn remove_consoles(
    ctx: &CommandContext,
    document: Option<&DocumentRef>,
) -> Result<FileReport> {
    let document = document.ok_or(CommandError::NoActiveEditor)?;
    ctx.notifier.info(&format!(
        "Removing sulog consoles from current file: {}",
        document.label
    ));

    let patterns = resolve_patterns(ctx)?;
    let report = strip_document(
        ctx,
        document.fs.as_ref(),
        &document.path,
        &document.label,
        &patterns,
    )
    .await?;

    ctx.notifier.info(&format!(
        "Successfully removed {} sulog console statements from current file.",
        report.removed()
    ));
    Ok(report)
}

/// Remove sulog statements from every script file in the workspace
///
/// Files are handled one after another; the first failure stops the run,
/// leaving files already rewritten as they are.
#[tracing::instrument(skip_all, fields(command = REMOVE_CONSOLES))]
pub async fn remove_consoles_in_workspace(
    ctx: &CommandContext,
    workspace: Option<&WorkspaceRef>,
) -> Result<WorkspaceReport> {
    let workspace = workspace.ok_or(CommandError::NoWorkspaceFolder)?;
    let patterns = resolve_patterns(ctx)?;

    let paths = find_script_files(workspace.fs.as_ref(), &workspace.root)
        .await
        .with_context(|| format!("Failed to scan {}", workspace.label))?;
    ctx.notifier.info(&format!(
        "Removing sulog consoles from {} script files in {}",
        paths.len(),
        workspace.label
    ));

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        files.push(strip_document(ctx, workspace.fs.as_ref(), path, path, &patterns).await?);
    }

    let report = WorkspaceReport {
        root: workspace.label.clone(),
        files,
    };
    ctx.notifier.info(&format!(
        "Successfully removed {} sulog console statements from {} files.",
        report.removed(),
        report.changed_files()
    ));
    Ok(report)
}

fn resolve_patterns(ctx: &CommandContext) -> Result<StatementPatterns> {
    let config = Configuration::resolve(ctx.settings.as_ref())?;
    tracing::debug!(prefix = %config.prefix, "Matching sulog consoles");
    Ok(StatementPatterns::new(&config.prefix)?)
}

/// Read, strip and (when something changed) write back one document
async fn strip_document(
    ctx: &CommandContext,
    fs: &dyn WorkspaceFs,
    path: &str,
    label: &str,
    patterns: &StatementPatterns,
) -> Result<FileReport> {
    let text = fs
        .read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {label}"))?;

    let removal = patterns.remove(&text);
    let changed = removal.text != text;
    if changed && !ctx.dry_run {
        fs.write(path, removal.text.as_bytes())
            .await
            .with_context(|| format!("Failed to write {label}"))?;
    }

    tracing::info!(
        "Removed {} styled and {} plain sulog consoles from {}",
        removal.styled,
        removal.plain,
        label
    );

    Ok(FileReport {
        path: label.to_string(),
        styled: removal.styled,
        plain: removal.plain,
        text: removal.text,
        changed,
    })
}
