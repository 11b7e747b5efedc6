use anyhow::{Context, Result};
use sulog_core::{build_statement, plan_insertion, Configuration, Insertion, Selection};

use super::{CommandContext, DocumentRef, INSERT_CONSOLE};

#[derive(Debug, Clone)]
pub struct InsertOutcome {
    pub path: String,
    pub insertion: Insertion,
}

/// Insert a logging statement below the cursor line of `document`
///
/// The selected text comes from `text` when given, otherwise from the
/// document range covered by `selection`. Without a document this is a
/// silent no-op.
#[tracing::instrument(skip_all, fields(command = INSERT_CONSOLE))]
pub async fn insert_console(
    ctx: &CommandContext,
    document: Option<&DocumentRef>,
    selection: Selection,
    text: Option<&str>,
) -> Result<Option<InsertOutcome>> {
    let Some(document) = document else {
        tracing::debug!("No active editor, nothing to insert");
        return Ok(None);
    };

    let config = Configuration::resolve(ctx.settings.as_ref())?;
    let source = document
        .fs
        .read_to_string(&document.path)
        .await
        .with_context(|| format!("Failed to read {}", document.label))?;

    let selected = match text {
        Some(text) => Some(text),
        None if !selection.is_empty() => Some(selection.text(&source)),
        None => None,
    };
    tracing::debug!(selected = ?selected, "Building statement");

    let statement = build_statement(selected, &config);
    let insertion = plan_insertion(&source, selection.active.line, &statement);

    if !ctx.dry_run {
        document
            .fs
            .write(&document.path, insertion.text.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", document.label))?;
    }

    tracing::info!(
        path = %document.label,
        line = insertion.start_line + 1,
        cursor = %insertion.cursor,
        "Inserted sulog console"
    );

    Ok(Some(InsertOutcome {
        path: document.label.clone(),
        insertion,
    }))
}
