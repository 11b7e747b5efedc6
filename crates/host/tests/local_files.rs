mod common;

use std::sync::Arc;

use common::TestHarness;
use sulog_core::{Configuration, Position, Selection};
use sulog_host::commands::{
    execute, report_failure, Command, CommandContext, DocumentRef, Outcome, WorkspaceRef, REMOVE_CONSOLES,
};
use sulog_host::config::workspace_config_path;
use sulog_host::notify::RecordingNotifier;
use sulog_host::settings::FileSettings;
use sulog_host::workspace::{resolve_workspace, settings_root_for};

fn context(harness: &TestHarness, notifier: &Arc<RecordingNotifier>) -> CommandContext {
    let settings = FileSettings::discover(
        Some(harness.path("user/config.toml")),
        Some(harness.root()),
    );
    CommandContext {
        settings: Arc::new(settings),
        notifier: notifier.clone(),
        dry_run: false,
    }
}

/// Insert and remove through real files, with CRLF line breaks
#[tokio::test]
async fn crlf_document_round_trip_on_disk() {
    let harness = TestHarness::new().unwrap();
    let source = "let a = 1;\r\nlet b = 2;\r\n";
    harness.write_file("main.js", source).unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(&harness, &notifier);
    let document = DocumentRef::new(harness.local_fs(), "main.js");

    let command = Command::InsertConsole {
        document: Some(document.clone()),
        selection: Selection::caret(Position::new(0, 0)),
        text: Some("a".into()),
    };
    assert!(matches!(execute(&ctx, command).await, Outcome::Inserted(Some(_))));

    let inserted = harness.read_file("main.js").unwrap();
    assert!(inserted.starts_with("let a = 1;\r\nconsole.log(\r\n"));
    assert_eq!(inserted.matches('\n').count(), inserted.matches("\r\n").count());

    let outcome = execute(&ctx, Command::RemoveConsoles { document: Some(document) }).await;
    assert!(matches!(outcome, Outcome::Removed(ref report) if report.removed() == 1));
    assert_eq!(harness.read_file("main.js").unwrap(), source);
}

/// Workspace settings override the user file key by key
#[tokio::test]
async fn workspace_settings_apply_to_commands() {
    let harness = TestHarness::new().unwrap();
    harness
        .write_file(
            "user/config.toml",
            "[sulog]\nconsolePrefix = \"mine\"\nconsoleFontWeight = \"normal\"\n",
        )
        .unwrap();
    std::fs::create_dir_all(workspace_config_path(harness.root()).parent().unwrap()).unwrap();
    std::fs::write(
        workspace_config_path(harness.root()),
        "[sulog]\nconsolePrefix = \"team\"\n",
    )
    .unwrap();
    harness.write_file("app.ts", "const x = 1;").unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(&harness, &notifier);
    let config = Configuration::resolve(ctx.settings.as_ref()).unwrap();
    assert_eq!(config.prefix, "team");
    assert_eq!(config.font_weight, "normal");

    let command = Command::InsertConsole {
        document: Some(DocumentRef::new(harness.local_fs(), "app.ts")),
        selection: Selection::caret(Position::new(0, 0)),
        text: Some("x".into()),
    };
    execute(&ctx, command).await;

    // Appended after the last line without a trailing break
    assert_eq!(
        harness.read_file("app.ts").unwrap(),
        "const x = 1;\nconsole.log(\n  '%c team %c x:',\n  'color: #fff; background: #ff4e20;',\n  'font-size: 14px; font-weight: normal;',\n  x,\n);"
    );
}

#[tokio::test]
async fn malformed_settings_fail_the_command() {
    let harness = TestHarness::new().unwrap();
    harness.write_file("user/config.toml", "[sulog\n").unwrap();
    harness.write_file("app.js", "console.log('sulog');\n").unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(&harness, &notifier);
    let document = DocumentRef::new(harness.local_fs(), "app.js");

    let outcome = execute(&ctx, Command::RemoveConsoles { document: Some(document) }).await;
    assert!(outcome.is_failure());
    assert_eq!(harness.read_file("app.js").unwrap(), "console.log('sulog');\n");

    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error removing sulog consoles: "));
    assert!(errors[0].contains("config.toml"));
}

#[tokio::test]
async fn workspace_removal_on_disk() {
    let harness = TestHarness::new().unwrap();
    std::fs::create_dir(harness.path(".git")).unwrap();
    let tagged = "run();\nconsole.log(\n  '%c sulog %c result:',\n  'color: #fff;',\n  result,\n);\n";
    harness.write_file("src/a.js", tagged).unwrap();
    harness.write_file("src/b/c.jsx", tagged).unwrap();
    harness.write_file("node_modules/pkg/index.js", tagged).unwrap();

    let root = resolve_workspace(None, &harness.path("src/b")).unwrap();
    let canonical = harness.root().canonicalize().unwrap();
    assert_eq!(root, canonical);
    assert_eq!(settings_root_for(&harness.path("src/a.js")), canonical);

    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(&harness, &notifier);
    let workspace = WorkspaceRef::new(harness.local_fs(), root.display().to_string());

    let outcome = execute(&ctx, Command::RemoveConsolesInWorkspace { workspace: Some(workspace) }).await;
    let Outcome::RemovedInWorkspace(report) = outcome else {
        panic!("expected a workspace removal");
    };
    assert_eq!(report.removed(), 2);
    assert_eq!(harness.read_file("src/a.js").unwrap(), "run();\n");
    assert_eq!(harness.read_file("src/b/c.jsx").unwrap(), "run();\n");
    assert_eq!(harness.read_file("node_modules/pkg/index.js").unwrap(), tagged);
    assert_eq!(
        notifier.infos().last().map(String::as_str),
        Some("Successfully removed 2 sulog console statements from 2 files.")
    );
}

/// A file in a directory that does not exist fails like any other command
#[tokio::test]
async fn missing_directory_is_reported() {
    let harness = TestHarness::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(&harness, &notifier);
    let file = harness.path("gone/app.js");

    let outcome = match DocumentRef::open_local(&file) {
        Ok(document) => execute(&ctx, Command::RemoveConsoles { document: Some(document) }).await,
        Err(e) => report_failure(&ctx, REMOVE_CONSOLES, &e),
    };
    assert!(outcome.is_failure());

    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with(&format!(
        "Error removing sulog consoles: Failed to open {}",
        file.display()
    )));
    assert!(WorkspaceRef::open_local(&harness.path("gone")).is_err());
}

#[tokio::test]
async fn open_local_document_round_trip() {
    let harness = TestHarness::new().unwrap();
    harness.write_file("src/app.js", "run();\nconsole.log('sulog');\n").unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = context(&harness, &notifier);

    let document = DocumentRef::open_local(&harness.path("src/app.js")).unwrap();
    assert_eq!(document.path, "app.js");
    let outcome = execute(&ctx, Command::RemoveConsoles { document: Some(document) }).await;
    assert!(matches!(outcome, Outcome::Removed(ref report) if report.removed() == 1));
    assert_eq!(harness.read_file("src/app.js").unwrap(), "run();\n");
}
