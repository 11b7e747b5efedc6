//! Paths given relative to the working directory
//!
//! Changing the working directory affects the whole process, so these checks
//! live in their own test binary and run as a single test.

use std::path::Path;

use sulog_host::workspace::{find_git_root, resolve_workspace, settings_root_for};

#[test]
fn relative_paths_resolve_to_the_enclosing_repository() {
    let repo = tempfile::tempdir().unwrap();
    std::fs::create_dir(repo.path().join(".git")).unwrap();
    std::fs::create_dir_all(repo.path().join("src/nested")).unwrap();
    std::fs::write(repo.path().join("src/app.js"), "run();\n").unwrap();
    let root = repo.path().canonicalize().unwrap();

    let outside = tempfile::tempdir().unwrap();
    let plain = outside.path().canonicalize().unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(repo.path().join("src")).unwrap();

    assert_eq!(settings_root_for(Path::new("app.js")), root);
    assert_eq!(settings_root_for(Path::new("nested/later.ts")), root);
    assert_eq!(find_git_root(Path::new(".")), Some(root.clone()));
    assert_eq!(resolve_workspace(None, Path::new(".")).unwrap(), root);

    // Outside any repository the file's own directory is used, absolute
    std::env::set_current_dir(&plain).unwrap();
    assert_eq!(settings_root_for(Path::new("app.js")), plain);

    std::env::set_current_dir(previous).unwrap();
}
