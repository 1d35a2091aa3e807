use scribe::asset::{Action, Directory, File, Symlink};
use scribe::collection::AssetCollection;
use scribe::error::Error;
use scribe::processor::{persist_assets, resolve_content};
use std::fs;
use std::num::NonZeroUsize;
use tempfile::TempDir;

#[test]
fn test_missing_file_gets_generated_content_verbatim() {
    // Without a file on disk every built-in action writes the generated
    // content as-is.
    for action in [Action::Replace, Action::Prepend, Action::Append, Action::Skip] {
        let file = File::new("a").with_content("NEW").with_action(action);
        assert_eq!(resolve_content(&file, None), Some("NEW".to_string()));
    }
}

#[test]
fn test_replace_discards_existing_content() {
    let file = File::new("a").with_content("NEW");
    assert_eq!(resolve_content(&file, Some("OLD")), Some("NEW".to_string()));
}

#[test]
fn test_skip_writes_nothing() {
    let file = File::new("a").with_content("NEW").with_action(Action::Skip);
    assert_eq!(resolve_content(&file, Some("OLD")), None);
}

#[test]
fn test_append_inserts_newline_without_header() {
    let file = File::new("a").with_content("B").with_action(Action::Append);
    assert_eq!(resolve_content(&file, Some("A")), Some("A\nB".to_string()));
}

#[test]
fn test_append_on_empty_existing_content() {
    let file = File::new("a").with_content("B").with_action(Action::Append);
    assert_eq!(resolve_content(&file, Some("")), Some("B".to_string()));
}

#[test]
fn test_append_strips_existing_header() {
    let file = File::new("a")
        .with_content("NEW")
        .with_action(Action::Append)
        .with_header_size(NonZeroUsize::new(1).unwrap());
    assert_eq!(
        resolve_content(&file, Some("HDR\nOLD\n")),
        Some("OLD\nNEW".to_string())
    );
}

#[test]
fn test_prepend_strips_existing_header() {
    let file = File::new("a")
        .with_content("NEW")
        .with_action(Action::Prepend)
        .with_header_size(NonZeroUsize::new(2).unwrap());
    assert_eq!(
        resolve_content(&file, Some("H1\nH2\nBODY")),
        Some("NEW\nBODY".to_string())
    );
}

#[test]
fn test_prepend_without_header() {
    let file = File::new("a").with_content("NEW").with_action(Action::Prepend);
    assert_eq!(resolve_content(&file, Some("OLD")), Some("NEW\nOLD".to_string()));
}

#[test]
fn test_resolver_returning_none_writes_nothing() {
    let file = File::new("a").with_content("NEW").with_resolver(|_, _| None);
    assert_eq!(resolve_content(&file, None), None);
    assert_eq!(resolve_content(&file, Some("OLD")), None);
}

#[test]
fn test_resolver_overrides_action_semantics() {
    let file = File::new("a")
        .with_content("NEW")
        .with_resolver(|existing, generated| {
            Some(format!("{}+{}", existing.unwrap_or("-"), generated))
        });

    assert_eq!(resolve_content(&file, Some("OLD")), Some("OLD+NEW".to_string()));
    // The resolver is authoritative even when no file exists yet.
    assert_eq!(resolve_content(&file, None), Some("-+NEW".to_string()));
}

#[test_log::test]
fn test_persist_assets_creates_everything() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path();

    let mut assets = AssetCollection::new();
    assets.add(Directory::new("src")).unwrap();
    assets
        .add(File::new("src/main.php").with_content("BODY\n"))
        .unwrap();

    persist_assets(&mut assets, output).unwrap();

    assert!(output.join("src").is_dir());
    assert_eq!(
        fs::read_to_string(output.join("src/main.php")).unwrap(),
        "BODY\n"
    );
}

#[test_log::test]
fn test_persist_skip_leaves_existing_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path();
    fs::write(output.join("config.yml"), "existing: true\n").unwrap();

    let mut assets = AssetCollection::new();
    assets
        .add(
            File::new("config.yml")
                .with_content("generated: true\n")
                .with_action(Action::Skip),
        )
        .unwrap();

    persist_assets(&mut assets, output).unwrap();

    assert_eq!(
        fs::read_to_string(output.join("config.yml")).unwrap(),
        "existing: true\n"
    );
    // The asset stays recorded, with no written content.
    let file = assets.files().next().unwrap();
    assert!(file.content().is_none());
}

#[test_log::test]
fn test_persist_records_written_content() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path();
    fs::write(output.join("module.php"), "H1\nH2\nBODY").unwrap();

    let mut assets = AssetCollection::new();
    assets
        .add(
            File::new("module.php")
                .with_content("NEW")
                .with_action(Action::Prepend)
                .with_header_size(NonZeroUsize::new(2).unwrap()),
        )
        .unwrap();

    persist_assets(&mut assets, output).unwrap();

    assert_eq!(
        fs::read_to_string(output.join("module.php")).unwrap(),
        "NEW\nBODY"
    );
    let file = assets.files().next().unwrap();
    assert_eq!(file.content(), Some("NEW\nBODY"));
}

#[cfg(unix)]
#[test_log::test]
fn test_persist_creates_symlink() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path();

    let mut assets = AssetCollection::new();
    assets.add(Symlink::new("current", "releases/v1")).unwrap();

    persist_assets(&mut assets, output).unwrap();

    let link = fs::read_link(output.join("current")).unwrap();
    assert_eq!(link, std::path::PathBuf::from("releases/v1"));
}

#[cfg(unix)]
#[test_log::test]
fn test_persist_replaces_stale_symlink() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path();
    std::os::unix::fs::symlink("releases/v1", output.join("current")).unwrap();

    let mut assets = AssetCollection::new();
    assets.add(Symlink::new("current", "releases/v2")).unwrap();

    persist_assets(&mut assets, output).unwrap();

    let link = fs::read_link(output.join("current")).unwrap();
    assert_eq!(link, std::path::PathBuf::from("releases/v2"));
}

#[cfg(unix)]
#[test_log::test]
fn test_persist_refuses_to_replace_file_with_symlink() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path();
    fs::write(output.join("current"), "real file\n").unwrap();

    let mut assets = AssetCollection::new();
    assets.add(Symlink::new("current", "releases/v1")).unwrap();

    let result = persist_assets(&mut assets, output);

    match result {
        Err(Error::IoError(error)) => {
            assert_eq!(error.kind(), std::io::ErrorKind::AlreadyExists)
        }
        _ => panic!("Expected IoError variant"),
    }
    // The existing file survived.
    assert_eq!(
        fs::read_to_string(output.join("current")).unwrap(),
        "real file\n"
    );
}

#[cfg(unix)]
#[test_log::test]
fn test_persist_applies_modes() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path();

    let mut assets = AssetCollection::new();
    assets.add(Directory::new("bin").with_mode(0o700)).unwrap();
    assets
        .add(File::new("bin/run.sh").with_content("#!/bin/sh\n").with_mode(0o755))
        .unwrap();

    persist_assets(&mut assets, output).unwrap();

    let dir_mode = fs::metadata(output.join("bin")).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);

    let file_mode = fs::metadata(output.join("bin/run.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(file_mode & 0o777, 0o755);
}
