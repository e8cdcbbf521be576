//! End-to-end round trip over a fixture tree of JDK-style headers
//!
//! This test exercises the complete flow: config loading -> add -> remove,
//! checking every file comes back byte for byte.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use nswrap_blocks::{DirectiveKind, SourceFile, classify_lines};
use nswrap_core::{FileStatus, NamespaceEngine, RunOptions};
use nswrap_fs::NormalizedPath;
use nswrap_meta::{Command, load_config};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use walkdir::WalkDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../test-fixtures/jdk-headers");

/// Copy the fixture tree into a fresh temp dir.
fn setup_fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    for entry in WalkDir::new(FIXTURE) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(FIXTURE).unwrap();
        let target = temp.path().join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    temp
}

/// Relative path -> raw bytes for every file under `root`.
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn engine(root: &Path) -> NamespaceEngine {
    let config = load_config(&NormalizedPath::new(root.join("nswrap.toml"))).unwrap();
    NamespaceEngine::new(config, RunOptions::default()).unwrap()
}

fn conditional_counts(text: &str) -> (usize, usize) {
    let source = SourceFile::from_text(text);
    let classes = classify_lines(source.lines());
    let count = |kind| classes.iter().filter(|c| c.directive == kind).count();
    (count(DirectiveKind::If), count(DirectiveKind::EndIf))
}

fn status_of<'a>(report: &'a nswrap_core::RunReport, name: &str) -> &'a FileStatus {
    &report
        .files
        .iter()
        .find(|f| f.path.file_name() == Some(name))
        .unwrap()
        .status
}

#[test]
fn test_fixture_round_trip() {
    let temp = setup_fixture();
    let root = temp.path();
    let before = snapshot(root);
    let engine = engine(root);
    let inputs = [NormalizedPath::new(root)];

    let added = engine.run(Command::Add, &inputs).unwrap();
    assert!(added.success(), "add failed: {:?}", added.files);
    assert_eq!(added.files.len(), 6);
    assert_eq!(added.changed(), 5);
    assert_eq!(*status_of(&added, "jni_md.h"), FileStatus::Skipped);

    let after_add = snapshot(root);
    assert_ne!(after_add, before);
    assert_eq!(after_add["README.txt"], before["README.txt"]);
    assert_eq!(after_add["nswrap.toml"], before["nswrap.toml"]);

    let removed = engine.run(Command::Remove, &inputs).unwrap();
    assert!(removed.success(), "remove failed: {:?}", removed.files);
    assert_eq!(removed.changed(), 5);

    assert_eq!(snapshot(root), before);
}

#[test]
fn test_fixture_span_placement() {
    let temp = setup_fixture();
    let root = temp.path();
    let report = engine(root)
        .run(Command::Add, &[NormalizedPath::new(root)])
        .unwrap();

    assert_eq!(
        status_of(&report, "launcher.c").details(),
        vec!["wrapped lines 6-12", "wrapped lines 15-19"]
    );
    assert_eq!(status_of(&report, "os_support.cpp").details(), vec!["wrapped lines 10-22"]);

    let jni = fs::read_to_string(root.join("include/jni.h")).unwrap();
    let opening = jni.find("namespace espresso {").unwrap();
    let guard = jni.find("#ifdef __cplusplus").unwrap();
    assert!(opening < guard, "namespace must open before the extern \"C\" guard");

    let jvm = fs::read_to_string(root.join("include/jvm.h")).unwrap();
    assert!(jvm.contains("#ifdef __cplusplus\nnamespace espresso {\n#endif\n"));
    assert!(jvm.contains("#ifdef __cplusplus\n} // namespace espresso\n#endif\n"));

    let launcher = fs::read_to_string(root.join("src/launcher.c")).unwrap();
    assert!(launcher.contains("return espresso::JNI_CreateJavaVM(&vm, &env, args);"));
    assert!(launcher.contains("    espresso::JNI_GetCreatedJavaVMs(0, 0, &n);"));

    let native = fs::read(root.join("src/native.h")).unwrap();
    let native = String::from_utf8(native).unwrap();
    assert!(native.contains("namespace espresso {\r\n\r\nint native_init(void);\r\n"));
    assert!(!native.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_fixture_preserves_conditional_balance() {
    let temp = setup_fixture();
    let root = temp.path();
    engine(root)
        .run(Command::Add, &[NormalizedPath::new(root)])
        .unwrap();

    for (rel, bytes) in snapshot(root) {
        if !rel.ends_with(".h") && !rel.ends_with(".c") && !rel.ends_with(".cpp") {
            continue;
        }
        let text = String::from_utf8(bytes).unwrap();
        let (opens, closes) = conditional_counts(&text);
        assert_eq!(opens, closes, "unbalanced conditionals in {}", rel);
    }
}
