//! End-to-end discovery over a typical served tree

use webgl_host::scan::{scan_builds, Compression, ScanOptions};
use tempfile::TempDir;

use crate::integration::{touch, write_sized};

fn typical_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_sized(&root.join("Builds/Game1/ServiceWorker.js"), 12_000);
    std::fs::create_dir_all(root.join("Builds/Game2/TemplateData")).unwrap();
    write_sized(&root.join("Builds/Game2/Build/app.wasm.gz"), 8_000);
    write_sized(&root.join("Builds/Game2/Build/app.data"), 4_000);

    temp_dir
}

#[test]
fn test_two_builds_sorted_with_sizes_and_compression() {
    let temp_dir = typical_tree();
    let root = dunce::canonicalize(temp_dir.path()).unwrap();

    let builds = scan_builds(&root, &ScanOptions::default());
    assert_eq!(builds.len(), 2);

    let game1 = &builds[0];
    assert_eq!(game1.name, "Game1");
    assert_eq!(game1.relative_path, "/Builds/Game1/");
    assert_eq!(game1.absolute_path, root.join("Builds").join("Game1"));
    assert_eq!(game1.size_bytes, 12_000);
    assert_eq!(game1.compression, Compression::Unknown);

    let game2 = &builds[1];
    assert_eq!(game2.name, "Game2");
    assert_eq!(game2.relative_path, "/Builds/Game2/");
    assert_eq!(game2.absolute_path, root.join("Builds").join("Game2"));
    assert_eq!(game2.size_bytes, 12_000);
    assert_eq!(game2.compression, Compression::Gzip);
}

#[test]
fn test_relative_root_gives_same_result() {
    let temp_dir = typical_tree();
    let root = dunce::canonicalize(temp_dir.path()).unwrap();
    let dotted = root.join("Builds").join("..");

    let direct = scan_builds(&root, &ScanOptions::default());
    let indirect = scan_builds(&dotted, &ScanOptions::default());
    assert_eq!(direct, indirect);
}

#[test]
fn test_scan_is_repeatable() {
    let temp_dir = typical_tree();
    touch(&temp_dir.path().join("Other/ServiceWorker.js"));

    let first = scan_builds(temp_dir.path(), &ScanOptions::default());
    let second = scan_builds(temp_dir.path(), &ScanOptions::default());
    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        vec!["Game1", "Game2", "Other"]
    );
}

#[test]
fn test_single_worker_matches_parallel() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..12 {
        write_sized(
            &temp_dir.path().join(format!("Game{:02}", i)).join("ServiceWorker.js"),
            100 * (i + 1),
        );
    }

    let sequential = scan_builds(
        temp_dir.path(),
        &ScanOptions {
            workers: 1,
            ..ScanOptions::default()
        },
    );
    let parallel = scan_builds(
        temp_dir.path(),
        &ScanOptions {
            workers: 4,
            ..ScanOptions::default()
        },
    );
    assert_eq!(sequential.len(), 12);
    assert_eq!(sequential, parallel);
}
