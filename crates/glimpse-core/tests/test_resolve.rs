mod common;

use std::path::{Path, PathBuf};

use glimpse_core::io::resolve::ResourceResolver;
use glimpse_core::source::Origin;

use common::{png_bytes, write_png, RED};

#[test]
fn test_literal_path_resolves_as_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "shot.png", 2, 2, RED);

    let resolver = ResourceResolver::new(vec![]);
    let source = resolver.resolve(&path).unwrap();

    assert_eq!(source.origin, Origin::File(path.clone()));
    assert_eq!(source.requested, path);
    assert_eq!(source.bytes, png_bytes(2, 2, RED));
}

#[test]
fn test_falls_back_to_resource_root() {
    let root = tempfile::tempdir().unwrap();
    let expected = write_png(root.path(), "baseline/home.png", 2, 2, RED);

    let resolver = ResourceResolver::new(vec![root.path().to_path_buf()]);
    let origin = resolver.locate(Path::new("baseline/home.png")).unwrap();

    assert!(origin.is_resource());
    assert_eq!(
        origin,
        Origin::Resource {
            root: root.path().to_path_buf(),
            path: expected,
        }
    );
}

#[test]
fn test_absolute_name_maps_into_resource_root() {
    let root = tempfile::tempdir().unwrap();
    let expected = write_png(root.path(), "glimpse-missing-dir/a.png", 1, 1, RED);

    let resolver = ResourceResolver::new(vec![root.path().to_path_buf()]);
    let origin = resolver
        .locate(Path::new("/glimpse-missing-dir/a.png"))
        .unwrap();

    assert_eq!(origin.path(), expected.as_path());
}

#[test]
fn test_roots_searched_in_order() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    write_png(second.path(), "a.png", 1, 1, RED);
    let in_first = write_png(first.path(), "a.png", 1, 1, RED);

    let resolver = ResourceResolver::new(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);
    let origin = resolver.locate(Path::new("a.png")).unwrap();
    assert_eq!(origin.path(), in_first.as_path());
}

#[test]
fn test_missing_everywhere_is_not_found() {
    let root = tempfile::tempdir().unwrap();
    let resolver = ResourceResolver::new(vec![root.path().to_path_buf()]);

    let err = resolver.resolve(Path::new("nope/missing.png")).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn test_directory_is_not_an_image_source() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("folder")).unwrap();

    let resolver = ResourceResolver::new(vec![root.path().to_path_buf()]);
    let err = resolver.locate(Path::new("folder")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_parent_traversal_not_looked_up() {
    let outer = tempfile::tempdir().unwrap();
    let root = outer.path().join("res");
    std::fs::create_dir_all(&root).unwrap();
    write_png(outer.path(), "secret.png", 1, 1, RED);

    let resolver = ResourceResolver::new(vec![root]);
    // `<root>/../secret.png` exists, but names climbing out of a root are
    // never tried.
    let err = resolver
        .locate(&PathBuf::from("../secret.png"))
        .unwrap_err();
    assert!(err.is_not_found());
}
