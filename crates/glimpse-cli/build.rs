use std::env;
use std::fs;
use std::path::Path;

// Copies bundled images from `resources/` next to the built binaries, where
// the resolver looks for them after the literal path.
fn main() {
    println!("cargo:rerun-if-changed=resources/");

    let source = Path::new("resources");
    if !source.exists() {
        return;
    }

    let out_dir = env::var("OUT_DIR").unwrap();
    let target_dir = Path::new(&out_dir)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap();

    let destination = target_dir.join("resources");

    if destination.exists() {
        fs::remove_dir_all(&destination).unwrap();
    }

    copy_tree(source, &destination);
}

fn copy_tree(source: &Path, destination: &Path) {
    fs::create_dir_all(destination).unwrap();
    for entry in fs::read_dir(source).unwrap() {
        let path = entry.unwrap().path();
        let target = destination.join(path.file_name().unwrap());
        if path.is_dir() {
            copy_tree(&path, &target);
        } else if path.is_file() {
            fs::copy(&path, target).unwrap();
        }
    }
}
