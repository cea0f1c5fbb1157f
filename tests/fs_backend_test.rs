use std::fs;
use studyvault::error::VaultError;
use studyvault::store::fs::FsBackend;
use studyvault::store::{LibraryBackend, LibraryStore};
use tempfile::TempDir;

#[test]
fn list_creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("libraries");
    let store = LibraryStore::new(FsBackend::new(root.clone()));

    assert!(store.list().unwrap().is_empty());
    assert!(root.is_dir());
    assert_eq!(store.backend().root(), root.as_path());
}

#[test]
fn only_markdown_files_are_libraries() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    fs::write(root.join("b.md"), "# b Library\n").unwrap();
    fs::write(root.join("a.md"), "# a Library\n").unwrap();
    fs::write(root.join("notes.txt"), "ignored").unwrap();
    fs::create_dir(root.join("dir.md")).unwrap();

    let store = LibraryStore::new(FsBackend::new(root));
    assert_eq!(store.list().unwrap(), vec!["a", "b"]);
}

#[test]
fn create_write_and_read_back() {
    let temp = TempDir::new().unwrap();
    let store = LibraryStore::new(FsBackend::new(temp.path().join("libs")));

    let lib = store.create("history").unwrap();
    assert_eq!(lib.path, temp.path().join("libs").join("history.md"));
    assert_eq!(store.read(&lib).unwrap(), "# history Library\n");

    store.write(&lib, "# history Library\n\n## Rome\n").unwrap();
    assert_eq!(
        fs::read_to_string(&lib.path).unwrap(),
        "# history Library\n\n## Rome\n"
    );

    let leftovers: Vec<_> = fs::read_dir(temp.path().join("libs"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn create_refuses_existing_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bio.md"), "mine").unwrap();
    let store = LibraryStore::new(FsBackend::new(temp.path().to_path_buf()));

    assert!(matches!(
        store.create("bio"),
        Err(VaultError::AlreadyExists(_))
    ));
    assert_eq!(
        fs::read_to_string(temp.path().join("bio.md")).unwrap(),
        "mine"
    );
}

#[test]
fn reading_a_deleted_library_fails() {
    let temp = TempDir::new().unwrap();
    let store = LibraryStore::new(FsBackend::new(temp.path().to_path_buf()));
    let lib = store.create("bio").unwrap();
    fs::remove_file(&lib.path).unwrap();

    assert!(matches!(
        store.read(&lib),
        Err(VaultError::LibraryNotFound(_))
    ));
    assert!(!store.backend().exists("bio"));
}

#[test]
fn directory_named_like_a_library_is_not_one() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("x.md")).unwrap();
    let store = LibraryStore::new(FsBackend::new(temp.path().to_path_buf()));

    assert!(!store.backend().exists("x"));
    assert!(matches!(
        store.open("x"),
        Err(VaultError::LibraryNotFound(_))
    ));
}
