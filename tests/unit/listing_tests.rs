//! Tests for directory listing, extension filtering and depth handling

use crate::fixtures::{create_simple_fixture, write_file_sync};
use pathinfo::models::{DirectoryEntry, ListedItem};
use pathinfo::services::listing::{DirectoryLister, ExtensionFilter, ListingDepth};
use pathinfo::EntityKind;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn paths(entries: &[DirectoryEntry]) -> HashSet<String> {
    entries.iter().map(|e| e.path().to_string()).collect()
}

fn find<'a>(entries: &'a [DirectoryEntry], name: &str) -> &'a ListedItem {
    entries
        .iter()
        .find_map(|entry| match entry {
            DirectoryEntry::Item(item) if item.name == name => Some(item),
            _ => None,
        })
        .unwrap_or_else(|| panic!("{name} not listed"))
}

#[test]
fn test_shallow_listing_matches_directory_contents() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_simple_fixture(temp_dir.path()).unwrap();
    let fixture = fs::canonicalize(fixture).unwrap();

    let entries = DirectoryLister::default().list(&fixture);

    let expected: HashSet<String> = fs::read_dir(&fixture)
        .unwrap()
        .map(|e| e.unwrap().path().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), expected.len(), "each child exactly once");
    assert_eq!(paths(&entries), expected);
    assert!(entries.iter().all(|e| matches!(e, DirectoryEntry::Path(_))));
}

#[test]
fn test_empty_directory_lists_nothing() {
    let temp_dir = TempDir::new().unwrap();
    assert!(DirectoryLister::default().list(temp_dir.path()).is_empty());
}

#[test]
fn test_extension_filter_is_case_sensitive() {
    let temp_dir = TempDir::new().unwrap();
    write_file_sync(temp_dir.path().join("a.txt"), b"a").unwrap();

    let upper = DirectoryLister::new(Some(ExtensionFilter::new([".TXT"])), ListingDepth::Shallow);
    assert!(upper.list(temp_dir.path()).is_empty());

    let lower = DirectoryLister::new(Some(ExtensionFilter::new([".txt"])), ListingDepth::Shallow);
    assert_eq!(lower.list(temp_dir.path()).len(), 1);
}

#[test]
fn test_shallow_filter_keeps_only_matching_files() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_simple_fixture(temp_dir.path()).unwrap();

    let lister = DirectoryLister::new(Some(ExtensionFilter::new([".txt"])), ListingDepth::Shallow);
    let entries = lister.list(&fixture);

    assert_eq!(entries.len(), 1);
    assert!(entries[0].path().ends_with("file1.txt"));
}

#[test]
fn test_empty_filter_means_no_filter() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_simple_fixture(temp_dir.path()).unwrap();

    let lister = DirectoryLister::new(
        Some(ExtensionFilter::new(Vec::<String>::new())),
        ListingDepth::Shallow,
    );
    assert_eq!(lister.list(&fixture).len(), 4);
}

#[test]
fn test_nested_listing_respects_depth() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_simple_fixture(temp_dir.path()).unwrap();

    let entries = DirectoryLister::new(None, ListingDepth::Levels(1)).list(&fixture);

    let subdir1 = find(&entries, "subdir1");
    assert_eq!(subdir1.kind, EntityKind::Directory);
    let children = subdir1.children.as_ref().expect("one level below is listed");
    let nested = find(children, "nested");
    assert!(nested.children.is_none(), "depth exhausted below subdir1");

    let file1 = find(&entries, "file1.txt");
    assert_eq!(file1.kind, EntityKind::File);
    assert!(file1.children.is_none());
}

#[test]
fn test_unbounded_listing_reaches_the_bottom() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_simple_fixture(temp_dir.path()).unwrap();

    let entries = DirectoryLister::new(None, ListingDepth::Unbounded).list(&fixture);

    let subdir1 = find(&entries, "subdir1");
    let nested = find(subdir1.children.as_ref().unwrap(), "nested");
    let file4 = find(nested.children.as_ref().unwrap(), "file4.txt");
    assert_eq!(file4.kind, EntityKind::File);
    assert_eq!(
        file4.path,
        fixture.join("subdir1/nested/file4.txt").to_string_lossy()
    );
    assert_eq!(file4.extension.as_deref(), Some(".txt"));
    assert_eq!(file4.size_kb, Some(0.5));

    assert!(nested.extension.is_none());
    assert!(nested.size_kb.is_none());

    let json = serde_json::to_value(file4).unwrap();
    assert_eq!(json["extensao"], ".txt");
    assert_eq!(json["tamanho_em_kB"], 0.5);
    let dir_json = serde_json::to_value(nested).unwrap();
    assert!(dir_json.get("extensao").is_none());
    assert!(dir_json.get("tamanho_em_kB").is_none());
}

#[test]
fn test_nested_filter_prunes_directories_without_matches() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file_sync(root.join("keep/deep/report.csv"), b"a,b").unwrap();
    write_file_sync(root.join("drop/readme.md"), b"# x").unwrap();
    write_file_sync(root.join("top.csv"), b"1,2").unwrap();

    let lister = DirectoryLister::new(Some(ExtensionFilter::new([".csv"])), ListingDepth::Unbounded);
    let entries = lister.list(root);

    let names: HashSet<&str> = entries
        .iter()
        .map(|e| match e {
            DirectoryEntry::Item(item) => item.name.as_str(),
            other => panic!("unexpected entry {other:?}"),
        })
        .collect();
    assert_eq!(names, HashSet::from(["keep", "top.csv"]));

    let keep = find(&entries, "keep");
    let deep = find(keep.children.as_ref().unwrap(), "deep");
    find(deep.children.as_ref().unwrap(), "report.csv");
}

#[test]
#[cfg(unix)]
fn test_symlink_cycle_terminates() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("a/b")).unwrap();
    std::os::unix::fs::symlink(root, root.join("a/b/back_to_root")).unwrap();
    std::os::unix::fs::symlink(root.join("a"), root.join("a/self")).unwrap();

    let entries = DirectoryLister::new(None, ListingDepth::Unbounded).list(root);

    let a = find(&entries, "a");
    let a_children = a.children.as_ref().unwrap();
    let looped = find(a_children, "self");
    assert_eq!(looped.kind, EntityKind::Directory);
    assert!(looped.children.is_none(), "cycle is not descended");

    let b = find(a_children, "b");
    let back = find(b.children.as_ref().unwrap(), "back_to_root");
    assert!(back.children.is_none());
}

#[test]
#[cfg(unix)]
fn test_locked_subdirectory_becomes_sentinel() {
    use crate::fixtures::{lock_directory, unlock_directory};

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file_sync(root.join("open/visible.txt"), b"ok").unwrap();
    let locked = root.join("locked");
    fs::create_dir(&locked).unwrap();
    write_file_sync(root.join("sibling.txt"), b"ok").unwrap();

    if !lock_directory(&locked) {
        return;
    }

    let entries = DirectoryLister::new(None, ListingDepth::Unbounded).list(root);
    unlock_directory(&locked);

    let locked_item = find(&entries, "locked");
    let children = locked_item.children.as_ref().unwrap();
    assert_eq!(children.len(), 1);
    assert!(children[0].is_inaccessible());

    let sentinel = serde_json::to_value(&children[0]).unwrap();
    assert!(sentinel.as_str().unwrap().starts_with("Inacessível: "));

    // Siblings are still listed
    find(&entries, "sibling.txt");
    find(find(&entries, "open").children.as_ref().unwrap(), "visible.txt");
}

#[test]
#[cfg(unix)]
fn test_unreadable_top_directory_yields_single_sentinel() {
    use crate::fixtures::{lock_directory, unlock_directory};

    let temp_dir = TempDir::new().unwrap();
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    write_file_sync(locked.join("hidden.txt"), b"x").unwrap();

    if !lock_directory(&locked) {
        return;
    }

    let entries = DirectoryLister::default().list(&locked);
    unlock_directory(&locked);

    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0],
        DirectoryEntry::Inaccessible(locked.to_string_lossy().into_owned())
    );
}
