//! Tests for statistics collection

use crate::fixtures::write_file_sync;
use pathinfo::SizeBasis;
use pathinfo::models::Status;
use pathinfo::services::stats::StatsCollector;
use std::fs;
use tempfile::{NamedTempFile, TempDir};
use time::UtcOffset;

fn assert_timestamp_layout(value: &str) {
    // DD/MM/YYYY HH:MM:SS
    let bytes = value.as_bytes();
    assert_eq!(bytes.len(), 19, "unexpected timestamp {value}");
    assert_eq!(bytes[2], b'/');
    assert_eq!(bytes[5], b'/');
    assert_eq!(bytes[10], b' ');
    assert_eq!(bytes[13], b':');
    assert_eq!(bytes[16], b':');
    for (i, b) in bytes.iter().enumerate() {
        if ![2, 5, 10, 13, 16].contains(&i) {
            assert!(b.is_ascii_digit(), "unexpected timestamp {value}");
        }
    }
}

#[test]
fn test_zero_byte_file_is_zero_kb() {
    let temp_file = NamedTempFile::new().unwrap();
    let stats = StatsCollector::default().collect(temp_file.path()).unwrap();

    assert_eq!(stats.size_kb, 0.0);
    assert_timestamp_layout(&stats.modified_at);
    assert_timestamp_layout(&stats.created_at);
}

#[test]
fn test_size_in_kilobytes() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("two_k.bin");
    write_file_sync(&file, &[0u8; 2048]).unwrap();
    let odd = temp_dir.path().join("odd.bin");
    write_file_sync(&odd, &[0u8; 1000]).unwrap();

    let collector = StatsCollector::with_offset(SizeBasis::Logical, UtcOffset::UTC);
    assert_eq!(collector.collect(&file).unwrap().size_kb, 2.0);
    assert_eq!(collector.collect(&odd).unwrap().size_kb, 0.98);
}

#[test]
fn test_directory_has_stats() {
    let temp_dir = TempDir::new().unwrap();
    let stats = StatsCollector::default().collect(temp_dir.path()).unwrap();
    assert!(stats.size_kb >= 0.0);
}

#[test]
fn test_physical_basis_is_non_negative() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("data.bin");
    write_file_sync(&file, &[7u8; 4096]).unwrap();

    let stats = StatsCollector::new(SizeBasis::Physical).collect(&file).unwrap();
    assert!(stats.size_kb >= 0.0);
}

#[test]
fn test_vanished_path_degrades_to_failure() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("short_lived.txt");
    write_file_sync(&file, b"bye").unwrap();
    fs::remove_file(&file).unwrap();

    let failure = StatsCollector::default().collect(&file).unwrap_err();
    assert_eq!(failure.status, Status::Failed);
    assert!(failure.message.contains("não encontrado"));
    assert!(failure.message.contains("short_lived.txt"));

    let json = serde_json::to_value(&failure).unwrap();
    assert_eq!(json["status"], "falha");
    assert!(json["erro"].as_str().unwrap().contains("não encontrado"));
}

#[test]
fn test_same_offset_gives_same_timestamps() {
    let temp_file = NamedTempFile::new().unwrap();
    let collector = StatsCollector::with_offset(SizeBasis::Logical, UtcOffset::UTC);

    let first = collector.collect(temp_file.path()).unwrap();
    let second = collector.collect(temp_file.path()).unwrap();
    assert_eq!(first, second);
}
