//! Property tests for insert and scan.
//!
//! Up to 20 distinct keys fit a root split (7 + 7) plus 6 more in either leaf,
//! so these never hit the non-root split limit.

use std::collections::BTreeSet;

use leafdb::{Error, Row, Table};
use proptest::prelude::*;
use tempfile::tempdir;

fn row(id: u32) -> Row {
    Row::new(id, &format!("u{}", id), &format!("{}@example.com", id)).unwrap()
}

fn scan_ids(table: &Table) -> Vec<u32> {
    table
        .select_all()
        .unwrap()
        .map(|row| row.unwrap().id())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any insertion order scans back as the sorted key set.
    #[test]
    fn prop_scan_is_sorted_key_set(keys in proptest::collection::vec(any::<u32>(), 0..=20)) {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("prop.db")).unwrap();
        let mut live = BTreeSet::new();

        for &key in &keys {
            let result = table.insert_row(&row(key));
            if live.insert(key) {
                prop_assert!(result.is_ok(), "insert {} failed: {:?}", key, result);
            } else {
                prop_assert!(matches!(result, Err(Error::DuplicateKey(k)) if k == key));
            }
        }

        prop_assert_eq!(scan_ids(&table), live.iter().copied().collect::<Vec<_>>());
    }

    /// A rejected duplicate changes neither the scan nor the stored row.
    #[test]
    fn prop_duplicate_leaves_table_unchanged(
        keys in proptest::collection::hash_set(any::<u32>(), 1..=20),
        pick in any::<prop::sample::Index>(),
    ) {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("prop.db")).unwrap();
        let keys: Vec<u32> = keys.into_iter().collect();

        for &key in &keys {
            table.insert_row(&row(key)).unwrap();
        }
        let before = scan_ids(&table);

        let dup = keys[pick.index(keys.len())];
        let result = table.insert_row(&Row::new(dup, "other", "other@example.com").unwrap());
        prop_assert!(matches!(result, Err(Error::DuplicateKey(k)) if k == dup));

        prop_assert_eq!(scan_ids(&table), before);
        prop_assert_eq!(table.get(dup).unwrap(), Some(row(dup)));
    }

    /// Every inserted key is found by point lookup after a reopen.
    #[test]
    fn prop_persisted_rows_are_found(keys in proptest::collection::hash_set(any::<u32>(), 0..=20)) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prop.db");

        {
            let mut table = Table::open(&path).unwrap();
            for &key in &keys {
                table.insert_row(&row(key)).unwrap();
            }
            table.close().unwrap();
        }

        let table = Table::open(&path).unwrap();
        for &key in &keys {
            prop_assert_eq!(table.get(key).unwrap(), Some(row(key)));
        }
        prop_assert_eq!(scan_ids(&table).len(), keys.len());
    }
}
