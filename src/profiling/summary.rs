//! Dataset-wide summary builder.

use std::collections::HashMap;

use crate::types::{Summary, Table};

use super::ProfileOptions;
use super::column::profile_column;

/// Summarize `table` with the default [`ProfileOptions`].
pub fn summarize(table: &Table) -> Summary {
    summarize_with(table, &ProfileOptions::default())
}

/// Summarize `table`: profile every column in declared order, sum missing values across columns,
/// and collect the numeric column names.
///
/// A name repeated in the header is profiled once, at its first position. `column_count` still
/// reports every header field, and `missing_count` adds the shared profile's missing count once per
/// declared field, so both totals follow the header. An empty table yields an empty summary;
/// callers should treat `table.is_empty()` as "no data" before running calculators.
pub fn summarize_with(table: &Table, options: &ProfileOptions) -> Summary {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut profiles = Vec::new();
    let mut numeric_columns = Vec::new();
    let mut missing_count = 0;

    for column in &table.columns {
        let idx = *positions.entry(column.as_str()).or_insert_with(|| {
            let profile = profile_column(column, &table.column_cells(column), options);
            if profile.is_numeric {
                numeric_columns.push(column.clone());
            }
            profiles.push(profile);
            profiles.len() - 1
        });
        missing_count += profiles[idx].missing_count;
    }

    log::debug!(
        "summarized {} rows x {} columns ({} numeric, {} missing)",
        table.row_count(),
        table.column_count(),
        numeric_columns.len(),
        missing_count
    );

    Summary {
        row_count: table.row_count(),
        column_count: table.column_count(),
        missing_count,
        numeric_columns,
        profiles,
    }
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::ingestion::delimited::parse_delimited_str;
    use crate::types::Table;

    #[test]
    fn missing_count_sums_across_columns() {
        let table = parse_delimited_str("a,b,c\n1,,x\n,2\n3,4,y\n");
        let s = summarize(&table);
        // a: 1 empty; b: 1 empty; c: 1 padded.
        assert_eq!(s.missing_count, 3);
        assert_eq!(s.numeric_columns, vec!["a", "b"]);
        assert_eq!(s.column_count, 3);
        assert_eq!(s.row_count, 3);
    }

    #[test]
    fn duplicate_headers_are_profiled_once() {
        let table = parse_delimited_str("v,v,w\n1,2,a\n3,4,b\n");
        let s = summarize(&table);
        assert_eq!(s.column_count, 3);
        assert_eq!(s.profiles.len(), 2);
        assert_eq!(s.numeric_columns, vec!["v"]);
        // The later position wins when rows are keyed by name.
        assert_eq!(s.profile("v").unwrap().stats.unwrap().mean, 3.0);
    }

    #[test]
    fn repeated_columns_count_missing_once_per_field() {
        let s = summarize(&parse_delimited_str("v,v\n,\n1,2\n"));
        assert_eq!(s.profiles.len(), 1);
        assert_eq!(s.profile("v").unwrap().missing_count, 1);
        assert_eq!(s.missing_count, 2);
    }

    #[test]
    fn empty_table_gives_empty_summary() {
        let s = summarize(&Table::default());
        assert_eq!(s.row_count, 0);
        assert_eq!(s.column_count, 0);
        assert!(s.profiles.is_empty());
        assert!(s.first_numeric().is_none());
    }

    #[test]
    fn header_only_table_has_non_numeric_profiles() {
        let s = summarize(&parse_delimited_str("a,b\n"));
        assert_eq!(s.column_count, 2);
        assert_eq!(s.row_count, 0);
        assert!(s.numeric_columns.is_empty());
        assert!(s.profiles.iter().all(|p| p.stats.is_none()));
    }
}
