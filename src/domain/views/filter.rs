use crate::domain::entities::dataset::FilterCriteria;
use crate::domain::entities::row::Row;

pub fn matches(row: &Row, criteria: &FilterCriteria, needle: &str) -> bool {
    if !criteria.status.accepts(row.status) {
        return false;
    }
    needle.is_empty()
        || row
            .field_texts()
            .any(|text| text.to_lowercase().contains(needle))
}

/// Rows passing both the status and the search predicate, in input order.
pub fn filter<'a>(rows: &'a [Row], criteria: &FilterCriteria) -> Vec<&'a Row> {
    let needle = criteria.search.to_lowercase();
    rows.iter()
        .filter(|row| matches(row, criteria, &needle))
        .collect()
}

pub fn filter_owned(rows: &[Row], criteria: &FilterCriteria) -> Vec<Row> {
    filter(rows, criteria).into_iter().cloned().collect()
}
