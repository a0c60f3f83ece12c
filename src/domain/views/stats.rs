use crate::domain::entities::row::{Row, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub late: usize,
}

pub fn stats(rows: &[Row]) -> Stats {
    rows.iter().fold(
        Stats {
            total: rows.len(),
            ..Stats::default()
        },
        |mut acc, row| {
            match row.status {
                Status::Pending => acc.pending += 1,
                Status::Paid => acc.paid += 1,
                Status::Late => acc.late += 1,
            }
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn rows_with(statuses: &[Status]) -> Vec<Row> {
        statuses
            .iter()
            .enumerate()
            .map(|(idx, status)| {
                let mut row = Row::new(format!("row-9-{idx}"), BTreeMap::new());
                row.status = *status;
                row
            })
            .collect()
    }

    #[test]
    fn empty_rows_count_nothing() {
        assert_eq!(stats(&[]), Stats::default());
    }

    #[test]
    fn counts_each_status() {
        let rows = rows_with(&[
            Status::Pending,
            Status::Paid,
            Status::Late,
            Status::Paid,
            Status::Pending,
            Status::Pending,
        ]);
        let result = stats(&rows);
        assert_eq!(
            result,
            Stats {
                total: 6,
                paid: 2,
                pending: 3,
                late: 1,
            }
        );
        assert_eq!(result.paid + result.pending + result.late, result.total);
    }
}
