//! Monthly sales summary.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use shared::MonthlySummaryEntry;

use super::models::SaleRecord;

#[derive(Clone, Default)]
pub struct MonthlySummaryService;

impl MonthlySummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of sales made per calendar month, oldest month first
    pub fn monthly_summary(&self, records: &[SaleRecord]) -> Vec<MonthlySummaryEntry> {
        let mut months: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
        for record in records {
            let entry = months
                .entry((record.date.year(), record.date.month()))
                .or_insert((0.0, 0));
            entry.0 += record.sales_made;
            entry.1 += 1;
        }

        months
            .into_iter()
            .map(|((year, month), (sales_made, sale_count))| MonthlySummaryEntry {
                month: format!("{:04}-{:02}", year, month),
                label: Self::month_label(year, month),
                sales_made,
                sale_count,
            })
            .collect()
    }

    fn month_label(year: i32, month: u32) -> String {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| first.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
    }
}
