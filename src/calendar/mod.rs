use std::collections::BTreeSet;
use std::ops::Range;

use chrono::{Datelike, Months, NaiveDate};

/// Day zero of the endless March.
pub const REFERENCE_DATE_YMD: (i32, u32, u32) = (2020, 2, 29);

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn reference_date() -> NaiveDate {
    let (y, m, d) = REFERENCE_DATE_YMD;
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Converts a day to a dom (day-of-march): the signed day offset from
/// [`reference_date`]. Contiguous and strictly increasing across dates.
pub fn reference(day: NaiveDate) -> i64 {
    (day - reference_date()).num_days()
}

// ─── Cells ────────────────────────────────────────────────────────────────────

/// What a grid cell shows: nothing (padding), a weekday name, or a dom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue {
    Blank,
    Header(&'static str),
    Day(i64),
}

impl CellValue {
    pub fn label(&self) -> String {
        match self {
            CellValue::Blank     => String::new(),
            CellValue::Header(n) => (*n).to_owned(),
            CellValue::Day(dom)  => dom.to_string(),
        }
    }
}

/// Named style flags instead of a bitmask: bold face, weekend color,
/// ring around the cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub bold:    bool,
    pub weekend: bool,
    pub circled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

fn weekend_column(col: usize) -> bool {
    col == 0 || col == 6
}

fn blank_cell(col: usize) -> Cell {
    Cell {
        value: CellValue::Blank,
        style: CellStyle {
            bold:    weekend_column(col),
            weekend: weekend_column(col),
            circled: false,
        },
    }
}

// ─── Month grid ───────────────────────────────────────────────────────────────

/// One month laid out Sunday-first, with a set of doms to circle.
///
/// Built once per render from any date inside the target month (only
/// year/month matter) and immutable afterwards.
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    first_day:         NaiveDate,
    first_week_indent: usize,
    doms:              Range<i64>,
    circled:           BTreeSet<i64>,
}

impl MonthCalendar {
    pub fn new(month: NaiveDate) -> Self {
        Self::with_circled(month, &[])
    }

    pub fn with_circled(month: NaiveDate, circled_days: &[NaiveDate]) -> Self {
        let first_day = month.with_day(1).unwrap();
        // Remap chrono's Monday-first weekday number to a Sunday-first column.
        let first_week_indent =
            ((first_day.weekday().num_days_from_monday() + 1) % 7) as usize;
        let next_month_first = first_day.checked_add_months(Months::new(1)).unwrap();
        Self {
            first_day,
            first_week_indent,
            doms: reference(first_day)..reference(next_month_first),
            circled: circled_days.iter().map(|&d| reference(d)).collect(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Sunday-first column of day 1 (0 = Sunday, 6 = Saturday).
    pub fn first_week_indent(&self) -> usize {
        self.first_week_indent
    }

    /// Half-open dom range covering the month.
    pub fn doms(&self) -> Range<i64> {
        self.doms.clone()
    }

    pub fn is_circled(&self, dom: i64) -> bool {
        self.circled.contains(&dom)
    }

    /// Returns the grid as rows of 7 cells: one header row, then one row
    /// per week. The first week is front-padded and the last week is
    /// back-padded with blanks so every row is exactly 7 wide.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        let mut rows = vec![self.header_row()];

        let mut week: Vec<Cell> = Vec::with_capacity(7);
        for _ in 0..self.first_week_indent {
            week.push(blank_cell(week.len()));
        }
        for dom in self.doms.clone() {
            let col = week.len();
            week.push(Cell {
                value: CellValue::Day(dom),
                style: CellStyle {
                    bold:    weekend_column(col),
                    weekend: weekend_column(col),
                    circled: self.circled.contains(&dom),
                },
            });
            if week.len() == 7 {
                rows.push(std::mem::take(&mut week));
            }
        }
        if !week.is_empty() {
            while week.len() < 7 {
                week.push(blank_cell(week.len()));
            }
            rows.push(week);
        }
        rows
    }

    fn header_row(&self) -> Vec<Cell> {
        WEEKDAY_NAMES
            .iter()
            .enumerate()
            .map(|(col, name)| Cell {
                value: CellValue::Header(name),
                style: CellStyle {
                    bold:    true,
                    weekend: weekend_column(col),
                    circled: false,
                },
            })
            .collect()
    }
}

/// Number of calendar days in the month containing `month`.
pub fn days_in_month(month: NaiveDate) -> u32 {
    let first = month.with_day(1).unwrap();
    let next = first.checked_add_months(Months::new(1)).unwrap();
    (next - first).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reference_is_zero_at_epoch() {
        assert_eq!(reference(reference_date()), 0);
    }

    #[test]
    fn reference_counts_march_days() {
        assert_eq!(reference(ymd(2020, 3, 1)), 1);
        assert_eq!(reference(ymd(2020, 3, 31)), 31);
        assert_eq!(reference(ymd(2020, 12, 1)), 276);
        assert_eq!(reference(ymd(2021, 2, 28)), 365);
        assert_eq!(reference(ymd(2020, 2, 28)), -1);
    }

    #[test]
    fn march_2020_grid_shape() {
        let cal = MonthCalendar::new(ymd(2020, 3, 15));
        assert_eq!(cal.first_day(), ymd(2020, 3, 1));
        assert_eq!(cal.first_week_indent(), 0);
        assert_eq!(cal.doms(), 1..32);
        // Header plus 5 full weeks: 31 days starting on a Sunday.
        assert_eq!(cal.rows().len(), 6);
    }

    #[test]
    fn any_day_of_month_yields_same_grid() {
        let a = MonthCalendar::new(ymd(2020, 12, 1));
        let b = MonthCalendar::new(ymd(2020, 12, 25));
        assert_eq!(a.rows(), b.rows());
    }

    #[test]
    fn every_row_is_seven_wide() {
        // December 2020: 31 days, starts on a Tuesday, short final chunk.
        let cal = MonthCalendar::new(ymd(2020, 12, 1));
        for (i, row) in cal.rows().iter().enumerate() {
            assert_eq!(row.len(), 7, "row {i} is not 7 wide");
        }
        let rows = cal.rows();
        let last = rows.last().unwrap();
        assert_eq!(last[0].value, CellValue::Day(reference(ymd(2020, 12, 27))));
        assert_eq!(last[5].value, CellValue::Blank);
        assert_eq!(last[6].value, CellValue::Blank);
    }

    #[test]
    fn circled_only_when_dom_matches() {
        let day = ymd(2021, 2, 28);
        let cal = MonthCalendar::with_circled(day, &[day]);
        let hits: Vec<_> = cal
            .rows()
            .into_iter()
            .flatten()
            .filter(|c| c.style.circled)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, CellValue::Day(reference(day)));
    }

    #[test]
    fn circled_day_outside_month_is_harmless() {
        let cal = MonthCalendar::with_circled(ymd(2020, 3, 1), &[ymd(2020, 4, 15)]);
        assert!(cal.rows().into_iter().flatten().all(|c| !c.style.circled));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(ymd(2020, 2, 10)), 29);
        assert_eq!(days_in_month(ymd(2021, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(2020, 4, 1)), 30);
        assert_eq!(days_in_month(ymd(2020, 12, 31)), 31);
    }
}
