// src/sync/window.rs

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

// Janela [start, end] com granularidade de dia. Limites INCLUSIVOS:
// o dia inicial conta desde 00:00:00.000 e o final até 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn bounds_utc(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self
            .start
            .and_hms_milli_opt(0, 0, 0, 0)
            .expect("00:00:00.000 é sempre válido");
        let end = self
            .end
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("23:59:59.999 é sempre válido");
        (Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end))
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds_utc();
        instant >= start && instant <= end
    }
}

// Modo da janela dos rollups. ThisMonth/ThisYear resolvem-se contra o
// relógio no momento da chamada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsWindow {
    All,
    ThisMonth,
    ThisYear,
    Custom(DateWindow),
}

impl StatsWindow {
    // None = sem restrição (modo All).
    pub fn resolve(&self, now: DateTime<Utc>) -> Option<DateWindow> {
        match self {
            StatsWindow::All => None,
            StatsWindow::ThisMonth => {
                let start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)?;
                let next_month = if now.month() == 12 {
                    NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(now.year(), now.month() + 1, 1)?
                };
                let end = next_month.pred_opt()?;
                Some(DateWindow::new(start, end))
            }
            StatsWindow::ThisYear => {
                let start = NaiveDate::from_ymd_opt(now.year(), 1, 1)?;
                let end = NaiveDate::from_ymd_opt(now.year(), 12, 31)?;
                Some(DateWindow::new(start, end))
            }
            StatsWindow::Custom(window) => Some(*window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_includes_both_bounds() {
        let window = DateWindow::new(date(2026, 3, 1), date(2026, 3, 31));

        let first_instant = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let last_instant = Utc
            .with_ymd_and_hms(2026, 3, 31, 23, 59, 59)
            .unwrap()
            .with_nanosecond(999_000_000)
            .unwrap();

        assert!(window.contains(first_instant));
        assert!(window.contains(last_instant));
    }

    #[test]
    fn window_excludes_the_next_millisecond() {
        let window = DateWindow::new(date(2026, 3, 1), date(2026, 3, 31));
        let after = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2026, 2, 28, 23, 59, 59).unwrap();

        assert!(!window.contains(after));
        assert!(!window.contains(before));
    }

    #[test]
    fn this_month_resolves_to_calendar_month() {
        let now = Utc.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap();
        let window = StatsWindow::ThisMonth.resolve(now).unwrap();
        assert_eq!(window.start, date(2026, 2, 1));
        assert_eq!(window.end, date(2026, 2, 28));
    }

    #[test]
    fn this_month_handles_december() {
        let now = Utc.with_ymd_and_hms(2025, 12, 3, 8, 0, 0).unwrap();
        let window = StatsWindow::ThisMonth.resolve(now).unwrap();
        assert_eq!(window.end, date(2025, 12, 31));
    }

    #[test]
    fn this_year_resolves_to_calendar_year() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let window = StatsWindow::ThisYear.resolve(now).unwrap();
        assert_eq!(window.start, date(2026, 1, 1));
        assert_eq!(window.end, date(2026, 12, 31));
    }

    #[test]
    fn all_resolves_to_none() {
        let now = Utc::now();
        assert_eq!(StatsWindow::All.resolve(now), None);
    }
}
