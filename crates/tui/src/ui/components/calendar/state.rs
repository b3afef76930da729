use chrono::{Datelike, Months, NaiveDate};

/// Internal state of the calendar pane.
///
/// The state is tied to the shell's refresh key: when the key changes the
/// whole value is rebuilt from scratch, discarding the cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    refresh_key: u64,
    /// First day of the displayed month.
    month_start: NaiveDate,
    selected_day: u32,
}

impl CalendarState {
    pub fn new(refresh_key: u64, today: NaiveDate) -> Self {
        Self {
            refresh_key,
            month_start: today.with_day(1).unwrap_or(today),
            selected_day: today.day(),
        }
    }

    /// Rebuild when `refresh_key` differs from the key this state was built for.
    pub fn sync(&mut self, refresh_key: u64, today: NaiveDate) -> bool {
        if refresh_key == self.refresh_key {
            return false;
        }
        *self = Self::new(refresh_key, today);
        true
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh_key
    }

    pub fn selected_day(&self) -> u32 {
        self.selected_day
    }

    pub fn month_start(&self) -> NaiveDate {
        self.month_start
    }

    pub fn title(&self) -> String {
        self.month_start.format("%B %Y").to_string()
    }

    pub fn days_in_month(&self) -> u32 {
        self.month_start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(28)
    }

    /// Move the cursor forward one day, wrapping to the 1st after month end.
    pub fn select_next_day(&mut self) {
        self.selected_day = if self.selected_day >= self.days_in_month() {
            1
        } else {
            self.selected_day + 1
        };
    }

    /// Move the cursor back one day, wrapping to the last day before the 1st.
    pub fn select_previous_day(&mut self) {
        self.selected_day = if self.selected_day <= 1 {
            self.days_in_month()
        } else {
            self.selected_day - 1
        };
    }

    /// Month grid, Sunday first. Cells outside the month are `None`.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let offset = self.month_start.weekday().num_days_from_sunday() as usize;
        let days = self.days_in_month() as usize;
        let cells = (offset + days).div_ceil(7) * 7;

        let mut weeks = Vec::with_capacity(cells / 7);
        let mut week = [None; 7];
        for cell in 0..cells {
            week[cell % 7] = (cell >= offset && cell < offset + days).then(|| (cell - offset + 1) as u32);
            if cell % 7 == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_on_sunday_and_covers_every_day() {
        // September 2025 starts on a Monday.
        let state = CalendarState::new(0, date(2025, 9, 28));
        let weeks = state.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], None);
        assert_eq!(weeks[0][1], Some(1));
        let days: Vec<u32> = weeks.iter().flatten().flatten().copied().collect();
        assert_eq!(days, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(CalendarState::new(0, date(2024, 2, 10)).days_in_month(), 29);
        assert_eq!(CalendarState::new(0, date(2025, 2, 10)).days_in_month(), 28);
        assert_eq!(CalendarState::new(0, date(2025, 12, 31)).days_in_month(), 31);
    }

    #[test]
    fn cursor_wraps_within_month() {
        let mut state = CalendarState::new(0, date(2025, 9, 30));
        state.select_next_day();
        assert_eq!(state.selected_day(), 1);
        state.select_previous_day();
        assert_eq!(state.selected_day(), 30);
    }

    #[test]
    fn sync_rebuilds_only_on_key_change() {
        let today = date(2025, 9, 28);
        let mut state = CalendarState::new(0, today);
        state.select_next_day();

        assert!(!state.sync(0, today));
        assert_eq!(state.selected_day(), 29);

        assert!(state.sync(1, today));
        assert_eq!(state.selected_day(), 28);
        assert_eq!(state.refresh_key(), 1);
    }

    #[test]
    fn title_names_month_and_year() {
        assert_eq!(CalendarState::new(0, date(2025, 9, 28)).title(), "September 2025");
    }
}
