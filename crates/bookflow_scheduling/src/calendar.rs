// --- File: crates/bookflow_scheduling/src/calendar.rs ---
//! Month grid generation and the displayed-month cursor.

use bookflow_common::services::AvailabilityCatalog;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month {month} of year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

/// How a single grid cell should be rendered.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// Padding before the 1st of the month
    Empty,
    Past,
    Unavailable,
    Available,
    Selected,
}

impl CellStatus {
    /// Whether a click on this cell may become a date selection.
    pub fn is_selectable(self) -> bool {
        matches!(self, CellStatus::Available | CellStatus::Selected)
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// `None` for padding cells
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub date: Option<NaiveDate>,
    pub status: CellStatus,
}

/// One month laid out in Sunday-first weeks.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Number of padding cells before day 1 (0 = Sunday ... 6 = Saturday)
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// The non-padding cells, one per day of the month.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| cell.date.is_some())
    }

    /// Rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == Some(date))
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { year, month })
}

/// Number of days in `month` of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_first = first_of_month(next_year, next_month)?;
    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

/// Lays out one month and tags every day against the catalog.
///
/// Precedence: `Past` > `Selected` > `Unavailable` > `Available`. The
/// function is pure; identical inputs give identical grids.
pub fn generate_month(
    year: i32,
    month: u32,
    catalog: &dyn AvailabilityCatalog,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Result<MonthGrid, CalendarError> {
    let first = first_of_month(year, month)?;
    let day_count = days_in_month(year, month)?;
    let leading_blanks = first.weekday().num_days_from_sunday();

    let mut cells = Vec::with_capacity((leading_blanks + day_count) as usize);
    cells.extend((0..leading_blanks).map(|_| DayCell {
        date: None,
        status: CellStatus::Empty,
    }));

    for date in first.iter_days().take(day_count as usize) {
        let status = if date < today {
            CellStatus::Past
        } else if selected == Some(date) {
            CellStatus::Selected
        } else if !catalog.has_slots(date) {
            CellStatus::Unavailable
        } else {
            CellStatus::Available
        };
        cells.push(DayCell {
            date: Some(date),
            status,
        });
    }

    Ok(MonthGrid {
        year,
        month,
        leading_blanks,
        cells,
    })
}

/// The month currently displayed by the date picker.
///
/// Browsing never touches the draft's selected date.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCursor {
    year: i32,
    month: u32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        first_of_month(year, month)?;
        Ok(Self { year, month })
    }

    /// The cursor showing the month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Result<Self, CalendarError> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn previous(self) -> Result<Self, CalendarError> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn grid(
        &self,
        catalog: &dyn AvailabilityCatalog,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> Result<MonthGrid, CalendarError> {
        generate_month(self.year, self.month, catalog, today, selected)
    }
}
