// src/extract/record.rs
//! One extracted row and its fixed 20-column shape.

use chrono::NaiveDate;

/// Dataset columns, in output order.
pub const HEADERS: [&str; 20] = [
    "isodate", "offer", "salary", "contract_type", "start_hour",
    "end_hour", "hours_worked", "monday", "tuesday", "wednesday",
    "thursday", "friday", "saturday", "sunday", "days_worked",
    "state", "municipality", "education_level", "experience", "languages",
];

pub const CONTRACT_SENTINEL: &str = "No especificado";
pub const EXPERIENCE_SENTINEL: &str = "No especificada";
/// Used for education level and languages under `RequiredFieldPolicy::Sentinel`.
pub const REQUIRED_SENTINEL: &str = "No especificado";

/// A field the page may legitimately leave out. The sentinel text is chosen
/// per column when the row is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Specified<T> {
    Given(T),
    Unspecified,
}

impl<T> Specified<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Specified::Given(v) => Some(v),
            Specified::Unspecified => None,
        }
    }

    pub fn is_given(&self) -> bool {
        matches!(self, Specified::Given(_))
    }
}

impl<T> From<Option<T>> for Specified<T> {
    fn from(o: Option<T>) -> Self {
        o.map_or(Specified::Unspecified, Specified::Given)
    }
}

impl Specified<String> {
    pub fn or_sentinel<'a>(&'a self, sentinel: &'a str) -> &'a str {
        self.as_option().map_or(sentinel, String::as_str)
    }
}

/// Start/end of the working day as `HHMM` integers (`09:00` → `900`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub start: u32,
    pub end: u32,
}

impl Schedule {
    /// `(end - start) / 100`, where an end at or before the start is read as
    /// the next day (`end + 2400`).
    pub fn hours_worked(&self) -> f64 {
        let (start, end) = (i64::from(self.start), i64::from(self.end));
        let end = if end <= start { end + 2400 } else { end };
        (end - start) as f64 / 100.0
    }
}

/// Monday..Sunday flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkDays(pub [bool; 7]);

impl WorkDays {
    pub fn flags(&self) -> [bool; 7] {
        self.0
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&d| d).count()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub offer: String,
    pub salary: i64,
    pub contract_type: Specified<String>,
    pub schedule: Schedule,
    pub days: WorkDays,
    pub state: String,
    pub municipality: String,
    pub education_level: Specified<String>,
    pub experience: Specified<String>,
    pub languages: Specified<String>,
}

impl Record {
    pub fn hours_worked(&self) -> f64 {
        self.schedule.hours_worked()
    }

    pub fn days_worked(&self) -> usize {
        self.days.count()
    }

    /// Render in `HEADERS` order.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(HEADERS.len());
        row.push(self.date.format("%Y-%m-%d").to_string());
        row.push(self.offer.clone());
        row.push(self.salary.to_string());
        row.push(self.contract_type.or_sentinel(CONTRACT_SENTINEL).to_string());
        row.push(self.schedule.start.to_string());
        row.push(self.schedule.end.to_string());
        row.push(fmt_hours(self.hours_worked()));
        row.extend(self.days.flags().iter().map(|&d| if d { "1" } else { "0" }.to_string()));
        row.push(self.days_worked().to_string());
        row.push(self.state.clone());
        row.push(self.municipality.clone());
        row.push(self.education_level.or_sentinel(REQUIRED_SENTINEL).to_string());
        row.push(self.experience.or_sentinel(EXPERIENCE_SENTINEL).to_string());
        row.push(self.languages.or_sentinel(REQUIRED_SENTINEL).to_string());
        row
    }
}

/// Always at least one decimal: `9.0`, `8.5`.
fn fmt_hours(h: f64) -> String {
    if h.fract() == 0.0 { format!("{h:.1}") } else { format!("{h}") }
}
