// src/report.rs
//! Descriptive statistics over a written dataset file.
//!
//! Works on the CSV text rather than on `Record`s so any dataset file can be
//! summarized, including ones produced by earlier runs. Cells that do not parse
//! are left out of the statistic they feed and counted in `unparsed`.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::dataset::Table;

const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// count / mean / sample std / min / quartiles / max.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// `None` for no values. `std` is NaN for a single value.
pub fn describe(values: &[f64]) -> Option<Describe> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(Describe {
        count: sorted.len(),
        mean,
        std: var.sqrt(),
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        q50: quantile(&sorted, 0.50),
        q75: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Occurrences per distinct value, most frequent first, ties by value.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().map(|(k, n)| (k.to_string(), n)).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    pub total: usize,
    /// Offers per weekday of `isodate`, Monday first.
    pub weekdays: [usize; 7],
    pub salary: Option<Describe>,
    pub by_state: Vec<(String, usize)>,
    pub median_salary_by_state: Vec<(String, f64)>,
    pub hours_worked: Vec<(String, usize)>,
    pub days_worked: Vec<(String, usize)>,
    pub education_level: Vec<(String, usize)>,
    pub experience: Vec<(String, usize)>,
    pub unparsed: usize,
}

impl Report {
    pub fn from_table(table: &Table) -> Self {
        let mut report = Report { total: table.rows.len(), ..Default::default() };

        for d in table.values("isodate") {
            match NaiveDate::parse_from_str(d, "%Y-%m-%d") {
                Ok(date) => report.weekdays[date.weekday().num_days_from_monday() as usize] += 1,
                Err(_) => report.unparsed += 1,
            }
        }

        let states = table.values("state");
        let salaries = table.values("salary");
        let mut all = Vec::with_capacity(salaries.len());
        let mut per_state: HashMap<&str, Vec<f64>> = HashMap::new();
        for (state, salary) in states.iter().zip(&salaries) {
            match salary.parse::<f64>() {
                Ok(s) => {
                    all.push(s);
                    per_state.entry(*state).or_default().push(s);
                }
                Err(_) => report.unparsed += 1,
            }
        }
        report.salary = describe(&all);

        let mut medians: Vec<(String, f64)> = per_state
            .into_iter()
            .filter_map(|(state, v)| describe(&v).map(|d| (state.to_string(), d.q50)))
            .collect();
        medians.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        report.median_salary_by_state = medians;

        report.by_state = value_counts(states);
        report.hours_worked = value_counts(table.values("hours_worked"));
        report.days_worked = value_counts(table.values("days_worked"));
        report.education_level = value_counts(table.values("education_level"));
        report.experience = value_counts(table.values("experience"));
        report
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, title: &str, counts: &[(String, usize)]) -> fmt::Result {
    writeln!(f, "\n{title}")?;
    for (k, n) in counts {
        writeln!(f, "  {k:<40} {n:>8}")?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Job offers: {}", self.total)?;

        writeln!(f, "\nOffers by weekday")?;
        for (day, n) in WEEKDAYS.iter().zip(self.weekdays) {
            writeln!(f, "  {day:<40} {n:>8}")?;
        }

        writeln!(f, "\nMonthly salary")?;
        match &self.salary {
            Some(d) => {
                let rows = [
                    ("mean", d.mean), ("std", d.std), ("min", d.min), ("25%", d.q25),
                    ("50%", d.q50), ("75%", d.q75), ("max", d.max),
                ];
                writeln!(f, "  {:<40} {:>8}", "count", d.count)?;
                for (name, v) in rows {
                    writeln!(f, "  {name:<40} {v:>8.0}")?;
                }
            }
            None => writeln!(f, "  (no salaries)")?,
        }

        write_counts(f, "Offers by state", &self.by_state)?;

        writeln!(f, "\nMedian salary by state")?;
        for (state, m) in &self.median_salary_by_state {
            writeln!(f, "  {state:<40} {m:>8.0}")?;
        }

        write_counts(f, "Hours worked", &self.hours_worked)?;
        write_counts(f, "Days worked", &self.days_worked)?;
        write_counts(f, "Education level", &self.education_level)?;
        write_counts(f, "Experience", &self.experience)?;

        if self.unparsed > 0 {
            writeln!(f, "\n{} cells could not be parsed", self.unparsed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str, &str)]) -> Table {
        Table {
            headers: ["isodate", "salary", "state"].map(String::from).to_vec(),
            rows: rows.iter().map(|(d, s, st)| vec![d.to_string(), s.to_string(), st.to_string()]).collect(),
        }
    }

    #[test]
    fn describe_matches_sample_statistics() {
        let d = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(d.count, 4);
        assert_eq!(d.mean, 2.5);
        assert!((d.std - 1.2909944).abs() < 1e-6);
        assert_eq!((d.min, d.max), (1.0, 4.0));
        assert_eq!((d.q25, d.q50, d.q75), (1.75, 2.5, 3.25));
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn counts_are_sorted_by_frequency() {
        let c = value_counts(["b", "a", "b", "c", "a", "b"]);
        assert_eq!(c, vec![("b".into(), 3), ("a".into(), 2), ("c".into(), 1)]);
    }

    #[test]
    fn report_groups_by_weekday_and_state() {
        // 2020-06-01 was a Monday
        let t = table(&[
            ("2020-06-01", "8000", "Jalisco"),
            ("2020-06-01", "12000", "Jalisco"),
            ("2020-06-02", "6000", "Sonora"),
            ("junio", "x", "Sonora"),
        ]);
        let r = Report::from_table(&t);
        assert_eq!(r.total, 4);
        assert_eq!(r.weekdays, [2, 1, 0, 0, 0, 0, 0]);
        assert_eq!(r.by_state, vec![("Jalisco".into(), 2), ("Sonora".into(), 2)]);
        assert_eq!(r.median_salary_by_state, vec![("Jalisco".into(), 10000.0), ("Sonora".into(), 6000.0)]);
        assert_eq!(r.salary.unwrap().count, 3);
        assert_eq!(r.unparsed, 2);
        assert!(r.hours_worked.is_empty());

        let text = r.to_string();
        assert!(text.starts_with("Job offers: 4"));
        assert!(text.contains("Median salary by state"));
    }
}
