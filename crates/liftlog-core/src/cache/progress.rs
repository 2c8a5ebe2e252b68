use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MeasurementPoint;

/// Progress journal file name in the cache directory
const PROGRESS_FILE: &str = "progress.json";

/// One dated value in a numeric progress series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// The four locally tracked progress series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSeries {
    Weight,
    Calories,
    Workouts,
    Measurements,
}

impl ProgressSeries {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "weight" => Some(ProgressSeries::Weight),
            "calories" => Some(ProgressSeries::Calories),
            "workouts" => Some(ProgressSeries::Workouts),
            "measurements" => Some(ProgressSeries::Measurements),
            _ => None,
        }
    }
}

/// The persisted shape of the local progress log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressLog {
    #[serde(default)]
    pub weight: Vec<ProgressPoint>,
    #[serde(default)]
    pub calories: Vec<ProgressPoint>,
    #[serde(default)]
    pub workouts: Vec<ProgressPoint>,
    #[serde(default)]
    pub measurements: Vec<MeasurementPoint>,
}

/// The progress view's client-local log, kept separately from anything the
/// backend stores. Series stay sorted by date so they chart cleanly.
pub struct ProgressJournal {
    path: PathBuf,
    pub log: ProgressLog,
}

impl ProgressJournal {
    /// Open the journal under the given cache directory, loading any
    /// existing entries.
    pub fn open(cache_dir: &Path) -> Result<Self> {
        let path = cache_dir.join(PROGRESS_FILE);
        let log = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read progress journal")?;
            serde_json::from_str(&contents).context("Failed to parse progress journal")?
        } else {
            ProgressLog::default()
        };
        Ok(Self { path, log })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.log)?;
        std::fs::write(&self.path, contents).context("Failed to write progress journal")?;
        Ok(())
    }

    pub fn add_weight(&mut self, date: NaiveDate, value: f64) {
        Self::insert_sorted(&mut self.log.weight, ProgressPoint { date, value });
    }

    pub fn add_calories(&mut self, date: NaiveDate, value: f64) {
        Self::insert_sorted(&mut self.log.calories, ProgressPoint { date, value });
    }

    pub fn add_workouts(&mut self, date: NaiveDate, value: f64) {
        Self::insert_sorted(&mut self.log.workouts, ProgressPoint { date, value });
    }

    pub fn add_measurement(&mut self, point: MeasurementPoint) {
        let pos = self
            .log
            .measurements
            .partition_point(|p| p.date <= point.date);
        self.log.measurements.insert(pos, point);
    }

    /// Remove the entry at `index` from a series. Out-of-range indices are
    /// reported rather than panicking, since the index comes from user input.
    pub fn remove(&mut self, series: ProgressSeries, index: usize) -> Result<()> {
        let len = match series {
            ProgressSeries::Weight => self.log.weight.len(),
            ProgressSeries::Calories => self.log.calories.len(),
            ProgressSeries::Workouts => self.log.workouts.len(),
            ProgressSeries::Measurements => self.log.measurements.len(),
        };
        if index >= len {
            anyhow::bail!("no entry at index {} (series has {} entries)", index, len);
        }
        match series {
            ProgressSeries::Weight => {
                self.log.weight.remove(index);
            }
            ProgressSeries::Calories => {
                self.log.calories.remove(index);
            }
            ProgressSeries::Workouts => {
                self.log.workouts.remove(index);
            }
            ProgressSeries::Measurements => {
                self.log.measurements.remove(index);
            }
        }
        Ok(())
    }

    fn insert_sorted(series: &mut Vec<ProgressPoint>, point: ProgressPoint) {
        let pos = series.partition_point(|p| p.date <= point.date);
        series.insert(pos, point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "liftlog-progress-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn entries_stay_sorted_by_date() {
        let dir = temp_dir();
        let mut journal = ProgressJournal::open(&dir).unwrap();
        journal.add_weight(date(10), 82.0);
        journal.add_weight(date(3), 83.5);
        journal.add_weight(date(7), 82.8);

        let dates: Vec<u32> = journal
            .log
            .weight
            .iter()
            .map(|p| p.date.format("%d").to_string().parse().unwrap())
            .collect();
        assert_eq!(dates, vec![3, 7, 10]);
    }

    #[test]
    fn journal_roundtrips_through_disk() {
        let dir = temp_dir();
        {
            let mut journal = ProgressJournal::open(&dir).unwrap();
            journal.add_calories(date(1), 2100.0);
            journal.add_measurement(MeasurementPoint {
                date: date(1),
                chest: Some(101.0),
                waist: Some(84.0),
                hips: None,
                biceps: None,
                thighs: None,
            });
            journal.save().unwrap();
        }
        let journal = ProgressJournal::open(&dir).unwrap();
        assert_eq!(journal.log.calories.len(), 1);
        assert_eq!(journal.log.measurements.len(), 1);
        assert_eq!(journal.log.measurements[0].chest, Some(101.0));
    }

    #[test]
    fn remove_checks_bounds() {
        let dir = temp_dir();
        let mut journal = ProgressJournal::open(&dir).unwrap();
        journal.add_workouts(date(5), 1.0);

        assert!(journal.remove(ProgressSeries::Workouts, 1).is_err());
        journal.remove(ProgressSeries::Workouts, 0).unwrap();
        assert!(journal.log.workouts.is_empty());
    }

    #[test]
    fn series_parse() {
        assert_eq!(ProgressSeries::parse("Weight"), Some(ProgressSeries::Weight));
        assert_eq!(
            ProgressSeries::parse("measurements"),
            Some(ProgressSeries::Measurements)
        );
        assert_eq!(ProgressSeries::parse("steps"), None);
    }
}
