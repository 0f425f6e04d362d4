//! The data-entry session.
//!
//! A [`Session`] holds everything one operator is working on: the roster,
//! the active month, the position of the employee being edited, and the
//! records already opened. Every change to a record is saved through the
//! record store and the backup sink before the call returns.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculation::{ComposedDay, compose_day, fill_missing_days, recompute_month};
use crate::config::AttendancePolicy;
use crate::error::{EngineError, EngineResult};
use crate::export::{ExportTable, export_records};
use crate::models::{
    AttendanceStatus, DayEntry, DayRecord, Employee, EmployeeMonthRecord, Period, Roster,
    StatusCounts,
};
use crate::store::{BackupSink, RecordStore, SaveReport, record_key, save_record};

/// The result of entering one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayUpdate {
    /// Roster position of the employee.
    pub index: usize,
    /// The composed day.
    pub composed: ComposedDay,
    /// The refreshed status counts for the month.
    pub counts: StatusCounts,
    /// The refreshed overtime total for the month.
    pub ot_hours: Decimal,
    /// What happened when the record was saved.
    pub save: SaveReport,
}

/// The result of moving to another employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// The new roster position.
    pub current_index: usize,
    /// The number of employees in the roster.
    pub total: usize,
    /// True once every employee has been passed.
    pub complete: bool,
    /// The save performed before leaving the previous employee, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<SaveReport>,
}

/// The result of changing the active month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodChange {
    /// The new period.
    pub period: Period,
    /// Day records removed, across all employees.
    pub purged_days: usize,
    /// Default day records added for days the month gained, across all
    /// employees.
    pub filled_days: usize,
    /// Saves of the records that changed, keyed by roster position.
    pub saves: BTreeMap<usize, SaveReport>,
}

/// One operator's data-entry context.
pub struct Session {
    policy: AttendancePolicy,
    roster: Roster,
    period: Period,
    current_index: usize,
    records: BTreeMap<usize, EmployeeMonthRecord>,
    store: Box<dyn RecordStore>,
    backup: Box<dyn BackupSink>,
}

impl Session {
    /// Creates a session with no roster.
    pub fn new(
        policy: AttendancePolicy,
        period: Period,
        store: Box<dyn RecordStore>,
        backup: Box<dyn BackupSink>,
    ) -> Self {
        Self {
            policy,
            roster: Roster::default(),
            period,
            current_index: 0,
            records: BTreeMap::new(),
            store,
            backup,
        }
    }

    /// Returns the attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Returns the active month.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns the loaded roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the roster position being edited.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns true once navigation has moved past the last employee.
    pub fn is_complete(&self) -> bool {
        !self.roster.is_empty() && self.current_index >= self.roster.len()
    }

    /// Replaces the roster and starts again from its first employee.
    ///
    /// Returns the number of employees.
    pub fn load_roster(&mut self, roster: Roster) -> usize {
        self.roster = roster;
        self.current_index = 0;
        self.records.clear();
        info!(employees = self.roster.len(), "Roster loaded");
        self.roster.len()
    }

    /// Changes the active month.
    ///
    /// Every open or stored record of the roster is fitted to the new month:
    /// days beyond its length are removed and days it gained start as
    /// Present with the default times. Records that changed are saved, so
    /// the stored copies never keep days outside the month.
    ///
    /// A stored record that cannot be read is skipped with a warning; it is
    /// fitted again whenever it is next opened or exported.
    pub fn set_period(&mut self, period: Period) -> PeriodChange {
        self.period = period;

        for index in 0..self.roster.len() {
            if self.records.contains_key(&index) {
                continue;
            }
            match self.store.get(&record_key(index)) {
                Ok(Some(stored)) => {
                    self.records.insert(index, stored);
                }
                Ok(None) => {}
                Err(e) => warn!(index, error = %e, "Stored record not refitted to period"),
            }
        }

        let mut purged_days = 0;
        let mut filled_days = 0;
        let mut changed = Vec::new();
        for (index, record) in self.records.iter_mut() {
            let fit = fit_to_period(record, period, &self.policy);
            purged_days += fit.purged.len();
            filled_days += fit.filled.len();
            if fit.changed() {
                changed.push(*index);
            }
        }

        let mut saves = BTreeMap::new();
        for index in changed {
            if let Ok(report) = self.save_index(index) {
                saves.insert(index, report);
            }
        }

        info!(
            year = period.year(),
            month = period.month(),
            days_in_month = period.days_in_month(),
            purged_days,
            filled_days,
            saved_records = saves.len(),
            "Period changed"
        );
        PeriodChange {
            period,
            purged_days,
            filled_days,
            saves,
        }
    }

    /// Returns the employee being edited.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoRoster`] if no roster is loaded, or
    /// [`EngineError::EmployeeNotFound`] once every employee has been passed.
    pub fn current_employee(&self) -> EngineResult<&Employee> {
        if self.roster.is_empty() {
            return Err(EngineError::NoRoster);
        }
        self.roster
            .get(self.current_index)
            .ok_or(EngineError::EmployeeNotFound {
                index: self.current_index,
            })
    }

    /// Returns the record of the employee being edited, opening it if needed.
    ///
    /// A record is opened from the record store when one exists under the
    /// employee's position; otherwise every day of the month starts as a
    /// Present day with the default times.
    ///
    /// # Errors
    ///
    /// Fails as [`Session::current_employee`] does. A record store that
    /// cannot be read is logged and the record starts from defaults.
    pub fn current_record(&mut self) -> EngineResult<&EmployeeMonthRecord> {
        let index = self.open_current()?;
        self.records
            .get(&index)
            .ok_or(EngineError::EmployeeNotFound { index })
    }

    /// Composes and records one day for the employee being edited, then
    /// saves the record.
    ///
    /// Unparseable times do not fail the call; the returned day carries a
    /// warning instead. A save that fails in both sinks is reported in the
    /// returned [`SaveReport`], with the entry still applied in the session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDay`] for a day outside the active
    /// month, or fails as [`Session::current_record`] does.
    pub fn enter_day(&mut self, day: u32, entry: &DayEntry) -> EngineResult<DayUpdate> {
        if !self.period.contains_day(day) {
            return Err(EngineError::InvalidDay {
                day,
                days_in_month: self.period.days_in_month(),
            });
        }

        let index = self.open_current()?;
        let composed = compose_day(day, entry, &self.policy);
        if let Some(warning) = &composed.warning {
            warn!(index, day, message = %warning.message, "Entered time replaced by default");
        }

        let period = self.period;
        let record = self
            .records
            .get_mut(&index)
            .ok_or(EngineError::EmployeeNotFound { index })?;
        record.days.insert(day, composed.record.clone());
        recompute_month(record, period);

        debug!(
            index,
            day,
            status = %composed.record.status,
            overtime_hours = %composed.record.overtime_hours,
            night_shift = composed.record.night_shift,
            "Day entered"
        );

        let counts = record.counts;
        let ot_hours = record.ot_hours;
        let save = self.save_index(index)?;

        Ok(DayUpdate {
            index,
            composed,
            counts,
            ot_hours,
            save,
        })
    }

    /// Saves the record of the employee being edited.
    ///
    /// # Errors
    ///
    /// Fails as [`Session::current_record`] does. Sink failures are reported
    /// in the returned [`SaveReport`].
    pub fn save_current(&mut self) -> EngineResult<SaveReport> {
        let index = self.open_current()?;
        self.save_index(index)
    }

    /// Saves the current record and moves to the next employee.
    ///
    /// Moving past the last employee marks the session complete.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoRoster`] if no roster is loaded, or fails as
    /// [`Session::save_current`] does.
    pub fn next(&mut self) -> EngineResult<Navigation> {
        if self.roster.is_empty() {
            return Err(EngineError::NoRoster);
        }

        let save = if self.is_complete() {
            None
        } else {
            let report = self.save_current()?;
            self.current_index += 1;
            Some(report)
        };

        Ok(self.navigation(save))
    }

    /// Moves to the previous employee. Does nothing at the first one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoRoster`] if no roster is loaded.
    pub fn previous(&mut self) -> EngineResult<Navigation> {
        if self.roster.is_empty() {
            return Err(EngineError::NoRoster);
        }
        self.current_index = self.current_index.min(self.roster.len()).saturating_sub(1);
        Ok(self.navigation(None))
    }

    /// Exports the stored records of every employee up to and including
    /// the current one.
    ///
    /// Positions with no stored record are skipped. Stored records are
    /// fitted to the active month before export.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store cannot be read.
    pub fn export(&self) -> EngineResult<ExportTable> {
        let last = self.current_index.min(self.roster.len().saturating_sub(1));
        let mut records = Vec::new();

        if !self.roster.is_empty() {
            for index in 0..=last {
                if let Some(mut record) = self.store.get(&record_key(index))? {
                    fit_to_period(&mut record, self.period, &self.policy);
                    records.push(record);
                }
            }
        }

        info!(records = records.len(), "Export built");
        Ok(export_records(&records))
    }

    /// Deletes every stored record and clears the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store cannot be cleared; the session
    /// is left unchanged in that case.
    pub fn reset(&mut self) -> EngineResult<()> {
        self.store.delete_all()?;
        self.roster = Roster::default();
        self.records.clear();
        self.current_index = 0;
        info!("Session reset");
        Ok(())
    }

    fn navigation(&self, save: Option<SaveReport>) -> Navigation {
        Navigation {
            current_index: self.current_index,
            total: self.roster.len(),
            complete: self.is_complete(),
            save,
        }
    }

    fn open_current(&mut self) -> EngineResult<usize> {
        let employee = self.current_employee()?.clone();
        let index = self.current_index;

        if !self.records.contains_key(&index) {
            let mut record = match self.store.get(&record_key(index)) {
                Ok(Some(stored)) => {
                    debug!(index, "Record opened from store");
                    stored
                }
                Ok(None) => {
                    debug!(index, "New record created");
                    self.default_record(employee.clone())
                }
                Err(e) => {
                    warn!(index, error = %e, "Record store unreadable, starting from defaults");
                    self.default_record(employee.clone())
                }
            };
            record.employee = employee;
            self.records.insert(index, record);
        }

        let period = self.period;
        if let Some(record) = self.records.get_mut(&index) {
            fit_to_period(record, period, &self.policy);
        }
        Ok(index)
    }

    fn default_record(&self, employee: Employee) -> EmployeeMonthRecord {
        let mut record = EmployeeMonthRecord::new(employee);
        fit_to_period(&mut record, self.period, &self.policy);
        record
    }

    fn save_index(&mut self, index: usize) -> EngineResult<SaveReport> {
        let record = self
            .records
            .get(&index)
            .ok_or(EngineError::EmployeeNotFound { index })?;
        Ok(save_record(
            self.store.as_mut(),
            self.backup.as_mut(),
            &record_key(index),
            record,
        ))
    }
}

/// Days removed from and added to a record by [`fit_to_period`].
struct PeriodFit {
    purged: Vec<u32>,
    filled: Vec<u32>,
}

impl PeriodFit {
    fn changed(&self) -> bool {
        !self.purged.is_empty() || !self.filled.is_empty()
    }
}

/// Gives a record exactly one day per day of `period` and refreshes its
/// aggregates.
fn fit_to_period(
    record: &mut EmployeeMonthRecord,
    period: Period,
    policy: &AttendancePolicy,
) -> PeriodFit {
    let filled = fill_missing_days(&mut record.days, period.days_in_month(), |day| {
        default_day(day, policy)
    });
    let purged = recompute_month(record, period);
    PeriodFit { purged, filled }
}

fn default_day(day: u32, policy: &AttendancePolicy) -> DayRecord {
    compose_day(day, &DayEntry::status_only(AttendanceStatus::Present), policy).record
}
