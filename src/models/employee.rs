//! Employee and roster models.
//!
//! The roster is the ordered list of employees to enter attendance for. A
//! record's store key is the employee's position in this list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

/// Column holding the employee code in roster uploads and stored records.
pub const EMPLOYEE_CODE_COLUMN: &str = "Employee Code";

/// Column holding the employee name in roster uploads and stored records.
pub const EMPLOYEE_NAME_COLUMN: &str = "Employee Name";

/// Identity of an employee on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    /// The employee code.
    pub code: String,
    /// The employee's display name.
    pub name: String,
}

impl Employee {
    /// Creates a new employee identity.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// An ordered, duplicate-free list of employees.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Employee, Roster};
///
/// let roster = Roster::new(vec![
///     Employee::new("E001", "Asha"),
///     Employee::new("E001", "Asha"),
///     Employee::new("E002", "Ravi"),
/// ]);
/// assert_eq!(roster.len(), 2);
/// assert_eq!(roster.get(1).unwrap().code, "E002");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Builds a roster, dropping repeated (code, name) pairs and keeping the
    /// first occurrence's position.
    pub fn new(employees: Vec<Employee>) -> Self {
        let mut unique: Vec<Employee> = Vec::with_capacity(employees.len());
        for employee in employees {
            if !unique.contains(&employee) {
                unique.push(employee);
            }
        }
        Self { employees: unique }
    }

    /// Builds a roster from uploaded spreadsheet rows.
    ///
    /// Column names are matched after trimming whitespace. Cells may be text
    /// or numbers; empty cells become empty strings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingRosterColumn`] if any row, or the first
    /// row of a non-empty upload, lacks `Employee Code` or `Employee Name`.
    pub fn from_rows(rows: &[HashMap<String, Value>]) -> EngineResult<Self> {
        let mut employees = Vec::with_capacity(rows.len());

        for row in rows {
            let trimmed: HashMap<&str, &Value> =
                row.iter().map(|(k, v)| (k.trim(), v)).collect();

            let cell = |column: &str| -> EngineResult<String> {
                trimmed
                    .get(column)
                    .map(|value| cell_text(value))
                    .ok_or_else(|| EngineError::MissingRosterColumn {
                        column: column.to_string(),
                    })
            };

            employees.push(Employee::new(
                cell(EMPLOYEE_CODE_COLUMN)?,
                cell(EMPLOYEE_NAME_COLUMN)?,
            ));
        }

        Ok(Self::new(employees))
    }

    /// Returns the employee at a roster position.
    pub fn get(&self, index: usize) -> Option<&Employee> {
        self.employees.get(index)
    }

    /// Returns the number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the roster holds no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Returns all employees in roster order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}

/// Renders a spreadsheet cell as trimmed text.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
