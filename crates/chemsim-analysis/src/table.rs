//! Aggregation of descriptor records into a table, numeric cleaning and
//! the correlation diagnostic.

use std::fmt;

use chemsim_common::{ChemsimError, DescriptorRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats;

pub const CID_COLUMN: &str = "CID";
pub const SMILES_COLUMN: &str = "SMILES";
pub const IUPAC_COLUMN: &str = "IUPAC";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("column '{0}' is not present in the descriptor table")]
    MissingColumn(String),
}

impl From<TableError> for ChemsimError {
    fn from(err: TableError) -> Self {
        ChemsimError::Table(err.to_string())
    }
}

// ── Cells ─────────────────────────────────────────────────────────────────────

/// One table cell before numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Numeric view of the cell: numbers as-is, text parsed, anything
    /// non-finite or unparsable is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Null => return None,
        };
        value.is_finite().then_some(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Null, Cell::Number)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Null => Ok(()),
        }
    }
}

// ── Raw table ─────────────────────────────────────────────────────────────────

/// Records normalized into rows sharing one column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DescriptorTable {
    /// Build from records in order. Columns are `CID`, `SMILES`, `IUPAC`
    /// followed by the union of descriptor names in first-seen order.
    pub fn from_records(records: &[DescriptorRecord]) -> Self {
        let mut columns: Vec<String> = [CID_COLUMN, SMILES_COLUMN, IUPAC_COLUMN]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for record in records {
            for (name, _) in &record.values {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| match column.as_str() {
                        CID_COLUMN => Cell::Number(record.cid as f64),
                        SMILES_COLUMN => Cell::Text(record.smiles.clone()),
                        IUPAC_COLUMN => record.iupac_name.clone().map_or(Cell::Null, Cell::Text),
                        name => record
                            .values
                            .iter()
                            .find(|(key, _)| key == name)
                            .map_or(Cell::Null, |(_, value)| Cell::from(*value)),
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Project onto `columns`, coerce to numbers and drop every row with a
    /// null in the projection. An empty table has no columns to check and
    /// cleans to an empty result.
    pub fn clean<S: AsRef<str>>(&self, columns: &[S]) -> Result<CleanTable, TableError> {
        let names: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        if self.rows.is_empty() {
            return Ok(CleanTable { columns: names, rows: Vec::new(), dropped: 0 });
        }
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let rows: Vec<Vec<f64>> = self
            .rows
            .iter()
            .filter_map(|row| indices.iter().map(|&i| row[i].as_f64()).collect::<Option<Vec<f64>>>())
            .collect();
        let dropped = self.rows.len() - rows.len();

        Ok(CleanTable { columns: names, rows, dropped })
    }
}

// ── Clean table ───────────────────────────────────────────────────────────────

/// Numeric projection of a [`DescriptorTable`]. Every cell is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
    dropped: usize,
}

impl CleanTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Rows removed during cleaning.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    pub fn correlation(&self) -> CorrelationMatrix {
        let series: Vec<Vec<f64>> = (0..self.columns.len())
            .map(|i| self.rows.iter().map(|row| row[i]).collect())
            .collect();
        let values = series
            .iter()
            .map(|x| series.iter().map(|y| stats::pearson(x, y)).collect())
            .collect();
        CorrelationMatrix { columns: self.columns.clone(), values }
    }
}

/// Pairwise Pearson correlations. NaN entries serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.columns.iter().map(String::len).max().unwrap_or(0).max(7);
        write!(f, "{:width$}", "")?;
        for column in &self.columns {
            write!(f, " {column:>width$}")?;
        }
        for (column, row) in self.columns.iter().zip(&self.values) {
            write!(f, "\n{column:width$}")?;
            for value in row {
                if value.is_nan() {
                    write!(f, " {:>width$}", "NaN")?;
                } else {
                    write!(f, " {value:>width$.3}")?;
                }
            }
        }
        Ok(())
    }
}
