//! The generated table and the assembler that builds it.

use chrono::NaiveDate;

use crate::config::first_duplicate;
use crate::error::TableError;

/// Header label of the first column.
pub const DATE_HEADER: &str = "Date";
/// Header label of the last column.
pub const TOTAL_HEADER: &str = "Total";

/// One generated day.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    date: NaiveDate,
    values: Vec<f64>,
    total: f64,
}

impl TableRow {
    /// Returns the row date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the unit values in column order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the sum of the unit values.
    pub fn total(&self) -> f64 {
        self.total
    }
}

/// A single cell of the sheet-style view.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Header label.
    Text(String),
    /// Row date.
    Date(NaiveDate),
    /// Unit value or total.
    Number(f64),
}

/// One charted line.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    /// Unit name.
    pub name: String,
    /// One value per date.
    pub values: Vec<f64>,
}

/// Chart view of a table: shared x-axis dates plus one series per unit.
/// The total column is not charted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// X-axis values.
    pub dates: Vec<NaiveDate>,
    /// Y-series in unit order.
    pub series: Vec<NamedSeries>,
}

/// Header plus one row per day: `Date | unit... | Total`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    units: Vec<String>,
    rows: Vec<TableRow>,
}

impl OutputTable {
    /// Returns the full header row.
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.units.len() + 2);
        header.push(DATE_HEADER.to_string());
        header.extend(self.units.iter().cloned());
        header.push(TOTAL_HEADER.to_string());
        header
    }

    /// Returns the unit names in column order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Returns the number of data rows.
    pub fn day_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Returns the number of columns including date and total.
    pub fn column_count(&self) -> usize {
        self.units.len() + 2
    }

    /// Returns the values of unit column `unit`, or `None` if out of range.
    pub fn column(&self, unit: usize) -> Option<Vec<f64>> {
        (unit < self.units.len()).then(|| self.rows.iter().map(|r| r.values[unit]).collect())
    }

    /// Returns the values of the unit named `name`.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.units.iter().position(|u| u == name)?;
        self.column(idx)
    }

    /// Returns the total column.
    pub fn totals(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total).collect()
    }

    /// Returns the date column.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Returns the sheet layout: a text header row followed by
    /// `[Date, Number..., Number]` rows.
    pub fn cells(&self) -> Vec<Vec<Cell>> {
        let mut out = Vec::with_capacity(self.row_count());
        out.push(self.header().into_iter().map(Cell::Text).collect());
        for row in &self.rows {
            let mut cells = Vec::with_capacity(self.column_count());
            cells.push(Cell::Date(row.date));
            cells.extend(row.values.iter().copied().map(Cell::Number));
            cells.push(Cell::Number(row.total));
            out.push(cells);
        }
        out
    }

    /// Returns the chart view.
    pub fn chart_series(&self) -> ChartSeries {
        let series = self
            .units
            .iter()
            .enumerate()
            .map(|(i, name)| NamedSeries {
                name: name.clone(),
                values: self.rows.iter().map(|r| r.values[i]).collect(),
            })
            .collect();
        ChartSeries {
            dates: self.dates(),
            series,
        }
    }
}

/// Incrementally builds an [`OutputTable`].
///
/// Totals are computed here as the sequential sum of the row values.
#[derive(Debug, Clone)]
pub struct OutputAssembler {
    units: Vec<String>,
    rows: Vec<TableRow>,
}

impl OutputAssembler {
    /// Starts a table with the given unit columns.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NoUnits`] if `units` is empty, or
    /// [`TableError::DuplicateUnit`] if a name repeats.
    pub fn new(units: Vec<String>) -> Result<Self, TableError> {
        if units.is_empty() {
            return Err(TableError::NoUnits);
        }
        if let Some(name) = first_duplicate(&units) {
            return Err(TableError::DuplicateUnit {
                name: name.to_string(),
            });
        }
        Ok(Self {
            units,
            rows: Vec::new(),
        })
    }

    /// Starts a table with room for `days` rows.
    pub fn with_capacity(units: Vec<String>, days: usize) -> Result<Self, TableError> {
        let mut assembler = Self::new(units)?;
        assembler.rows.reserve(days);
        Ok(assembler)
    }

    /// Appends one day.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::WidthMismatch`] if `values` does not have one
    /// entry per unit.
    pub fn push_row(&mut self, date: NaiveDate, values: Vec<f64>) -> Result<(), TableError> {
        if values.len() != self.units.len() {
            return Err(TableError::WidthMismatch {
                row: self.rows.len(),
                expected: self.units.len(),
                got: values.len(),
            });
        }
        let total = values.iter().sum();
        self.rows.push(TableRow {
            date,
            values,
            total,
        });
        Ok(())
    }

    /// Finishes the table.
    pub fn finish(self) -> OutputTable {
        OutputTable {
            units: self.units,
            rows: self.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> OutputTable {
        let mut asm = OutputAssembler::new(vec!["A".into(), "B".into()]).unwrap();
        asm.push_row(ymd(2024, 1, 1), vec![1.0, 2.5]).unwrap();
        asm.push_row(ymd(2024, 1, 2), vec![3.0, 0.0]).unwrap();
        asm.finish()
    }

    #[test]
    fn rejects_no_units() {
        assert_eq!(OutputAssembler::new(vec![]).unwrap_err(), TableError::NoUnits);
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = OutputAssembler::new(vec!["A".into(), "B".into(), "A".into()]).unwrap_err();
        assert_eq!(
            err,
            TableError::DuplicateUnit {
                name: "A".to_string()
            }
        );
    }

    #[test]
    fn rejects_width_mismatch() {
        let mut asm = OutputAssembler::new(vec!["A".into()]).unwrap();
        asm.push_row(ymd(2024, 1, 1), vec![1.0]).unwrap();
        let err = asm.push_row(ymd(2024, 1, 2), vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            TableError::WidthMismatch {
                row: 1,
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn shape_and_header() {
        let t = sample();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 4);
        assert_eq!(t.header(), vec!["Date", "A", "B", "Total"]);
    }

    #[test]
    fn totals_are_row_sums() {
        let t = sample();
        assert_eq!(t.totals(), vec![3.5, 3.0]);
    }

    #[test]
    fn columns_by_index_and_name() {
        let t = sample();
        assert_eq!(t.column(1), Some(vec![2.5, 0.0]));
        assert_eq!(t.column(2), None);
        assert_eq!(t.column_by_name("A"), Some(vec![1.0, 3.0]));
        assert_eq!(t.column_by_name("Total"), None);
    }

    #[test]
    fn cell_layout() {
        let cells = sample().cells();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0][0], Cell::Text("Date".into()));
        assert_eq!(cells[0][3], Cell::Text("Total".into()));
        assert_eq!(
            cells[1],
            vec![
                Cell::Date(ymd(2024, 1, 1)),
                Cell::Number(1.0),
                Cell::Number(2.5),
                Cell::Number(3.5)
            ]
        );
    }

    #[test]
    fn chart_view_omits_total() {
        let chart = sample().chart_series();
        assert_eq!(chart.dates, vec![ymd(2024, 1, 1), ymd(2024, 1, 2)]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "A");
        assert_eq!(chart.series[1].values, vec![2.5, 0.0]);
    }
}
