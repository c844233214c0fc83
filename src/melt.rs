use crate::error::{DashboardError, Result};
use serde::Serialize;

/// A wide table: one row per key, one value column per variable.
#[derive(Debug, Clone)]
pub struct WideTable<K> {
    pub variables: Vec<String>,
    pub rows: Vec<(K, Vec<f64>)>,
}

/// One row of a long-form table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRow<K> {
    pub key: K,
    pub variable: String,
    pub value: f64,
}

impl<K> WideTable<K> {
    pub fn new(variables: &[&str]) -> Self {
        Self {
            variables: variables.iter().map(|v| v.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, key: K, values: Vec<f64>) {
        self.rows.push((key, values));
    }
}

/// Reshapes a wide table into long form.
///
/// Output is variable-major: every row's value for the first variable, in row
/// order, then every row's value for the second variable, and so on.
///
/// # Errors
/// Returns `DashboardError::Data` if a row carries a different number of
/// values than there are variables.
pub fn melt<K: Clone>(table: &WideTable<K>) -> Result<Vec<LongRow<K>>> {
    if let Some((_, values)) = table
        .rows
        .iter()
        .find(|(_, values)| values.len() != table.variables.len())
    {
        return Err(DashboardError::Data(format!(
            "Wide row has {} values for {} variables",
            values.len(),
            table.variables.len()
        )));
    }

    let mut long = Vec::with_capacity(table.rows.len() * table.variables.len());
    for (i, variable) in table.variables.iter().enumerate() {
        for (key, values) in &table.rows {
            long.push(LongRow {
                key: key.clone(),
                variable: variable.clone(),
                value: values[i],
            });
        }
    }

    Ok(long)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_major_order() {
        let mut wide = WideTable::new(&["casual", "registered"]);
        wide.push(2011, vec![1.0, 2.0]);
        wide.push(2012, vec![3.0, 4.0]);

        let long = melt(&wide).unwrap();
        let flat: Vec<(i32, &str, f64)> = long
            .iter()
            .map(|r| (r.key, r.variable.as_str(), r.value))
            .collect();
        assert_eq!(
            flat,
            vec![
                (2011, "casual", 1.0),
                (2012, "casual", 3.0),
                (2011, "registered", 2.0),
                (2012, "registered", 4.0),
            ]
        );
    }

    #[test]
    fn empty_table_melts_to_nothing() {
        let wide: WideTable<i32> = WideTable::new(&["casual", "registered"]);
        assert!(melt(&wide).unwrap().is_empty());
    }

    #[test]
    fn ragged_row_is_rejected() {
        let mut wide = WideTable::new(&["casual", "registered"]);
        wide.push("a", vec![1.0]);
        assert!(matches!(melt(&wide), Err(DashboardError::Data(_))));
    }
}
