//! Tabular value store keyed by canonical board encodings

use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Q-table: canonical 9-character board key to a value per move index.
///
/// Rows are created lazily, all-zero, the first time a canonical state is
/// observed. The table is owned by exactly one learner; it is never shared
/// across learners.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueTable {
    rows: HashMap<String, [f64; 9]>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Number of canonical states with a materialized row
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value for a state-action pair; zero when the row is absent
    pub fn value(&self, key: &str, mv: usize) -> f64 {
        self.rows.get(key).map(|row| row[mv]).unwrap_or(0.0)
    }

    /// Mutable row for a canonical state, materialized zeroed on first use
    pub fn row_mut(&mut self, key: &str) -> &mut [f64; 9] {
        self.rows.entry(key.to_string()).or_insert([0.0; 9])
    }

    /// Materialize the row for a canonical state without touching it
    pub fn ensure_row(&mut self, key: &str) {
        self.row_mut(key);
    }

    /// Maximum entry of a row; zero when the row is absent
    pub fn row_max(&self, key: &str) -> f64 {
        self.rows
            .get(key)
            .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .unwrap_or(0.0)
    }

    /// Greedy choice among `candidates`: the highest-valued move, breaking
    /// value ties by lowest move index. Returns `None` for no candidates.
    pub fn greedy(&self, key: &str, candidates: &[usize]) -> Option<usize> {
        let row = self.rows.get(key);
        let mut best: Option<(usize, f64)> = None;
        for &mv in candidates {
            let value = row.map(|r| r[mv]).unwrap_or(0.0);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((mv, value)),
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// Save the table as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a table previously written by [`save`](Self::save)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let table = serde_json::from_reader(BufReader::new(file))?;
        Ok(table)
    }
}
