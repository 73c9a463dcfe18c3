//! Typed view of the Rate4Site score table

use super::Rate4SiteError;
use serde::Serialize;
use std::str::FromStr;

/// A data column of the score table. Position (token 0) is always kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Identity,
    Score,
    QqInterval,
    Std,
    Msa,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Identity,
        Column::Score,
        Column::QqInterval,
        Column::Std,
        Column::Msa,
    ];

    /// Whitespace-delimited token index of the column in a table row
    pub fn index(&self) -> usize {
        match self {
            Column::Identity => 1,
            Column::Score => 2,
            Column::QqInterval => 3,
            Column::Std => 4,
            Column::Msa => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Column::Identity => "identity",
            Column::Score => "score",
            Column::QqInterval => "qqint",
            Column::Std => "std",
            Column::Msa => "msa",
        }
    }

    /// Heading used by Rate4Site itself
    pub fn heading(&self) -> &'static str {
        match self {
            Column::Identity => "SEQ",
            Column::Score => "SCORE",
            Column::QqInterval => "QQ-INTERVAL",
            Column::Std => "STD",
            Column::Msa => "MSA DATA",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Column {
    type Err = Rate4SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "identity" | "seq" | "residue" => Ok(Column::Identity),
            "score" => Ok(Column::Score),
            "qqint" | "qq-interval" | "qq_interval" => Ok(Column::QqInterval),
            "std" => Ok(Column::Std),
            "msa" | "msa-data" | "msa_data" => Ok(Column::Msa),
            other => Err(Rate4SiteError::UnknownColumn(other.to_string())),
        }
    }
}

/// Which columns of the table to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    pub identity: bool,
    pub score: bool,
    pub qqint: bool,
    pub std: bool,
    pub msa: bool,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            identity: true,
            score: true,
            qqint: false,
            std: false,
            msa: false,
        }
    }
}

impl ColumnSelection {
    pub fn all() -> Self {
        Self {
            identity: true,
            score: true,
            qqint: true,
            std: true,
            msa: true,
        }
    }

    pub fn none() -> Self {
        Self {
            identity: false,
            score: false,
            qqint: false,
            std: false,
            msa: false,
        }
    }

    pub fn with(mut self, column: Column) -> Self {
        match column {
            Column::Identity => self.identity = true,
            Column::Score => self.score = true,
            Column::QqInterval => self.qqint = true,
            Column::Std => self.std = true,
            Column::Msa => self.msa = true,
        }
        self
    }

    pub fn contains(&self, column: Column) -> bool {
        match column {
            Column::Identity => self.identity,
            Column::Score => self.score,
            Column::QqInterval => self.qqint,
            Column::Std => self.std,
            Column::Msa => self.msa,
        }
    }

    /// Selected columns in table order
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL.into_iter().filter(|c| self.contains(*c)).collect()
    }

    pub fn count(&self) -> usize {
        self.columns().len()
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, Rate4SiteError> {
        names
            .iter()
            .try_fold(Self::none(), |selection, name| Ok(selection.with(name.as_ref().parse()?)))
    }
}

impl FromStr for ColumnSelection {
    type Err = Rate4SiteError;

    /// Comma-separated list, e.g. `identity,score,std`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<&str> = s.split(',').filter(|n| !n.trim().is_empty()).collect();
        Self::from_names(&names)
    }
}

/// Aligned (non-gapped) sequences out of all sequences at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MsaData {
    pub aligned: u32,
    pub total: u32,
}

impl std::fmt::Display for MsaData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.aligned, self.total)
    }
}

/// One row of the score table; unselected columns are `None`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConservationRecord {
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qq_interval: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msa: Option<MsaData>,
}

impl ConservationRecord {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            residue: None,
            score: None,
            qq_interval: None,
            std: None,
            msa: None,
        }
    }

    /// Rendered value of one column, empty when not selected
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Identity => self.residue.clone().unwrap_or_default(),
            Column::Score => self.score.map(|s| s.to_string()).unwrap_or_default(),
            Column::QqInterval => self
                .qq_interval
                .map(|(low, high)| format!("[{},{}]", low, high))
                .unwrap_or_default(),
            Column::Std => self.std.map(|s| s.to_string()).unwrap_or_default(),
            Column::Msa => self.msa.map(|m| m.to_string()).unwrap_or_default(),
        }
    }
}

/// Per-residue conservation table, one record per alignment column in file order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConservationMatrix {
    pub columns: Vec<Column>,
    pub records: Vec<ConservationRecord>,
}

impl ConservationMatrix {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.records.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rendered rows, one cell per selected column
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records
            .iter()
            .map(|r| self.columns.iter().map(|c| r.cell(*c)).collect())
    }

    /// Conservation scores in position order (empty unless `score` is selected)
    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.score).collect()
    }

    /// Tab-separated rendering with a header line
    pub fn to_tsv(&self) -> String {
        let mut out = std::iter::once("pos")
            .chain(self.columns.iter().map(|c| c.name()))
            .collect::<Vec<_>>()
            .join("\t");
        out.push('\n');
        for (record, row) in self.records.iter().zip(self.rows()) {
            out.push_str(&record.position.to_string());
            for cell in row {
                out.push('\t');
                out.push_str(&cell);
            }
            out.push('\n');
        }
        out
    }
}
