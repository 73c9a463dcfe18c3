//! Per-residue conservation scorers

pub mod rate4site;

pub use rate4site::{ColumnSelection, ConservationMatrix, Rate4Site, Rate4SiteError};
