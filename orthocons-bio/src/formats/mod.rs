pub mod fasta;

// Re-export commonly used functions
pub use fasta::{
    header_check, parse_records, sequence_at, split_records, strip_newlines, write_records,
    FastaRecord, SequenceError, DEFAULT_HEADER,
};
