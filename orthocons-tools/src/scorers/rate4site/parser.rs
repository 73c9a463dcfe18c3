//! Parser for the Rate4Site 2.01 score file
//!
//! The file is a `#`-commented header followed by one whitespace-delimited
//! row per alignment column:
//!
//! ```text
//! #POS SEQ  SCORE    QQ-INTERVAL     STD      MSA DATA
//! #The alpha parameter 1.23
//!     1     M  -0.9412   [-1.062,-0.8884] 0.09341    5/5
//! ```

use super::matrix::{Column, ColumnSelection, ConservationMatrix, ConservationRecord, MsaData};
use super::Rate4SiteError;
use nom::{
    character::complete::{char, space0, u32 as decimal_u32},
    combinator::{all_consuming, map},
    number::complete::double,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};
use regex::Regex;
use std::fs;
use std::path::Path;

const UNSUPPORTED: &str = "File format is not supported";
const NUMBER: &str = r"[0-9]*\.?[0-9]+";

/// All unsigned decimal numbers in `s`, in order
pub fn get_num(s: &str) -> Vec<f64> {
    match Regex::new(NUMBER) {
        Ok(re) => re
            .find_iter(s)
            .filter_map(|m| m.as_str().parse().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Alpha parameter from the contents of a score file
pub fn parse_alpha(contents: &str) -> Result<f64, Rate4SiteError> {
    contents
        .lines()
        .find(|line| line.contains("alpha parameter"))
        .and_then(|line| get_num(line).first().copied())
        .ok_or_else(|| Rate4SiteError::Format(UNSUPPORTED.to_string()))
}

/// Alpha parameter of the score file at `path`
pub fn get_alpha(path: &Path) -> Result<f64, Rate4SiteError> {
    parse_alpha(&read_output(path)?)
}

/// Table rows: non-empty lines that are not `#` comments
pub fn extract_residues(contents: &str) -> Vec<&str> {
    contents
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .collect()
}

/// Whitespace-delimited token `index` of `row`
pub fn extract(row: &str, index: usize) -> Option<&str> {
    row.split_whitespace().nth(index)
}

/// Build the conservation matrix from the contents of a score file
pub fn parse_matrix(
    contents: &str,
    selection: &ColumnSelection,
) -> Result<ConservationMatrix, Rate4SiteError> {
    let mut matrix = ConservationMatrix::new(selection.columns());

    for (n, row) in extract_residues(contents).into_iter().enumerate() {
        let malformed = |what: &str| {
            Rate4SiteError::Format(format!("{}: {} in row {} '{}'", UNSUPPORTED, what, n + 1, row.trim()))
        };

        let position = extract(row, 0)
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| malformed("bad position"))?;
        let mut record = ConservationRecord::new(position);

        for column in selection.columns() {
            let token = extract(row, column.index())
                .ok_or_else(|| malformed(&format!("missing {}", column.heading())))?;
            let bad = || malformed(&format!("bad {} '{}'", column.heading(), token));
            match column {
                Column::Identity => record.residue = Some(token.to_string()),
                Column::Score => record.score = Some(token.parse().map_err(|_| bad())?),
                Column::QqInterval => {
                    record.qq_interval = Some(parse_token(qq_interval, token).ok_or_else(bad)?)
                }
                Column::Std => record.std = Some(token.parse().map_err(|_| bad())?),
                Column::Msa => record.msa = Some(parse_token(msa_data, token).ok_or_else(bad)?),
            }
        }

        matrix.records.push(record);
    }

    Ok(matrix)
}

/// Conservation matrix of the score file at `path`
pub fn read_matrix(path: &Path, selection: &ColumnSelection) -> Result<ConservationMatrix, Rate4SiteError> {
    parse_matrix(&read_output(path)?, selection)
}

fn read_output(path: &Path) -> Result<String, Rate4SiteError> {
    if !path.is_file() {
        return Err(Rate4SiteError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

fn parse_token<T>(parser: fn(&str) -> IResult<&str, T>, token: &str) -> Option<T> {
    all_consuming(parser)(token).ok().map(|(_, value)| value)
}

/// `[low,high]`
fn qq_interval(input: &str) -> IResult<&str, (f64, f64)> {
    delimited(
        char('['),
        separated_pair(double, tuple((space0, char(','), space0)), double),
        char(']'),
    )(input)
}

/// `aligned/total`
fn msa_data(input: &str) -> IResult<&str, MsaData> {
    map(
        separated_pair(decimal_u32, char('/'), decimal_u32),
        |(aligned, total)| MsaData { aligned, total },
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthocons_test::{
        write_fixture, RATE4SITE_NO_ALPHA, RATE4SITE_OUTPUT, RATE4SITE_THREE_ROWS, RATE4SITE_TRUNCATED,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_num() {
        assert_eq!(get_num("#The alpha parameter 1.23"), vec![1.23]);
        assert_eq!(get_num("a .5 and 12 then 3.75"), vec![0.5, 12.0, 3.75]);
        assert!(get_num("no digits").is_empty());
    }

    #[test]
    fn test_alpha() {
        assert_eq!(parse_alpha(RATE4SITE_OUTPUT).unwrap(), 1.23);
        assert_eq!(parse_alpha(RATE4SITE_THREE_ROWS).unwrap(), 0.6781);
    }

    #[test]
    fn test_alpha_missing_line() {
        match parse_alpha(RATE4SITE_NO_ALPHA) {
            Err(Rate4SiteError::Format(msg)) => assert_eq!(msg, "File format is not supported"),
            other => panic!("Expected Format error, got {:?}", other),
        }
        assert!(matches!(
            parse_alpha("#The alpha parameter unknown"),
            Err(Rate4SiteError::Format(_))
        ));
    }

    #[test]
    fn test_get_alpha_missing_file() {
        let result = get_alpha(Path::new("/no/such/file.res"));
        assert!(matches!(result, Err(Rate4SiteError::NotFound(_))));
    }

    #[test]
    fn test_extract_residues_skips_comments_and_blanks() {
        let rows = extract_residues(RATE4SITE_OUTPUT);
        assert_eq!(rows.len(), 5);
        assert_eq!(extract(rows[0], 1), Some("M"));
        assert_eq!(extract(rows[4], 5), Some("5/5"));
        assert_eq!(extract(rows[4], 6), None);
    }

    #[test]
    fn test_default_columns() {
        let matrix = parse_matrix(RATE4SITE_THREE_ROWS, &ColumnSelection::default()).unwrap();
        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_columns(), 2);
        assert_eq!(matrix.records[1].position, 2);
        assert_eq!(matrix.records[1].residue.as_deref(), Some("C"));
        assert_eq!(matrix.scores(), vec![0.1, -0.5, 1.75]);
        assert_eq!(matrix.records[0].qq_interval, None);
    }

    #[test]
    fn test_all_columns() {
        let matrix = parse_matrix(RATE4SITE_OUTPUT, &ColumnSelection::all()).unwrap();
        assert_eq!(matrix.n_columns(), 5);

        let first = &matrix.records[0];
        assert_eq!(first.qq_interval, Some((-1.062, -0.8884)));
        assert_eq!(first.std, Some(0.09341));
        assert_eq!(first.msa, Some(MsaData { aligned: 5, total: 5 }));
        assert_eq!(matrix.records[3].msa, Some(MsaData { aligned: 3, total: 5 }));
    }

    #[test]
    fn test_truncated_row() {
        match parse_matrix(RATE4SITE_TRUNCATED, &ColumnSelection::default()) {
            Err(Rate4SiteError::Format(msg)) => {
                assert!(msg.contains("row 2"), "{}", msg);
                assert!(msg.contains("SCORE"), "{}", msg);
            }
            other => panic!("Expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_row_with_identity_only() {
        let selection = ColumnSelection::none().with(Column::Identity);
        let matrix = parse_matrix(RATE4SITE_TRUNCATED, &selection).unwrap();
        assert_eq!(matrix.n_rows(), 2);
        assert_eq!(matrix.records[1].residue.as_deref(), Some("C"));
    }

    #[test]
    fn test_bad_tokens() {
        let row = "    1     A   high   [-0.2,0.3]  0.2500    3/3\n";
        assert!(matches!(parse_matrix(row, &ColumnSelection::default()), Err(Rate4SiteError::Format(_))));

        let row = "    1     A   0.1   [-0.2;0.3]  0.2500    3/3\n";
        let selection = ColumnSelection::none().with(Column::QqInterval);
        assert!(matches!(parse_matrix(row, &selection), Err(Rate4SiteError::Format(_))));
    }

    #[test]
    fn test_read_matrix_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "msa.res", RATE4SITE_OUTPUT);
        let matrix = read_matrix(&path, &ColumnSelection::default()).unwrap();
        assert_eq!(matrix.n_rows(), 5);

        let missing = read_matrix(&dir.path().join("none.res"), &ColumnSelection::default());
        assert!(matches!(missing, Err(Rate4SiteError::NotFound(_))));
    }

    #[test]
    fn test_token_parsers() {
        assert_eq!(parse_token(qq_interval, "[0.7036,1.928]"), Some((0.7036, 1.928)));
        assert_eq!(parse_token(qq_interval, "[0.7036,1.928]x"), None);
        assert_eq!(parse_token(msa_data, "4/5"), Some(MsaData { aligned: 4, total: 5 }));
        assert_eq!(parse_token(msa_data, "4of5"), None);
    }
}
