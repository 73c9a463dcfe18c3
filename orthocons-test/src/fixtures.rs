//! Test fixtures shared across the workspace

use std::path::{Path, PathBuf};

/// Score file as written by Rate4Site 2.01 for a short alignment
pub const RATE4SITE_OUTPUT: &str = "\
#Rates were calculated using the expectation of the posterior rate distribution
#Prior distribution is Gamma with 16 discrete categories

#SEQ: the amino acid in the reference sequence in one letter code.
#SCORE: The conservation scores. lower value = higher conservation.
#QQ-INTERVAL: the confidence interval for the rate estimates. The default interval is 25-75 percentiles
#STD: the standard deviation of the posterior rate distribution.
#MSA DATA: The number of aligned sequences having an amino acid (non-gapped) from the overall number of sequences at each position.

#POS SEQ  SCORE    QQ-INTERVAL     STD      MSA DATA
#The alpha parameter 1.23
    1     M  -0.9412   [-1.062,-0.8884] 0.09341    5/5
    2     V   0.3061   [-0.2006,0.7036]  0.5482    5/5
    3     L   -0.6178   [-0.8115,-0.4944]  0.2165    4/5
    4     S    1.253   [0.7036,1.928]  0.7694    3/5
    5     P   -0.8305   [-0.9758,-0.7557]  0.1361    5/5

#Average = 0
#Standard Deviation = 1
";

/// Minimal three-row score file
pub const RATE4SITE_THREE_ROWS: &str = "\
#POS SEQ  SCORE    QQ-INTERVAL     STD      MSA DATA
#The alpha parameter 0.6781
    1     A   0.1000   [-0.2,0.3]  0.2500    3/3
    2     C  -0.5000   [-0.7,-0.4]  0.1000    3/3
    3     D   1.7500   [1.1,2.2]  0.9000    2/3
";

/// Score file whose header lacks the alpha line
pub const RATE4SITE_NO_ALPHA: &str = "\
#POS SEQ  SCORE    QQ-INTERVAL     STD      MSA DATA
    1     A   0.1000   [-0.2,0.3]  0.2500    3/3
";

/// Score file whose second row is truncated
pub const RATE4SITE_TRUNCATED: &str = "\
#The alpha parameter 2.5
    1     A   0.1000   [-0.2,0.3]  0.2500    3/3
    2     C
";

/// Query protein without a header
pub const QUERY_SEQUENCE: &str = "MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF";

/// Query protein with a wrapped body
pub const QUERY_FASTA: &str = ">query Hemoglobin subunit alpha\nMVLSPADKTNVKAAWGKVGAH\nAGEYGAEALERMFLSFPTTKTYFPHF\n";

/// Ortholog FASTA as rendered by `/oma/vps/{id}/fasta/`
pub const ORTHOLOG_FASTA: &str = "\
>HUMAN16963 | HBA_HUMAN | self
MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF
>MOUSE12345 | HBA_MOUSE
MVLSGEDKSNIKAAWGKIGGHGAEYGAEALERMFASFPTTKTYFPHF
>PANTR04321 | HBA_PANTR
MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF
";

/// HOG member FASTA as rendered by `/oma/hogs/{id}/{level}/fasta/`
pub const HOG_FASTA: &str = "\
>HUMAN16963 | HOG:0412345 | Mammalia
MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF
>BOVIN09876 | HOG:0412345 | Mammalia
MVLSAADKGNVKAAWGKVGGHAAEYGAEALERMFLSFPTTKTYFPHF
";

/// Body of `/api/sequence/?query=...`
pub fn sequence_search_json(omaid: &str) -> String {
    format!(
        r#"{{"query": "{}", "identified_by": "exact match", "targets": [{{"omaid": "{}", "canonicalid": "HBA_HUMAN"}}]}}"#,
        QUERY_SEQUENCE, omaid
    )
}

/// Body of `/api/protein/{id}/orthologs/`
pub const ORTHOLOGS_JSON: &str = r#"[
    {"omaid": "MOUSE12345", "canonicalid": "HBA_MOUSE", "rel_type": "1:1"},
    {"omaid": "PANTR04321", "canonicalid": "HBA_PANTR", "rel_type": "1:1"}
]"#;

/// Body of `/api/hog/{id}/`
pub const HOG_JSON: &str = r#"[
    {"hog_id": "HOG:0412345", "level": "Mammalia", "alternative_levels": ["Primates", "Eutheria"]}
]"#;

/// Write a fixture into `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}
