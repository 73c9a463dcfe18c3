//! OMA browser REST client.
//!
//! [`OmaClient`] wraps the handful of endpoints the pipeline uses and turns
//! HTTP status codes into [`OmaError`]s. [`OrthologFinder`] holds the state for
//! one query sequence and memoises the ortholog and HOG results so repeated
//! calls do not hit the network again.

use crate::formats::fasta::{self, SequenceError};
use orthocons_core::config::OmaConfig;
use orthocons_core::OrthoconsError;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Public OMA browser
pub const OMA_BASE_URL: &str = "https://omabrowser.org";

const GATEWAY_TIMEOUT: u16 = 504;

#[derive(Error, Debug)]
pub enum OmaError {
    #[error("The database timed out (status code {status})")]
    Timeout { status: u16 },

    #[error("Request failed with status code {status}")]
    Request { status: u16 },

    #[error("No database entry matches the query sequence")]
    NoMatch,

    #[error("Unexpected response from OMA: {0}")]
    Decode(String),

    #[error("Could not reach OMA: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid OMA base URL: {0}")]
    BaseUrl(String),

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

impl OmaError {
    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            OmaError::Timeout { status } | OmaError::Request { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<OmaError> for OrthoconsError {
    fn from(err: OmaError) -> Self {
        match err {
            OmaError::Sequence(e) => e.into(),
            OmaError::BaseUrl(msg) => OrthoconsError::Configuration(msg),
            OmaError::Decode(msg) => OrthoconsError::Parse(msg),
            other => OrthoconsError::Network(other.to_string()),
        }
    }
}

/// Taxonomic level of a HOG as reported by `/api/hog/{id}/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HogLevel {
    Root(String),
    Alternatives(Vec<String>),
}

impl HogLevel {
    /// Level to render as FASTA: the root level, or the first alternative
    pub fn primary(&self) -> Option<&str> {
        match self {
            HogLevel::Root(level) => Some(level),
            HogLevel::Alternatives(levels) => levels.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SequenceSearch {
    #[serde(default)]
    targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
struct Target {
    omaid: String,
}

#[derive(Debug, Deserialize)]
struct OrthologEntry {
    canonicalid: String,
}

#[derive(Debug, Deserialize)]
struct HogEntry {
    level: String,
    #[serde(default)]
    alternative_levels: Vec<serde_json::Value>,
}

// The endpoint answers with a list of HOGs; a bare object is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HogResponse {
    Many(Vec<HogEntry>),
    One(HogEntry),
}

impl HogResponse {
    fn into_first(self) -> Option<HogEntry> {
        match self {
            HogResponse::Many(entries) => entries.into_iter().next(),
            HogResponse::One(entry) => Some(entry),
        }
    }
}

fn level_name(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => map
            .get("level")
            .and_then(|l| l.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// Blocking client for the OMA browser API
pub struct OmaClient {
    base_url: Url,
    client: Client,
}

impl OmaClient {
    /// Create a client against `base_url` with default settings
    pub fn new(base_url: &str) -> Result<Self, OmaError> {
        Self::from_config(&OmaConfig {
            base_url: base_url.to_string(),
            ..OmaConfig::default()
        })
    }

    pub fn from_config(config: &OmaConfig) -> Result<Self, OmaError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| OmaError::BaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(OmaError::BaseUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}/`, percent-encoding each segment
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    fn check_status(response: Response) -> Result<Response, OmaError> {
        let status = response.status().as_u16();
        debug!("OMA responded with status {}", status);
        match status {
            200 => Ok(response),
            GATEWAY_TIMEOUT => Err(OmaError::Timeout { status }),
            _ => Err(OmaError::Request { status }),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, OmaError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()?;
        let body = Self::check_status(response)?.text()?;
        serde_json::from_str(&body).map_err(|e| OmaError::Decode(e.to_string()))
    }

    fn get_text(&self, url: Url) -> Result<String, OmaError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        Ok(Self::check_status(response)?.text()?)
    }

    /// OMA id of the best database match for a protein sequence
    pub fn resolve_oma_id(&self, sequence: &str) -> Result<String, OmaError> {
        let mut url = self.endpoint(&["api", "sequence"]);
        url.query_pairs_mut().append_pair("query", sequence);

        let search: SequenceSearch = self.get_json(url)?;
        search
            .targets
            .into_iter()
            .next()
            .map(|target| target.omaid)
            .ok_or(OmaError::NoMatch)
    }

    /// Canonical ids of the orthologs of a protein
    pub fn ortholog_ids(&self, oma_id: &str) -> Result<Vec<String>, OmaError> {
        let url = self.endpoint(&["api", "protein", oma_id, "orthologs"]);
        let entries: Vec<OrthologEntry> = self.get_json(url)?;
        Ok(entries.into_iter().map(|e| e.canonicalid).collect())
    }

    /// HOG level of a protein: the root level, or the alternative levels
    pub fn hog_level(&self, oma_id: &str, root: bool) -> Result<HogLevel, OmaError> {
        let url = self.endpoint(&["api", "hog", oma_id]);
        let response: HogResponse = self.get_json(url)?;
        let entry = response
            .into_first()
            .ok_or_else(|| OmaError::Decode(format!("no HOG listed for {}", oma_id)))?;

        if root {
            Ok(HogLevel::Root(entry.level))
        } else {
            Ok(HogLevel::Alternatives(
                entry.alternative_levels.iter().map(level_name).collect(),
            ))
        }
    }

    /// Orthologs of a protein rendered as FASTA
    pub fn ortholog_fasta(&self, oma_id: &str) -> Result<String, OmaError> {
        self.get_text(self.endpoint(&["oma", "vps", oma_id, "fasta"]))
    }

    /// Members of a HOG at `level` rendered as FASTA
    pub fn hog_fasta(&self, oma_id: &str, level: &str) -> Result<String, OmaError> {
        self.get_text(self.endpoint(&["oma", "hogs", oma_id, level, "fasta"]))
    }
}

/// Finds the orthologs (or HOG members) of one query sequence.
///
/// The ortholog set starts with the query itself, followed by the entries
/// returned by OMA, one of which is labelled "self" (the closest match).
pub struct OrthologFinder {
    client: OmaClient,
    fasta: String,
    sequence: String,
    oma_id: Option<String>,
    ortholog_ids: Vec<String>,
    orthologs: Option<String>,
    hog_level: Option<HogLevel>,
    hogs: Option<String>,
    last_status: Option<u16>,
}

impl OrthologFinder {
    pub fn new(client: OmaClient, fasta: impl Into<String>) -> Self {
        Self {
            client,
            fasta: fasta.into(),
            sequence: String::new(),
            oma_id: None,
            ortholog_ids: Vec::new(),
            orthologs: None,
            hog_level: None,
            hogs: None,
            last_status: None,
        }
    }

    pub fn fasta(&self) -> &str {
        &self.fasta
    }

    /// Query sequence with header and line breaks removed (set on first query)
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn oma_id(&self) -> Option<&str> {
        self.oma_id.as_deref()
    }

    pub fn ortholog_ids(&self) -> &[String] {
        &self.ortholog_ids
    }

    pub fn hog_level(&self) -> Option<&HogLevel> {
        self.hog_level.as_ref()
    }

    /// Status code of the last failed request
    pub fn last_status(&self) -> Option<u16> {
        self.last_status
    }

    fn record<T>(&mut self, result: Result<T, OmaError>) -> Result<T, OmaError> {
        if let Err(err) = &result {
            if let Some(status) = err.status() {
                self.last_status = Some(status);
            }
        }
        result
    }

    fn prepare_sequence(&mut self) -> Result<(), OmaError> {
        self.sequence = fasta::sequence_at(&self.fasta, 0)?;
        if self.sequence.is_empty() {
            return Err(SequenceError::Empty.into());
        }
        fasta::header_check(&self.fasta)?;
        Ok(())
    }

    /// Resolve the query sequence to its OMA id
    pub fn retrieve_oma_id(&mut self) -> Result<String, OmaError> {
        if let Some(id) = &self.oma_id {
            return Ok(id.clone());
        }
        if self.sequence.is_empty() {
            self.prepare_sequence()?;
        }
        let result = self.client.resolve_oma_id(&self.sequence);
        let id = self.record(result)?;
        info!("Query resolved to OMA id {}", id);
        self.oma_id = Some(id.clone());
        Ok(id)
    }

    /// Fetch the HOG level of the resolved protein
    pub fn retrieve_hog_level(&mut self, root: bool) -> Result<HogLevel, OmaError> {
        let id = self.retrieve_oma_id()?;
        let result = self.client.hog_level(&id, root);
        let level = self.record(result)?;
        self.hog_level = Some(level.clone());
        Ok(level)
    }

    /// Refresh the canonical ids of the orthologs of the resolved protein
    pub fn update_ortholog_ids(&mut self) -> Result<&[String], OmaError> {
        let id = self.retrieve_oma_id()?;
        let result = self.client.ortholog_ids(&id);
        self.ortholog_ids = self.record(result)?;
        Ok(&self.ortholog_ids)
    }

    pub fn ortholog_to_fasta(&mut self) -> Result<String, OmaError> {
        let id = self.retrieve_oma_id()?;
        let result = self.client.ortholog_fasta(&id);
        self.record(result)
    }

    pub fn hog_to_fasta(&mut self) -> Result<String, OmaError> {
        let id = self.retrieve_oma_id()?;
        let level = match &self.hog_level {
            Some(level) => level.clone(),
            None => self.retrieve_hog_level(true)?,
        };
        let level = level
            .primary()
            .ok_or_else(|| OmaError::Decode(format!("no HOG level available for {}", id)))?
            .to_string();
        let result = self.client.hog_fasta(&id, &level);
        self.record(result)
    }

    /// Query FASTA followed by the orthologs OMA reports for it
    pub fn try_get_orthologs(&mut self) -> Result<String, OmaError> {
        self.prepare_sequence()?;
        if let Some(cached) = &self.orthologs {
            debug!("Replaying cached orthologs");
            return Ok(cached.clone());
        }

        let query = fasta::strip_newlines(&self.fasta)?;
        self.retrieve_oma_id()?;
        let orthologs = self.ortholog_to_fasta()?;
        let output = format!("{}\n{}", query, orthologs);
        self.orthologs = Some(output.clone());
        Ok(output)
    }

    /// Members of the root HOG of the query as FASTA
    pub fn try_get_hogs(&mut self) -> Result<String, OmaError> {
        self.prepare_sequence()?;
        if let Some(cached) = &self.hogs {
            debug!("Replaying cached HOGs");
            return Ok(cached.clone());
        }

        self.retrieve_oma_id()?;
        self.retrieve_hog_level(true)?;
        let hogs = self.hog_to_fasta()?;
        self.hogs = Some(hogs.clone());
        Ok(hogs)
    }

    /// Like [`Self::try_get_orthologs`], with database failures turned into a
    /// message. Malformed input is still an error.
    pub fn get_orthologs(&mut self) -> Result<String, SequenceError> {
        into_message(self.try_get_orthologs(), "orthologs")
    }

    /// Like [`Self::try_get_hogs`], with database failures turned into a
    /// message. Malformed input is still an error.
    pub fn get_hogs(&mut self) -> Result<String, SequenceError> {
        into_message(self.try_get_hogs(), "HOGs")
    }
}

fn into_message(result: Result<String, OmaError>, what: &str) -> Result<String, SequenceError> {
    match result {
        Ok(fasta) => Ok(fasta),
        Err(OmaError::Sequence(SequenceError::Empty)) => Ok(failure_message(
            &OmaError::Sequence(SequenceError::Empty),
            what,
        )),
        Err(OmaError::Sequence(err)) => Err(err),
        Err(err) => Ok(failure_message(&err, what)),
    }
}

/// Human-readable description of a failed lookup
pub fn failure_message(err: &OmaError, what: &str) -> String {
    match err {
        OmaError::Timeout { status } => format!(
            "The database timed out. Could not determine the {} of your sequence. Status code {}",
            what, status
        ),
        OmaError::Request { status } => format!(
            "There was an issue querying the database. Status code {}",
            status
        ),
        OmaError::Sequence(SequenceError::Empty) => "Input sequence is empty!".to_string(),
        OmaError::NoMatch => format!("No {} found: the database has no match for your sequence.", what),
        other => format!("There was an issue querying the database. {}", other),
    }
}
