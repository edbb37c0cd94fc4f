use crate::cddb::error::CddbError;
use crate::fingerprint::{DiscFingerprint, track_offsets};
use crate::toc::models::DiscToc;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u16,
    pub rest: String,
}

impl Display for StatusLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.rest)
    }
}

/// One row of a query result. `disc_key` is the server's key for the entry and need not
/// equal the locally computed disc id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub category: String,
    pub disc_key: String,
    pub title: String,
}

/// Fields of a disc entry in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    fields: Vec<(String, String)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value of `name` concatenated. xmcd entries split long values over several
    /// lines with the same field name.
    pub fn joined(&self, name: &str) -> Option<String> {
        let mut values = self
            .fields
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
            .peekable();

        values.peek()?;
        Some(values.collect())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MetadataRecord {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Structured form of `cddb query <disc-id> <n> <offset>* <seconds>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCommand {
    pub disc_id: u32,
    pub offsets: Vec<u32>,
    pub total_seconds: u32,
}

impl QueryCommand {
    pub fn from_toc(toc: &DiscToc) -> Self {
        let fingerprint = DiscFingerprint::from_toc(toc);

        Self {
            disc_id: fingerprint.disc_id(),
            offsets: track_offsets(toc),
            total_seconds: fingerprint.total_seconds,
        }
    }

    pub fn track_count(&self) -> usize {
        self.offsets.len()
    }
}

impl Display for QueryCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cddb query {:08x} {}", self.disc_id, self.track_count())?;
        for offset in &self.offsets {
            write!(f, " {offset}")?;
        }
        write!(f, " {}", self.total_seconds)
    }
}

impl FromStr for QueryCommand {
    type Err = CddbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CddbError::MalformedQueryCommand(s.to_string());

        let mut parts = s.split_whitespace();
        if parts.next() != Some("cddb") || parts.next() != Some("query") {
            return Err(malformed());
        }

        let disc_id = parts
            .next()
            .and_then(|id| u32::from_str_radix(id, 16).ok())
            .ok_or_else(malformed)?;

        let track_count = parts
            .next()
            .and_then(|count| count.parse::<usize>().ok())
            .ok_or_else(malformed)?;

        let numbers = parts
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;

        match numbers.split_last() {
            Some((total_seconds, offsets)) if offsets.len() == track_count => Ok(Self {
                disc_id,
                offsets: offsets.to_vec(),
                total_seconds: *total_seconds,
            }),
            _ => Err(malformed()),
        }
    }
}
