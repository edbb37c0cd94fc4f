//! Encoding of CDDB commands and decoding of server responses.
//!
//! Both transports deliver the same response grammar: a status line starting with a three
//! digit code, optionally followed by a block of lines terminated by a line holding a
//! single `.`.

use crate::cddb::constants::{BLOCK_TERMINATOR, PROTOCOL_LEVEL};
use crate::cddb::error::{CddbError, CddbResult};
use crate::cddb::models::{MatchCandidate, MetadataRecord, QueryCommand, StatusLine};
use crate::toc::models::DiscToc;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::VecDeque;

lazy_static! {
    static ref STATUS_RE: Regex = Regex::new(r"^([0-9]{3}) (.*)$").unwrap();
    static ref MATCH_RE: Regex = Regex::new(r"^(\S+) (\S+) (.+)$").unwrap();
    static ref FIELD_RE: Regex = Regex::new(r"^(\S+?)=(.+)$").unwrap();
}

/// Source of response lines, yielding `None` once the underlying stream is exhausted.
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> CddbResult<Option<String>>;
}

/// Lines of an already received response body.
#[derive(Debug, Clone, Default)]
pub struct BufferedLines {
    lines: VecDeque<String>,
}

impl BufferedLines {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[async_trait]
impl LineSource for BufferedLines {
    async fn next_line(&mut self) -> CddbResult<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

pub fn parse_status_line(line: &str) -> CddbResult<StatusLine> {
    let line = strip_line_ending(line);

    let captures = STATUS_RE
        .captures(line)
        .ok_or_else(|| CddbError::MalformedStatusLine(line.to_string()))?;

    let code = captures[1]
        .parse::<u16>()
        .map_err(|_| CddbError::MalformedStatusLine(line.to_string()))?;

    Ok(StatusLine {
        code,
        rest: captures[2].to_string(),
    })
}

/// Parses `<category> <disc-key> <title>`.
pub fn parse_match_line(line: &str) -> CddbResult<MatchCandidate> {
    let line = strip_line_ending(line);

    let captures = MATCH_RE
        .captures(line)
        .ok_or_else(|| CddbError::MalformedMatchLine(line.to_string()))?;

    Ok(MatchCandidate {
        category: captures[1].to_string(),
        disc_key: captures[2].to_string(),
        title: captures[3].to_string(),
    })
}

/// Parses a `NAME=value` entry line. Comments and free text yield `None`.
pub fn parse_field_line(line: &str) -> Option<(String, String)> {
    let line = strip_line_ending(line);

    if line.starts_with('#') {
        return None;
    }

    FIELD_RE
        .captures(line)
        .map(|captures| (captures[1].to_string(), captures[2].to_string()))
}

/// Reads lines up to the `.` terminator, which is consumed and not returned.
pub async fn read_block<S>(source: &mut S) -> CddbResult<Vec<String>>
where
    S: LineSource + ?Sized,
{
    let mut lines = Vec::new();

    loop {
        let line = source.next_line().await?.ok_or(CddbError::TruncatedBlock)?;
        let line = strip_line_ending(&line);

        if line == BLOCK_TERMINATOR {
            return Ok(lines);
        }

        lines.push(line.to_string());
    }
}

pub fn parse_metadata<'a>(lines: impl IntoIterator<Item = &'a str>) -> MetadataRecord {
    lines.into_iter().filter_map(parse_field_line).collect()
}

pub fn hello_argument(user: &str, host: &str, app_name: &str, app_version: &str) -> String {
    format!("{user} {host} {app_name} {app_version}")
}

pub fn hello_command(user: &str, host: &str, app_name: &str, app_version: &str) -> String {
    format!(
        "cddb hello {}",
        hello_argument(user, host, app_name, app_version)
    )
}

pub fn query_command(toc: &DiscToc) -> String {
    QueryCommand::from_toc(toc).to_string()
}

pub fn read_command(category: &str, disc_key: &str) -> String {
    format!("cddb read {category} {disc_key}")
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Form body of a CGI request carrying `command`.
pub fn cgi_form(command: &str, hello: &str) -> String {
    encode_form(&[
        ("cmd", command),
        ("hello", hello),
        ("proto", &PROTOCOL_LEVEL.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_status_line() {
        let status = parse_status_line("200 gnudb.gnudb.org CDDBP server v1.5.2 ready\r\n").unwrap();
        assert_eq!(status.code, 200);
        assert_eq!(status.rest, "gnudb.gnudb.org CDDBP server v1.5.2 ready");
    }

    #[test]
    fn rejects_status_line_without_code() {
        for line in ["", "20 short", "2000 long", "abc text", "200", "200-continued"] {
            assert!(
                matches!(parse_status_line(line), Err(CddbError::MalformedStatusLine(_))),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_ascii_digits_in_status_code() {
        assert!(parse_status_line("٢٠٠ ok").is_err());
    }

    #[test]
    fn parses_match_line() {
        let candidate = parse_match_line("rock be0b1b0d Max Sharam / A Million Year Girl").unwrap();
        assert_eq!(
            candidate,
            MatchCandidate {
                category: "rock".to_string(),
                disc_key: "be0b1b0d".to_string(),
                title: "Max Sharam / A Million Year Girl".to_string(),
            }
        );
    }

    #[test]
    fn rejects_match_line_without_title() {
        assert!(matches!(
            parse_match_line("rock be0b1b0d"),
            Err(CddbError::MalformedMatchLine(_))
        ));
    }

    #[test]
    fn parses_field_lines() {
        assert_eq!(
            parse_field_line("DTITLE=Artist / Title"),
            Some(("DTITLE".to_string(), "Artist / Title".to_string()))
        );
        assert_eq!(
            parse_field_line("TTITLE3=a=b"),
            Some(("TTITLE3".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_field_line("# comment"), None);
        assert_eq!(parse_field_line("#DTITLE=commented out"), None);
        assert_eq!(parse_field_line("garbage"), None);
        assert_eq!(parse_field_line("EXTD="), None);
    }

    #[tokio::test]
    async fn read_block_stops_at_terminator() {
        let mut source = BufferedLines::from_text("rock 1 A\r\nfolk 2 B\r\n.\r\n211 next\r\n");

        let block = read_block(&mut source).await.unwrap();
        assert_eq!(block, vec!["rock 1 A", "folk 2 B"]);
        assert_eq!(source.next_line().await.unwrap().as_deref(), Some("211 next"));
    }

    #[tokio::test]
    async fn read_block_accepts_empty_block() {
        let mut source = BufferedLines::from_text(".\n");
        assert!(read_block(&mut source).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_block_fails_on_truncated_stream() {
        let mut source = BufferedLines::from_text("rock 1 A\nfolk 2 B\n");
        assert!(matches!(
            read_block(&mut source).await,
            Err(CddbError::TruncatedBlock)
        ));
    }

    #[tokio::test]
    async fn read_block_only_treats_lone_dot_as_terminator() {
        let mut source = BufferedLines::from_text("EXTD=...\n. \n..\n.\n");
        let block = read_block(&mut source).await.unwrap();
        assert_eq!(block, vec!["EXTD=...", ". ", ".."]);
    }

    #[tokio::test]
    async fn read_block_is_repeatable_on_identical_input() {
        let text = "# xmcd\nDISCID=be0b1b0d\nDTITLE=Max Sharam / A Million Year Girl\n.\n";

        let first = read_block(&mut BufferedLines::from_text(text)).await.unwrap();
        let second = read_block(&mut BufferedLines::from_text(text)).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parse_metadata_skips_comments_and_free_text() {
        let record = parse_metadata([
            "# xmcd",
            "#",
            "DISCID=be0b1b0d",
            "This entry was submitted by hand",
            "DTITLE=Max Sharam / A Million Year Girl",
            "DYEAR=1995",
        ]);

        assert_eq!(
            record.fields(),
            &[
                ("DISCID".to_string(), "be0b1b0d".to_string()),
                (
                    "DTITLE".to_string(),
                    "Max Sharam / A Million Year Girl".to_string()
                ),
                ("DYEAR".to_string(), "1995".to_string()),
            ]
        );
    }

    #[test]
    fn builds_commands() {
        assert_eq!(
            hello_command("joe", "example.org", "cdinfo", "0.2.0"),
            "cddb hello joe example.org cdinfo 0.2.0"
        );
        assert_eq!(read_command("rock", "be0b1b0d"), "cddb read rock be0b1b0d");
    }

    #[test]
    fn builds_query_for_test_disc() {
        let toc = DiscToc::from_offsets(&crate::toc::constants::TEST_DISC_OFFSETS, 213525).unwrap();
        assert_eq!(
            query_command(&toc),
            "cddb query be0b1d0d 13 150 17395 34292 53067 71137 84725 85962 104055 124290 141842 162472 175480 194340 2845"
        );
    }

    #[test]
    fn cgi_form_carries_command_hello_and_proto() {
        let body = cgi_form("cddb read rock be0b1b0d", "joe example.org cdinfo 0.2.0");
        assert_eq!(
            body,
            "cmd=cddb%20read%20rock%20be0b1b0d&hello=joe%20example.org%20cdinfo%200.2.0&proto=6"
        );
    }

    #[test]
    fn encode_form_escapes_reserved_characters() {
        assert_eq!(encode_form(&[("a&b", "c=d/e")]), "a%26b=c%3Dd%2Fe");
    }
}
