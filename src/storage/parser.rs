//! Parsing of logical index records.
//!
//! A logical record is the whitespace-joined text of one blank-line-delimited
//! block of the index:
//!
//! ```text
//! 0050 Title. Author One, Author Two. April 1989. (Obsoleted by RFC0100) (Status: HISTORIC)
//! ```
//!
//! The leading digits are the identifier. Everything up to the *last* `". "`
//! is descriptive text (title, authors, date); everything after it is
//! annotation text, from which parenthesised tokens are peeled one at a time.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::{Error, Identifier, LifecycleStatus, Record, RelationKind};

static RECORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+) (.+)\. (.*)").expect("static regex is valid"));
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(([^)]+)\)(.*)").expect("static regex is valid"));
static FORWARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Obsoleted|Updated) by (.*)").expect("static regex is valid")
});
static BACKWARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Obsoletes|Updates) (.*)").expect("static regex is valid"));
static STATUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Status:\s*(.*)").expect("static regex is valid"));
static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RFC([0-9]+)").expect("static regex is valid"));

/// A single parenthesised annotation, classified.
///
/// Classification is first-match-wins, in variant order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Annotation<'a> {
    /// `Obsoleted by ...` / `Updated by ...`
    Forward(RelationKind, Vec<Identifier>),
    /// `Obsoletes ...` / `Updates ...`
    Backward(RelationKind, Vec<Identifier>),
    /// `Status: ...`
    Status(LifecycleStatus),
    /// Anything else, kept verbatim.
    Other(&'a str),
}

impl<'a> Annotation<'a> {
    fn classify(token: &'a str) -> Result<Self, Error> {
        if let Some(caps) = FORWARD.captures(token) {
            let kind = caps[1].parse()?;
            return Ok(Self::Forward(kind, parse_references(&caps[2])));
        }
        if let Some(caps) = BACKWARD.captures(token) {
            let kind = caps[1].parse()?;
            return Ok(Self::Backward(kind, parse_references(&caps[2])));
        }
        if let Some(caps) = STATUS.captures(token) {
            return Ok(Self::Status(caps[1].parse()?));
        }
        Ok(Self::Other(token))
    }
}

/// Extracts every `RFC<digits>` reference from a reference list.
///
/// Text that is not a reference is skipped; an empty or malformed list
/// yields no references.
fn parse_references(refs: &str) -> Vec<Identifier> {
    REFERENCE
        .captures_iter(refs)
        .map(|caps| Identifier::from_digits(&caps[1]))
        .collect()
}

/// Parses one logical record.
///
/// Returns `Ok(None)` if the text does not have the shape of a record (index
/// headers, footers, prose); callers should skip such lines.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedStatus`] if a `Status:` annotation names a
/// status outside the fixed vocabulary.
pub fn parse_record(line: &str) -> Result<Option<Record>, Error> {
    let Some(caps) = RECORD.captures(line) else {
        return Ok(None);
    };

    let id = Identifier::from_digits(&caps[1]);
    let segments: Vec<&str> = caps[2].split(". ").collect();
    let title = segments.first().copied().unwrap_or_default();
    let date = segments.last().copied().unwrap_or_default();
    let authors = if segments.len() > 2 {
        segments[1..segments.len() - 1].join(". ")
    } else {
        String::new()
    };

    let mut record = Record::new(id, title, authors, date);

    let mut rest = caps.get(3).map_or("", |m| m.as_str());
    while let Some(caps) = ANNOTATION.captures(rest) {
        let token = caps.get(1).map_or("", |m| m.as_str());
        trace!(id = %record.id, token, "annotation");

        match Annotation::classify(token)? {
            Annotation::Forward(kind, refs) => {
                for target in refs {
                    record.forwards.insert(target, kind);
                }
            }
            Annotation::Backward(kind, refs) => {
                for target in refs {
                    record.backwards.insert(target, kind);
                }
            }
            Annotation::Status(status) => record.status = status,
            Annotation::Other(text) => record.extras.push(text.to_string()),
        }

        rest = caps.get(2).map_or("", |m| m.as_str());
    }

    Ok(Some(record))
}
