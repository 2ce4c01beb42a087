use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

use crate::domain::{Error, Identifier};

/// The kind of a relation between two documents.
///
/// Ordered by severity, `Updated < Obsoleted`. The same ordering drives
/// classification escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RelationKind {
    /// One document updates another.
    Updated,
    /// One document obsoletes another.
    Obsoleted,
}

impl RelationKind {
    /// The edge attribute suffix used when rendering a relation of this kind.
    #[must_use]
    pub const fn edge_style(self) -> &'static str {
        match self {
            Self::Updated => "",
            Self::Obsoleted => " [style=dashed]",
        }
    }
}

impl FromStr for RelationKind {
    type Err = Error;

    /// Accepts both the forward (`Updated`, `Obsoleted`) and backward
    /// (`Updates`, `Obsoletes`) spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Updated" | "Updates" => Ok(Self::Updated),
            "Obsoleted" | "Obsoletes" => Ok(Self::Obsoleted),
            other => Err(Error::UnrecognizedRelationKind(other.to_string())),
        }
    }
}

/// Derived currency of a document.
///
/// Starts at [`Classification::Current`] and only ever escalates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Classification {
    /// Neither updated nor obsoleted by anything.
    #[default]
    Current,
    /// Updated by at least one other document.
    Updated,
    /// Obsoleted by at least one other document.
    Obsoleted,
}

impl Classification {
    /// All classifications, in escalation order.
    pub const ALL: [Self; 3] = [Self::Current, Self::Updated, Self::Obsoleted];

    /// The node attributes used when rendering a document of this
    /// classification.
    #[must_use]
    pub const fn node_style(self) -> &'static str {
        match self {
            Self::Current => "style=solid fontname=\"Helvetica-Bold\"",
            Self::Updated => "style=solid fontname=\"Helvetica\"",
            Self::Obsoleted => "style=dotted fontname=\"Helvetica-Narrow\"",
        }
    }
}

impl From<RelationKind> for Classification {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::Updated => Self::Updated,
            RelationKind::Obsoleted => Self::Obsoleted,
        }
    }
}

/// Formal standards-track status declared in a `Status:` annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LifecycleStatus {
    /// No status was declared, or it was declared as `UNKNOWN`.
    #[default]
    Unknown,
    /// `HISTORIC`
    Historic,
    /// `EXPERIMENTAL`
    Experimental,
    /// `INFORMATIONAL`
    Informational,
    /// `DRAFT STANDARD`
    DraftStandard,
    /// `PROPOSED STANDARD`
    ProposedStandard,
    /// `INTERNET STANDARD`
    InternetStandard,
    /// `BEST CURRENT PRACTICE`
    BestCurrentPractice,
}

impl LifecycleStatus {
    /// All statuses, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Unknown,
        Self::Historic,
        Self::Experimental,
        Self::Informational,
        Self::DraftStandard,
        Self::ProposedStandard,
        Self::InternetStandard,
        Self::BestCurrentPractice,
    ];

    /// The label used for this status in the rendered legend.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Historic => "Historic",
            Self::Experimental => "Experimental",
            Self::Informational => "Informational",
            Self::DraftStandard => "DraftStandard",
            Self::ProposedStandard => "ProposedStandard",
            Self::InternetStandard => "InternetStandard",
            Self::BestCurrentPractice => "BestCurrentPractice",
        }
    }

    /// The node shape used when rendering a document with this status.
    #[must_use]
    pub const fn shape(self) -> &'static str {
        match self {
            Self::Unknown => "none",
            Self::Historic => "cylinder",
            Self::Experimental => "parallelogram",
            Self::Informational => "house",
            Self::DraftStandard => "polygon",
            Self::ProposedStandard => "oval",
            Self::InternetStandard => "box",
            Self::BestCurrentPractice => "trapezium",
        }
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LifecycleStatus {
    type Err = Error;

    /// Looks the value up in the index's status vocabulary. The table is
    /// closed: anything else is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNKNOWN" => Ok(Self::Unknown),
            "HISTORIC" => Ok(Self::Historic),
            "EXPERIMENTAL" => Ok(Self::Experimental),
            "INFORMATIONAL" => Ok(Self::Informational),
            "DRAFT STANDARD" => Ok(Self::DraftStandard),
            "PROPOSED STANDARD" => Ok(Self::ProposedStandard),
            "INTERNET STANDARD" => Ok(Self::InternetStandard),
            "BEST CURRENT PRACTICE" => Ok(Self::BestCurrentPractice),
            other => Err(Error::UnrecognizedStatus(other.to_string())),
        }
    }
}

/// A single document parsed from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Globally unique key.
    pub id: Identifier,
    /// First segment of the descriptive text.
    pub title: String,
    /// Middle segments of the descriptive text, rejoined with `". "`.
    pub authors: String,
    /// Last segment of the descriptive text, e.g. `April 1989`.
    pub date: String,
    /// Derived currency, see [`Record::escalate`].
    pub classification: Classification,
    /// Declared standards-track status.
    pub status: LifecycleStatus,
    /// Documents this one is updated or obsoleted *by*.
    pub forwards: BTreeMap<Identifier, RelationKind>,
    /// Documents this one updates or obsoletes.
    pub backwards: BTreeMap<Identifier, RelationKind>,
    /// Parenthesised annotations that are neither relations nor a status.
    pub extras: Vec<String>,
}

impl Record {
    /// Creates a current record with no relations and unknown status.
    #[must_use]
    pub fn new(
        id: Identifier,
        title: impl Into<String>,
        authors: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            authors: authors.into(),
            date: date.into(),
            classification: Classification::Current,
            status: LifecycleStatus::Unknown,
            forwards: BTreeMap::new(),
            backwards: BTreeMap::new(),
            extras: Vec::new(),
        }
    }

    /// Raises the classification to at least `kind`. Never lowers it.
    pub fn escalate(&mut self, kind: RelationKind) {
        self.classification = self.classification.max(kind.into());
    }

    /// Identifiers of every related document: forward relations first, then
    /// backward ones, each in identifier order.
    ///
    /// A document related in both directions appears twice.
    pub fn neighbours(&self) -> impl Iterator<Item = &Identifier> {
        self.forwards.keys().chain(self.backwards.keys())
    }

    /// The year of publication.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDate`] unless the date is exactly two
    /// space-separated parts, the second of which is an integer.
    pub fn year(&self) -> Result<i64, Error> {
        let malformed = || Error::MalformedDate {
            id: self.id.clone(),
            date: self.date.clone(),
        };

        let mut parts = self.date.split(' ');
        let (Some(_month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        year.parse().map_err(|_| malformed())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn record(date: &str) -> Record {
        Record::new(Identifier::new("0793").unwrap(), "Title", "Author", date)
    }

    #[test_case("UNKNOWN", LifecycleStatus::Unknown)]
    #[test_case("HISTORIC", LifecycleStatus::Historic)]
    #[test_case("EXPERIMENTAL", LifecycleStatus::Experimental)]
    #[test_case("INFORMATIONAL", LifecycleStatus::Informational)]
    #[test_case("DRAFT STANDARD", LifecycleStatus::DraftStandard)]
    #[test_case("PROPOSED STANDARD", LifecycleStatus::ProposedStandard)]
    #[test_case("INTERNET STANDARD", LifecycleStatus::InternetStandard)]
    #[test_case("BEST CURRENT PRACTICE", LifecycleStatus::BestCurrentPractice)]
    fn status_table(input: &str, expected: LifecycleStatus) {
        assert_eq!(input.parse::<LifecycleStatus>().unwrap(), expected);
    }

    #[test_case("Historic"; "wrong case")]
    #[test_case("STANDARD"; "partial name")]
    #[test_case(""; "empty")]
    fn unrecognised_status_is_an_error(input: &str) {
        assert_eq!(
            input.parse::<LifecycleStatus>(),
            Err(Error::UnrecognizedStatus(input.to_string()))
        );
    }

    #[test_case("Updated", RelationKind::Updated)]
    #[test_case("Updates", RelationKind::Updated)]
    #[test_case("Obsoleted", RelationKind::Obsoleted)]
    #[test_case("Obsoletes", RelationKind::Obsoleted)]
    fn relation_kind_spellings(input: &str, expected: RelationKind) {
        assert_eq!(input.parse::<RelationKind>().unwrap(), expected);
    }

    #[test]
    fn unrecognised_relation_kind_is_an_error() {
        assert_eq!(
            "Replaces".parse::<RelationKind>(),
            Err(Error::UnrecognizedRelationKind("Replaces".to_string()))
        );
    }

    #[test]
    fn escalation_never_regresses() {
        let mut record = record("May 1990");
        assert_eq!(record.classification, Classification::Current);

        record.escalate(RelationKind::Obsoleted);
        record.escalate(RelationKind::Updated);
        assert_eq!(record.classification, Classification::Obsoleted);
    }

    #[test]
    fn escalation_from_current_to_updated() {
        let mut record = record("May 1990");
        record.escalate(RelationKind::Updated);
        assert_eq!(record.classification, Classification::Updated);
    }

    #[test_case("April 1989", 1989)]
    #[test_case("May 2147483647", 2_147_483_647; "beyond 32 bits")]
    #[test_case("May 3000000000", 3_000_000_000)]
    #[test_case("May 9223372036854775807", i64::MAX; "largest year")]
    fn year_is_trailing_token(date: &str, year: i64) {
        assert_eq!(record(date).year().unwrap(), year);
    }

    #[test_case("May 9223372036854775808"; "year out of range")]
    #[test_case("1989"; "missing month")]
    #[test_case("1 April 1989"; "three parts")]
    #[test_case("April nineteen"; "non numeric year")]
    #[test_case(""; "empty")]
    fn malformed_dates(date: &str) {
        assert_eq!(
            record(date).year(),
            Err(Error::MalformedDate {
                id: Identifier::new("0793").unwrap(),
                date: date.to_string(),
            })
        );
    }

    #[test]
    fn displays_as_traversal_line() {
        assert_eq!(record("May 1990").to_string(), "0793;Title");
    }

    #[test]
    fn neighbours_lists_forwards_then_backwards() {
        let mut record = record("May 1990");
        record
            .backwards
            .insert(Identifier::new("0001").unwrap(), RelationKind::Updated);
        record
            .forwards
            .insert(Identifier::new("9000").unwrap(), RelationKind::Obsoleted);

        let neighbours: Vec<&str> = record.neighbours().map(Identifier::as_str).collect();
        assert_eq!(neighbours, ["9000", "0001"]);
    }
}
