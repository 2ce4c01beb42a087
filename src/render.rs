//! Rendering of finalized components as a Graphviz `digraph`.
//!
//! Output is fully deterministic: nodes are grouped by classification then
//! status, members and edges are sorted by identifier, and the whole
//! description is built before anything is written out.

use std::{
    collections::BTreeMap,
    fmt::{self, Write},
};

use tracing::instrument;

use crate::domain::{Analysis, Classification, Error, Identifier, LifecycleStatus};

/// Errors that can occur while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A rendered record is inconsistent (e.g. an unparseable date).
    #[error(transparent)]
    Graph(#[from] Error),

    /// Writing to the output buffer failed.
    #[error("failed to write graph description")]
    Format(#[from] fmt::Error),
}

/// Renders the records and edges of an [`Analysis`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphRenderer {
    timeline: bool,
}

/// Nodes grouped by the attributes that select their style.
type Groups<'a> = BTreeMap<(Classification, LifecycleStatus), Vec<&'a Identifier>>;

/// Nodes grouped by year of publication.
type Ranks<'a> = BTreeMap<i64, Vec<&'a Identifier>>;

impl GraphRenderer {
    /// A renderer that emits only nodes and edges.
    #[must_use]
    pub const fn new() -> Self {
        Self { timeline: false }
    }

    /// Enables or disables the chronological timeline and legend.
    #[must_use]
    pub const fn with_timeline(mut self, timeline: bool) -> Self {
        self.timeline = timeline;
        self
    }

    /// Renders the finalized components of `analysis` into a string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Graph`] if a rendered record's date has no
    /// trailing year.
    #[instrument(skip_all, fields(timeline = self.timeline))]
    pub fn render(&self, analysis: &Analysis<'_>) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render_to(analysis, &mut out)?;
        Ok(out)
    }

    /// Renders the finalized components of `analysis` into `out`.
    ///
    /// Nothing is written if any rendered record is inconsistent.
    ///
    /// # Errors
    ///
    /// See [`GraphRenderer::render`].
    pub fn render_to<W: Write>(
        &self,
        analysis: &Analysis<'_>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let store = analysis.store();
        let mut groups = Groups::new();
        let mut ranks = Ranks::new();

        for id in analysis.processed() {
            let record = store.get(id)?;
            groups
                .entry((record.classification, record.status))
                .or_default()
                .push(&record.id);
            let year = record.year()?;
            if self.timeline {
                ranks.entry(year).or_default().push(&record.id);
            }
        }

        writeln!(out, "digraph rfc {{")?;

        let span = ranks
            .first_key_value()
            .zip(ranks.last_key_value())
            .map(|((&from, _), (&to, _))| (from, to));

        // An empty graph gets no year chain and no legend.
        if let Some((from, to)) = span {
            write_skeleton(out, from, to)?;
        }

        for ((classification, status), members) in &groups {
            writeln!(
                out,
                "\tnode [shape={} {}]",
                status.shape(),
                classification.node_style()
            )?;
            for id in members {
                writeln!(out, "\t{id};")?;
            }
        }

        if span.is_some() {
            write_ranks(out, &ranks)?;
            write_legend(out)?;
        }

        for edge in analysis.edges() {
            writeln!(out, "\t{} -> {}{};", edge.from, edge.to, edge.kind.edge_style())?;
        }

        writeln!(out, "}}")?;
        Ok(())
    }
}

/// An invisible chain of years, anchoring the `Legend` node after the last.
fn write_skeleton<W: Write>(out: &mut W, from: i64, to: i64) -> fmt::Result {
    writeln!(out, "// {from}-{to}")?;
    writeln!(out, "\tnode [shape=plaintext];")?;
    write!(out, "\t{from}")?;
    for year in (from..=to).skip(1) {
        write!(out, " -> {year}")?;
    }
    writeln!(out, ";")?;
    writeln!(out, "\t{to} -> Legend [style=invis];")
}

fn write_ranks<W: Write>(out: &mut W, ranks: &Ranks<'_>) -> fmt::Result {
    for (year, members) in ranks {
        write!(out, "\t{{rank=same {year}")?;
        for id in members {
            write!(out, " {id}")?;
        }
        writeln!(out, "}}")?;
    }
    Ok(())
}

fn write_legend<W: Write>(out: &mut W) -> fmt::Result {
    for status in LifecycleStatus::ALL {
        writeln!(out, "\tnode [shape={} style=solid];", status.shape())?;
        writeln!(out, "\t{status};")?;
    }

    write!(out, "\t{{rank=same Legend")?;
    for status in LifecycleStatus::ALL {
        write!(out, " {status}")?;
    }
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use test_case::test_case;

    use super::*;
    use crate::domain::Store;

    const INDEX: &str = "\
0050 Comments on the Meyer proposal. R.D. Bressler. April 1970. (Obsoleted by
     RFC0100) (Status: HISTORIC)

0100 Categorization and guide to NWG/RFCs. P.M. Karp. February 1971.
     (Obsoletes RFC0050) (Updated by RFC0200) (Status: UNKNOWN)

0200 Guide to NWG/RFCs. P.M. Karp. March 1972. (Updates RFC0100) (Status:
     INFORMATIONAL)

0300 Unrelated. A. Nother. March 1972. (Status: PROPOSED STANDARD)
";

    fn analysed(store: &Store, min_size: usize) -> Analysis<'_> {
        let mut analysis = Analysis::new(store);
        analysis.sweep(min_size).unwrap();
        analysis
    }

    #[test]
    fn renders_nodes_and_edges() {
        let store = Store::from_reader(Cursor::new(INDEX)).unwrap();
        let analysis = analysed(&store, 2);

        let actual = GraphRenderer::new().render(&analysis).unwrap();
        assert_eq!(
            actual,
            "digraph rfc {\n\
             \tnode [shape=house style=solid fontname=\"Helvetica-Bold\"]\n\
             \t0200;\n\
             \tnode [shape=none style=solid fontname=\"Helvetica\"]\n\
             \t0100;\n\
             \tnode [shape=cylinder style=dotted fontname=\"Helvetica-Narrow\"]\n\
             \t0050;\n\
             \t0050 -> 0100 [style=dashed];\n\
             \t0100 -> 0200;\n\
             }\n"
        );
    }

    #[test]
    fn renders_timeline_and_legend() {
        let store = Store::from_reader(Cursor::new(INDEX)).unwrap();
        let analysis = analysed(&store, 2);

        let actual = GraphRenderer::new()
            .with_timeline(true)
            .render(&analysis)
            .unwrap();
        assert_eq!(
            actual,
            "digraph rfc {\n\
             // 1970-1972\n\
             \tnode [shape=plaintext];\n\
             \t1970 -> 1971 -> 1972;\n\
             \t1972 -> Legend [style=invis];\n\
             \tnode [shape=house style=solid fontname=\"Helvetica-Bold\"]\n\
             \t0200;\n\
             \tnode [shape=none style=solid fontname=\"Helvetica\"]\n\
             \t0100;\n\
             \tnode [shape=cylinder style=dotted fontname=\"Helvetica-Narrow\"]\n\
             \t0050;\n\
             \t{rank=same 1970 0050}\n\
             \t{rank=same 1971 0100}\n\
             \t{rank=same 1972 0200}\n\
             \tnode [shape=none style=solid];\n\
             \tUnknown;\n\
             \tnode [shape=cylinder style=solid];\n\
             \tHistoric;\n\
             \tnode [shape=parallelogram style=solid];\n\
             \tExperimental;\n\
             \tnode [shape=house style=solid];\n\
             \tInformational;\n\
             \tnode [shape=polygon style=solid];\n\
             \tDraftStandard;\n\
             \tnode [shape=oval style=solid];\n\
             \tProposedStandard;\n\
             \tnode [shape=box style=solid];\n\
             \tInternetStandard;\n\
             \tnode [shape=trapezium style=solid];\n\
             \tBestCurrentPractice;\n\
             \t{rank=same Legend Unknown Historic Experimental Informational DraftStandard ProposedStandard InternetStandard BestCurrentPractice}\n\
             \t0050 -> 0100 [style=dashed];\n\
             \t0100 -> 0200;\n\
             }\n"
        );
    }

    #[test]
    fn only_finalized_components_are_rendered() {
        let store = Store::from_reader(Cursor::new(INDEX)).unwrap();

        let small = GraphRenderer::new().render(&analysed(&store, 2)).unwrap();
        assert!(!small.contains("0300"));

        let all = GraphRenderer::new().render(&analysed(&store, 0)).unwrap();
        assert!(all.contains("\tnode [shape=oval style=solid fontname=\"Helvetica-Bold\"]\n\t0300;\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let store = Store::from_reader(Cursor::new(INDEX)).unwrap();
        let analysis = analysed(&store, 0);
        let renderer = GraphRenderer::new().with_timeline(true);

        assert_eq!(
            renderer.render(&analysis).unwrap(),
            renderer.render(&analysis).unwrap()
        );
    }

    #[test]
    fn nothing_to_render() {
        let store = Store::from_reader(Cursor::new(INDEX)).unwrap();
        let analysis = Analysis::new(&store);

        let actual = GraphRenderer::new()
            .with_timeline(true)
            .render(&analysis)
            .unwrap();
        assert_eq!(actual, "digraph rfc {\n}\n");
    }

    #[test_case(false; "plain")]
    #[test_case(true; "timeline")]
    fn malformed_date_is_fatal(timeline: bool) {
        let index = "0001 Title. Author. Sometime. (Updated by RFC0002)\n\n\
                     0002 Title. Author. May 1990. (Updates RFC0001)\n";
        let store = Store::from_reader(Cursor::new(index)).unwrap();
        let analysis = analysed(&store, 0);

        let error = GraphRenderer::new()
            .with_timeline(timeline)
            .render(&analysis)
            .unwrap_err();
        assert!(matches!(
            error,
            RenderError::Graph(Error::MalformedDate { date, .. }) if date == "Sometime"
        ));
    }

    #[test_case("2147483647")]
    #[test_case("3000000000")]
    #[test_case("9223372036854775807")]
    fn timeline_spans_extreme_years(year: &str) {
        let index = format!("0001 Title. Author. May {year}. (Status: UNKNOWN)\n");
        let store = Store::from_reader(Cursor::new(index)).unwrap();

        let actual = GraphRenderer::new()
            .with_timeline(true)
            .render(&analysed(&store, 0))
            .unwrap();
        assert!(actual.starts_with(&format!(
            "digraph rfc {{\n// {year}-{year}\n\tnode [shape=plaintext];\n\t{year};\n\t{year} -> Legend [style=invis];\n"
        )));
        assert!(actual.contains(&format!("\t{{rank=same {year} 0001}}\n")));
    }
}
