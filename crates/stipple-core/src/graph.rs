//! Validation and decoding of the contribution-graph SVG.
//!
//! The source document records a count and a fill color per day cell but no
//! global intensity thresholds, so the five color bands are re-derived from
//! the maximum observed count and reconciled against the fills actually seen
//! on matching cells.

use std::str::FromStr;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::domain::error::FormatError;
use crate::domain::{ColorBand, ContributionGraph, DayCell, MonthLabel, WeekdayLabel};

/// Root element tag the source document must carry.
pub const EXPECTED_ROOT_TAG: &str = "svg";

/// Identifying class attribute expected on the root element.
pub const EXPECTED_ROOT_CLASS: &str = "js-calendar-graph-svg";

/// A full year of day cells is the minimum for a usable pattern.
pub const MIN_DAY_CELLS: usize = 365;

/// Fallback palette for bands no observed cell falls into, indexed by band.
const DEFAULT_PALETTE: [&str; 5] = ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"];

/// Check that `doc` is a structurally acceptable contribution graph.
///
/// Rules are applied in a fixed order and each failure reports its own
/// reason: well-formedness, root tag, root class, then the day-cell floor.
pub fn validate(doc: &str) -> Result<(), FormatError> {
    let tree = Document::parse(doc).map_err(FormatError::MalformedDocument)?;
    validate_tree(&tree)
}

/// Decode `doc` into a freshly owned [`ContributionGraph`].
///
/// Validation runs first; decoding is all-or-nothing, so a single missing or
/// non-numeric attribute fails the whole call rather than producing a
/// partial model.
pub fn parse(doc: &str) -> Result<ContributionGraph, FormatError> {
    let tree = Document::parse(doc).map_err(FormatError::MalformedDocument)?;
    validate_tree(&tree)?;

    let mut cells = Vec::new();
    let mut months = Vec::new();
    let mut weekdays = Vec::new();

    for node in tree.root_element().descendants() {
        match node.attribute("class") {
            Some("day") => cells.push(decode_day_cell(&node)?),
            Some("month") => months.push(decode_month(&node)?),
            Some("wday") => weekdays.push(decode_weekday(&node)?),
            _ => {}
        }
    }

    let bands = derive_bands(&cells);
    debug!(
        cells = cells.len(),
        months = months.len(),
        weekdays = weekdays.len(),
        max_count = cells.iter().map(|c| c.count).max().unwrap_or(0),
        "decoded contribution graph"
    );

    Ok(ContributionGraph {
        cells,
        months,
        weekdays,
        bands,
    })
}

fn validate_tree(tree: &Document<'_>) -> Result<(), FormatError> {
    let root = tree.root_element();

    let tag = root.tag_name().name();
    if tag != EXPECTED_ROOT_TAG {
        return Err(FormatError::UnexpectedRootTag {
            expected: EXPECTED_ROOT_TAG,
            actual: tag.to_string(),
        });
    }

    let class = root.attribute("class").unwrap_or("");
    if class != EXPECTED_ROOT_CLASS {
        return Err(FormatError::UnexpectedRootClass {
            expected: EXPECTED_ROOT_CLASS,
            actual: class.to_string(),
        });
    }

    let day_cells = root
        .descendants()
        .filter(|n| n.attribute("class") == Some("day"))
        .count();
    if day_cells < MIN_DAY_CELLS {
        return Err(FormatError::TooFewDataPoints {
            found: day_cells,
            min: MIN_DAY_CELLS,
        });
    }

    Ok(())
}

fn required_attr<'a>(node: &Node<'a, '_>, name: &'static str) -> Result<&'a str, FormatError> {
    node.attribute(name)
        .ok_or(FormatError::MissingAttribute(name))
}

fn parsed_attr<T: FromStr>(node: &Node<'_, '_>, name: &'static str) -> Result<T, FormatError> {
    let raw = required_attr(node, name)?;
    raw.parse().map_err(|_| FormatError::InvalidAttribute {
        attr: name,
        value: raw.to_string(),
    })
}

fn decode_day_cell(node: &Node<'_, '_>) -> Result<DayCell, FormatError> {
    Ok(DayCell {
        date: parsed_attr(node, "data-date")?,
        count: parsed_attr(node, "data-count")?,
        fill: required_attr(node, "fill")?.to_string(),
        x: parsed_attr(node, "x")?,
        y: parsed_attr(node, "y")?,
    })
}

fn decode_month(node: &Node<'_, '_>) -> Result<MonthLabel, FormatError> {
    Ok(MonthLabel {
        name: node.text().unwrap_or("").trim().to_string(),
        x: parsed_attr(node, "x")?,
        y: parsed_attr(node, "y")?,
    })
}

fn decode_weekday(node: &Node<'_, '_>) -> Result<WeekdayLabel, FormatError> {
    let style = node.attribute("style").unwrap_or("");
    let hidden = style.replace(' ', "").contains("display:none");
    Ok(WeekdayLabel {
        name: node.text().unwrap_or("").trim().to_string(),
        visible: !hidden,
        x: parsed_attr(node, "dx")?,
        y: parsed_attr(node, "dy")?,
    })
}

/// Derive the five intensity bands from the maximum observed count.
///
/// Thresholds partition `[0, max]` contiguously: band 0 is always `[0, 1)`
/// and the remaining boundaries sit at `max/6 + 1`, `max/3 + 1` and
/// `max/2 + 1` (integer division). Each band takes the fill of any observed
/// cell inside it, falling back to the default palette for bands no cell
/// reaches.
fn derive_bands(cells: &[DayCell]) -> [ColorBand; 5] {
    let max = cells.iter().map(|c| c.count).max().unwrap_or(0);
    let bounds = [
        (0, 1),
        (1, max / 6 + 1),
        (max / 6 + 1, max / 3 + 1),
        (max / 3 + 1, max / 2 + 1),
        (max / 2 + 1, max + 1),
    ];

    std::array::from_fn(|i| {
        let (lo, hi) = bounds[i];
        let fill = cells
            .iter()
            .find(|c| c.count >= lo && c.count < hi)
            .map(|c| c.fill.clone())
            .unwrap_or_else(|| DEFAULT_PALETTE[i].to_string());
        ColorBand { fill, lo, hi }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal well-formed graph with `counts.len()` day cells starting at
    /// 2017-01-01.
    fn fixture(counts: &[u32]) -> String {
        let mut body = String::new();
        let start: chrono::NaiveDate = "2017-01-01".parse().unwrap();
        for (i, count) in counts.iter().enumerate() {
            let date = start + chrono::Duration::days(i as i64);
            body.push_str(&format!(
                r##"<rect class="day" x="{}" y="{}" data-count="{}" data-date="{}" fill="#ebedf0"/>"##,
                13 * (i / 7),
                12 * (i % 7),
                count,
                date,
            ));
        }
        body.push_str(r#"<text x="13" y="-10" class="month">Jan</text>"#);
        body.push_str(r#"<text text-anchor="start" class="wday" dx="-10" dy="8" style="display: none;">Sun</text>"#);
        body.push_str(r#"<text text-anchor="start" class="wday" dx="-10" dy="22">Mon</text>"#);
        format!(
            r#"<svg width="828" height="128" class="js-calendar-graph-svg"><g transform="translate(16, 20)">{body}</g></svg>"#
        )
    }

    fn year_of_zeros() -> Vec<u32> {
        vec![0; 365]
    }

    #[test]
    fn rejects_malformed_markup() {
        let err = validate("<svg").unwrap_err();
        assert_eq!(err.to_string(), "malformed document");
    }

    #[test]
    fn rejects_wrong_root_tag() {
        let err = validate(r#"<html class="js-calendar-graph-svg"></html>"#).unwrap_err();
        assert_eq!(err.to_string(), "expected svg, got html");
    }

    #[test]
    fn rejects_wrong_root_class() {
        let err = validate(r#"<svg class="hero-banner"></svg>"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected class js-calendar-graph-svg, got hero-banner"
        );
    }

    #[test]
    fn rejects_too_few_day_cells() {
        let doc = fixture(&[0, 1, 2]);
        let err = validate(&doc).unwrap_err();
        assert_eq!(err.to_string(), "too few data points in graph: 3 < 365");
    }

    #[test]
    fn accepts_a_full_year() {
        let doc = fixture(&year_of_zeros());
        validate(&doc).unwrap();
    }

    #[test]
    fn parse_rejects_non_numeric_count() {
        let mut counts = year_of_zeros();
        counts[0] = 1;
        let doc = fixture(&counts).replace(r#"data-count="1""#, r#"data-count="one""#);
        let err = parse(&doc).unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidAttribute { attr: "data-count", .. }
        ));
    }

    #[test]
    fn parse_rejects_missing_date() {
        let mut counts = year_of_zeros();
        counts[0] = 1;
        let doc = fixture(&counts).replacen(r#" data-date="2017-01-01""#, "", 1);
        let err = parse(&doc).unwrap_err();
        assert!(matches!(err, FormatError::MissingAttribute("data-date")));
    }

    #[test]
    fn parse_extracts_cells_in_document_order() {
        let mut counts = year_of_zeros();
        counts[3] = 2;
        counts[100] = 5;
        let doc = fixture(&counts);
        let graph = parse(&doc).unwrap();

        assert_eq!(graph.cells.len(), 365);
        assert_eq!(graph.cells[0].date, "2017-01-01".parse().unwrap());
        assert_eq!(graph.cells[3].count, 2);
        assert_eq!(graph.cells[100].count, 5);
        assert!(graph
            .cells
            .windows(2)
            .all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn parse_extracts_labels_and_visibility() {
        let doc = fixture(&year_of_zeros());
        let graph = parse(&doc).unwrap();

        assert_eq!(graph.months.len(), 1);
        assert_eq!(graph.months[0].name, "Jan");
        assert_eq!(graph.months[0].x, 13);

        assert_eq!(graph.weekdays.len(), 2);
        assert_eq!(graph.weekdays[0].name, "Sun");
        assert!(!graph.weekdays[0].visible);
        assert_eq!(graph.weekdays[1].name, "Mon");
        assert!(graph.weekdays[1].visible);
        assert_eq!(graph.weekdays[1].y, 22);
    }

    #[test]
    fn bands_partition_zero_to_max() {
        for max in [1u32, 2, 5, 7, 12, 30, 100] {
            let counts: Vec<u32> = (0..=max).chain(std::iter::repeat(0)).take(366).collect();
            let doc = fixture(&counts);
            let graph = parse(&doc).unwrap();

            assert_eq!(graph.bands[0].lo, 0);
            assert_eq!(graph.bands[0].hi, 1);
            for w in graph.bands.windows(2) {
                assert_eq!(w[0].hi, w[1].lo, "bands must be contiguous for max {max}");
            }
            assert_eq!(graph.bands[4].hi, max + 1);

            // Every observed count lands in exactly one band.
            for cell in &graph.cells {
                let hits = graph.bands.iter().filter(|b| b.contains(cell.count)).count();
                assert_eq!(hits, 1, "count {} for max {max}", cell.count);
            }
        }
    }

    #[test]
    fn band_fills_come_from_observed_cells_or_palette() {
        let mut counts = year_of_zeros();
        counts[10] = 9;
        let mut doc = fixture(&counts);
        // Give the spike its own fill so the top band picks it up.
        doc = doc.replace(
            r##"data-count="9" data-date="2017-01-11" fill="#ebedf0""##,
            r##"data-count="9" data-date="2017-01-11" fill="#216e39""##,
        );
        let graph = parse(&doc).unwrap();

        // Band 0 observed on the zero cells, band 4 on the spike.
        assert_eq!(graph.bands[0].fill, "#ebedf0");
        assert_eq!(graph.bands[4].fill, "#216e39");
        // No cell falls in bands 1..=3; they take the default palette.
        assert_eq!(graph.bands[1].fill, "#9be9a8");
        assert_eq!(graph.bands[2].fill, "#40c463");
        assert_eq!(graph.bands[3].fill, "#30a14e");
    }

    #[test]
    fn all_zero_graph_gets_degenerate_upper_bands() {
        let doc = fixture(&year_of_zeros());
        let graph = parse(&doc).unwrap();
        assert_eq!(graph.bands[0].lo, 0);
        assert_eq!(graph.bands[0].hi, 1);
        for band in &graph.bands[1..] {
            assert_eq!(band.lo, band.hi, "empty interval for all-zero input");
        }
    }
}
