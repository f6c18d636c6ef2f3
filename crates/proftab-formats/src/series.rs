//! XY series files: a title, two axis labels and tab-separated samples.
//!
//! ```text
//! (title "Temp")
//! (labels "Time" "Temp")
//!
//! ((xy/key/label "location")
//! 0	100
//! 1	98
//! )
//! ```

use crate::{Decoded, TableReader, TableWriter};
use proftab::scan::numeric_tokens;
use proftab::{ConvertError, Properties, Table};
use regex::Regex;
use std::sync::OnceLock;

/// Opening line of the sample block.
const DATA_BLOCK_HEADER: &str = r#"((xy/key/label "location")"#;

fn labels_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\(labels\s+"([^"]+)"\s+"([^"]+)"\)"#).expect("labels pattern is valid")
    })
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\(title\s+"([^"]*)"\)"#).expect("title pattern is valid"))
}

/// A titled two-column series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesDocument {
    pub title: String,
    /// (x label, y label).
    pub labels: (String, String),
    pub points: Vec<(String, String)>,
}

enum State {
    SeekingLabels,
    InData,
}

impl SeriesDocument {
    /// Series view of a two-column table. The title is the y label.
    pub fn from_table(table: &Table) -> Result<Self, ConvertError> {
        let [x, y] = table.columns() else {
            return Err(ConvertError::validation(format!(
                "xy output needs exactly 2 columns, table has {}",
                table.column_count()
            )));
        };
        let points = table
            .rows()
            .iter()
            .map(|row| (row[0].clone(), row[1].clone()))
            .collect();
        Ok(Self {
            title: y.clone(),
            labels: (x.clone(), y.clone()),
            points,
        })
    }

    pub fn render(&self) -> String {
        let (x_label, y_label) = &self.labels;
        let mut out = format!(
            "(title \"{}\")\n(labels \"{x_label}\" \"{y_label}\")\n\n{DATA_BLOCK_HEADER}\n",
            self.title
        );
        for (x, y) in &self.points {
            out.push_str(x);
            out.push('\t');
            out.push_str(y);
            out.push('\n');
        }
        out.push_str(")\n");
        out
    }

    /// Parse series text.
    ///
    /// Samples are collected after the `labels` line until a line that is
    /// exactly `)`; nothing after it is read. Lines opening with a parenthesis are skipped, as are
    /// lines with fewer than two numbers; numbers past the second are
    /// ignored.
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let mut title = String::new();
        let mut labels = None;
        let mut points = Vec::new();
        let mut state = State::SeekingLabels;

        for line in text.lines().map(str::trim) {
            if line.starts_with("(labels") {
                if let Some(caps) = labels_regex().captures(line) {
                    labels = Some((caps[1].to_string(), caps[2].to_string()));
                    state = State::InData;
                }
                continue;
            }

            match state {
                State::SeekingLabels => {
                    if let Some(caps) = title_regex().captures(line) {
                        title = caps[1].to_string();
                    }
                }
                State::InData => {
                    if line == ")" {
                        break;
                    } else if !line.is_empty() && !line.starts_with(['(', ')']) {
                        let mut tokens = numeric_tokens(line);
                        if let (Some(x), Some(y)) = (tokens.next(), tokens.next()) {
                            points.push((x.to_string(), y.to_string()));
                        }
                    }
                }
            }
        }

        let labels = labels.ok_or_else(|| ConvertError::format("no labels line found"))?;
        Ok(Self {
            title,
            labels,
            points,
        })
    }

    pub fn into_table(self) -> Result<Table, ConvertError> {
        let (x_label, y_label) = self.labels;
        let mut table = Table::new([x_label, y_label])?;
        for (x, y) in self.points {
            table.push_row([x, y])?;
        }
        Ok(table)
    }
}

/// Reads and writes xy series files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesCodec;

impl TableReader for SeriesCodec {
    fn read(&self, text: &str, _props: &Properties) -> Result<Decoded, ConvertError> {
        let document = SeriesDocument::parse(text)?;
        log::debug!(
            "parsed series '{}': {} points",
            document.title,
            document.points.len()
        );
        Ok(Decoded::new(document.into_table()?))
    }
}

impl TableWriter for SeriesCodec {
    fn write(&self, table: &Table, _props: &Properties) -> Result<Vec<u8>, ConvertError> {
        Ok(SeriesDocument::from_table(table)?.render().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_temp() -> Table {
        let mut table = Table::new(["Time", "Temp"]).unwrap();
        table.push_row(["0", "100"]).unwrap();
        table.push_row(["1", "98"]).unwrap();
        table
    }

    fn write(table: &Table) -> Result<String, ConvertError> {
        SeriesCodec
            .write(table, &Properties::new())
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    fn read(text: &str) -> Result<Table, ConvertError> {
        SeriesCodec.read(text, &Properties::new()).map(|d| d.table)
    }

    #[test]
    fn test_render_layout() {
        let text = write(&time_temp()).unwrap();
        assert_eq!(
            text,
            "(title \"Temp\")\n\
             (labels \"Time\" \"Temp\")\n\
             \n\
             ((xy/key/label \"location\")\n\
             0\t100\n\
             1\t98\n\
             )\n"
        );
    }

    #[test]
    fn test_three_columns_is_validation_error() {
        let mut table = Table::new(["a", "b", "c"]).unwrap();
        table.push_row(["1", "2", "3"]).unwrap();
        let err = write(&table).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_one_column_is_validation_error() {
        let err = write(&Table::new(["a"]).unwrap()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_round_trip() {
        let table = time_temp();
        assert_eq!(read(&write(&table).unwrap()).unwrap(), table);
    }

    #[test]
    fn test_values_written_verbatim() {
        let mut table = Table::new(["x", "y"]).unwrap();
        table.push_row(["1.000", "2.50E+01"]).unwrap();
        assert!(write(&table).unwrap().contains("1.000\t2.50E+01\n"));
    }

    #[test]
    fn test_parse_title_and_labels() {
        let doc = SeriesDocument::parse(&write(&time_temp()).unwrap()).unwrap();
        assert_eq!(doc.title, "Temp");
        assert_eq!(doc.labels, ("Time".to_string(), "Temp".to_string()));
        assert_eq!(doc.points.len(), 2);
    }

    #[test]
    fn test_short_rows_dropped_and_extras_ignored() {
        let text = "(labels \"x\" \"y\")\n\
                    ((xy/key/label \"location\")\n\
                    1 2 3\n\
                    only 4\n\
                    5, 6\n\
                    )\n";
        let table = read(text).unwrap();
        assert_eq!(table.rows(), [vec!["1", "2"], vec!["5", "6"]]);
    }

    #[test]
    fn test_closing_paren_ends_data() {
        let text = "(labels \"x\" \"y\")\n1 2\n)\n3 4\n";
        let table = read(text).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_labels_after_closing_paren_ignored() {
        let text = "(labels \"x\" \"y\")\n1 2\n)\n(labels \"a\" \"b\")\n3 4\n)";
        let doc = SeriesDocument::parse(text).unwrap();
        assert_eq!(doc.labels, ("x".to_string(), "y".to_string()));

        let table = doc.into_table().unwrap();
        assert_eq!(table.columns(), ["x", "y"]);
        assert_eq!(table.rows(), [vec!["1", "2"]]);
    }

    #[test]
    fn test_lines_before_labels_ignored() {
        let text = "0 0\n(labels \"x\" \"y\")\n1 2\n)";
        let table = read(text).unwrap();
        assert_eq!(table.rows(), [vec!["1", "2"]]);
    }

    #[test]
    fn test_parenthesized_lines_skipped() {
        let text = "(labels \"x\" \"y\")\n(1 2)\n  3\t4  \n)";
        let table = read(text).unwrap();
        assert_eq!(table.rows(), [vec!["3", "4"]]);
    }

    #[test]
    fn test_missing_labels_is_format_error() {
        let err = read("(title \"T\")\n1 2\n").unwrap_err();
        assert!(err.is_format());

        // An unmatched labels line does not count.
        let err = read("(labels \"x\")\n1 2\n)").unwrap_err();
        assert!(err.is_format());
    }
}
