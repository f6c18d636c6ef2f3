//! Profile files: a `((name point rows 1)` header followed by one
//! parenthesized block of values per column.
//!
//! ```text
//! ((inlet point 7 1)
//! (x 0 1 2 3 4 5
//! 6
//! )
//! (velocity 1.5 1.4 1.2 0.9 0.5 0.2
//! 0.0
//! )
//! )
//! ```
//!
//! Reading is lenient. A column whose value count disagrees with the
//! header's row count is kept and reported; the table is padded with empty
//! cells. Writers must not rely on the wrap width when reading back.

use crate::{Decoded, TableReader, TableWriter};
use proftab::scan::numeric_tokens;
use proftab::{ConvertError, Properties, PropertiesExt, Table, Value, keys};

/// Kind token written in the header. Carried positionally, never interpreted.
pub const DEFAULT_KIND: &str = "point";

/// Values per line inside a column block unless configured otherwise.
pub const DEFAULT_VALUES_PER_LINE: usize = 6;

/// Trailing header token, emitted for compatibility with consumers.
const HEADER_TRAILER: &str = "1";

/// Name used when a block has none.
const UNNAMED: &str = "unnamed";

/// One column block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

/// A parsed or to-be-written profile file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDocument {
    /// Document name from the header. Not carried into the table.
    pub name: String,
    pub kind: String,
    /// Row count declared in the header.
    pub row_count: usize,
    pub columns: Vec<Column>,
}

/// Result of [`ProfileDocument::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProfile {
    pub document: ProfileDocument,
    /// Blocks that were dropped while parsing.
    pub warnings: Vec<String>,
}

enum State {
    SeekingHeader,
    SeekingColumn,
    InColumnBlock(Column),
}

impl ProfileDocument {
    /// Column-major view of `table` under the given document name.
    pub fn from_table(name: impl Into<String>, table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, name)| Column {
                name: name.clone(),
                values: table.column_values(i).map(str::to_string).collect(),
            })
            .collect();
        Self {
            name: name.into(),
            kind: DEFAULT_KIND.to_string(),
            row_count: table.row_count(),
            columns,
        }
    }

    /// Render the document, breaking block lines after `values_per_line`
    /// values. `values_per_line` must be at least 1.
    pub fn render(&self, values_per_line: usize) -> String {
        let mut out = format!(
            "(({} {} {} {HEADER_TRAILER})\n",
            block_token(&self.name),
            self.kind,
            self.row_count
        );
        for column in &self.columns {
            out.push('(');
            out.push_str(&block_token(&column.name));
            out.push(' ');
            let last = column.values.len();
            for (i, value) in column.values.iter().enumerate() {
                out.push_str(value);
                out.push(' ');
                if (i + 1) % values_per_line == 0 || i + 1 == last {
                    out.push('\n');
                }
            }
            out.push_str(")\n");
        }
        out.push(')');
        out
    }

    /// Parse profile text.
    ///
    /// Lines are trimmed and blank lines skipped. The first line must be the
    /// `((...)` header carrying at least name, kind and row count.
    pub fn parse(text: &str) -> Result<ParsedProfile, ConvertError> {
        let mut header = None;
        let mut columns = Vec::new();
        let mut warnings = Vec::new();
        let mut state = State::SeekingHeader;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            state = match state {
                State::SeekingHeader => {
                    header = Some(parse_header(line)?);
                    State::SeekingColumn
                }
                State::SeekingColumn => match open_column(line) {
                    Some(column) => State::InColumnBlock(column),
                    None => State::SeekingColumn,
                },
                State::InColumnBlock(mut column) => {
                    column
                        .values
                        .extend(numeric_tokens(line).map(str::to_string));
                    if line.ends_with(')') {
                        columns.push(column);
                        State::SeekingColumn
                    } else {
                        State::InColumnBlock(column)
                    }
                }
            };
        }

        if let State::InColumnBlock(column) = state {
            warnings.push(format!(
                "column '{}' has no closing ')' and was dropped",
                column.name
            ));
        }

        let (name, kind, row_count) =
            header.ok_or_else(|| ConvertError::format("profile is empty"))?;

        Ok(ParsedProfile {
            document: ProfileDocument {
                name,
                kind,
                row_count,
                columns,
            },
            warnings,
        })
    }

    /// Columns whose value count differs from the declared row count.
    pub fn mismatches(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.values.len() != self.row_count)
            .map(|c| {
                format!(
                    "column '{}' has {} values, expected {}",
                    c.name,
                    c.values.len(),
                    self.row_count
                )
            })
            .collect()
    }

    /// Zip the columns into rows, padding short columns with empty cells.
    pub fn into_table(self) -> Result<Table, ConvertError> {
        let columns = self
            .columns
            .into_iter()
            .map(|c| (c.name, c.values))
            .collect();
        Table::from_columns(columns, self.row_count)
    }
}

/// Name, kind and row count from the `((name kind rows ...)` line.
fn parse_header(line: &str) -> Result<(String, String, usize), ConvertError> {
    let interior = line
        .strip_prefix("((")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| {
            ConvertError::format(format!("invalid profile header line '{line}'"))
        })?;

    let fields: Vec<&str> = interior.split_whitespace().collect();
    let [name, kind, rows, ..] = fields.as_slice() else {
        return Err(ConvertError::format(format!(
            "profile header has {} fields, expected name, kind and row count",
            fields.len()
        )));
    };
    let row_count = rows
        .parse::<usize>()
        .map_err(|_| ConvertError::format(format!("invalid row count '{rows}' in profile header")))?;

    Ok((name.to_string(), kind.to_string(), row_count))
}

/// A line that opens a block: starts with `(` and is not closed on the
/// same line. Values after the column name seed the block.
fn open_column(line: &str) -> Option<Column> {
    if line.ends_with(')') {
        return None;
    }
    let rest = line.strip_prefix('(')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or(UNNAMED).to_string();
    let values = parts
        .flat_map(numeric_tokens)
        .map(str::to_string)
        .collect();
    Some(Column { name, values })
}

/// Names are whitespace-delimited inside the format.
fn block_token(name: &str) -> String {
    if name.trim().is_empty() {
        return UNNAMED.to_string();
    }
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

fn values_per_line(props: &Properties) -> Result<usize, ConvertError> {
    match props.get(keys::VALUES_PER_LINE) {
        None => Ok(DEFAULT_VALUES_PER_LINE),
        Some(Value::Int(n)) if *n >= 1 => Ok(*n as usize),
        Some(other) => Err(ConvertError::validation(format!(
            "{} must be a positive integer, got {other:?}",
            keys::VALUES_PER_LINE
        ))),
    }
}

/// Reads and writes profile files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileCodec;

impl TableReader for ProfileCodec {
    fn read(&self, text: &str, props: &Properties) -> Result<Decoded, ConvertError> {
        let ParsedProfile {
            document,
            mut warnings,
        } = ProfileDocument::parse(text)?;

        warnings.extend(document.mismatches());
        if !warnings.is_empty() && props.get_bool_or(keys::STRICT, false) {
            return Err(ConvertError::validation(warnings.join("; ")));
        }
        for warning in &warnings {
            log::warn!("{}: {warning}", document.name);
        }

        log::debug!(
            "parsed profile '{}': {} columns, {} rows declared",
            document.name,
            document.columns.len(),
            document.row_count
        );

        Ok(Decoded {
            table: document.into_table()?,
            warnings,
        })
    }
}

impl TableWriter for ProfileCodec {
    fn write(&self, table: &Table, props: &Properties) -> Result<Vec<u8>, ConvertError> {
        let per_line = values_per_line(props)?;
        let name = props.get_str(keys::NAME).unwrap_or(UNNAMED);
        Ok(ProfileDocument::from_table(name, table)
            .render(per_line)
            .into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(["x", "velocity"]).unwrap();
        for i in 0..7 {
            table
                .push_row([i.to_string(), format!("{}.5", 10 - i)])
                .unwrap();
        }
        table
    }

    fn render(table: &Table) -> String {
        let props = Properties::new().with(keys::NAME, "inlet");
        String::from_utf8(ProfileCodec.write(table, &props).unwrap()).unwrap()
    }

    #[test]
    fn test_render_layout() {
        let text = render(&sample_table());

        assert_eq!(
            text,
            "((inlet point 7 1)\n\
             (x 0 1 2 3 4 5 \n\
             6 \n\
             )\n\
             (velocity 10.5 9.5 8.5 7.5 6.5 5.5 \n\
             4.5 \n\
             )\n\
             )"
        );
    }

    #[test]
    fn test_render_exact_multiple_of_width() {
        let mut table = Table::new(["a"]).unwrap();
        for v in ["1", "2", "3", "4", "5", "6"] {
            table.push_row([v]).unwrap();
        }
        let text = render(&table);
        assert_eq!(text, "((inlet point 6 1)\n(a 1 2 3 4 5 6 \n)\n)");
    }

    #[test]
    fn test_custom_width() {
        let props = Properties::new()
            .with(keys::NAME, "inlet")
            .with(keys::VALUES_PER_LINE, 3i64);
        let out = ProfileCodec.write(&sample_table(), &props).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(x 0 1 2 \n3 4 5 \n6 \n)"));
    }

    #[test]
    fn test_zero_width_rejected() {
        let props = Properties::new().with(keys::VALUES_PER_LINE, 0i64);
        let err = ProfileCodec.write(&sample_table(), &props).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_names_with_spaces_stay_one_token() {
        let table = Table::new(["Total Pressure"]).unwrap();
        let props = Properties::new().with(keys::NAME, "run 1");
        let text = String::from_utf8(ProfileCodec.write(&table, &props).unwrap()).unwrap();
        assert!(text.starts_with("((run_1 point 0 1)\n(Total_Pressure )\n"));
    }

    #[test]
    fn test_round_trip() {
        let table = sample_table();
        let decoded = ProfileCodec.read(&render(&table), &Properties::new()).unwrap();

        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.table, table);
    }

    #[test]
    fn test_parse_header_fields() {
        let parsed = ProfileDocument::parse("((wall point 2 1)\n(t 1 2\n)\n)").unwrap();
        let doc = parsed.document;
        assert_eq!(doc.name, "wall");
        assert_eq!(doc.kind, "point");
        assert_eq!(doc.row_count, 2);
        assert_eq!(
            doc.columns,
            [Column {
                name: "t".into(),
                values: vec!["1".into(), "2".into()],
            }]
        );
    }

    #[test]
    fn test_values_across_lines() {
        let text = "\n  ((p point 4 1)  \n(temp 300.0\n  301.5 -2e-3\n\n+4)\n)\n";
        let table = ProfileCodec.read(text, &Properties::new()).unwrap().table;
        assert_eq!(table.columns(), ["temp"]);
        assert_eq!(
            table.column_values(0).collect::<Vec<_>>(),
            ["300.0", "301.5", "-2e-3", "+4"]
        );
    }

    #[test]
    fn test_short_column_warns_and_pads() {
        let text = "((p point 3 1)\n(a 1 2 3\n)\n(b 7\n)\n)";
        let decoded = ProfileCodec.read(text, &Properties::new()).unwrap();

        assert_eq!(decoded.warnings, ["column 'b' has 1 values, expected 3"]);
        assert_eq!(
            decoded.table.rows(),
            [vec!["1", "7"], vec!["2", ""], vec!["3", ""]]
        );
    }

    #[test]
    fn test_long_column_is_truncated() {
        let text = "((p point 1 1)\n(a 1 2\n)\n)";
        let decoded = ProfileCodec.read(text, &Properties::new()).unwrap();
        assert_eq!(decoded.warnings.len(), 1);
        assert_eq!(decoded.table.rows(), [vec!["1"]]);
    }

    #[test]
    fn test_strict_mode_rejects_mismatch() {
        let text = "((p point 3 1)\n(a 1\n)\n)";
        let props = Properties::new().with(keys::STRICT, true);
        let err = ProfileCodec.read(text, &props).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_single_line_block_is_skipped() {
        let text = "((p point 2 1)\n(skip 1 2)\n(keep 3 4\n)\n)";
        let doc = ProfileDocument::parse(text).unwrap().document;
        let names: Vec<_> = doc.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["keep"]);
    }

    #[test]
    fn test_unterminated_block_dropped_with_warning() {
        let text = "((p point 2 1)\n(a 1 2\n)\n(b 3 4";
        let parsed = ProfileDocument::parse(text).unwrap();
        assert_eq!(parsed.document.columns.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("'b'"));

        let props = Properties::new().with(keys::STRICT, true);
        assert!(ProfileCodec.read(text, &props).unwrap_err().is_validation());
    }

    #[test]
    fn test_whitespace_only_is_format_error() {
        let err = ProfileCodec.read("  \n\t\n   ", &Properties::new()).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_bad_header_is_format_error() {
        for text in ["(p point 3 1)", "((p point 3 1", "((p point)", "((p point three 1)"] {
            let err = ProfileDocument::parse(text).unwrap_err();
            assert!(err.is_format(), "{text}");
        }
    }

    #[test]
    fn test_negative_row_count_is_format_error() {
        let err = ProfileDocument::parse("((p point -1 1)\n)").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_huge_row_count_is_format_error() {
        let text = "((p point 18446744073709551615 1)\n)";
        let err = ProfileCodec.read(text, &Properties::new()).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_empty_columns_do_not_survive_round_trip() {
        let table = Table::new(["a", "b"]).unwrap();
        let props = Properties::new().with(keys::NAME, "bare");
        let text = String::from_utf8(ProfileCodec.write(&table, &props).unwrap()).unwrap();
        assert_eq!(text, "((bare point 0 1)\n(a )\n(b )\n)");

        // `(a )` opens and closes on one line, so it is not a column block.
        let decoded = ProfileCodec.read(&text, &Properties::new()).unwrap();
        assert_eq!(decoded.table.column_count(), 0);
        assert_eq!(decoded.table.row_count(), 0);
        assert!(decoded.warnings.is_empty());
    }
}
