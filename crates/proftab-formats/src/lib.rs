//! Format converters for proftab.
//!
//! Each format has a codec that reads text into a [`Table`] and writes a
//! [`Table`] back out:
//!
//! - [`CsvCodec`] - delimited tables (`.csv`)
//! - [`ProfileCodec`] - parenthesized column blocks (`.prof`)
//! - [`SeriesCodec`] - titled xy samples (`.xy`)
//!
//! A [`TableConverter`] pairs a reader with a writer. [`register_all`]
//! registers the four supported conversions and [`convert`] runs one of
//! them on a file.

mod profile;
mod series;
mod tabular;

pub use profile::{Column, ParsedProfile, ProfileCodec, ProfileDocument};
pub use series::{SeriesCodec, SeriesDocument};
pub use tabular::CsvCodec;

use proftab::{
    Conversion, ConvertError, ConvertOptions, ConvertOutput, Converter, ConverterDecl,
    Properties, PropertiesExt, Registry, Table, dispatch, keys,
};
use std::path::{Path, PathBuf};

/// A decoded table plus any non-fatal problems found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub table: Table,
    pub warnings: Vec<String>,
}

impl Decoded {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            warnings: Vec::new(),
        }
    }
}

/// Reads a whole document into a table.
pub trait TableReader: Send + Sync {
    fn read(&self, text: &str, props: &Properties) -> Result<Decoded, ConvertError>;
}

/// Writes a table as a whole document.
pub trait TableWriter: Send + Sync {
    fn write(&self, table: &Table, props: &Properties) -> Result<Vec<u8>, ConvertError>;
}

/// A converter that reads one format into a table and writes another.
pub struct TableConverter<R, W> {
    decl: ConverterDecl,
    reader: R,
    writer: W,
}

impl<R: TableReader, W: TableWriter> TableConverter<R, W> {
    pub fn new(decl: ConverterDecl, reader: R, writer: W) -> Self {
        Self {
            decl,
            reader,
            writer,
        }
    }
}

impl<R: TableReader, W: TableWriter> Converter for TableConverter<R, W> {
    fn decl(&self) -> &ConverterDecl {
        &self.decl
    }

    fn convert(&self, input: &[u8], props: &Properties) -> Result<ConvertOutput, ConvertError> {
        let text = std::str::from_utf8(input)
            .map_err(|e| ConvertError::format(format!("input is not valid UTF-8: {e}")))?;

        let Decoded { table, warnings } = self.reader.read(text, props)?;
        let output = self.writer.write(&table, props)?;

        let out_props = props
            .clone()
            .with(keys::FORMAT, self.decl.to.as_str())
            .with(keys::ROWS, table.row_count())
            .with(keys::COLUMNS, table.column_count());

        Ok(ConvertOutput::new(output, out_props).with_warnings(warnings))
    }
}

/// Register the four table conversions with the registry.
pub fn register_all(registry: &mut Registry) {
    registry.register(TableConverter::new(
        ConverterDecl::simple("table.csv-to-prof", "csv", "prof")
            .description("CSV table to profile column blocks"),
        CsvCodec,
        ProfileCodec,
    ));
    registry.register(TableConverter::new(
        ConverterDecl::simple("table.prof-to-csv", "prof", "csv")
            .description("Profile column blocks to CSV table"),
        ProfileCodec,
        CsvCodec,
    ));
    registry.register(TableConverter::new(
        ConverterDecl::simple("table.csv-to-xy", "csv", "xy")
            .description("Two-column CSV table to xy series"),
        CsvCodec,
        SeriesCodec,
    ));
    registry.register(TableConverter::new(
        ConverterDecl::simple("table.xy-to-csv", "xy", "csv")
            .description("XY series to two-column CSV table"),
        SeriesCodec,
        CsvCodec,
    ));
}

/// A registry holding every conversion this crate provides.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    register_all(&mut registry);
    registry
}

/// Convert `input` with default options and return the output path.
///
/// `kind` is one of `CSV2PROF`, `PROF2CSV`, `CSV2XY`, `XY2CSV`. The output
/// is written next to the input with the target extension.
pub fn convert(input: impl AsRef<Path>, kind: &str) -> Result<PathBuf, ConvertError> {
    convert_with(input, kind, &ConvertOptions::default()).map(|c| c.output)
}

/// Convert `input` with explicit options and return the full report.
pub fn convert_with(
    input: impl AsRef<Path>,
    kind: &str,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    dispatch(&default_registry(), input.as_ref(), kind, options)
}
