//! Conversion dispatch: kind → converter → output file.

use crate::converter::ConvertError;
use crate::properties::{Properties, PropertiesExt, Value, keys};
use crate::registry::Registry;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The four supported conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    Csv2Prof,
    Prof2Csv,
    Csv2Xy,
    Xy2Csv,
}

impl ConversionKind {
    pub const ALL: [ConversionKind; 4] = [
        ConversionKind::Csv2Prof,
        ConversionKind::Prof2Csv,
        ConversionKind::Csv2Xy,
        ConversionKind::Xy2Csv,
    ];

    /// Name as accepted by [`FromStr`], e.g. `CSV2PROF`.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionKind::Csv2Prof => "CSV2PROF",
            ConversionKind::Prof2Csv => "PROF2CSV",
            ConversionKind::Csv2Xy => "CSV2XY",
            ConversionKind::Xy2Csv => "XY2CSV",
        }
    }

    /// Format read by this conversion. Doubles as the source extension.
    pub fn source_format(self) -> &'static str {
        match self {
            ConversionKind::Csv2Prof | ConversionKind::Csv2Xy => "csv",
            ConversionKind::Prof2Csv => "prof",
            ConversionKind::Xy2Csv => "xy",
        }
    }

    /// Format written by this conversion. Doubles as the output extension.
    pub fn target_format(self) -> &'static str {
        match self {
            ConversionKind::Csv2Prof => "prof",
            ConversionKind::Csv2Xy => "xy",
            ConversionKind::Prof2Csv | ConversionKind::Xy2Csv => "csv",
        }
    }

    /// Same directory and base name as `input`, target extension.
    pub fn output_path(self, input: &Path) -> PathBuf {
        input.with_extension(self.target_format())
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConversionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = ConversionKind::ALL.iter().map(|k| k.as_str()).collect();
                ConvertError::validation(format!(
                    "unknown conversion kind '{s}' (expected one of {})",
                    known.join(", ")
                ))
            })
    }
}

/// Options that shape the written output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Values per line inside a profile column block.
    pub values_per_line: usize,
    /// Fail instead of warning when a profile column length disagrees with
    /// the declared row count.
    pub strict: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            values_per_line: 6,
            strict: false,
        }
    }
}

impl ConvertOptions {
    pub fn to_properties(&self) -> Properties {
        Properties::new()
            .with(keys::VALUES_PER_LINE, self.values_per_line)
            .with(keys::STRICT, self.strict)
    }
}

/// Report of a finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub kind: ConversionKind,
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Non-fatal problems found in the input.
    pub warnings: Vec<String>,
}

/// Run one conversion of `input` using the converters in `registry`.
///
/// `kind` is validated before any file is touched. The output is written
/// next to the input and its path is returned in the report.
pub fn dispatch(
    registry: &Registry,
    input: &Path,
    kind: &str,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let kind: ConversionKind = kind.parse()?;
    let converter = registry
        .find(kind.source_format(), kind.target_format())
        .ok_or_else(|| ConvertError::validation(format!("no converter registered for {kind}")))?;
    let output = kind.output_path(input);

    log::debug!(
        "{kind}: {} -> {} via {}",
        input.display(),
        output.display(),
        converter.decl().id
    );

    let data = std::fs::read(input).map_err(|e| ConvertError::io(input, e))?;

    let name = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut props = options.to_properties();
    props.insert(keys::FORMAT.into(), kind.source_format().into());
    props.insert(keys::NAME.into(), name.into());

    let result = converter.convert(&data, &props)?;

    std::fs::write(&output, &result.data).map_err(|e| ConvertError::io(&output, e))?;

    let count = |key: &str| {
        result
            .props
            .get(key)
            .and_then(Value::as_i64)
            .map_or(0, |n| n as usize)
    };
    let conversion = Conversion {
        kind,
        input: input.to_path_buf(),
        output,
        rows: count(keys::ROWS),
        columns: count(keys::COLUMNS),
        warnings: result.warnings,
    };

    log::info!(
        "wrote {}: {} rows, {} columns ({} bytes)",
        conversion.output.display(),
        conversion.rows,
        conversion.columns,
        result.data.len()
    );

    Ok(conversion)
}
