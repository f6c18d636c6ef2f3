//! Delimited tables (CSV).

use crate::{Decoded, TableReader, TableWriter};
use proftab::{ConvertError, Properties, Table};

/// Reads and writes comma-separated tables.
///
/// The first record is the header. Cells are kept verbatim: no trimming,
/// no type inference.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

fn csv_error(e: csv::Error) -> ConvertError {
    ConvertError::format(format!("malformed CSV: {e}"))
}

impl TableReader for CsvCodec {
    fn read(&self, text: &str, _props: &Properties) -> Result<Decoded, ConvertError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(text.as_bytes());
        let mut records = reader.records();

        let header = records
            .next()
            .ok_or_else(|| ConvertError::format("CSV input is empty: no header line"))?
            .map_err(csv_error)?;
        let mut table = Table::new(header.iter())?;

        for record in records {
            let record = record.map_err(csv_error)?;
            table.push_row(record.iter())?;
        }

        Ok(Decoded::new(table))
    }
}

impl TableWriter for CsvCodec {
    fn write(&self, table: &Table, _props: &Properties) -> Result<Vec<u8>, ConvertError> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(table.columns()).map_err(csv_error)?;
        for row in table.rows() {
            writer.write_record(row).map_err(csv_error)?;
        }
        writer.into_inner().map_err(|e| {
            ConvertError::format(format!("failed to flush CSV output: {}", e.error()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<Table, ConvertError> {
        CsvCodec.read(text, &Properties::new()).map(|d| d.table)
    }

    #[test]
    fn test_read_header_and_rows() {
        let table = read("Time,Temp\n0,100\n1,98\n").unwrap();

        assert_eq!(table.columns(), ["Time", "Temp"]);
        assert_eq!(table.rows(), [vec!["0", "100"], vec!["1", "98"]]);
    }

    #[test]
    fn test_values_stay_text() {
        let table = read("a,b\n1.50, 2e3\n").unwrap();
        assert_eq!(table.rows()[0], ["1.50", " 2e3"]);
    }

    #[test]
    fn test_header_only() {
        let table = read("x,y\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = read("").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_ragged_row_is_format_error() {
        let err = read("a,b\n1,2\n3\n").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_duplicate_header_is_validation_error() {
        let err = read("p,p\n1,2\n").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_write_keeps_column_order() {
        let mut table = Table::new(["z", "a"]).unwrap();
        table.push_row(["1", "2"]).unwrap();
        table.push_row(["3", "4"]).unwrap();

        let out = String::from_utf8(CsvCodec.write(&table, &Properties::new()).unwrap()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, ["z,a", "1,2", "3,4"]);
    }

    #[test]
    fn test_write_quotes_when_needed() {
        let mut table = Table::new(["name", "note"]).unwrap();
        table.push_row(["a,b", "plain"]).unwrap();

        let out = String::from_utf8(CsvCodec.write(&table, &Properties::new()).unwrap()).unwrap();
        assert!(out.contains("\"a,b\",plain"));

        let back = read(&out).unwrap();
        assert_eq!(back, table);
    }
}
