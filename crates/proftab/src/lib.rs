//! proftab: conversion between CSV tables, profile blocks and xy series.
//!
//! Every conversion reads a whole document into a [`Table`] and writes it
//! back out in the target format. Converters are looked up in a
//! [`Registry`] by source and target format; [`dispatch`] drives one
//! conversion from an input file to an output file.

mod converter;
mod dispatch;
mod properties;
mod registry;
pub mod scan;
mod table;

pub use converter::{ConvertError, ConvertOutput, Converter, ConverterDecl};
pub use dispatch::{ConversionKind, Conversion, ConvertOptions, dispatch};
pub use properties::{Properties, PropertiesExt, Value, keys};
pub use registry::Registry;
pub use table::Table;
