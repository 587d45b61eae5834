//! Static catalog of TUV input parameters
//!
//! Every parameter the simulator reads from its `usrinp` file is listed here
//! with the kind that decides how its value is written. Entries follow the
//! field order of the input file: column 1 top to bottom, then column 2, then
//! column 3.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::deck::InputDeck;
use crate::error::CatalogError;
use crate::value::ParamValue;

/// How a parameter's value is written into the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Float,
    Bool,
    Str,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
            ParamKind::Str => "str",
        };
        f.write_str(name)
    }
}

use ParamKind::{Bool, Float, Int, Str};

/// All 48 parameters in input file order
pub const CATALOG: [(&str, ParamKind); 48] = [
    // Column 1
    ("inpfil", Str),
    ("lat", Float),
    ("iyear", Int),
    ("zstart", Float),
    ("wstart", Float),
    ("tstart", Float),
    ("lzenit", Bool),
    ("o3col", Float),
    ("taucld", Float),
    ("tauaer", Float),
    ("dirsun", Float),
    ("zout", Float),
    ("lirrad", Bool),
    ("lrates", Bool),
    ("ljvals", Bool),
    ("iwfix", Int),
    // Column 2
    ("outfil", Str),
    ("lon", Float),
    ("imonth", Int),
    ("zstop", Float),
    ("wstop", Float),
    ("tstop", Float),
    ("alsurf", Float),
    ("so2col", Float),
    ("zbase", Float),
    ("ssaaer", Float),
    ("difdn", Float),
    ("zaird", Float),
    ("laflux", Bool),
    ("isfix", Int),
    ("ijfix", Int),
    ("itfix", Int),
    // Column 3
    ("nstr", Int),
    ("tmzone", Float),
    ("iday", Int),
    ("nz", Int),
    ("nwint", Int),
    ("nt", Int),
    ("psurf", Float),
    ("no2col", Float),
    ("ztop", Float),
    ("alpha", Float),
    ("difup", Float),
    ("ztemp", Float),
    ("lmmech", Bool),
    ("nms", Int),
    ("nmj", Int),
    ("izfix", Int),
];

/// Look up the declared kind of a parameter
pub fn kind_of(name: &str) -> Result<ParamKind, CatalogError> {
    CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| CatalogError::UnknownParameter(name.to_string()))
}

pub fn contains(name: &str) -> bool {
    kind_of(name).is_ok()
}

/// Infer a kind from raw field text as it appears in an input file.
///
/// `T`/`F` are booleans, integer text is `Int`, any other number (including
/// Fortran exponent notation such as `-9.990E+02`) is `Float`, and everything
/// else is a string.
pub fn infer_kind(raw: &str) -> ParamKind {
    let raw = raw.trim();
    if raw == "T" || raw == "F" {
        Bool
    } else if raw.parse::<i64>().is_ok() {
        Int
    } else if raw.parse::<f64>().is_ok() {
        Float
    } else {
        Str
    }
}

/// The simulator's stock configuration, used as the base of every sweep
pub fn default_inputs() -> InputDeck {
    let defaults: [(&str, ParamValue); 48] = [
        ("inpfil", ParamValue::Str("defin1".into())),
        ("outfil", ParamValue::Str("usrout".into())),
        ("nstr", ParamValue::Int(-2)),
        ("lat", ParamValue::Float(0.0)),
        ("lon", ParamValue::Float(0.0)),
        ("tmzone", ParamValue::Float(0.0)),
        ("iyear", ParamValue::Int(2002)),
        ("imonth", ParamValue::Int(3)),
        ("iday", ParamValue::Int(21)),
        ("zstart", ParamValue::Float(0.0)),
        ("zstop", ParamValue::Float(80.0)),
        ("nz", ParamValue::Int(80)),
        ("wstart", ParamValue::Float(280.0)),
        ("wstop", ParamValue::Float(420.0)),
        ("nwint", ParamValue::Int(140)),
        ("tstart", ParamValue::Float(12.0)),
        ("tstop", ParamValue::Float(20.0)),
        ("nt", ParamValue::Int(5)),
        ("lzenit", ParamValue::Bool(false)),
        ("alsurf", ParamValue::Float(0.1)),
        ("psurf", ParamValue::Float(-999.0)),
        ("o3col", ParamValue::Float(300.0)),
        ("so2col", ParamValue::Float(0.0)),
        ("no2col", ParamValue::Float(0.0)),
        ("taucld", ParamValue::Float(0.0)),
        ("zbase", ParamValue::Float(4.0)),
        ("ztop", ParamValue::Float(5.0)),
        ("tauaer", ParamValue::Float(0.235)),
        ("ssaaer", ParamValue::Float(0.99)),
        ("alpha", ParamValue::Float(1.0)),
        ("dirsun", ParamValue::Float(1.0)),
        ("difdn", ParamValue::Float(1.0)),
        ("difup", ParamValue::Float(0.0)),
        ("zout", ParamValue::Float(0.0)),
        ("zaird", ParamValue::Float(-999.0)),
        ("ztemp", ParamValue::Float(-999.0)),
        ("lirrad", ParamValue::Bool(true)),
        ("laflux", ParamValue::Bool(false)),
        ("lmmech", ParamValue::Bool(false)),
        ("lrates", ParamValue::Bool(true)),
        ("isfix", ParamValue::Int(0)),
        ("ljvals", ParamValue::Bool(false)),
        ("ijfix", ParamValue::Int(0)),
        ("iwfix", ParamValue::Int(0)),
        ("itfix", ParamValue::Int(0)),
        ("izfix", ParamValue::Int(0)),
        ("nms", ParamValue::Int(7)),
        ("nmj", ParamValue::Int(0)),
    ];

    let mut deck = InputDeck::new();
    for (name, value) in defaults {
        deck.insert_catalog_entry(name, value);
    }
    deck
}
