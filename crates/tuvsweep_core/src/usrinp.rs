//! Reader and writer for the simulator's fixed-column `usrinp` file
//!
//! Layout:
//! ```text
//! <header line 1>
//! <header line 2>
//! inpfil =      usrinp   outfil =      usrout   nstr =            -2
//! ... 16 rows of three `name = value` cells ...
//! <trailing lines, copied verbatim>
//! ```
//!
//! Each cell is 20 characters wide with the value right-justified, and cells
//! are separated by three spaces.

use crate::catalog::{self, ParamKind};
use crate::deck::InputDeck;
use crate::error::{InputFileError, ParseError};
use crate::value::format_value;

pub const HEADER_LINES: usize = 2;
pub const FIELD_ROWS: usize = 16;
pub const FIELDS_PER_ROW: usize = 3;

const CELL_WIDTH: usize = 20;
const CELL_SEPARATOR: &str = "   ";

#[derive(Debug, Clone, PartialEq)]
struct Field {
    name: String,
    value: String,
}

impl Field {
    fn render(&self) -> String {
        let prefix = format!("{} = ", self.name);
        let width = CELL_WIDTH.saturating_sub(prefix.len());
        format!("{prefix}{:>width$}", self.value)
    }
}

/// A parsed input file. Field values are kept as text so untouched fields
/// are written back exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFile {
    header: Vec<String>,
    rows: Vec<[Field; FIELDS_PER_ROW]>,
    trailer: Vec<String>,
}

fn parse_row(line_number: usize, line: &str) -> Result<[Field; FIELDS_PER_ROW], ParseError> {
    let malformed = || ParseError::MalformedRow {
        line: line_number,
        content: line.to_string(),
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIELDS_PER_ROW * 3 {
        return Err(malformed());
    }

    let cell = |i: usize| -> Result<Field, ParseError> {
        let chunk = &tokens[i * 3..i * 3 + 3];
        if chunk[1] != "=" {
            return Err(malformed());
        }
        Ok(Field {
            name: chunk[0].to_string(),
            value: chunk[2].to_string(),
        })
    };

    Ok([cell(0)?, cell(1)?, cell(2)?])
}

impl InputFile {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() < HEADER_LINES + FIELD_ROWS {
            return Err(ParseError::TooShort { lines: lines.len() });
        }

        let header = lines[..HEADER_LINES].iter().map(|l| l.to_string()).collect();
        let rows = lines[HEADER_LINES..HEADER_LINES + FIELD_ROWS]
            .iter()
            .enumerate()
            .map(|(i, line)| parse_row(HEADER_LINES + i + 1, line))
            .collect::<Result<Vec<_>, _>>()?;
        let trailer = lines[HEADER_LINES + FIELD_ROWS..]
            .iter()
            .map(|l| l.to_string())
            .collect();

        Ok(Self {
            header,
            rows,
            trailer,
        })
    }

    /// Fields in column-major order: column 1 top to bottom, then 2, then 3
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        (0..FIELDS_PER_ROW).flat_map(move |col| {
            self.rows
                .iter()
                .map(move |row| (row[col].name.as_str(), row[col].value.as_str()))
        })
    }

    /// Raw text of a field's value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.rows.iter_mut().flatten().find(|f| f.name == name)
    }

    /// Overwrite the fields named in `deck` with their formatted values
    pub fn apply(&mut self, deck: &InputDeck) -> Result<(), InputFileError> {
        for (name, value) in deck.iter() {
            let kind = catalog::kind_of(name)?;
            let text = format_value(kind, value).map_err(|source| InputFileError::Value {
                name: name.to_string(),
                source,
            })?;
            let field = self
                .field_mut(name)
                .ok_or_else(|| InputFileError::MissingField(name.to_string()))?;
            field.value = text.trim().to_string();
        }
        Ok(())
    }

    /// Kinds inferred from the field text, in field order
    pub fn inferred_kinds(&self) -> Vec<(&str, ParamKind)> {
        self.fields()
            .map(|(name, value)| (name, catalog::infer_kind(value)))
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(Field::render).collect();
            out.push_str(&cells.join(CELL_SEPARATOR));
            out.push('\n');
        }
        for line in &self.trailer {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
