use std::io::{self, Write};

use serde::Serialize;

use pwgen::{Alphabet, Password};

use crate::table::{self, Align, TableDisplay};

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum Format {
    /// One password per line.
    Plain,
    /// A JSON array with each password's length and entropy.
    Json,
    /// An aligned table with each password's length and entropy.
    Table,
}

/// A generated password, with the figures reported alongside it.
#[derive(Serialize)]
pub(crate) struct Generated {
    password: Password,
    length: usize,
    entropy_bits: f64,
}

impl Generated {
    pub(crate) fn new(password: Password, alphabet: &Alphabet) -> Generated {
        let length = password.len();
        Generated {
            password,
            length,
            entropy_bits: alphabet.entropy_bits(length),
        }
    }
}

pub(crate) fn write_passwords(
    format: Format,
    generated: &[Generated],
    mut output: impl Write,
) -> io::Result<()> {
    match format {
        Format::Plain => {
            for g in generated {
                writeln!(output, "{}", g.password.as_str())?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut output, generated)?;
            writeln!(output)?;
        }
        Format::Table => {
            let rows = generated.iter().map(Row::from).collect::<Vec<_>>();
            table::display_table(&rows, &mut output)?;
        }
    }
    output.flush()
}

struct Row<'a> {
    password: &'a str,
    length: String,
    entropy_bits: String,
}

impl<'a> From<&'a Generated> for Row<'a> {
    fn from(g: &'a Generated) -> Row<'a> {
        Row {
            password: g.password.as_str(),
            length: g.length.to_string(),
            entropy_bits: format!("{:.1}", g.entropy_bits),
        }
    }
}

impl TableDisplay for Row<'_> {
    fn columns() -> usize {
        3
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "Password",
            1 => "Length",
            2 => "Entropy (bits)",
            _ => panic!(),
        }
    }

    fn item(&self, column_index: usize) -> &str {
        match column_index {
            0 => self.password,
            1 => &self.length,
            2 => &self.entropy_bits,
            _ => panic!(),
        }
    }

    fn align(column_index: usize) -> Align {
        match column_index {
            0 => Align::Left,
            _ => Align::Right,
        }
    }
}
