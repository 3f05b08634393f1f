use std::fmt::{self, Display};
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

pub fn display_table<Row: TableDisplay>(rows: &[Row], mut output: impl Write) -> io::Result<()> {
    let column_count = Row::columns();
    let mut column_widths = (0..column_count)
        .map(|column_index| Row::column_name(column_index).width())
        .collect::<Vec<_>>();

    for row in rows {
        for (column_index, column_width) in column_widths.iter_mut().enumerate() {
            *column_width = std::cmp::max(row.item(column_index).width(), *column_width);
        }
    }

    output_row(&mut output, column_count, |column_index| Padded {
        text: Row::column_name(column_index),
        width: column_widths[column_index],
        align: Row::align(column_index),
    })?;
    output_row(&mut output, column_count, |column_index| {
        Divider(column_widths[column_index])
    })?;
    for row in rows {
        output_row(&mut output, column_count, |column_index| Padded {
            text: row.item(column_index),
            width: column_widths[column_index],
            align: Row::align(column_index),
        })?;
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

pub trait TableDisplay {
    fn columns() -> usize;
    fn column_name(column_index: usize) -> &'static str;
    fn item(&self, column_index: usize) -> &str;

    /// Applies to the header and every cell of the column.
    fn align(_column_index: usize) -> Align {
        Align::Left
    }
}

fn output_row<F, D>(
    mut output: impl Write,
    column_count: usize,
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    for column_index in 0..column_count {
        if column_index != 0 {
            write!(&mut output, "  ")?;
        }
        write!(&mut output, "{}", get_column_display(column_index))?;
    }
    writeln!(&mut output)?;
    Ok(())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "─")?;
        }
        Ok(())
    }
}

struct Padded<'a> {
    text: &'a str,
    width: usize,
    align: Align,
}

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display width, not char count.
        let padding = self.width.saturating_sub(self.text.width());
        if self.align == Align::Left {
            write!(f, "{}", self.text)?;
        }
        for _ in 0..padding {
            write!(f, " ")?;
        }
        if self.align == Align::Right {
            write!(f, "{}", self.text)?;
        }
        Ok(())
    }
}
