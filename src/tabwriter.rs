//! Elastic tab-stop alignment
//!
//! Text is split into lines and each line into cells terminated by `\t`. A
//! column is a run of consecutive lines that all have a terminated cell at the
//! same index; every cell in the run is padded to the widest one plus
//! `padding`. Text after the last tab of a line is written as-is.

/// Column alignment settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabWriter {
    /// Minimum cell width, padding included
    pub min_width: usize,
    /// Width of a tab stop when padding with tabs
    pub tab_width: usize,
    /// Padding added to the widest cell of a column
    pub padding: usize,
    /// Character used for padding
    pub pad_char: char,
}

impl Default for TabWriter {
    fn default() -> Self {
        Self {
            min_width: 1,
            tab_width: 8,
            padding: 2,
            pad_char: ' ',
        }
    }
}

impl TabWriter {
    /// Aligns `text`, returning the formatted result
    pub fn align(&self, text: &str) -> String {
        let lines: Vec<Vec<&str>> = text
            .split_inclusive('\n')
            .map(|line| line.strip_suffix('\n').unwrap_or(line))
            .map(|line| line.split('\t').collect())
            .collect();

        // widths[line][column] for every terminated cell
        let mut widths: Vec<Vec<usize>> = lines
            .iter()
            .map(|cells| vec![0; cells.len().saturating_sub(1)])
            .collect();

        let columns = widths.iter().map(Vec::len).max().unwrap_or(0);
        for column in 0..columns {
            let mut start = 0;
            while start < lines.len() {
                if widths[start].len() <= column {
                    start += 1;
                    continue;
                }

                let mut end = start;
                let mut width = self.min_width;
                while end < lines.len() && widths[end].len() > column {
                    width = width.max(cell_width(lines[end][column]) + self.padding);
                    end += 1;
                }

                for row in &mut widths[start..end] {
                    row[column] = width;
                }
                start = end;
            }
        }

        let mut out = String::with_capacity(text.len());
        let terminated = text.ends_with('\n');
        for (i, (cells, widths)) in lines.iter().zip(&widths).enumerate() {
            for (cell, &width) in cells.iter().zip(widths) {
                out.push_str(cell);
                self.pad(&mut out, cell_width(cell), width);
            }
            if let Some(last) = cells.last() {
                out.push_str(last);
            }
            if i + 1 < lines.len() || terminated {
                out.push('\n');
            }
        }
        out
    }

    fn pad(&self, out: &mut String, text_width: usize, cell_width: usize) {
        if self.pad_char == '\t' {
            // The column must end on a tab stop or the next column drifts
            let tab_width = self.tab_width.max(1);
            let cell_width = cell_width.next_multiple_of(tab_width);
            let tabs = (cell_width - text_width).div_ceil(tab_width);
            out.extend(std::iter::repeat_n('\t', tabs));
        } else {
            out.extend(std::iter::repeat_n(self.pad_char, cell_width - text_width));
        }
    }
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligns_single_column() {
        let out = TabWriter::default().align("a:\t1\nlonger:\t2\n");
        assert_eq!(out, "a:       1\nlonger:  2\n");
    }

    #[test]
    fn test_columns_are_per_block() {
        // The second column only spans the middle line
        let out = TabWriter::default().align("a:\tx\nb:\tmod\tp\tv\nccc:\ty\n");
        assert_eq!(out, "a:    x\nb:    mod  p  v\nccc:  y\n");
    }

    #[test]
    fn test_block_breaks_on_line_without_cell() {
        let out = TabWriter::default().align("a:\t1\nplain\nlonger:\t2\n");
        assert_eq!(out, "a:  1\nplain\nlonger:  2\n");
    }

    #[test]
    fn test_empty_value_is_still_padded() {
        let out = TabWriter::default().align("os:\t\narch:\tamd64\n");
        assert_eq!(out, "os:    \narch:  amd64\n");
    }

    #[test]
    fn test_min_width() {
        let writer = TabWriter {
            min_width: 6,
            ..TabWriter::default()
        };
        assert_eq!(writer.align("a\tb\n"), "a     b\n");
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let out = TabWriter::default().align("é:\t1\nab:\t2\n");
        assert_eq!(out, "é:   1\nab:  2\n");
    }

    #[test]
    fn test_unterminated_last_line() {
        assert_eq!(TabWriter::default().align("k:\tv"), "k:  v");
        assert_eq!(TabWriter::default().align(""), "");
    }

    #[test]
    fn test_tab_padding() {
        let writer = TabWriter {
            pad_char: '\t',
            padding: 1,
            ..TabWriter::default()
        };
        assert_eq!(writer.align("ab\tc\n"), "ab\tc\n");
    }

    #[test]
    fn test_tab_padding_rounds_to_tab_stop() {
        let writer = TabWriter {
            pad_char: '\t',
            padding: 1,
            ..TabWriter::default()
        };
        // Widest cell is 9 wide, so the column ends at the stop at 16
        let out = writer.align("a\tx\nabcdefgh\ty\n");
        assert_eq!(out, "a\t\tx\nabcdefgh\ty\n");

        // Expand tabs to 8-column stops and find where each value starts
        let columns: Vec<usize> = out
            .lines()
            .map(|line| {
                let (cell, rest) = line.split_once('\t').unwrap();
                let mut column = cell.chars().count();
                for _ in 0..=rest.len() - rest.trim_start_matches('\t').len() {
                    column = (column / 8 + 1) * 8;
                }
                column
            })
            .collect();
        assert_eq!(columns, [16, 16]);
    }
}
