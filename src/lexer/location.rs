use crate::lexer::Span;
use std::fmt;

/// Where a token sits in the source. Rows and columns are 1-based, the
/// column range is half open. The end-of-input sentinel is all zeros.
#[derive(PartialEq, Eq, Clone, Default)]
pub struct Location {
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub offset: usize,
    pub len: usize,
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loc")
            .field("row", &self.row)
            .field("col", &(self.col_start..self.col_end))
            .finish()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "end of input")
        } else {
            write!(f, "row {}, column {}", self.row, self.col_start)
        }
    }
}

impl Location {
    pub fn new(row: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row,
            col_start,
            col_end,
            offset: 0,
            len: col_end.saturating_sub(col_start),
        }
    }

    /// `col_start` is supplied by the caller, which already knows where the
    /// current line began.
    pub fn from_span(span: &Span<'_>, col_start: usize) -> Self {
        Self {
            row: span.location_line() as usize,
            col_start,
            col_end: col_start + span.fragment().chars().count(),
            offset: span.location_offset(),
            len: span.fragment().len(),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.row == 0
    }
}
