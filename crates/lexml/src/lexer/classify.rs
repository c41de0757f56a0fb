use strum_macros::{Display, EnumIter};

/// How a physical line relates to its neighbors.
///
/// Each variant is one row of the classification table; [`classify`] picks
/// the row from three predicates on the line and the continuation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum LineClass {
    /// Empty line. Skipped.
    Blank,
    /// Starts with `<` and ends with `>`: a logical line on its own.
    CompleteTag,
    /// Starts with `<` but does not end with `>`: the tag goes on.
    ContinuationStart,
    /// Neither starts nor ends a tag while a tag is open.
    ContinuationMiddle,
    /// Ends with `>` while a tag is open: the tag is complete.
    ContinuationEnd,
    /// Free text followed by more free text.
    DescriptionPart,
    /// Free text followed by a line starting with `<`: the block is complete.
    DescriptionEnd,
    /// Ends with `>` although no tag is open.
    Unclassified,
}

/// The three line predicates the classification table is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShape {
    /// Line starts with `<`.
    pub starts_with_tag_open: bool,
    /// Line ends with `>`.
    pub ends_with_tag_close: bool,
    /// The following line starts with `<`.
    pub next_starts_with_tag_open: bool,
}

impl LineShape {
    /// Compute the predicates for `line`, given the line after it.
    ///
    /// A missing next line never starts a tag.
    #[must_use]
    pub fn of(line: &str, next: Option<&str>) -> Self {
        Self {
            starts_with_tag_open: line.starts_with('<'),
            ends_with_tag_close: line.ends_with('>'),
            next_starts_with_tag_open: next.is_some_and(|n| n.starts_with('<')),
        }
    }
}

/// Classify `line`.
#[must_use]
pub fn classify(line: &str, next: Option<&str>, continuation_open: bool) -> LineClass {
    if line.is_empty() {
        return LineClass::Blank;
    }
    classify_shape(LineShape::of(line, next), continuation_open)
}

/// The classification table for a non-empty line.
#[must_use]
pub const fn classify_shape(shape: LineShape, continuation_open: bool) -> LineClass {
    let LineShape {
        starts_with_tag_open: start,
        ends_with_tag_close: end,
        next_starts_with_tag_open: next_start,
    } = shape;

    match (start, end, continuation_open, next_start) {
        (true, true, _, _) => LineClass::CompleteTag,
        (true, false, _, _) => LineClass::ContinuationStart,
        (false, false, true, _) => LineClass::ContinuationMiddle,
        (false, true, true, _) => LineClass::ContinuationEnd,
        (false, false, false, false) => LineClass::DescriptionPart,
        (false, false, false, true) => LineClass::DescriptionEnd,
        (false, true, false, _) => LineClass::Unclassified,
    }
}
