use chrono::NaiveDateTime;

/// A single expanded instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Occurrence {
    /// The occurrence timestamp.
    pub at: NaiveDateTime,
    /// 1-based position in the rule's full sequence counted from the anchor.
    ///
    /// `None` for occurrences added by an RDATE.
    pub ordinal: Option<u32>,
}
