//! Scripted-operation input format.
//!
//! One run consumes six whitespace-delimited fields: an integer
//! operation selector followed by key, value, property-name, range-begin
//! and range-end. Every field is consumed regardless of which operation
//! the selector picks; fields an operation does not use are carried
//! along untouched.

/// Operation selectors understood by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzOp {
    Put,
    Get,
    Delete,
    GetProperty,
    Iterate,
    GetReleaseSnapshot,
    ReopenDb,
    CompactRange,
}

impl FuzzOp {
    /// Maps a raw selector value to an operation. Selectors outside
    /// `0..=7` select no operation; the run becomes a deliberate no-op.
    pub fn from_selector(selector: i64) -> Option<Self> {
        match selector {
            0 => Some(Self::Put),
            1 => Some(Self::Get),
            2 => Some(Self::Delete),
            3 => Some(Self::GetProperty),
            4 => Some(Self::Iterate),
            5 => Some(Self::GetReleaseSnapshot),
            6 => Some(Self::ReopenDb),
            7 => Some(Self::CompactRange),
            _ => None,
        }
    }
}

/// One parsed scripted operation.
#[derive(Debug, Clone)]
pub struct Script {
    pub op: Option<FuzzOp>,
    pub key: String,
    pub value: String,
    pub property: String,
    pub range_begin: String,
    pub range_end: String,
}

impl Script {
    /// Parses the six-field input.
    ///
    /// Missing trailing fields become empty strings rather than
    /// indeterminate content. A selector that is not a number, or is out
    /// of range, yields no operation. Surplus input is ignored.
    pub fn parse(input: &str) -> Self {
        let mut fields = input.split_whitespace();

        let op = fields
            .next()
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(FuzzOp::from_selector);

        let mut next_field = || fields.next().unwrap_or_default().to_string();
        let key = next_field();
        let value = next_field();
        let property = next_field();
        let range_begin = next_field();
        let range_end = next_field();

        Self {
            op,
            key,
            value,
            property,
            range_begin,
            range_end,
        }
    }
}
