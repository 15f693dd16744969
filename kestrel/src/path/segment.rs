/// One segment of a dotted path, classified for positional resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A field name or array index, copied to resolved paths verbatim.
    Field(&'a str),
    /// `$[]`: every element of the array.
    AllPositional,
    /// `$[identifier]`: the elements accepted by the named array filter.
    Filtered(&'a str),
    /// `$`: the element matched by the query.
    Implicit,
    /// Any other segment starting with `$`.
    Unknown(&'a str),
}

impl<'a> Segment<'a> {
    pub fn parse(segment: &'a str) -> Segment<'a> {
        if !segment.starts_with('$') {
            return Segment::Field(segment);
        }
        if segment == "$" {
            return Segment::Implicit;
        }
        if segment == "$[]" {
            return Segment::AllPositional;
        }

        match segment
            .strip_prefix("$[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            Some(name) if is_identifier(name) => Segment::Filtered(name),
            _ => Segment::Unknown(segment),
        }
    }

    pub fn is_operator(&self) -> bool {
        !matches!(self, Segment::Field(_))
    }
}

/// Array filter identifiers start with a lowercase letter followed by
/// letters or digits.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}
