// Action declarations: `event#method`

/// A parsed action attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec<'a> {
    pub event: &'a str,
    pub method: &'a str,
}

impl<'a> ActionSpec<'a> {
    /// Parse `event<separator>method`
    ///
    /// Exactly one separator, both sides non-empty after trimming. One
    /// element carries at most one action per component.
    pub fn parse(value: &'a str, separator: char) -> Option<Self> {
        let (event, method) = value.split_once(separator)?;
        let (event, method) = (event.trim(), method.trim());
        if event.is_empty() || method.is_empty() || method.contains(separator) {
            return None;
        }
        Some(Self { event, method })
    }
}
