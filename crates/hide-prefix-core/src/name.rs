/// Separator between hierarchy levels in a page name
pub const SEPARATOR: char = '/';

/// A page name split at its last separator.
///
/// `"Category/Sub/Page"` has prefix `"Category/Sub/"` and last segment `"Page"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixedName<'a> {
    full: &'a str,
    split: usize,
}

impl<'a> PrefixedName<'a> {
    /// Returns `None` for empty names and names without a separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use hide_prefix_core::PrefixedName;
    ///
    /// let name = PrefixedName::parse("Category/Sub/Page").unwrap();
    /// assert_eq!(name.prefix(), "Category/Sub/");
    /// assert_eq!(name.last_segment(), "Page");
    /// assert!(PrefixedName::parse("Page").is_none());
    /// ```
    pub fn parse(full: &'a str) -> Option<Self> {
        let idx = full.rfind(SEPARATOR)?;
        Some(Self {
            full,
            split: idx + SEPARATOR.len_utf8(),
        })
    }

    pub fn full(&self) -> &'a str {
        self.full
    }

    pub fn prefix(&self) -> &'a str {
        &self.full[..self.split]
    }

    pub fn last_segment(&self) -> &'a str {
        &self.full[self.split..]
    }

    /// Prefix length in characters, which is how much of a label gets cut.
    pub fn prefix_chars(&self) -> usize {
        self.prefix().chars().count()
    }

    /// Byte length of the leading part of `text` that matches the prefix,
    /// compared case-insensitively char by char.
    pub fn match_prefix(&self, text: &str) -> Option<usize> {
        let mut consumed = 0;
        let mut text_chars = text.chars();
        for p in self.prefix().chars() {
            let t = text_chars.next()?;
            if !p.to_lowercase().eq(t.to_lowercase()) {
                return None;
            }
            consumed += t.len_utf8();
        }
        Some(consumed)
    }
}

/// Shorten a rendered label to the last segment of `full_name`.
///
/// Returns `None` when the label does not start with the name's prefix,
/// i.e. it is an alias or already shortened. `tag_marker` is stripped
/// before matching and put back on the result.
pub fn shorten_label(label: &str, full_name: &str, tag_marker: Option<char>) -> Option<String> {
    let name = PrefixedName::parse(full_name)?;

    let (marker, body) = match tag_marker {
        Some(m) if label.starts_with(m) => (Some(m), &label[m.len_utf8()..]),
        _ => (None, label),
    };

    let cut = name.match_prefix(body)?;
    let rest = &body[cut..];

    Some(match marker {
        Some(m) => format!("{}{}", m, rest),
        None => rest.to_string(),
    })
}
