//! Literal marker scanning over page markup.
//!
//! Everything here is plain substring search. A marker that is not found is
//! reported, never guessed around.

/// Index of `pat` in `s`, searching from `from`.
pub fn find_from(s: &str, pat: &str, from: usize) -> Option<usize> {
    s.get(from..)?.find(pat).map(|i| i + from)
}

/// Which half of a marker pair was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Start,
    End,
}

/// A field delimited by a start marker and the first end marker after it.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub start: &'static str,
    pub end: &'static str,
}

impl Field {
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Field { start, end }
    }

    /// Text between the markers, untrimmed.
    pub fn find<'a>(&self, s: &'a str) -> Result<&'a str, Missing> {
        let begin = s.find(self.start).ok_or(Missing::Start)? + self.start.len();
        let end = find_from(s, self.end, begin).ok_or(Missing::End)?;
        Ok(&s[begin..end])
    }
}

/// Iterates over `open ... close` spans of a region. Each item starts at the
/// open marker and stops right before the close marker; the next search resumes
/// at the close marker. Iteration ends at the first missing marker.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    region: &'a str,
    open: &'static str,
    close: &'static str,
    pos: usize,
}

impl<'a> Fragments<'a> {
    pub fn new(region: &'a str, open: &'static str, close: &'static str) -> Self {
        Fragments {
            region,
            open,
            close,
            pos: 0,
        }
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let begin = find_from(self.region, self.open, self.pos)?;
        let end = find_from(self.region, self.close, begin)?;
        self.pos = end;
        Some(&self.region[begin..end])
    }
}

/// Removes every soft hyphen (U+00AD).
pub fn strip_soft_hyphens(s: &str) -> String {
    s.replace('\u{AD}', "")
}

/// Trims the whitespace set used by the listing markup.
pub fn trim_markup(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}
