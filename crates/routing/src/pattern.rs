//! Tag patterns
//!
//! A pattern is matched segment by segment against a dot-delimited tag:
//!
//! | Segment | Matches |
//! |---------|---------|
//! | `name`  | exactly that segment |
//! | `*`     | exactly one segment |
//! | `**`    | zero or more segments, anywhere in the pattern |
//! | `{a,b}` | brace alternation, expanded at parse time |
//!
//! Whitespace-separated alternatives (`"a.* b.**"`) form an Or-pattern.
//! Wildcards must span a whole segment: `a*` is rejected rather than being
//! silently treated as a literal.

use std::fmt;
use std::str::FromStr;

use ripple_protocol::TAG_DELIMITER;

use crate::{Result, RoutingError};

/// One segment matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Exact segment text
    Literal(String),
    /// `*`
    Any,
    /// `**`
    AnyDepth,
}

impl Segment {
    fn parse(text: &str, pattern: &str) -> Result<Self> {
        match text {
            "" => Err(RoutingError::malformed(pattern, "empty segment")),
            "*" => Ok(Self::Any),
            "**" => Ok(Self::AnyDepth),
            s if s.contains('*') => Err(RoutingError::malformed(
                pattern,
                format!("wildcard must be a whole segment, got '{s}'"),
            )),
            s if s.contains(['{', '}']) => Err(RoutingError::malformed(pattern, "unbalanced braces")),
            s => Ok(Self::Literal(s.to_string())),
        }
    }

    #[inline]
    fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Literal(lit) => lit == segment,
            Self::Any | Self::AnyDepth => true,
        }
    }
}

/// Sequence of segment matchers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    segments: Vec<Segment>,
}

impl TagPattern {
    /// Parse a single pattern without alternation
    pub fn parse(text: &str) -> Result<Self> {
        let segments = text
            .split(TAG_DELIMITER)
            .map(|s| Segment::parse(s, text))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Segment matchers in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Test a tag against this pattern
    ///
    /// Greedy scan with a single backtrack point at the most recent `**`,
    /// linear in the common case.
    pub fn matches(&self, tag: &str) -> bool {
        let parts: Vec<&str> = tag.split(TAG_DELIMITER).collect();
        let pat = &self.segments;

        let (mut i, mut j) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;

        while j < parts.len() {
            match pat.get(i) {
                Some(Segment::AnyDepth) => {
                    backtrack = Some((i, j));
                    i += 1;
                }
                Some(seg) if seg.matches(parts[j]) => {
                    i += 1;
                    j += 1;
                }
                _ => match backtrack {
                    Some((star_i, star_j)) => {
                        i = star_i + 1;
                        j = star_j + 1;
                        backtrack = Some((star_i, star_j + 1));
                    }
                    None => return false,
                },
            }
        }

        pat[i..].iter().all(|s| *s == Segment::AnyDepth)
    }
}

/// A pattern as written in a rule: one alternative or several
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPattern {
    /// Single segment pattern
    Single(TagPattern),
    /// Matches if any member matches, tested in order
    Or(Vec<TagPattern>),
}

impl MatchPattern {
    /// Parse rule pattern text
    ///
    /// Whitespace separates alternatives; each alternative is brace-expanded.
    pub fn parse(text: &str) -> Result<Self> {
        let mut patterns = Vec::new();
        for alt in text.split_whitespace() {
            for expanded in expand_braces(alt)? {
                patterns.push(TagPattern::parse(&expanded)?);
            }
        }

        match patterns.len() {
            0 => Err(RoutingError::EmptyPattern),
            1 => Ok(Self::Single(patterns.remove(0))),
            _ => Ok(Self::Or(patterns)),
        }
    }

    /// Test a tag against this pattern
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Self::Single(p) => p.matches(tag),
            Self::Or(ps) => ps.iter().any(|p| p.matches(tag)),
        }
    }

    /// Number of segment patterns
    pub fn alternatives(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Or(ps) => ps.len(),
        }
    }
}

impl FromStr for MatchPattern {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, seg) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, "{TAG_DELIMITER}")?;
            }
            match seg {
                Segment::Literal(s) => f.write_str(s)?,
                Segment::Any => f.write_str("*")?,
                Segment::AnyDepth => f.write_str("**")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(p) => write!(f, "{p}"),
            Self::Or(ps) => {
                for (idx, p) in ps.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{p}")?;
                }
                Ok(())
            }
        }
    }
}

/// Upper bound on the plain patterns one brace expression may expand to
pub const MAX_BRACE_ALTERNATIVES: usize = 256;

/// Expand `{a,b}` alternation into plain pattern strings
fn expand_braces(text: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    expand_into(text, text, &mut out)?;
    Ok(out)
}

fn expand_into(pattern: &str, text: &str, out: &mut Vec<String>) -> Result<()> {
    let Some(open) = text.find('{') else {
        if text.contains('}') {
            return Err(RoutingError::malformed(pattern, "unbalanced braces"));
        }
        if out.len() >= MAX_BRACE_ALTERNATIVES {
            return Err(RoutingError::malformed(
                pattern,
                format!("brace expansion exceeds {MAX_BRACE_ALTERNATIVES} alternatives"),
            ));
        }
        out.push(text.to_string());
        return Ok(());
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (idx, ch) in text[open..].char_indices() {
        let idx = open + idx;
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(idx),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| RoutingError::malformed(pattern, "unbalanced braces"))?;

    let prefix = &text[..open];
    let suffix = &text[close + 1..];
    let mut bounds = Vec::with_capacity(splits.len() + 2);
    bounds.push(open);
    bounds.extend(splits);
    bounds.push(close);

    for pair in bounds.windows(2) {
        let alt = &text[pair[0] + 1..pair[1]];
        expand_into(pattern, &format!("{prefix}{alt}{suffix}"), out)?;
    }
    Ok(())
}
