use crate::foundation::error::{CrossfadeError, CrossfadeResult};

/// Placement of the scaled image along one axis, as in CSS `background-position` keywords.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// `left` / `top`: overflow hangs off the far edge.
    Start,
    /// `center`: overflow is split evenly.
    #[default]
    Center,
    /// `right` / `bottom`: overflow hangs off the near edge.
    End,
}

impl Anchor {
    /// Offset for an axis that overflows the container by `overflow`.
    ///
    /// Non-positive overflow always yields `0.0`.
    pub fn offset_for_overflow(self, overflow: f64) -> f64 {
        if overflow <= 0.0 {
            return 0.0;
        }
        match self {
            Anchor::Start => 0.0,
            Anchor::Center => -overflow / 2.0,
            Anchor::End => -overflow,
        }
    }
}

/// Horizontal + vertical anchors, default `center center`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PositionalAnchor {
    /// Horizontal anchor.
    pub x: Anchor,
    /// Vertical anchor.
    pub y: Anchor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Horizontal(Anchor),
    Vertical(Anchor),
    Either(Anchor),
    Unknown,
}

fn classify(token: &str) -> Token {
    match token.to_ascii_lowercase().as_str() {
        "left" => Token::Horizontal(Anchor::Start),
        "right" => Token::Horizontal(Anchor::End),
        "top" => Token::Vertical(Anchor::Start),
        "bottom" => Token::Vertical(Anchor::End),
        "start" => Token::Either(Anchor::Start),
        "end" => Token::Either(Anchor::End),
        "center" => Token::Either(Anchor::Center),
        _ => Token::Unknown,
    }
}

impl PositionalAnchor {
    /// Build from explicit axes.
    pub fn new(x: Anchor, y: Anchor) -> Self {
        Self { x, y }
    }

    /// Parse a `background-position` style value such as `"center center"` or `"top left"`.
    ///
    /// The first token is horizontal and the second vertical, except that a vertical keyword
    /// followed by a horizontal one (`"top left"`) is read in CSS order. A single keyword sets
    /// its own axis and centers the other. Unrecognized keywords fall back to `center`.
    pub fn parse(value: &str) -> CrossfadeResult<Self> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        let parsed = match tokens.as_slice() {
            [] => Self::default(),
            [one] => match classify(one) {
                Token::Horizontal(a) => Self::new(a, Anchor::Center),
                Token::Vertical(a) => Self::new(Anchor::Center, a),
                Token::Either(a) => Self::new(a, a),
                Token::Unknown => {
                    warn_unknown(one);
                    Self::default()
                }
            },
            [first, second] => {
                let (a, b) = (classify(first), classify(second));
                let (h, v) = match (a, b) {
                    (Token::Vertical(_), Token::Horizontal(_) | Token::Either(_)) => (b, a),
                    (Token::Either(_), Token::Horizontal(_)) => (b, a),
                    _ => (a, b),
                };
                Self::new(axis_anchor(h, first), axis_anchor(v, second))
            }
            _ => {
                return Err(CrossfadeError::invalid_configuration(format!(
                    "backgroundPosition takes at most two keywords, got '{value}'"
                )));
            }
        };
        Ok(parsed)
    }
}

fn axis_anchor(token: Token, raw: &str) -> Anchor {
    match token {
        Token::Horizontal(a) | Token::Vertical(a) | Token::Either(a) => a,
        Token::Unknown => {
            warn_unknown(raw);
            Anchor::Center
        }
    }
}

fn warn_unknown(raw: &str) {
    tracing::warn!(keyword = raw, "unknown backgroundPosition keyword, using center");
}

impl std::str::FromStr for PositionalAnchor {
    type Err = CrossfadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/anchor.rs"]
mod tests;
