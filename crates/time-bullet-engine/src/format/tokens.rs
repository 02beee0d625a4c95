use thiserror::Error;

/// A single formatting token, named after the day.js token it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Year4,         // YYYY
    Year2,         // YY
    Month,         // M
    Month2,        // MM
    MonthShort,    // MMM
    MonthLong,     // MMMM
    Day,           // D
    Day2,          // DD
    Weekday,       // d
    WeekdayMin,    // dd
    WeekdayShort,  // ddd
    WeekdayLong,   // dddd
    Hour24,        // H
    Hour24Pad,     // HH
    Hour12,        // h
    Hour12Pad,     // hh
    Minute,        // m
    Minute2,       // mm
    Second,        // s
    Second2,       // ss
    Millis,        // SSS
    MeridiemUpper, // A
    MeridiemLower, // a
    Offset,        // Z
    OffsetCompact, // ZZ
}

impl Token {
    /// Map a run of `len` repeated letters `c` to a token.
    fn from_run(c: char, len: usize) -> Option<Self> {
        let token = match (c, len) {
            ('Y', 4) => Token::Year4,
            ('Y', 2) => Token::Year2,
            ('M', 1) => Token::Month,
            ('M', 2) => Token::Month2,
            ('M', 3) => Token::MonthShort,
            ('M', 4) => Token::MonthLong,
            ('D', 1) => Token::Day,
            ('D', 2) => Token::Day2,
            ('d', 1) => Token::Weekday,
            ('d', 2) => Token::WeekdayMin,
            ('d', 3) => Token::WeekdayShort,
            ('d', 4) => Token::WeekdayLong,
            ('H', 1) => Token::Hour24,
            ('H', 2) => Token::Hour24Pad,
            ('h', 1) => Token::Hour12,
            ('h', 2) => Token::Hour12Pad,
            ('m', 1) => Token::Minute,
            ('m', 2) => Token::Minute2,
            ('s', 1) => Token::Second,
            ('s', 2) => Token::Second2,
            ('S', 3) => Token::Millis,
            ('A', 1) => Token::MeridiemUpper,
            ('a', 1) => Token::MeridiemLower,
            ('Z', 1) => Token::Offset,
            ('Z', 2) => Token::OffsetCompact,
            _ => return None,
        };
        Some(token)
    }

    /// The chrono strftime spec producing the same text, or `None` for `dd`,
    /// which chrono has no specifier for.
    pub(super) fn strftime(self) -> Option<&'static str> {
        let spec = match self {
            Token::Year4 => "%Y",
            Token::Year2 => "%y",
            Token::Month => "%-m",
            Token::Month2 => "%m",
            Token::MonthShort => "%b",
            Token::MonthLong => "%B",
            Token::Day => "%-d",
            Token::Day2 => "%d",
            Token::Weekday => "%w",
            Token::WeekdayMin => return None,
            Token::WeekdayShort => "%a",
            Token::WeekdayLong => "%A",
            Token::Hour24 => "%-H",
            Token::Hour24Pad => "%H",
            Token::Hour12 => "%-I",
            Token::Hour12Pad => "%I",
            Token::Minute => "%-M",
            Token::Minute2 => "%M",
            Token::Second => "%-S",
            Token::Second2 => "%S",
            Token::Millis => "%3f",
            Token::MeridiemUpper => "%p",
            Token::MeridiemLower => "%P",
            Token::Offset => "%:z",
            Token::OffsetCompact => "%z",
        };
        Some(spec)
    }
}

/// One piece of a compiled format: verbatim text or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Literal(String),
    Token(Token),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("time format is empty")]
    Empty,

    #[error("unsupported token `{token}` at position {position}")]
    UnsupportedToken { token: String, position: usize },

    #[error("unterminated `[` literal starting at position {0}")]
    UnterminatedLiteral(usize),
}

/// Split a format string into literals and tokens.
///
/// Positions in errors are char offsets into `format`.
pub(crate) fn tokenize(format: &str) -> Result<Vec<Item>, FormatError> {
    if format.is_empty() {
        return Err(FormatError::Empty);
    }

    let chars: Vec<char> = format.chars().collect();
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '[' {
            let close = chars[i + 1..]
                .iter()
                .position(|&ch| ch == ']')
                .ok_or(FormatError::UnterminatedLiteral(i))?;
            literal.extend(&chars[i + 1..i + 1 + close]);
            i += close + 2;
        } else if c.is_ascii_alphabetic() {
            let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
            let token =
                Token::from_run(c, run).ok_or_else(|| FormatError::UnsupportedToken {
                    token: chars[i..i + run].iter().collect(),
                    position: i,
                })?;
            if !literal.is_empty() {
                items.push(Item::Literal(std::mem::take(&mut literal)));
            }
            items.push(Item::Token(token));
            i += run;
        } else {
            literal.push(c);
            i += 1;
        }
    }

    if !literal.is_empty() {
        items.push(Item::Literal(literal));
    }

    Ok(items)
}
