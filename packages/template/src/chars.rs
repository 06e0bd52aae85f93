/*
 * Character Codes
 *
 * Characters the expression lexer and the HTML serializer dispatch on
 */

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const VTAB: char = '\x0B';
pub const FF: char = '\x0C';
pub const CR: char = '\r';
pub const SPACE: char = ' ';
pub const NBSP: char = '\u{00A0}';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const DOLLAR: char = '$';
pub const PERCENT: char = '%';
pub const AMPERSAND: char = '&';
pub const SQ: char = '\'';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const STAR: char = '*';
pub const PLUS: char = '+';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';
pub const LBRACKET: char = '[';
pub const BACKSLASH: char = '\\';
pub const RBRACKET: char = ']';
pub const UNDERSCORE: char = '_';
pub const BAR: char = '|';

// Digits
pub const ZERO: char = '0';
pub const NINE: char = '9';

/// Check if character is whitespace
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == LF || ch == CR || ch == VTAB || ch == FF || ch == NBSP
}

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    (ZERO..=NINE).contains(&ch)
}

/// Check if character is ASCII letter
pub fn is_ascii_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check if character can start a data path
pub fn is_identifier_start(ch: char) -> bool {
    is_ascii_letter(ch) || ch == UNDERSCORE || ch == DOLLAR
}

/// Check if character can be part of a data path.
///
/// Dots are part of the path: `user.address.city` is one identifier token.
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch) || ch == PERIOD
}
