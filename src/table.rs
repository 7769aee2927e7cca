//! International Morse Code symbol table.
//!
//! Maps the 26 letters and 10 digits to their dot-dash patterns, plus the
//! AR prosign (`.-.-.`) used as the end-of-message marker. Letters are stored
//! in uppercase; callers fold case before lookup.

/// The character the AR prosign decodes to. Never part of the decoded text.
pub const TERMINATOR: char = '\0';

/// Longest pattern in the table, in symbols.
pub const MAX_CODE_LEN: usize = 5;

pub const DOT: u8 = b'.';
pub const DASH: u8 = b'-';

// <https://en.wikipedia.org/wiki/Morse_code#/media/File:International_Morse_Code.svg>
pub const CHAR_CODES: [(char, &str); 37] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    // AR prosign, <https://en.wikipedia.org/wiki/Prosigns_for_Morse_code>
    (TERMINATOR, ".-.-."),
];

/// Returns the dot-dash pattern for `c`, or `None` if `c` has no code.
/// Lowercase letters have no entry.
pub fn char_to_code(c: char) -> Option<&'static str> {
    CHAR_CODES
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, code)| *code)
}

/// Returns the character whose pattern is `code`.
pub fn code_to_char(code: &[u8]) -> Option<char> {
    CHAR_CODES
        .iter()
        .find(|(_, pattern)| pattern.as_bytes() == code)
        .map(|(ch, _)| *ch)
}
