use super::{DELIMITER, QUOTE};

/// Serializes one row as an escaped CSV line, CRLF terminated.
///
/// A field is quoted if and only if it contains a delimiter, a quote, a
/// carriage return or a line feed; inside a quoted field every quote is
/// doubled. All other fields are emitted verbatim. Pure and total: any text,
/// including multi-codepoint sequences, passes through opaquely.
///
/// # Examples
///
/// ```
/// use csv_stream_rs::item::csv::encoder::encode;
///
/// assert_eq!(encode(&["a", "b"]), "a,b\r\n");
/// assert_eq!(encode(&["a,bc", "12,3"]), "\"a,bc\",\"12,3\"\r\n");
/// assert_eq!(encode(&["a\"bc"]), "\"a\"\"bc\"\r\n");
/// ```
pub fn encode<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            line.push(DELIMITER);
        }
        encode_field(&mut line, field.as_ref());
    }
    line.push_str("\r\n");
    line
}

fn encode_field(line: &mut String, field: &str) {
    if !needs_quoting(field) {
        line.push_str(field);
        return;
    }
    line.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            line.push(QUOTE);
        }
        line.push(c);
    }
    line.push(QUOTE);
}

fn needs_quoting(field: &str) -> bool {
    field.contains([DELIMITER, QUOTE, '\r', '\n'])
}
