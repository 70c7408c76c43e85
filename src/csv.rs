//! Minimal CSV field codec
//!
//! Only what the tracker's export format needs: quoting of fields that contain
//! separators or quotes, and a single-line parser that understands doubled quotes.

/// Escape one CSV field
///
/// Fields containing a comma, double quote, CR or LF are wrapped in double quotes
/// with every inner quote doubled. `None` becomes an empty field.
pub fn escape(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let needs_quotes = value.contains([',', '"', '\n', '\r']);
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join already-unescaped values into one CSV line (without line terminator)
pub fn join_row<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(|v| escape(Some(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Split one CSV line into fields
///
/// A quote toggles quoted mode, except that two consecutive quotes inside a
/// quoted field produce one literal quote. Commas separate fields only outside
/// quotes. The last field is always emitted, so `"a,"` yields `["a", ""]`.
/// `None` yields no fields at all.
pub fn parse_line(line: Option<&str>) -> Vec<String> {
    let Some(line) = line else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}
