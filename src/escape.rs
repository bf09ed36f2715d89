use std::borrow::Cow;

use crate::value::Value;

/// Unescaped interpolation (`{{&name}}`): null becomes "", everything else its text form.
pub fn stringify(value: &Value) -> String {
    value.to_text()
}

/// Escaped interpolation (`{{name}}`).
pub fn escape(value: &Value) -> String {
    let text = stringify(value);
    if needs_escape(&text) {
        replace_entities(&text)
    } else {
        text
    }
}

/// HTML-escape a string slice, borrowing when there is nothing to replace.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if needs_escape(s) {
        Cow::Owned(replace_entities(s))
    } else {
        Cow::Borrowed(s)
    }
}

fn needs_escape(s: &str) -> bool {
    s.chars().any(|c| matches!(c, '&' | '<' | '>' | '"' | '\''))
}

// `&` goes first so the entities produced below are not escaped twice.
fn replace_entities(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
}
