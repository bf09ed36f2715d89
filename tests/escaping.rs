use std::borrow::Cow;

use hogan_runtime as hr;
use hr::Value;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_escape_mixed() {
    assert_eq!(
        hr::escape(&Value::from("<a & 'b' \"c\">")),
        "&lt;a &amp; &#39;b&#39; &quot;c&quot;&gt;"
    );
}

#[test]
fn test_escape_non_strings() {
    assert_eq!(hr::escape(&Value::from(3)), "3");
    assert_eq!(hr::escape(&Value::Null), "");
    assert_eq!(hr::stringify(&Value::from(false)), "false");
}

proptest! {
    #[test]
    fn safe_text_is_untouched(s in "[^&<>\"']*") {
        prop_assert!(matches!(hr::escape_html(&s), Cow::Borrowed(_)));
        prop_assert_eq!(hr::escape(&Value::from(s.as_str())), s);
    }

    #[test]
    fn escaped_text_has_no_raw_specials(s in ".*") {
        let out = hr::escape(&Value::from(s.as_str()));
        prop_assert!(!out.contains(&['<', '>', '"', '\''][..]));
        // each special char becomes exactly one entity, so one `&` per special char
        let specials = s.chars().filter(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')).count();
        prop_assert_eq!(out.matches('&').count(), specials);
    }
}
