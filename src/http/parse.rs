use once_cell::sync::Lazy;
use regex::Regex;

static AREA_QUERY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<k1>height|width)=(?P<v1>[^&=]*)&(?P<k2>height|width)=(?P<v2>[^&=]*)$")
        .unwrap()
});

/// Splits a target on `=`: the text before the first one, and the text
/// between the first and the second. No `=` gives an empty value.
pub(super) fn prefix_and_value(target: &str) -> (&str, &str) {
    let mut parts = target.split('=');
    let prefix = parts.next().unwrap_or_default();
    let value = parts.next().unwrap_or_default();
    (prefix, value)
}

/// Accepts exactly two `key=value` pairs whose keys are `height` and `width`,
/// in either order. Returns `(height, width)`.
pub(super) fn area_query(query: &str) -> Option<(&str, &str)> {
    let cap = AREA_QUERY_RE.captures(query)?;
    let (k1, v1) = (cap.name("k1")?.as_str(), cap.name("v1")?.as_str());
    let (k2, v2) = (cap.name("k2")?.as_str(), cap.name("v2")?.as_str());

    match (k1, k2) {
        ("height", "width") => Some((v1, v2)),
        ("width", "height") => Some((v2, v1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_between_first_and_second_equals() {
        assert_eq!(
            prefix_and_value("/calculate-next?num=5"),
            ("/calculate-next?num", "5")
        );
        assert_eq!(
            prefix_and_value("/calculate-next?num=5=6"),
            ("/calculate-next?num", "5")
        );
        assert_eq!(prefix_and_value("/index.html"), ("/index.html", ""));
    }

    #[test]
    fn area_query_accepts_both_orders() {
        assert_eq!(area_query("height=3&width=4"), Some(("3", "4")));
        assert_eq!(area_query("width=3&height=4"), Some(("4", "3")));
    }

    #[test]
    fn area_query_rejects_other_shapes() {
        assert_eq!(area_query("height=3"), None);
        assert_eq!(area_query("height=3&height=4"), None);
        assert_eq!(area_query("width=3&width=4"), None);
        assert_eq!(area_query("height=3&depth=4"), None);
        assert_eq!(area_query("height=3&width=4&depth=5"), None);
        assert_eq!(area_query("height3&width=4"), None);
    }

    #[test]
    fn area_query_keeps_non_numeric_values_for_the_handler() {
        assert_eq!(area_query("height=abc&width="), Some(("abc", "")));
    }
}
