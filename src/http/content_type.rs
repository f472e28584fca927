use std::str::FromStr;
use strum::EnumString;

/// File extensions with a known content type. Matching is case-sensitive.
#[derive(EnumString, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Extension {
    #[strum(serialize = "html")]
    Html,
    #[strum(serialize = "jpg")]
    Jpg,
    #[strum(serialize = "gif")]
    Gif,
    #[strum(serialize = "css")]
    Css,
    #[strum(serialize = "js")]
    Js,
    #[strum(serialize = "txt")]
    Txt,
    #[strum(serialize = "ico")]
    Ico,
    #[strum(serialize = "png")]
    Png,
}

impl Extension {
    pub fn content_type(self) -> &'static str {
        match self {
            Extension::Html => "text/html; charset=utf-8",
            Extension::Jpg | Extension::Gif => "image/jpeg",
            Extension::Css => "text/css",
            Extension::Js => "text/javascript; charset=UTF-8",
            Extension::Txt => "text/plain",
            Extension::Ico | Extension::Png => "image/x-icon",
        }
    }
}

pub const TEXT_PLAIN_HEADER: &str = "Content-Type: text/plain";

/// Header line for an extension, `None` for unknown ones.
pub fn header_for(extension: &str) -> Option<String> {
    Extension::from_str(extension)
        .ok()
        .map(|ext| format!("Content-Type: {}", ext.content_type()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(
            header_for("html").unwrap(),
            "Content-Type: text/html; charset=utf-8"
        );
        assert_eq!(header_for("gif").unwrap(), "Content-Type: image/jpeg");
        assert_eq!(header_for("jpg").unwrap(), "Content-Type: image/jpeg");
        assert_eq!(
            header_for("js").unwrap(),
            "Content-Type: text/javascript; charset=UTF-8"
        );
        assert_eq!(header_for("png").unwrap(), "Content-Type: image/x-icon");
        assert_eq!(header_for("ico").unwrap(), "Content-Type: image/x-icon");
        assert_eq!(header_for("css").unwrap(), "Content-Type: text/css");
        assert_eq!(header_for("txt").unwrap(), "Content-Type: text/plain");
        assert_eq!(header_for("txt").unwrap(), TEXT_PLAIN_HEADER);
    }

    #[test]
    fn unknown_extension_has_no_header() {
        assert_eq!(header_for("jpeg"), None);
        assert_eq!(header_for("HTML"), None);
        assert_eq!(header_for("/no-dot-here"), None);
    }
}
