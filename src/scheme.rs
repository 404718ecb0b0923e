/// URL scheme classification
///
/// The six special schemes get authority-required parsing, a default `/`
/// path, default-port elision and the strict hostname pipeline. Everything
/// else is `NotSpecial` and parsed with the permissive opaque-host rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    #[default]
    NotSpecial,
}

impl SchemeType {
    /// Check if this is a special scheme
    pub fn is_special(self) -> bool {
        self != Self::NotSpecial
    }

    /// Check if this scheme forms a tuple origin
    /// (`file:` is special but its origin is always "null")
    pub fn is_tuple(self) -> bool {
        matches!(
            self,
            Self::Http | Self::Https | Self::Ws | Self::Wss | Self::Ftp
        )
    }

    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::Ftp => Some(21),
            Self::File | Self::NotSpecial => None,
        }
    }
}

/// Get the scheme type from a scheme string (without the trailing colon).
/// Filters by length + first byte before the full comparison to keep the
/// common lookup cheap.
pub fn get_scheme_type(scheme: &str) -> SchemeType {
    let bytes = scheme.as_bytes();

    match (bytes.len(), bytes.first()) {
        (2, Some(b'w')) if bytes == b"ws" => SchemeType::Ws,
        (3, Some(b'w')) if bytes == b"wss" => SchemeType::Wss,
        (3, Some(b'f')) if bytes == b"ftp" => SchemeType::Ftp,
        (4, Some(b'h')) if bytes == b"http" => SchemeType::Http,
        (4, Some(b'f')) if bytes == b"file" => SchemeType::File,
        (5, Some(b'h')) if bytes == b"https" => SchemeType::Https,
        _ => SchemeType::NotSpecial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_type() {
        assert_eq!(get_scheme_type("http"), SchemeType::Http);
        assert_eq!(get_scheme_type("https"), SchemeType::Https);
        assert_eq!(get_scheme_type("ftp"), SchemeType::Ftp);
        assert_eq!(get_scheme_type("file"), SchemeType::File);
        assert_eq!(get_scheme_type("custom"), SchemeType::NotSpecial);
    }

    #[test]
    fn test_tuple_schemes() {
        assert!(SchemeType::Https.is_tuple());
        assert!(SchemeType::Ws.is_tuple());
        assert!(!SchemeType::File.is_tuple());
        assert!(!SchemeType::NotSpecial.is_tuple());
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(SchemeType::Http.default_port(), Some(80));
        assert_eq!(SchemeType::Wss.default_port(), Some(443));
        assert_eq!(SchemeType::Ftp.default_port(), Some(21));
        assert_eq!(SchemeType::File.default_port(), None);
    }
}
