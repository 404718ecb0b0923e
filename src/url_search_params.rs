use crate::compat::{String, ToString, Vec};
use crate::error::{ParseError, Result};
use crate::unicode::percent_encode::percent_decode;

/// Ordered multi-map of query parameters with
/// application/x-www-form-urlencoded codec semantics.
///
/// Insertion order is preserved and duplicate names are allowed by design —
/// HTML form semantics. Only `set` collapses duplicates, and only after the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSearchParams {
    params: Vec<(String, String)>,
}

impl UrlSearchParams {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Parse from a query string (with or without leading `?`).
    /// `+` decodes to a space; malformed percent triplets stay literal.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        if query.is_empty() {
            return Self::new();
        }

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => (percent_decode(name, true), percent_decode(value, true)),
                None => (percent_decode(pair, true), String::new()),
            })
            .collect();

        Self { params }
    }

    /// Build from a sequence of (name, value) pairs, order preserved.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Build from loosely-shaped entries, each of which must hold exactly a
    /// name and a value.
    ///
    /// # Errors
    ///
    /// `ParseError::InvalidEntry` for any entry that is not a 2-element
    /// pair — deliberately distinguishable from URL parse failures.
    pub fn from_entries<I, E, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params = Vec::new();
        for entry in entries {
            let mut fields = entry.into_iter();
            let name = fields.next().ok_or(ParseError::InvalidEntry)?;
            let value = fields.next().ok_or(ParseError::InvalidEntry)?;
            if fields.next().is_some() {
                return Err(ParseError::InvalidEntry);
            }
            params.push((name.into(), value.into()));
        }
        Ok(Self { params })
    }

    /// Build from a key/value record. A later duplicate key overwrites the
    /// value in place while keeping the first occurrence's position — the
    /// one set-like collapse in an otherwise multi-valued list.
    pub fn from_record<I, K, V>(record: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut list = Self::new();
        for (name, value) in record {
            let name = name.into();
            let value = value.into();
            match list.params.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => list.params.push((name, value)),
            }
        }
        list
    }

    /// Append a pair at the end, always.
    pub fn append(&mut self, name: &str, value: &str) {
        self.params.push((name.to_string(), value.to_string()));
    }

    /// Delete pairs with the given name; with `value`, only exact pairs.
    pub fn delete(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.params.retain(|(n, v)| n != name || v != value);
        } else {
            self.params.retain(|(n, _)| n != name);
        }
    }

    /// First value for a name, in insertion order.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a name, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether the name exists; with `value`, whether the exact pair does.
    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        if let Some(value) = value {
            self.params.iter().any(|(n, v)| n == name && v == value)
        } else {
            self.params.iter().any(|(n, _)| n == name)
        }
    }

    /// Update the first matching pair in place, drop every later pair with
    /// the same name, or append when the name is absent.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut found_first = false;
        self.params.retain_mut(|(n, v)| {
            if n != name {
                return true;
            }
            if found_first {
                return false;
            }
            found_first = true;
            *v = value.to_string();
            true
        });
        if !found_first {
            self.params.push((name.to_string(), value.to_string()));
        }
    }

    /// Stable sort by name; relative order of same-named pairs survives.
    pub fn sort(&mut self) {
        self.params.sort_by(|a, b| a.0.cmp(&b.0));
    }

    /// Number of pairs.
    pub fn size(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Alias of `iter`, matching the web API name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(_, v)| v.as_str())
    }

    /// Serialize without the leading `?`: `application/x-www-form-urlencoded`
    /// with spaces as `+`.
    #[allow(clippy::inherent_to_string_shadow_display)]
    pub fn to_string(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            form_encode_into(&mut out, name);
            out.push('=');
            form_encode_into(&mut out, value);
        }
        out
    }

    /// Serialize with the leading `?`, or the empty string when there are
    /// no pairs — the shape the owning URL stores.
    pub fn serialize(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let mut out = String::from("?");
        out.push_str(&self.to_string());
        out
    }
}

impl core::fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_string())
    }
}

impl From<&str> for UrlSearchParams {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for UrlSearchParams {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl<'a> IntoIterator for &'a UrlSearchParams {
    type Item = (&'a str, &'a str);
    type IntoIter = core::iter::Map<
        core::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let project: fn(&'a (String, String)) -> (&'a str, &'a str) =
            |(n, v)| (n.as_str(), v.as_str());
        self.params.iter().map(project)
    }
}

/// Form-urlencoded byte encoder: unreserved bytes verbatim, space as `+`,
/// everything else as `%XX`.
fn form_encode_into(out: &mut String, input: &str) {
    use core::fmt::Write;

    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}
