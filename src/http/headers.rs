use std::collections::HashMap;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Request headers in the order they were received.
///
/// Names keep their original spelling. Inserting a name that is already
/// present with the exact same spelling replaces the stored value in place.
/// Lookups through [`Headers::get`] ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Retrieves a header value by name.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses the `Cookie` header. A missing header gives an empty cookie set.
    pub fn parse_cookie(&self) -> HttpCookie {
        self.get("Cookie").map(HttpCookie::parse).unwrap_or_default()
    }
}

/// Cookies sent by the client in a `Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpCookie {
    items: HashMap<String, String>,
}

impl HttpCookie {
    /// Parses `name=value; name=value`.
    ///
    /// Pairs without a `=` are skipped instead of failing the request.
    ///
    /// # Example
    ///
    /// ```
    /// # use turnstile::http::headers::HttpCookie;
    /// let cookie = HttpCookie::parse("theme=dark; JSESSIONID=abc");
    /// assert_eq!(cookie.get("theme"), Some("dark"));
    /// assert_eq!(cookie.session_id(), Some("abc"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let items = raw
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        Self { items }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(|v| v.as_str())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.get(SESSION_COOKIE)
    }

    pub fn items(&self) -> &HashMap<String, String> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
