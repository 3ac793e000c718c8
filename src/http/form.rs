use std::collections::HashMap;

use crate::http::parser::DecodeError;

/// Form fields submitted in a request body (`account=gugu&password=...`).
///
/// Values are kept exactly as sent apart from surrounding whitespace; no
/// percent-decoding is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBody {
    items: HashMap<String, String>,
}

impl RequestBody {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Splits on `&`, then each field on its first `=`.
    ///
    /// Trailing empty segments (`a=1&`) are ignored. Any other field without
    /// `=`, an empty one between two `&` included, is rejected with
    /// [`DecodeError::MalformedField`].
    pub fn parse(body: &str) -> Result<Self, DecodeError> {
        if body.trim().is_empty() {
            return Ok(Self::empty());
        }

        let mut fields: Vec<&str> = body.split('&').collect();
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }

        let mut items = HashMap::new();
        for field in fields {
            let (key, value) = field
                .split_once('=')
                .ok_or_else(|| DecodeError::MalformedField(field.to_string()))?;
            items.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(Self { items })
    }

    /// Returns the field value, or `""` when the field was not sent.
    pub fn get(&self, key: &str) -> &str {
        self.items.get(key).map(|v| v.as_str()).unwrap_or("")
    }

    pub fn items(&self) -> &HashMap<String, String> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
