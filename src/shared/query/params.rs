use std::collections::HashMap;

use axum::extract::Query;
use axum::http::Uri;

/// Value of one search parameter as it arrives from the URL.
///
/// A key seen once keeps a single string; repeating the key turns it into a
/// list, mirroring how browsers serialize multi-selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// `true` for an empty string or an empty list
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Single(value) => value.is_empty(),
            ParamValue::Multi(values) => values.is_empty(),
        }
    }

    /// First value, or `""` for an empty list
    pub fn first(&self) -> &str {
        match self {
            ParamValue::Single(value) => value,
            ParamValue::Multi(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(value) => vec![value.as_str()],
            ParamValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = ParamValue::Multi(vec![first, value]);
            }
            ParamValue::Multi(values) => values.push(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// Raw URL search parameters, keyed by the literal key (`name[containsIgnoreCase]`,
/// `page`, `sort`, ...). Keys keep the order of their first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    entries: Vec<(String, ParamValue)>,
    /// Position of each key in `entries`
    index: HashMap<String, usize>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the query string of `uri`.
    ///
    /// Decoding goes through axum's `Query` extractor; pairs are kept in order
    /// with repeated keys. Empty keys are dropped. A query string that cannot be
    /// decoded yields no parameters.
    pub fn from_uri(uri: &Uri) -> Self {
        match Query::<Vec<(String, String)>>::try_from_uri(uri) {
            Ok(Query(pairs)) => Self::from_pairs(pairs),
            Err(e) => {
                tracing::warn!("Ignoring undecodable query string: {}", e);
                Self::new()
            }
        }
    }

    /// Build from decoded pairs, merging repeated keys into lists
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            if !key.is_empty() {
                params.append(key, value);
            }
        }
        params
    }

    /// Add one value, turning the entry into a list when the key repeats
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1.push(value),
            None => self.push_entry(key, ParamValue::Single(value)),
        }
    }

    /// Set a key, replacing anything previously stored under it
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => self.push_entry(key, value),
        }
    }

    fn push_entry(&mut self, key: String, value: ParamValue) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (shifted, _) in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut(shifted) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode a bare query string, as if it followed `?` in a request URI
    #[cfg(test)]
    pub fn parse(raw: &str) -> Self {
        let uri: Uri = format!("/?{}", raw).parse().unwrap();
        Self::from_uri(&uri)
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
