use serde::Deserialize;
use serde_json::Value;

/// An upstream response fragment before normalization.
///
/// The catalog returns loosely shaped JSON whose keys depend on the result
/// type. All access goes through the lookups below, which treat a missing key,
/// a `null` and a value of the wrong type the same way: as absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Walks a dotted path such as `videoDetails.thumbnail.thumbnails`.
    pub fn path(&self, path: &str) -> Option<&Value> {
        let mut current = &self.0;
        for key in path.split('.') {
            current = current.as_object()?.get(key)?;
        }
        (!current.is_null()).then_some(current)
    }

    pub fn has(&self, path: &str) -> bool {
        self.path(path).is_some()
    }

    pub fn str(&self, path: &str) -> Option<&str> {
        self.path(path)?.as_str()
    }

    /// Like [`RawRecord::str`] but also renders numbers, which the provider
    /// uses interchangeably with strings for counts and years.
    pub fn text(&self, path: &str) -> Option<String> {
        match self.path(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// First path in `paths` that yields text.
    pub fn text_any(&self, paths: &[&str]) -> Option<String> {
        paths.iter().find_map(|p| self.text(p))
    }

    /// Unsigned integer stored either as a number or a numeric string.
    pub fn u64(&self, path: &str) -> Option<u64> {
        match self.path(path)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn u64_any(&self, paths: &[&str]) -> Option<u64> {
        paths.iter().find_map(|p| self.u64(p))
    }

    /// Array at `path`, one record per element. Anything else is empty.
    pub fn list(&self, path: &str) -> Vec<RawRecord> {
        match self.path(path) {
            Some(Value::Array(items)) => items.iter().cloned().map(RawRecord).collect(),
            _ => Vec::new(),
        }
    }

    /// First path in `paths` holding a non-empty array.
    pub fn list_any(&self, paths: &[&str]) -> Vec<RawRecord> {
        paths
            .iter()
            .map(|p| self.list(p))
            .find(|l| !l.is_empty())
            .unwrap_or_default()
    }

    /// A result section: either a bare array or an object wrapping one under
    /// `items` or `results` (chart buckets and artist shelves use both).
    pub fn section(&self, path: &str) -> Vec<RawRecord> {
        match self.path(path) {
            Some(Value::Array(_)) => self.list(path),
            Some(Value::Object(_)) => {
                let items = format!("{path}.items");
                let results = format!("{path}.results");
                self.list_any(&[items.as_str(), results.as_str()])
            }
            _ => Vec::new(),
        }
    }
}
