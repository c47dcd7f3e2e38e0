use crate::common::{Value, DOC_ID, FIELD_SEPARATOR};
use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;
use std::fmt::{Debug, Display};

/// Represents a schema-less record stored in an entity collection.
///
/// A document is an insertion-ordered map of field names to [Value]s. Field
/// order survives a save/load cycle, so a stored file keeps the shape it was
/// written with.
///
/// The `_id` field is reserved: it holds the string identifier that is unique
/// within a collection. The repository assigns one during ADD when it is
/// missing and never changes it afterwards.
///
/// Nested values are reachable with dot-separated paths through [Document::get]:
/// for `{"address": {"city": "Rome"}}` the path `"address.city"` resolves to
/// `"Rome"`. Numeric segments index into arrays, so `"tags.0"` resolves to the
/// first tag.
#[derive(Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Associates the value with the top-level field `key`.
    ///
    /// An existing field keeps its position and gets the new value; a new
    /// field is appended. The key is taken literally, dots included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonrepo::collection::Document;
    /// use jsonrepo::common::Value;
    ///
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice");
    /// doc.put("age", 30);
    /// assert_eq!(doc.get("age"), Some(&Value::from(30)));
    /// ```
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Resolves a dot-separated field path.
    ///
    /// Returns `None` when any segment along the path is absent, including
    /// when an intermediate value is a scalar or an array index is out of
    /// range. Resolution never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonrepo::doc;
    /// use jsonrepo::common::Value;
    ///
    /// let doc = doc! { address: { city: "Rome" }, tags: ["a", "b"] };
    /// assert_eq!(doc.get("address.city"), Some(&Value::from("Rome")));
    /// assert_eq!(doc.get("tags.1"), Some(&Value::from("b")));
    /// assert_eq!(doc.get("address.zip"), None);
    /// assert_eq!(doc.get("address.city.name"), None);
    /// ```
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(FIELD_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            current = match current {
                Value::Document(document) => document.data.get(segment)?,
                Value::Array(array) => array.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Returns the top-level field `key` without interpreting separators.
    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Removes a top-level field, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Returns the document identifier if `_id` holds a string.
    pub fn id(&self) -> Option<&str> {
        self.data.get(DOC_ID).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns `true` when the dot-separated path resolves to a value.
    pub fn contains_field(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Shallow-merges `other` into this document.
    ///
    /// Every top-level field of `other` overwrites the same-named field here
    /// (nested documents are replaced, not merged); fields only present here
    /// are kept.
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.data.iter() {
            self.data.insert(key.clone(), value.clone());
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.data.iter()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Document {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[doc(hidden)]
pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be identifiers or string literals. Values are nested documents in
/// braces, arrays in brackets, or any expression convertible into a
/// [Value] (wrap anything longer than a single token, such as `-1`, in
/// parentheses).
///
/// # Examples
///
/// ```rust
/// use jsonrepo::doc;
///
/// let empty = doc!{};
/// assert!(empty.is_empty());
///
/// let base = 100;
/// let user = doc!{
///     "_id": "u1",
///     name: "Charlie",
///     score: (base * 2),
///     address: { city: "Rome" },
///     tags: ["admin", "user"]
/// };
/// assert_eq!(user.id(), Some("u1"));
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces for backward compat)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (with outer braces)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value));
            )*
            doc
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
