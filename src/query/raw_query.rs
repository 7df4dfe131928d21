/// One raw query-parameter value: a scalar, or an array when the key was
/// repeated in the request.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum CampdirRawValue {
    Single(String),
    Multi(Vec<String>),
}

impl CampdirRawValue {
    /// The last scalar carried by this value. Control keys (`page`, `limit`,
    /// `select`, `sort`) read through this, so a repeated control key
    /// degrades to last-wins instead of erroring.
    pub fn last_scalar(&self) -> Option<&str> {
        match self {
            CampdirRawValue::Single(value) => Some(value.as_str()),
            CampdirRawValue::Multi(values) => values.last().map(|value| value.as_str()),
        }
    }
}

/// The flat, untrusted key/value map of an inbound read request.
///
/// Keys keep their first-seen order; repeating a key folds its values into
/// one [`CampdirRawValue::Multi`] entry, mirroring how HTTP query strings
/// deliver repeated parameters. The map is read-only input to the compiler
/// and view-request builder; nothing in this crate mutates it.
///
/// # Examples
///
/// ```rust
/// use campdir::CampdirRawQuery;
///
/// let raw: CampdirRawQuery = [("tuition[gte]", "500"), ("sort", "-tuition")]
///     .into_iter()
///     .collect();
/// assert_eq!(raw.len(), 2);
/// ```
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct CampdirRawQuery {
    pairs: Vec<(String, CampdirRawValue)>,
}

impl CampdirRawQuery {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let key = key.as_ref();
        match self.pairs.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, CampdirRawValue::Multi(values))) => values.push(value.into()),
            Some((_, existing)) => {
                let first = match existing {
                    CampdirRawValue::Single(first) => std::mem::take(first),
                    CampdirRawValue::Multi(_) => unreachable!(),
                };
                *existing = CampdirRawValue::Multi(vec![first, value.into()]);
            }
            None => self
                .pairs
                .push((key.to_string(), CampdirRawValue::Single(value.into()))),
        }
    }

    pub fn push_many<K, I>(&mut self, key: K, values: I)
    where
        K: AsRef<str>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for value in values {
            self.push(key.as_ref(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&CampdirRawValue> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, CampdirRawValue)> {
        self.pairs.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for CampdirRawQuery
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = CampdirRawQuery::new();
        for (key, value) in iter {
            raw.push(key, value);
        }
        raw
    }
}
