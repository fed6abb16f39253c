use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Backend request context: language, timezone and acting user
///
/// Immutable for the lifetime of one request. It is merged into every
/// outbound parameter set under the reserved `context` key and is never
/// filtered on.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    lang: String,
    tz: String,
    uid: i64,
    extra: BTreeMap<String, Value>,
}

impl RequestContext {
    pub fn new(lang: impl Into<String>, tz: impl Into<String>, uid: i64) -> Self {
        Self {
            lang: lang.into(),
            tz: tz.into(),
            uid,
            extra: BTreeMap::new(),
        }
    }

    /// Attach an additional context entry such as `allowed_company_ids`
    ///
    /// Entries named `lang`, `tz` or `uid` are accepted but always lose to the
    /// values given to [`RequestContext::new`].
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn tz(&self) -> &str {
        &self.tz
    }

    pub fn uid(&self) -> i64 {
        self.uid
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Render the context block sent under the `context` key
    ///
    /// Extras are written first and the fixed keys last, so on a key clash the
    /// fixed key wins.
    pub fn to_block(&self) -> Map<String, Value> {
        let mut block = Map::new();
        for (key, value) in &self.extra {
            block.insert(key.clone(), value.clone());
        }
        block.insert("lang".to_string(), Value::String(self.lang.clone()));
        block.insert("tz".to_string(), Value::String(self.tz.clone()));
        block.insert("uid".to_string(), Value::from(self.uid));
        block
    }
}
