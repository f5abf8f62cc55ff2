//! Read-only wrappers over raw response bodies.
//!
//! A deserializer owns (or borrows) one raw `serde_json::Value` and derives
//! everything else from it on demand. Accessors never fail: a missing,
//! null, or wrongly typed field reads as `None`.

pub mod feed;
pub mod status;

pub use feed::FeedDeserializer;
pub use status::{StatusDeserializer, StatusLayout, SuccessSentinel};

use serde_json::Value;

/// Walk `path` through nested objects. `None` on any miss or on a null leaf.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .filter(|found| !found.is_null())
}

pub trait Deserializer {
    fn raw(&self) -> &Value;

    fn field(&self, path: &[&str]) -> Option<&Value> {
        lookup(self.raw(), path)
    }

    fn str_field(&self, path: &[&str]) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }

    fn i64_field(&self, path: &[&str]) -> Option<i64> {
        self.field(path).and_then(Value::as_i64)
    }

    fn f64_field(&self, path: &[&str]) -> Option<f64> {
        self.field(path).and_then(Value::as_f64)
    }
}
