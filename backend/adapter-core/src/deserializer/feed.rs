use crate::deserializer::Deserializer;

use serde_json::Value;

/// Collection-shaped response whose elements are wrapped one by one.
pub trait FeedDeserializer: Deserializer {
    /// Top-level key holding the element array.
    const COLLECTION: &'static str;

    /// Per-element wrapper borrowing its raw element.
    type Item<'a>: From<&'a Value>
    where
        Self: 'a;

    /// Raw elements; empty when the collection is missing or not an array.
    fn elements(&self) -> &[Value] {
        self.raw()
            .get(Self::COLLECTION)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// One wrapper per element, in body order.
    fn items(&self) -> Vec<Self::Item<'_>> {
        self.elements().iter().map(Into::into).collect()
    }

    /// Wrappers matching `predicate`, in body order.
    fn filter_items<'a, P>(&'a self, predicate: P) -> Vec<Self::Item<'a>>
    where
        P: FnMut(&Self::Item<'a>) -> bool,
    {
        self.items().into_iter().filter(predicate).collect()
    }
}
