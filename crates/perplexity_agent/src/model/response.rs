//! Response envelope and JSON path lookup

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step of a JSON path: an object key or an array index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for PathSegment<'a> {
    fn from(key: &'a str) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment<'_> {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Walk `path` through `value`, returning `None` as soon as a step does not
/// resolve (missing key, index out of range, or wrong container type).
pub fn lookup<'v>(value: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.as_object()?.get(*key),
        PathSegment::Index(index) => current.as_array()?.get(*index),
    })
}

/// Path of the primary answer text inside an envelope
const ANSWER_PATH: [PathSegment<'static>; 4] = [
    PathSegment::Key("choices"),
    PathSegment::Index(0),
    PathSegment::Key("message"),
    PathSegment::Key("content"),
];

/// The full JSON body returned by the upstream service.
///
/// Kept as a generic value so fields this crate does not know about survive
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatResponse(Value);

impl ChatResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Text of the first choice, if the envelope has one.
    pub fn answer(&self) -> Option<&str> {
        lookup(&self.0, &ANSWER_PATH)?.as_str()
    }

    pub fn get(&self, path: &[PathSegment<'_>]) -> Option<&Value> {
        lookup(&self.0, path)
    }
}

impl From<Value> for ChatResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<ChatResponse> for Value {
    fn from(response: ChatResponse) -> Self {
        response.0
    }
}
