use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Rendered occurrences of one request.
///
/// Owns every string it holds; dropping it releases the whole result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceList {
    occurrences: Vec<String>,
    limited: bool,
}

impl OccurrenceList {
    #[must_use]
    pub const fn new(occurrences: Vec<String>, limited: bool) -> Self {
        Self {
            occurrences,
            limited,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.occurrences
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Whether the configured occurrence cap cut this list short.
    #[must_use]
    pub const fn is_limited(&self) -> bool {
        self.limited
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.occurrences
    }
}

impl IntoIterator for OccurrenceList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.occurrences.into_iter()
    }
}

impl<'a> IntoIterator for &'a OccurrenceList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.occurrences.iter()
    }
}

/// Wire form of a request outcome: exactly one of `occurrences` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OccurrenceResponse {
    Occurrences {
        occurrences: Vec<String>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        limited: bool,
    },
    Error {
        error: String,
    },
}

impl OccurrenceResponse {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// ## Summary
    /// Serializes the response as a single JSON object.
    ///
    /// ## Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ServiceResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<ServiceResult<OccurrenceList>> for OccurrenceResponse {
    fn from(result: ServiceResult<OccurrenceList>) -> Self {
        match result {
            Ok(list) => Self::Occurrences {
                limited: list.is_limited(),
                occurrences: list.into_vec(),
            },
            Err(err) => Self::from(&err),
        }
    }
}

impl From<&ServiceError> for OccurrenceResponse {
    fn from(err: &ServiceError) -> Self {
        Self::Error {
            error: err.to_string(),
        }
    }
}
