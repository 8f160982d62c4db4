use serde::{Deserialize, Deserializer};

/// A list body as the backend sends it.
///
/// Some endpoints return a bare JSON array, others a paginated envelope
/// with the items under `content`. Both shapes are accepted everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Envelope(Option<Vec<T>>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList<T> {
    Bare(Vec<T>),
    // A missing `content` key deserializes to None
    Envelope { content: Option<Vec<T>> },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ListResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A null body is an empty list
        let raw: Option<RawList<T>> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawList::Bare(items)) => ListResponse::Bare(items),
            Some(RawList::Envelope { content }) => ListResponse::Envelope(content),
            None => ListResponse::Envelope(None),
        })
    }
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Envelope(content) => content.unwrap_or_default(),
        }
    }
}
