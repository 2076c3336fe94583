pub mod application;
pub mod audit;
pub mod candidate;
pub mod coding;
pub mod job;
pub mod quiz;
pub mod sub_admin;

use serde::{Deserialize, Deserializer};

/// List responses from the backend come wrapped as `{"items": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Some admin endpoints answer with a bare array, others with `items` or
/// `rows`. Anything else is treated as an empty list.
#[derive(Debug, Clone)]
pub struct Rows<T>(pub Vec<T>);

impl<'de, T> Deserialize<'de> for Rows<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Envelope<T> {
            Bare(Vec<T>),
            Items { items: Vec<T> },
            Rows { rows: Vec<T> },
            Other(serde::de::IgnoredAny),
        }

        Ok(match Envelope::deserialize(deserializer)? {
            Envelope::Bare(rows) | Envelope::Items { items: rows } | Envelope::Rows { rows } => {
                Rows(rows)
            }
            Envelope::Other(_) => Rows(Vec::new()),
        })
    }
}
