use serde::{Deserialize, Serialize};

use crate::entities::films;

/// A persisted film record as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub id: i32,

    pub title: String,

    pub year: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metascore: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,

    pub seen: bool,
}

impl From<films::Model> for Film {
    fn from(model: films::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
            description: model.description,
            metascore: model.metascore,
            rank: model.rank,
            seen: model.seen,
        }
    }
}

/// Seed input for a new film record. Records are created out-of-band (seed
/// tooling and tests); no HTTP route inserts films.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmInput {
    pub title: String,

    pub year: i32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub metascore: Option<i32>,

    #[serde(default)]
    pub rank: Option<i32>,

    #[serde(default)]
    pub seen: bool,
}
