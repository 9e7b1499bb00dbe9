use serde::{Deserialize, Serialize};

/// One hit of a movie search, in the order TMDB returned it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchResultItem {
    pub id: i64,
    pub title: String,
    pub release_date: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchResults {
    pub results: Vec<SearchResultItem>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct MovieDetail {
    pub title: String,
    pub overview: String,
}
