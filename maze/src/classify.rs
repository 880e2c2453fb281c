use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The search strategy used to find a path
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
}

impl Algorithm {
    /// The mark this algorithm leaves on cells of its path
    pub fn tag(self) -> PathMark {
        match self {
            Algorithm::Bfs => PathMark::Bfs,
            Algorithm::Dfs => PathMark::Dfs,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::Bfs => "bfs",
                Algorithm::Dfs => "dfs",
            }
        )
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            _ => Err(anyhow::anyhow!("Invalid algorithm: {}", s)),
        }
    }
}

/// Which reconstructed paths a cell has been part of
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMark {
    Bfs,
    Dfs,
    Mixed,
}

/// Decide the mark of a cell that lies on a path just found by `algorithm`.
///
/// A cell claimed by the other algorithm becomes mixed, anything else
/// (unmarked, already this algorithm's, or mixed) takes the algorithm's tag.
pub fn classify(existing: Option<PathMark>, algorithm: Algorithm) -> PathMark {
    let (tag, other) = match algorithm {
        Algorithm::Bfs => (PathMark::Bfs, PathMark::Dfs),
        Algorithm::Dfs => (PathMark::Dfs, PathMark::Bfs),
    };

    if existing == Some(other) {
        PathMark::Mixed
    } else {
        tag
    }
}
