//! Session languages and their Livy-specific strings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Language of the code run in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Scala, run in a `spark` session
    Scala,
    /// Python, run in a `pyspark` session
    Python,
}

impl Language {
    /// All supported languages
    pub const ALL: [Self; 2] = [Self::Scala, Self::Python];

    /// Returns the lowercase language name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scala => "scala",
            Self::Python => "python",
        }
    }

    /// Returns the Livy session kind sent on session creation
    #[must_use]
    pub const fn livy_kind(&self) -> &'static str {
        match self {
            Self::Scala => "spark",
            Self::Python => "pyspark",
        }
    }

    /// Returns the statement that binds `sqlContext` in a remote session
    #[must_use]
    pub const fn sql_context_command(&self) -> &'static str {
        match self {
            Self::Scala => {
                "val sqlContext = new org.apache.spark.sql.SQLContext(sc)\n\
                 import sqlContext.implicits._"
            }
            Self::Python => {
                "from pyspark.sql import SQLContext\n\
                 from pyspark.sql.types import *\n\
                 sqlContext = SQLContext(sc)"
            }
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Language {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == lowered)
            .ok_or_else(|| SessionError::UnsupportedLanguage {
                language: lowered,
                supported: Self::supported_list(),
            })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
