//! Seniority level of a registered person ("cargo").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Seniority level. Stored as its upper-case code (`JUNIOR`, `PLENO`, `SENIOR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobLevel {
    Junior,
    Pleno,
    Senior,
}

impl JobLevel {
    pub const ALL: [JobLevel; 3] = [JobLevel::Junior, JobLevel::Pleno, JobLevel::Senior];

    /// Storage / form code.
    pub fn code(self) -> &'static str {
        match self {
            JobLevel::Junior => "JUNIOR",
            JobLevel::Pleno => "PLENO",
            JobLevel::Senior => "SENIOR",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            JobLevel::Junior => "Júnior",
            JobLevel::Pleno => "Pleno",
            JobLevel::Senior => "Sênior",
        }
    }
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for JobLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobLevel::ALL
            .into_iter()
            .find(|level| level.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("Unknown job level '{s}'")))
    }
}

/// Code/label pair used to populate a selection control.
#[derive(Debug, Clone, Serialize)]
pub struct JobLevelOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// All levels in declaration order, as selection options.
pub fn job_level_options() -> Vec<JobLevelOption> {
    JobLevel::ALL
        .into_iter()
        .map(|level| JobLevelOption {
            code: level.code(),
            label: level.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("pleno".parse::<JobLevel>().unwrap(), JobLevel::Pleno);
        assert_eq!(" SENIOR ".parse::<JobLevel>().unwrap(), JobLevel::Senior);
    }

    #[test]
    fn rejects_unknown_code() {
        assert!("intern".parse::<JobLevel>().is_err());
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&JobLevel::Junior).unwrap();
        assert_eq!(json, "\"JUNIOR\"");
    }

    #[test]
    fn options_follow_declaration_order() {
        let codes: Vec<_> = job_level_options().iter().map(|o| o.code).collect();
        assert_eq!(codes, ["JUNIOR", "PLENO", "SENIOR"]);
    }
}
