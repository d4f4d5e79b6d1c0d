//! Replay of a linearized operation log (JSON lines).

use stakegov_types::Height;
use thiserror::Error;

use crate::error::DaoError;
use crate::operation::{Entry, Receipt};
use crate::state::Dao;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: height {height} precedes previous height {previous}")]
    HeightRegression {
        line: usize,
        height: Height,
        previous: Height,
    },
}

/// A validated sequence of entries with non-decreasing heights.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationLog {
    entries: Vec<Entry>,
}

impl OperationLog {
    /// Parse JSON lines. Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self, LogError> {
        let mut entries = Vec::new();
        let mut previous = Height::ZERO;
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let entry: Entry = serde_json::from_str(trimmed)
                .map_err(|source| LogError::Parse { line, source })?;
            if entry.height < previous {
                return Err(LogError::HeightRegression {
                    line,
                    height: entry.height,
                    previous,
                });
            }
            previous = entry.height;
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry in order. A rejected entry is recorded and skipped.
    pub fn replay(&self, dao: &mut Dao) -> Vec<Result<Receipt, DaoError>> {
        let results: Vec<_> = self.entries.iter().map(|entry| dao.apply(entry)).collect();
        let rejected = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            applied = results.len() - rejected,
            rejected,
            "replay finished"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::GenesisConfig;
    use stakegov_types::{AccountId, ErrorCode};

    const SCRIPT: &str = r#"
# admin funds custody, then distributes and claims
{"caller":"deployer","height":1,"op":{"transfer":{"from":"deployer","to":"stakegov:custody","amount":500}}}
{"caller":"deployer","height":2,"op":{"distribute":{"amount":300}}}
{"caller":"deployer","height":3,"op":"claim"}
{"caller":"deployer","height":3,"op":"claim"}
"#;

    #[test]
    fn replays_in_order_and_records_failures() {
        let log = OperationLog::parse(SCRIPT).unwrap();
        assert_eq!(log.len(), 4);

        let mut dao = Dao::genesis(&GenesisConfig::default()).unwrap();
        let results = log.replay(&mut dao);
        assert_eq!(results[2], Ok(Receipt::Claimed { amount: 300 }));
        assert_eq!(
            results[3].as_ref().unwrap_err().code(),
            ErrorCode::NoRewards
        );
        assert_eq!(dao.custodial_balance(), 200);
        assert_eq!(dao.pending_reward(&AccountId::new("deployer")), 0);
    }

    #[test]
    fn rejects_height_regression() {
        let text = r#"{"caller":"a","height":5,"op":"claim"}
{"caller":"a","height":4,"op":"claim"}"#;
        let err = OperationLog::parse(text).unwrap_err();
        assert!(matches!(err, LogError::HeightRegression { line: 2, .. }));
    }

    #[test]
    fn reports_parse_errors_with_line() {
        let err = OperationLog::parse("\n{not json}").unwrap_err();
        assert!(matches!(err, LogError::Parse { line: 2, .. }));
    }
}
