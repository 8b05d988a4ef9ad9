// 💾 Scenario Store - JSON persistence for model scenarios
// A scenario bundles the funding engine input with identity metadata.
// Scenarios live as plain JSON files; the fingerprint is a SHA-256 over
// the serialized engine input, so two runs with identical inputs can be
// proven identical in audit trails.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::funding::FundingInput;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub funding: FundingInput,
}

impl Scenario {
    pub fn new(name: &str, funding: FundingInput) -> Self {
        Scenario {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            funding,
        }
    }

    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scenario file: {}", path.display()))?;
        Ok(scenario)
    }

    /// Save the scenario as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize scenario")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write scenario file: {}", path.display()))?;
        Ok(())
    }

    /// SHA-256 hex digest of the engine input. Scenario metadata (id, name)
    /// is excluded so renaming a scenario does not change its fingerprint.
    pub fn fingerprint(&self) -> String {
        let canonical =
            serde_json::to_string(&self.funding).expect("funding input serializes");
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::{FundingEntity, FundingTranche, TrancheTrigger};
    use crate::journal::AccountingPolicy;
    use crate::rounding::DEFAULT_ROUNDING;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_funding() -> FundingInput {
        FundingInput {
            model_start_date: date("2025-11-01"),
            company_ops_start_date: date("2026-01-01"),
            tranches: vec![FundingTranche {
                tranche_id: "t1".to_string(),
                label: "Seed".to_string(),
                amount: 500_000.0,
                trigger: TrancheTrigger::Scheduled {
                    date: date("2025-12-01"),
                },
                target_entity: FundingEntity::opco(),
                source: "SAFE Round 1".to_string(),
            }],
            property_requirements: vec![],
            accounting_policy_ref: AccountingPolicy::default(),
            rounding_policy: DEFAULT_ROUNDING,
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let scenario = Scenario::new("Base Case", sample_funding());
        let dir = std::env::temp_dir();
        let path = dir.join(format!("scenario-{}.json", scenario.id));

        scenario.save(&path).unwrap();
        let loaded = Scenario::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(scenario, loaded);
    }

    #[test]
    fn test_fingerprint_is_stable_and_ignores_metadata() {
        let a = Scenario::new("Base Case", sample_funding());
        let mut b = Scenario::new("Renamed Copy", sample_funding());
        b.description = Some("copy".to_string());

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_input() {
        let a = Scenario::new("Base Case", sample_funding());
        let mut funding = sample_funding();
        funding.tranches[0].amount = 600_000.0;
        let b = Scenario::new("Base Case", funding);

        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_load_missing_file_gives_context() {
        let err = Scenario::load(Path::new("/nonexistent/scenario.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read scenario file"));
    }
}
