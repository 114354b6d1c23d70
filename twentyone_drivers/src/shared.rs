use serde::{Deserialize, Serialize};
use std::fs;
use twentyone::PolicyChoice;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub table: ConfigTable,
    pub policy_simulator: ConfigPolicySimulator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigTable {
    pub number_of_decks: u8,
    pub stake: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigPolicySimulator {
    pub number_of_threads: usize,
    pub number_of_batches: u64,
    pub rounds_per_batch: u64,
    pub seed: Option<u64>,
    pub policies: Vec<String>,
}

impl ConfigPolicySimulator {
    /// Resolves the configured policy names to their [`PolicyChoice`]
    /// variants, rejecting the whole list on the first unknown name.
    pub fn parsed_policies(&self) -> Result<Vec<PolicyChoice>, serde::de::value::Error> {
        self.policies.iter().map(|name| name.parse()).collect()
    }
}

/// Reads the content of a given config file and parses it to a Config.
///
/// Panics if any error occurs.
pub fn parse_config_from_file(filename: &str) -> Config {
    let file_content = fs::read_to_string(filename).unwrap();
    serde_yaml::from_str(&file_content).unwrap()
}
