use {
    serde::{Deserialize, Serialize},
    std::path::PathBuf,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub ledger: LedgerConfig,
    pub batch: BatchConfig,
    pub holdings: HoldingsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ledger: LedgerConfig::default(),
            batch: BatchConfig::default(),
            holdings: HoldingsConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerConfig {
    pub file: PathBuf,
    /// How many times a claim is attempted in total while it keeps losing
    /// races against concurrent claims.
    pub max_retries: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("ledger.json"),
            max_retries: 3,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BatchConfig {
    pub size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { size: 100 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HoldingsConfig {
    /// JSON file with balances, NFT ownership and account facts, consulted
    /// by gated campaigns. Gated campaigns see nothing if unset.
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use {super::*, config_parser::parse_config, std::fs};

    #[test]
    fn partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");

        fs::write(&path, "log_level = \"debug\"\n\n[batch]\nsize = 25\n").unwrap();

        let cfg: Config = parse_config(&path).unwrap();

        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.batch.size, 25);
        assert_eq!(cfg.ledger, LedgerConfig::default());
        assert_eq!(cfg.holdings.file, None);
    }
}
