use {
    anyhow::anyhow,
    home::home_dir,
    std::path::{Path, PathBuf},
};

// relative to user home directory (~)
const DEFAULT_APP_DIR: &str = ".airdrop";

/// Where the CLI keeps its config file and ledger.
pub struct HomeDirectory {
    home: PathBuf,
}

impl HomeDirectory {
    pub fn new(home: PathBuf) -> Self {
        Self { home }
    }

    /// Use the given directory, or `~/.airdrop` if none is given.
    pub fn new_or_default(home: Option<PathBuf>) -> anyhow::Result<Self> {
        let home = match home {
            Some(dir) => dir,
            None => home_dir()
                .ok_or(anyhow!("failed to find home directory"))?
                .join(DEFAULT_APP_DIR),
        };

        Ok(Self::new(home))
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("app.toml")
    }

    /// Resolve a path from the config file. Relative paths are relative to
    /// the home directory.
    pub fn resolve<P>(&self, path: P) -> PathBuf
    where
        P: AsRef<Path>,
    {
        self.home.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolving_paths() {
        let dir = HomeDirectory::new(PathBuf::from("/tmp/airdrop"));

        assert_eq!(dir.config_file(), PathBuf::from("/tmp/airdrop/app.toml"));
        assert_eq!(dir.resolve("ledger.json"), PathBuf::from("/tmp/airdrop/ledger.json"));
        assert_eq!(dir.resolve("/var/ledger.json"), PathBuf::from("/var/ledger.json"));
    }
}
