use {
    crate::{config::Config, home_directory::HomeDirectory},
    airdrop_ledger::{Holdings, Ledger, LedgerSnapshot, MemStore},
    airdrop_types::{JsonDeExt, JsonSerExt, Timestamp},
    anyhow::Context as _,
    std::{
        fs,
        io::Write,
        path::{Path, PathBuf},
        time::{SystemTime, UNIX_EPOCH},
    },
    tempfile::NamedTempFile,
};

/// Everything a command needs: where the files are and how to behave.
pub struct Context {
    pub home: HomeDirectory,
    pub cfg: Config,
}

impl Context {
    pub fn new(home: HomeDirectory, cfg: Config) -> Self {
        Self { home, cfg }
    }

    pub fn ledger_file(&self) -> PathBuf {
        self.home.resolve(&self.cfg.ledger.file)
    }

    /// Load the ledger from disk. A missing ledger file means an empty
    /// ledger.
    pub fn load_ledger(&self) -> anyhow::Result<Ledger<MemStore>> {
        let snapshot = read_json_or_default::<LedgerSnapshot>(&self.ledger_file())?;

        let holdings = match &self.cfg.holdings.file {
            Some(file) => read_json::<Holdings>(&self.home.resolve(file))?,
            None => Holdings::default(),
        };

        Ok(Ledger::with_querier(MemStore::from_snapshot(snapshot), holdings))
    }

    pub fn save_ledger(&self, ledger: &Ledger<MemStore>) -> anyhow::Result<()> {
        write_json_atomic(&self.ledger_file(), &ledger.store().snapshot())
    }
}

/// The current time, or the time given on the command line.
pub fn now_or(at: Option<u64>) -> anyhow::Result<Timestamp> {
    if let Some(seconds) = at {
        return Ok(Timestamp::from_seconds(seconds));
    }

    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the UNIX epoch")?;

    Ok(Timestamp::from_seconds(since_epoch.as_secs()))
}

pub fn read_json<T>(path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let data = fs::read(path).with_context(|| format!("failed to read {path:?}"))?;
    data.deserialize_json()
        .with_context(|| format!("failed to parse {path:?}"))
}

fn read_json_or_default<T>(path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    read_json(path)
}

/// Write JSON to a temporary file next to the target, then rename it over
/// the target, so readers never see a partially written file.
pub fn write_json_atomic<T>(path: &Path, data: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("failed to create directory {dir:?}"))?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data.to_json_string_pretty()?.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)
        .with_context(|| format!("failed to write {path:?}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        airdrop_testing::{mock_recipients, Allowlist, GENESIS},
        airdrop_types::ResultExt,
    };

    fn context(dir: &Path) -> Context {
        Context::new(HomeDirectory::new(dir.to_path_buf()), Config::default())
    }

    #[test]
    fn ledger_survives_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let ledger = ctx.load_ledger().unwrap();
        assert!(ledger.campaigns().should_succeed().is_empty());

        let allowlist = Allowlist::create(&ledger, mock_recipients(2));
        ledger
            .claim(&allowlist.request(airdrop_types::Addr::mock(1)), GENESIS)
            .should_succeed();
        ctx.save_ledger(&ledger).unwrap();

        let reloaded = ctx.load_ledger().unwrap();
        assert_eq!(reloaded.store().snapshot(), ledger.store().snapshot());
        assert_eq!(
            reloaded
                .get_campaign_info(allowlist.campaign_id)
                .should_succeed()
                .claimed_amount,
            100
        );
    }

    #[test]
    fn explicit_time_wins() {
        assert_eq!(now_or(Some(42)).unwrap(), Timestamp::from_seconds(42));
        assert!(now_or(None).unwrap() > GENESIS);
    }
}
