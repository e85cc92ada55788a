use {
    crate::{ConfigParserError, ConfigParserResult},
    config::{Config, Environment, File, FileFormat},
    serde::de::DeserializeOwned,
    std::path::Path,
};

/// Load a TOML config file, then apply overrides from environment variables.
///
/// Nested keys are separated by a double underscore in variable names, e.g.
/// `LEDGER__FILE` overrides `ledger.file`. A missing file is not an error; the
/// deserialized type is expected to fill in defaults (`#[serde(default)]`).
pub fn parse_config<P, D>(path: P) -> ConfigParserResult<D>
where
    P: AsRef<Path>,
    D: DeserializeOwned,
{
    let path = path.as_ref();
    let name = path.to_str().ok_or_else(|| ConfigParserError::NonUtf8Path {
        path: path.to_path_buf(),
    })?;

    let env_override = Environment::default().separator("__");

    let config = Config::builder()
        .add_source(File::new(name, FileFormat::Toml).required(false))
        .add_source(env_override)
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use {super::*, assertor::*, std::fs};

    #[derive(Debug, serde::Deserialize)]
    #[serde(default)]
    struct TestSettings {
        log_level: String,
        parser_test: ParserTest,
    }

    impl Default for TestSettings {
        fn default() -> Self {
            Self {
                log_level: "info".to_string(),
                parser_test: ParserTest::default(),
            }
        }
    }

    #[derive(Debug, Default, serde::Deserialize)]
    #[serde(default)]
    struct ParserTest {
        file: String,
        retries: u32,
    }

    #[test]
    fn parsing_config_file_with_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");

        fs::write(&path, "log_level = \"debug\"\n\n[parser_test]\nfile = \"a.json\"\nretries = 3\n")
            .unwrap();

        std::env::set_var("PARSER_TEST__FILE", "b.json");

        let config: TestSettings = parse_config(&path).expect("failed to parse file");

        std::env::remove_var("PARSER_TEST__FILE");

        assert_that!(config.log_level.as_str()).is_equal_to("debug");
        assert_that!(config.parser_test.file.as_str()).is_equal_to("b.json");
        assert_that!(config.parser_test.retries).is_equal_to(3);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config: TestSettings =
            parse_config(dir.path().join("missing.toml")).expect("failed to parse defaults");

        assert_that!(config.log_level.as_str()).is_equal_to("info");
        assert_that!(config.parser_test.retries).is_equal_to(0);
    }
}
