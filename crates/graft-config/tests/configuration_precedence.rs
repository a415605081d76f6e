//! Layer precedence for [`Config`]: defaults < file < environment < CLI.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use graft_config::{Config, LogFormat, default_log_filter, default_log_format};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const ENV_KEYS: &[&str] = &["GRAFT_LOG_FILTER", "GRAFT_LOG_FORMAT", "GRAFT_CONFIG_PATH"];

/// Serialises environment access and restores the variables it touched.
struct Harness {
    temp_dir: TempDir,
    args: RefCell<Vec<OsString>>,
    previous: Vec<(&'static str, Option<OsString>)>,
    loaded: RefCell<Option<Result<Config, String>>>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = ENV_KEYS
            .iter()
            .map(|key| (*key, std::env::var_os(key)))
            .collect();
        for key in ENV_KEYS {
            // Environment mutation is unsafe on edition 2024; the mutex keeps
            // these tests from racing each other.
            unsafe { std::env::remove_var(key) };
        }
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            args: RefCell::new(vec![OsString::from("graft")]),
            previous,
            loaded: RefCell::new(None),
            _guard: guard,
        }
    }

    fn write_config(&self, contents: &str) {
        let path = self.temp_dir.path().join("graft.toml");
        fs::write(&path, contents).expect("write config");
        self.push_arg("--config-path");
        self.push_arg(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    fn push_arg(&self, arg: impl Into<OsString>) {
        self.args.borrow_mut().push(arg.into());
    }

    fn try_load(&self) -> Result<Config, String> {
        Config::load_from_iter(self.args.borrow().clone()).map_err(|error| error.to_string())
    }

    fn load(&self) -> Config {
        self.loaded
            .borrow_mut()
            .get_or_insert_with(|| self.try_load())
            .clone()
            .unwrap_or_else(|error| panic!("configuration failed to load: {error}"))
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            match value {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
fn built_in_defaults_apply_without_overrides(harness: Harness) {
    let config = harness.load();
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config, Config::default());
}

#[rstest]
fn file_overrides_defaults(harness: Harness) {
    harness.write_config("log_filter = \"info\"\nlog_format = \"json\"\n");

    let config = harness.load();
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.log_format(), LogFormat::Json);
}

#[rstest]
fn environment_overrides_file(harness: Harness) {
    harness.write_config("log_filter = \"info\"\n");
    harness.set_env("GRAFT_LOG_FILTER", "debug");

    assert_eq!(harness.load().log_filter(), "debug");
}

#[rstest]
fn cli_overrides_environment(harness: Harness) {
    harness.set_env("GRAFT_LOG_FILTER", "debug");
    harness.push_arg("--log-filter");
    harness.push_arg("trace");

    assert_eq!(harness.load().log_filter(), "trace");
}

#[rstest]
fn malformed_file_fails_fast(harness: Harness) {
    harness.write_config("log_format = [\n");

    let error = harness.try_load().expect_err("loading must fail");
    assert!(!error.is_empty());
}

// =============================================================================
// Behaviour steps
// =============================================================================

#[given("a configuration file setting the log filter to \"{filter}\"")]
fn given_configuration_file(harness: &Harness, filter: String) {
    harness.write_config(&format!("log_filter = \"{filter}\"\n"));
}

#[given("the environment overrides the log filter to \"{filter}\"")]
fn given_environment_filter(harness: &Harness, filter: String) {
    harness.set_env("GRAFT_LOG_FILTER", &filter);
}

#[given("the environment overrides the log format to \"{format}\"")]
fn given_environment_format(harness: &Harness, format: String) {
    harness.set_env("GRAFT_LOG_FORMAT", &format);
}

#[when("the CLI sets the log format to \"{format}\"")]
fn when_cli_format(harness: &Harness, format: String) {
    harness.push_arg("--log-format");
    harness.push_arg(format);
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    let _ = harness.load();
}

#[then("loading the configuration resolves the log filter to \"{filter}\"")]
fn then_resolved_filter(harness: &Harness, filter: String) {
    assert_eq!(harness.load().log_filter(), filter);
}

#[then("loading the configuration resolves the log format to \"{format}\"")]
fn then_resolved_format(harness: &Harness, format: String) {
    let expected = format
        .parse::<LogFormat>()
        .unwrap_or_else(|error| panic!("invalid expected format '{format}': {error}"));
    assert_eq!(harness.load().log_format(), expected);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply without overrides"
)]
fn defaults_scenario(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A configuration file overrides the defaults"
)]
fn file_scenario(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment overrides the configuration file"
)]
fn environment_scenario(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The command line overrides the environment"
)]
fn cli_scenario(#[from(harness)] harness: Harness) {
    let _ = harness;
}
