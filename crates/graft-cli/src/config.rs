//! Configuration loading helpers for the graft CLI.
//!
//! Leading configuration flags are split off for `ortho_config` so the
//! loader only receives flags it understands, while `clap` parses the
//! remaining global options and subcommand.

use std::ffi::{OsStr, OsString};

use graft_config::Config;
use ortho_config::OrthoConfig;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// any other argument. Later occurrences are handed to `clap`, which
    /// rejects them as unknown.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        let Some(flag_text) = argument_text.strip_prefix("--") else {
            return FlagAction::Skip;
        };

        let (flag, has_inline_value) = match flag_text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (flag_text, false),
        };

        if super::CONFIG_CLI_FLAGS
            .iter()
            .any(|known| known.strip_prefix("--") == Some(flag))
        {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut consumed = 0usize;
    let mut pending_value = false;

    for argument in rest {
        if pending_value {
            config_arguments.push(argument.clone());
            pending_value = false;
            consumed += 1;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                pending_value = needs_value;
                consumed += 1;
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_start: consumed + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn inline_value_flags_do_not_need_follow_up_value() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--log-filter=debug"));
        assert!(matches!(result, FlagAction::Include { needs_value: false }));
    }

    #[test]
    fn separate_value_flags_consume_following_argument() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--log-format"));
        assert!(matches!(result, FlagAction::Include { needs_value: true }));
    }

    #[rstest]
    #[case("add")]
    #[case("--root")]
    #[case("--log-filterx")]
    fn other_arguments_stop_the_scan(#[case] argument: &str) {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new(argument));
        assert!(matches!(result, FlagAction::Skip));
    }

    #[test]
    fn leading_config_flags_are_split_from_the_command() {
        let args = os_args(&[
            "graft",
            "--log-filter",
            "debug",
            "--log-format=json",
            "--root",
            "demo",
            "add",
        ]);

        let split = split_config_arguments(&args);

        assert_eq!(
            split.config_arguments,
            os_args(&["graft", "--log-filter", "debug", "--log-format=json"])
        );
        assert_eq!(split.command_start, 4);
    }

    #[test]
    fn command_only_invocations_forward_just_the_program() {
        let args = os_args(&["graft", "update", "--log-filter", "debug"]);

        let split = split_config_arguments(&args);

        assert_eq!(split.config_arguments, os_args(&["graft"]));
        assert_eq!(split.command_start, 1);
    }

    #[test]
    fn loader_without_config_flags_uses_built_in_defaults() {
        let config = OrthoConfigLoader
            .load(&os_args(&["graft"]))
            .unwrap_or_else(|error| panic!("configuration failed to load: {error}"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_arguments_split_to_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert_eq!(split.command_start, 0);
    }
}
