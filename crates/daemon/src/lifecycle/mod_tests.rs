// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

const VARS: &[&str] = &[
    "NUDGE_PASSWORD",
    "NUDGE_HOST",
    "NUDGE_PORT",
    "NUDGE_TIME_DELAY",
    "NUDGE_REFRESH_TOKEN",
    "NUDGE_CLIENT_ID",
    "NUDGE_CLIENT_SECRET",
    "NUDGE_PROFILES_PATH",
    "NUDGE_LOG_PATH",
    "NUDGE_DRAIN_TIMEOUT_MS",
];

fn with_env(vars: &[(&str, &str)], f: impl FnOnce()) {
    for name in VARS {
        std::env::remove_var(name);
    }
    for (name, value) in vars {
        std::env::set_var(name, value);
    }
    f();
    for name in VARS {
        std::env::remove_var(name);
    }
}

#[test]
#[serial]
fn defaults_apply_when_unset() {
    with_env(&[], || {
        let config = Config::load().unwrap();
        assert_eq!(config.password, None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9999);
        assert_eq!(config.time_delay, Duration::from_secs(3));
        assert_eq!(config.fallback, None);
        assert_eq!(config.profiles_path, PathBuf::from("profiles.json"));
        assert_eq!(config.log_path, PathBuf::from("event-log.txt"));
        assert_eq!(config.drain_timeout, Duration::from_millis(5000));
    });
}

#[test]
#[serial]
fn values_are_read_from_env() {
    with_env(
        &[
            ("NUDGE_PASSWORD", "hunter2"),
            ("NUDGE_HOST", "127.0.0.1"),
            ("NUDGE_PORT", "8080"),
            ("NUDGE_TIME_DELAY", "7"),
            ("NUDGE_PROFILES_PATH", "/etc/nudge/profiles.json"),
            ("NUDGE_LOG_PATH", "/var/log/nudge.txt"),
            ("NUDGE_DRAIN_TIMEOUT_MS", "250"),
        ],
        || {
            let config = Config::load().unwrap();
            assert_eq!(config.password, Some(Secret::new("hunter2")));
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 8080);
            assert_eq!(config.time_delay, Duration::from_secs(7));
            assert_eq!(config.profiles_path, PathBuf::from("/etc/nudge/profiles.json"));
            assert_eq!(config.log_path, PathBuf::from("/var/log/nudge.txt"));
            assert_eq!(config.drain_timeout, Duration::from_millis(250));
        },
    );
}

#[test]
#[serial]
fn empty_values_count_as_unset() {
    with_env(&[("NUDGE_PASSWORD", ""), ("NUDGE_PORT", "")], || {
        let config = Config::load().unwrap();
        assert_eq!(config.password, None);
        assert_eq!(config.port, 9999);
    });
}

#[test]
#[serial]
fn partial_fallback_credentials_are_kept() {
    with_env(&[("NUDGE_REFRESH_TOKEN", "rt")], || {
        let fallback = Config::load().unwrap().fallback.unwrap();
        assert_eq!(fallback.refresh_token, Some(Secret::new("rt")));
        assert_eq!(fallback.client_id, None);
        assert!(!fallback.is_complete());
    });
}

#[test]
#[serial]
fn complete_fallback_credentials() {
    with_env(
        &[
            ("NUDGE_REFRESH_TOKEN", "rt"),
            ("NUDGE_CLIENT_ID", "cid"),
            ("NUDGE_CLIENT_SECRET", "cs"),
        ],
        || {
            let fallback = Config::load().unwrap().fallback.unwrap();
            assert_eq!(fallback, Credentials::new("rt", "cid", "cs"));
        },
    );
}

#[test]
#[serial]
fn invalid_numbers_are_rejected() {
    let cases = [
        ("NUDGE_PORT", "http"),
        ("NUDGE_PORT", "70000"),
        ("NUDGE_TIME_DELAY", "-1"),
        ("NUDGE_DRAIN_TIMEOUT_MS", "soon"),
    ];
    for (name, value) in cases {
        with_env(&[(name, value)], || {
            let err = Config::load().unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidVar { name: n, value: v } if *n == name && v == value),
                "unexpected error for {name}={value}: {err}"
            );
        });
    }
}

#[test]
#[serial]
fn debug_output_hides_secrets() {
    with_env(&[("NUDGE_PASSWORD", "hunter2"), ("NUDGE_CLIENT_SECRET", "cs-value")], || {
        let debug = format!("{:?}", Config::load().unwrap());
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("cs-value"));
    });
}
