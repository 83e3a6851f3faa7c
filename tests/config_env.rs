use std::env;

use repo_cache::config::{Config, GITHUB_ACCESS_TOKEN, GITHUB_ORGANIZATION, S3_BUCKET, S3_KEY};
use serial_test::serial;

const ALL_KEYS: [&str; 4] = [GITHUB_ACCESS_TOKEN, GITHUB_ORGANIZATION, S3_BUCKET, S3_KEY];

fn set_all() {
    env::set_var(GITHUB_ACCESS_TOKEN, "ghp_test-token");
    env::set_var(GITHUB_ORGANIZATION, "acme");
    env::set_var(S3_BUCKET, "acme-public-site");
    env::set_var(S3_KEY, "data/repos.json");
}

#[test]
#[serial]
fn from_env_returns_exactly_the_four_provided_values() {
    set_all();

    let config = Config::from_env().expect("all variables set, load must succeed");

    assert_eq!(config.github_access_token, "ghp_test-token");
    assert_eq!(config.github_organization, "acme");
    assert_eq!(config.s3_bucket, "acme-public-site");
    assert_eq!(config.s3_key, "data/repos.json");
}

#[test]
#[serial]
fn each_missing_variable_fails_naming_that_key() {
    for missing in ALL_KEYS {
        set_all();
        env::remove_var(missing);

        let err = Config::from_env().expect_err("load must fail with a variable missing");
        assert_eq!(err.key, missing);
        assert!(
            err.to_string().contains(missing),
            "error message must name the missing key: {err}"
        );
    }
}

#[test]
#[serial]
fn values_are_not_validated_beyond_presence() {
    set_all();
    // An empty-but-present value is accepted; only absence is an error.
    env::set_var(GITHUB_ACCESS_TOKEN, "");

    let config = Config::from_env().expect("presence is enough");
    assert_eq!(config.github_access_token, "");
}
