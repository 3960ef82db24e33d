// tests/pipeline_config.rs
use std::{env, fs};
use tweet_sentiment_analyzer::config::{
    PipelineConfig, ENV_CACHE_CAPACITY, ENV_DEFAULT_TOP_N, ENV_PIPELINE_CONFIG_PATH,
};

#[serial_test::serial]
#[test]
fn env_path_wins_and_env_values_override_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("pipeline.toml");
    fs::write(
        &path,
        "[aggregation]\ndefault_top_n = 5\n\n[cache]\ncapacity = 8\n",
    )
    .unwrap();

    env::set_var(ENV_PIPELINE_CONFIG_PATH, path.display().to_string());
    env::remove_var(ENV_DEFAULT_TOP_N);
    env::remove_var(ENV_CACHE_CAPACITY);

    let cfg = PipelineConfig::load().unwrap();
    assert_eq!(cfg.aggregation.default_top_n, 5);
    assert_eq!(cfg.cache.capacity, 8);

    // single-value env override beats the file
    env::set_var(ENV_DEFAULT_TOP_N, "3");
    let cfg = PipelineConfig::load().unwrap();
    assert_eq!(cfg.aggregation.default_top_n, 3);
    assert_eq!(cfg.cache.capacity, 8);

    env::remove_var(ENV_DEFAULT_TOP_N);
    env::remove_var(ENV_PIPELINE_CONFIG_PATH);
}

#[serial_test::serial]
#[test]
fn env_path_to_missing_file_is_an_error() {
    env::set_var(ENV_PIPELINE_CONFIG_PATH, "/definitely/not/here.toml");
    assert!(PipelineConfig::load().is_err());
    env::remove_var(ENV_PIPELINE_CONFIG_PATH);
}

#[serial_test::serial]
#[test]
fn missing_default_file_falls_back_to_defaults() {
    // Isolate CWD in a temp dir so the repo's config/ doesn't interfere
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var(ENV_PIPELINE_CONFIG_PATH);
    env::remove_var(ENV_DEFAULT_TOP_N);
    env::remove_var(ENV_CACHE_CAPACITY);

    let cfg = PipelineConfig::load().unwrap();
    assert_eq!(cfg.aggregation.default_top_n, 10);

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn zero_override_is_clamped_to_one() {
    env::remove_var(ENV_PIPELINE_CONFIG_PATH);
    env::set_var(ENV_DEFAULT_TOP_N, "0");
    let cfg = PipelineConfig::load().unwrap();
    assert_eq!(cfg.aggregation.default_top_n, 1);
    env::remove_var(ENV_DEFAULT_TOP_N);
}
