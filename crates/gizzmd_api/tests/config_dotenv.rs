use gizzmd_api::{ApiConfig, AppEnv, ConfigError};
use std::fs;

const FULL_ENV_FILE: &str = "\
# local development settings
GIZZMD_ENV=development
GIZZMD_DB_PATH=/var/tmp/gizzmd-dotenv.db
GIZZMD_LOG_DIR=/var/tmp/gizzmd-dotenv-logs
GIZZMD_JWT_SECRET=\"from-dotenv\"
";

#[test]
fn dotenv_file_supplies_unset_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, FULL_ENV_FILE).unwrap();

    let config = ApiConfig::from_env_and_file(&path).unwrap();
    assert_eq!(config.env, AppEnv::Development);
    assert_eq!(config.db_path.to_str(), Some("/var/tmp/gizzmd-dotenv.db"));
    assert_eq!(config.auth.secret, "from-dotenv");
    assert_eq!(config.auth.token_ttl_secs, 3600);
}

#[test]
fn missing_dotenv_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ApiConfig::from_env_and_file(dir.path().join(".env")).unwrap_err();
    assert_eq!(err, ConfigError::Missing("GIZZMD_ENV"));
}

#[test]
fn malformed_dotenv_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "GIZZMD_ENV=development\nthis line has no separator\n").unwrap();

    match ApiConfig::from_env_and_file(&path).unwrap_err() {
        ConfigError::EnvFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
