//! Environment-driven configuration: listener settings, backend selection,
//! and the `DIRECTORY_CONFIG` file.

mod support;

use practitioner_directory::config::ServerConfig;
use practitioner_directory::db::{
    PractitionerRepository, RepositoryConfig, RepositoryFactory, RepositoryType,
};

#[test]
fn test_server_config_defaults() {
    support::with_scoped_env(
        &[("HOST", None), ("PORT", None), ("SEED_SAMPLE_DATA", None)],
        || {
            let config = ServerConfig::from_env();
            assert_eq!(config, ServerConfig::default());
            assert_eq!(config.port, 8080);
            assert!(!config.seed_sample_data);
        },
    );
}

#[test]
fn test_server_config_from_env() {
    support::with_scoped_env(
        &[
            ("HOST", Some("127.0.0.1")),
            ("PORT", Some("3001")),
            ("SEED_SAMPLE_DATA", Some("true")),
        ],
        || {
            let config = ServerConfig::from_env();
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 3001);
            assert!(config.seed_sample_data);
        },
    );
}

#[test]
fn test_unparsable_port_keeps_default() {
    support::with_scoped_env(&[("PORT", Some("eighty"))], || {
        assert_eq!(ServerConfig::from_env().port, 8080);
    });
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_follows_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/directory")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
}

#[test]
fn test_explicit_repository_type_wins() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/directory")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_config_path_unset_yields_none() {
    support::with_scoped_env(&[("DIRECTORY_CONFIG", None)], || {
        assert!(RepositoryConfig::from_env_path().unwrap().is_none());
    });
}

#[test]
fn test_config_file_from_env_path() {
    let path = std::env::temp_dir().join(format!("directory-env-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[repository]\ntype = \"local\"\n\n[server]\nport = 4100\nseed_sample_data = true\n",
    )
    .unwrap();
    let path_str = path.to_string_lossy().to_string();

    let config = support::with_scoped_env(
        &[("DIRECTORY_CONFIG", Some(path_str.as_str())), ("PORT", None)],
        || RepositoryConfig::from_env_path().unwrap().unwrap(),
    );
    std::fs::remove_file(&path).ok();

    assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    let server = ServerConfig::default().with_settings(&config.server);
    assert_eq!(server.port, 4100);
    assert!(server.seed_sample_data);

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let repo = runtime
        .block_on(RepositoryFactory::from_repository_config(&config))
        .unwrap();
    assert!(runtime.block_on(repo.health_check()).unwrap());
}

#[test]
fn test_config_path_to_missing_file_is_error() {
    support::with_scoped_env(
        &[("DIRECTORY_CONFIG", Some("/nonexistent/directory.toml"))],
        || assert!(RepositoryConfig::from_env_path().is_err()),
    );
}
