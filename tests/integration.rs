use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use peer_auth::auth::{AllowedPeerAuthenticator, DEFAULT_MAXIMUM_SIZE};
use peer_auth::config::PeerAuthConfig;
use peer_auth::encryptor::{
    DigestPasswordEncryptor, EncryptorKind, PasswordEncryptor, PasswordPolicy, unwrap_encrypted,
};
use peer_auth::peers::{InlinePeerSource, Peer, PeerRegistry, PeerSource};
use peer_auth::{AuthOutcome, Authenticator, ConfigurationError};

// Helper to locate a fixture file
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// Helper to build a config that reads a fixture file
fn file_config(name: &str, encryptor: EncryptorKind) -> PeerAuthConfig {
    PeerAuthConfig {
        credential_file: Some(fixture(name)),
        encryptor,
        ..PeerAuthConfig::default()
    }
}

// Helper to write a TOML config file
fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_plaintext_registry_scenario() {
    let mut registry = PeerRegistry::new();
    registry.insert(Peer::new("bob", "secret")).unwrap();
    registry.insert(Peer::new("alice", "1234")).unwrap();
    let authenticator = AllowedPeerAuthenticator::new(registry, PasswordPolicy::Plaintext);

    assert_eq!(authenticator.authenticate("bob", "secret"), AuthOutcome::allowed("bob"));
    assert_eq!(authenticator.authenticate("bob", "wrong"), AuthOutcome::Denied);
    assert_eq!(authenticator.authenticate("eve", "secret"), AuthOutcome::Denied);
}

#[test]
fn test_inline_default_delimiter_scenario() {
    let registry = InlinePeerSource::with_default_delimiter("bob;alice", "foo;bar")
        .into_registry()
        .unwrap();
    assert_eq!(
        registry.find_all(),
        [Peer::new("bob", "foo"), Peer::new("alice", "bar")]
    );
}

#[test]
fn test_basic_encrypted_file_scenario() {
    let authenticator = file_config("test-peers-encrypted-basic.properties", EncryptorKind::Basic)
        .create_authenticator()
        .unwrap();

    assert!(authenticator.authenticate("foo", "bar").is_allowed());
    assert!(!authenticator.authenticate("foo", "wrong password").is_allowed());
    assert!(!authenticator.authenticate("not in", "our test properties").is_allowed());

    let raw_hash = authenticator
        .registry()
        .find_by_username("foo")
        .map(|peer| peer.secret().to_string())
        .next()
        .unwrap();
    assert_eq!(raw_hash, "AQIDBAUGBwi7nCDSvDFV+BVws4pmuUHi");
    assert!(!authenticator.authenticate("foo", &raw_hash).is_allowed());
    assert!(!authenticator.authenticate("foo", "ENC(AQIDBAUGBwi7nCDSvDFV+BVws4pmuUHi)").is_allowed());
}

#[test]
fn test_same_password_different_salts() {
    let authenticator = file_config("test-peers-encrypted-basic.properties", EncryptorKind::Basic)
        .create_authenticator()
        .unwrap();
    assert!(authenticator.authenticate("bob", "bar").is_allowed());
}

#[test]
fn test_strong_encrypted_file() {
    let authenticator = file_config("test-peers-encrypted-strong.properties", EncryptorKind::Strong)
        .create_authenticator()
        .unwrap();
    assert!(authenticator.authenticate("foo", "bar").is_allowed());
    assert!(!authenticator.authenticate("foo", "baz").is_allowed());
}

#[test]
fn test_mismatched_inline_lengths_scenario() {
    let config = PeerAuthConfig {
        users: Some("a;b".to_string()),
        passwords: Some("x".to_string()),
        ..PeerAuthConfig::default()
    };
    let err = config.build().err().unwrap();
    assert!(matches!(
        err,
        ConfigurationError::LengthMismatch { users: 2, passwords: 1 }
    ));
}

#[test]
fn test_empty_inline_username_is_rejected() {
    let config = PeerAuthConfig {
        users: Some(";bob".to_string()),
        passwords: Some("x;y".to_string()),
        ..PeerAuthConfig::default()
    };
    let err = config.build().err().unwrap();
    assert!(matches!(err, ConfigurationError::EmptyUsername));
}

#[test]
fn test_trailing_inline_delimiters() {
    let config = PeerAuthConfig {
        users: Some("a;b;".to_string()),
        passwords: Some("x;y".to_string()),
        ..PeerAuthConfig::default()
    };
    let authenticator = config.build().unwrap();
    assert!(authenticator.authenticate("b", "y").is_allowed());

    let config = PeerAuthConfig {
        users: Some("a;b".to_string()),
        passwords: Some("x;".to_string()),
        ..PeerAuthConfig::default()
    };
    assert!(matches!(
        config.build().err().unwrap(),
        ConfigurationError::LengthMismatch { users: 2, passwords: 1 }
    ));
}

#[test]
fn test_cache_without_maximum_size_is_bounded() {
    let config = PeerAuthConfig {
        users: Some("bob".to_string()),
        passwords: Some("secret".to_string()),
        cache_policy: Some("expireAfterAccess=1h".to_string()),
        ..PeerAuthConfig::default()
    };
    let cached = config.create_caching_authenticator().unwrap();
    for i in 0..DEFAULT_MAXIMUM_SIZE * 2 {
        assert!(!cached.authenticate("bob", &format!("guess{i}")).is_allowed());
    }
    assert!(cached.size() <= DEFAULT_MAXIMUM_SIZE);
    assert!(cached.authenticate("bob", "secret").is_allowed());
}

#[test]
fn test_plaintext_credential_file() {
    let authenticator = file_config("test-peers.properties", EncryptorKind::None)
        .create_authenticator()
        .unwrap();

    assert_eq!(authenticator.registry().len(), 2);
    assert!(authenticator.registry().contains(&Peer::new("testuser", "testpass")));
    assert!(authenticator.authenticate("foo", "bar").is_allowed());
    assert!(!authenticator.authenticate("not in", "our test properties").is_allowed());
}

#[test]
fn test_duplicate_usernames_in_file() {
    let err = file_config("test-peers-duplicate.properties", EncryptorKind::None)
        .create_authenticator()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::DuplicateUsername(ref name) if name == "foo"));
}

#[test]
fn test_missing_credential_file() {
    let err = file_config("no-such-file.properties", EncryptorKind::None)
        .create_authenticator()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::CredentialSource { .. }));
}

#[test]
fn test_caching_matches_direct_authentication() {
    let config = PeerAuthConfig {
        cache_policy: Some("maximumSize=100, expireAfterAccess=10m".to_string()),
        ..file_config("test-peers.properties", EncryptorKind::None)
    };
    let direct = config.create_authenticator().unwrap();
    let cached = config.create_caching_authenticator().unwrap();

    let attempts = [
        ("foo", "bar"),
        ("foo", "baz"),
        ("testuser", "testpass"),
        ("nobody", "bar"),
        ("", ""),
    ];
    for _ in 0..3 {
        for (username, password) in attempts {
            assert_eq!(
                cached.authenticate(username, password),
                direct.authenticate(username, password),
                "{username}/{password}"
            );
        }
    }
    assert_eq!(cached.stats().misses, attempts.len() as u64);
    assert_eq!(cached.stats().hits, 2 * attempts.len() as u64);
}

#[test]
fn test_load_toml_config() {
    let file = write_config(&format!(
        "realm = \"internal\"\ncredential_file = '{}'\nencryptor = \"basic\"\ncache_policy = \"maximumSize=10, expireAfterAccess=1m\"\n",
        fixture("test-peers-encrypted-basic.properties").display()
    ));

    let config = PeerAuthConfig::load(file.path()).unwrap();
    assert_eq!(config.realm, "internal");
    assert_eq!(config.encryptor, EncryptorKind::Basic);
    assert_eq!(config.challenge(), "Basic realm=\"internal\"");

    let authenticator = config.build().unwrap();
    assert!(authenticator.authenticate("foo", "bar").is_allowed());
    assert!(!authenticator.authenticate("foo", "nope").is_allowed());
}

#[test]
fn test_load_inline_toml_config() {
    let file = write_config("users = \"bob|alice\"\npasswords = \"secret|1234\"\ndelimiter = \"|\"\n");
    let authenticator = PeerAuthConfig::load(file.path()).unwrap().build().unwrap();
    assert_eq!(authenticator.authenticate("alice", "1234"), AuthOutcome::allowed("alice"));
}

#[test]
fn test_unknown_encryptor_is_rejected_at_load() {
    let file = write_config("users = \"bob\"\npasswords = \"secret\"\nencryptor = \"rot13\"\n");
    let err = PeerAuthConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigurationError::Load(_)));
    assert!(err.to_string().contains("rot13"));
}

#[test]
fn test_config_without_source_is_rejected_at_load() {
    let file = write_config("realm = \"lonely\"\n");
    let err = PeerAuthConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigurationError::NoCredentialSource));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cached_authentication() {
    let config = PeerAuthConfig {
        users: Some("bob;alice".to_string()),
        passwords: Some("secret;1234".to_string()),
        cache_policy: Some("maximumSize=4, expireAfterAccess=1m".to_string()),
        ..PeerAuthConfig::default()
    };
    let authenticator: Arc<dyn Authenticator> = config.build().unwrap();

    let mut handles = Vec::new();
    for i in 0..64 {
        let authenticator = Arc::clone(&authenticator);
        handles.push(tokio::task::spawn_blocking(move || {
            let (username, password, expected) = match i % 4 {
                0 => ("bob", "secret", true),
                1 => ("alice", "1234", true),
                2 => ("bob", "1234", false),
                _ => ("mallory", "secret", false),
            };
            for _ in 0..50 {
                assert_eq!(
                    authenticator.authenticate(username, password).is_allowed(),
                    expected
                );
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
}

#[test]
fn test_encrypt_tool_output_verifies() {
    let output = Command::new(env!("CARGO_BIN_EXE_peer-auth-encrypt"))
        .args(["--type", "basic", "--password", "s3cr3t"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout).unwrap();
    let printed = printed.trim();
    assert!(printed.starts_with("ENC(") && printed.ends_with(')'));
    assert!(DigestPasswordEncryptor::basic().check_password("s3cr3t", unwrap_encrypted(printed)));
}

#[test]
fn test_encrypt_tool_rejects_none() {
    let output = Command::new(env!("CARGO_BIN_EXE_peer-auth-encrypt"))
        .args(["--type", "none", "--password", "s3cr3t"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
