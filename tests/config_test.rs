use std::{collections::HashMap, time::Duration};

use spotufy::{
    config::{Config, DEFAULT_API_URL, DEFAULT_REDIRECT_URI},
    error::Error,
    types::Scope,
};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

const SECRETS: [(&str, &str); 2] = [
    ("SPOTIFY_API_AUTH_CLIENT_ID", "id"),
    ("SPOTIFY_API_AUTH_CLIENT_SECRET", "secret"),
];

#[test]
fn test_config_defaults() {
    let config = Config::from_lookup(lookup(&SECRETS)).unwrap();

    assert_eq!(config.client_id, "id");
    assert_eq!(config.client_secret, "secret");
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.scopes, Scope::ALL.to_vec());
}

#[test]
fn test_config_overrides() {
    let mut pairs = SECRETS.to_vec();
    pairs.push(("SPOTIFY_API_URL", "http://localhost:8080/v1"));
    pairs.push(("SERVER_ADDRESS", "127.0.0.1:7777"));
    pairs.push(("HTTP_TIMEOUT_SECS", "30"));

    let config = Config::from_lookup(lookup(&pairs)).unwrap();

    assert_eq!(config.api_url, "http://localhost:8080/v1");
    assert_eq!(config.server_address, "127.0.0.1:7777");
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_config_missing_client_id() {
    let err = Config::from_lookup(lookup(&SECRETS[1..])).unwrap_err();

    assert!(matches!(err, Error::ConfigMissing(ref key) if key == "SPOTIFY_API_AUTH_CLIENT_ID"));
}

#[test]
fn test_config_blank_secret_counts_as_missing() {
    let pairs = [
        ("SPOTIFY_API_AUTH_CLIENT_ID", "id"),
        ("SPOTIFY_API_AUTH_CLIENT_SECRET", "   "),
    ];

    let err = Config::from_lookup(lookup(&pairs)).unwrap_err();

    assert!(matches!(err, Error::ConfigMissing(ref key) if key == "SPOTIFY_API_AUTH_CLIENT_SECRET"));
}

#[test]
fn test_config_invalid_timeout() {
    for value in ["abc", "0", "-5"] {
        let mut pairs = SECRETS.to_vec();
        pairs.push(("HTTP_TIMEOUT_SECS", value));

        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, Error::ConfigMissing(_)), "{value}");
    }
}
