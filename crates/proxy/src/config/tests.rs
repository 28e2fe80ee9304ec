use std::io::Write;

use super::*;

#[test]
fn test_empty_config_uses_defaults() {
	let config = ProxyConfig::from_toml_str("").unwrap();
	assert_eq!(config, ProxyConfig::default());
	assert_eq!(config.builtins, vec![Builtin::Cut]);
	assert_eq!(config.on_init_failure, InitFailurePolicy::KeepCut);
}

#[test]
fn test_full_config() {
	let config = ProxyConfig::from_toml_str(
		r#"
		label = "token-proxy"
		owner = "alice"
		builtins = ["cut", "loupe", "ownership"]
		on_init_failure = "roll-back"
		"#,
	)
	.unwrap();
	assert_eq!(
		config,
		ProxyConfig::default()
			.with_label("token-proxy")
			.with_owner("alice")
			.with_builtins([Builtin::Cut, Builtin::Loupe, Builtin::Ownership])
			.with_init_failure(InitFailurePolicy::RollBack)
	);
}

#[test]
fn test_unknown_fields_and_values_are_rejected() {
	assert!(matches!(
		ProxyConfig::from_toml_str("lable = \"typo\""),
		Err(ConfigError::Parse(_))
	));
	assert!(matches!(
		ProxyConfig::from_toml_str("builtins = [\"teleport\"]"),
		Err(ConfigError::Parse(_))
	));
}

#[test]
fn test_load_from_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "label = \"from-disk\"\nbuiltins = []").unwrap();
	let config = ProxyConfig::load(file.path()).unwrap();
	assert_eq!(config.label, "from-disk");
	assert!(config.builtins.is_empty());

	let missing = ProxyConfig::load(&file.path().with_extension("missing"));
	assert!(matches!(missing, Err(ConfigError::Io { .. })));
}
