use figment::Jail;
use scan_config::ScanConfig;

#[test]
fn prefixed_env_fills_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("CALLSCAN_LLAMA__API_KEY", "nv-key");
        jail.set_env("CALLSCAN_RUN__CONCURRENCY", "3");

        let config = ScanConfig::load().expect("config loads");
        assert_eq!(config.llama.api_key, "nv-key");
        assert_eq!(config.run.concurrency, 3);
        Ok(())
    });
}

#[test]
fn legacy_variables_fill_provider_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("SARVAM_API_URL", "http://sarvam.local/v1/chat/completions");
        jail.set_env("SARVAM_SUBSCRIPTION_KEY", "sub-key");
        jail.set_env("AZURE_OPENAI_API_KEY", "azure-key");

        let config = ScanConfig::load().expect("config loads");
        assert_eq!(config.sarvam.url, "http://sarvam.local/v1/chat/completions");
        assert_eq!(config.sarvam.api_key, "sub-key");
        assert_eq!(config.openai.api_key, "azure-key");
        assert!(config.sarvam.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_legacy_variables() {
    Jail::expect_with(|jail| {
        jail.set_env("LLAMA_API_KEY", "legacy");
        jail.set_env("CALLSCAN_LLAMA__API_KEY", "prefixed");

        let config = ScanConfig::load().expect("config loads");
        assert_eq!(config.llama.api_key, "prefixed");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".callscan")?;
        jail.create_file(
            ".callscan/config.toml",
            r#"
[run]
backend = "sarvam-m"
"#,
        )?;
        jail.set_env("CALLSCAN_RUN__BACKEND", "gpt4o");

        let config = ScanConfig::load().expect("config loads");
        assert_eq!(config.run.backend, "gpt4o");
        Ok(())
    });
}
