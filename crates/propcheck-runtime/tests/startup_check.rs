//! Startup checks through the built-in strategies and layered configuration.

use std::fs;

use figment::Jail;
use propcheck_core::{MatchMode, MergePolicy, PropertyValue};
use propcheck_runtime::{CheckPolicy, ConfigLoader, FileStatus, RuntimeError, StartupCheck};

#[test]
fn configured_check_loads_every_format() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "application.properties",
            "server.port=8080\ndb.password=\n",
        )?;
        jail.create_file(
            "application.yml",
            "server:\n  port: 9090\n---\nfeature:\n  flag: false\n",
        )?;
        jail.create_file(
            "db.xml",
            r#"<properties><entry key="db.user">sa</entry></properties>"#,
        )?;
        jail.create_file(
            "propcheck.toml",
            r#"
            [check]
            locations = ["application.properties", "application.yml", "db.xml", "absent.yml"]
            ignore_missing = true
            match_mode = "dotted"
            "#,
        )?;

        let config = ConfigLoader::new()
            .search_path(jail.directory())
            .without_env()
            .load()
            .unwrap();
        assert_eq!(config.check.match_mode, MatchMode::Dotted);

        let report = StartupCheck::from_config(&config.check)
            .unwrap()
            .run()
            .unwrap();

        let names: Vec<_> = report.property_sets.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "application.properties",
                "application.yml (document #0)",
                "application.yml (document #1)",
                "db.xml",
            ]
        );
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].key, "db.password");
        assert_eq!(report.files[3].status, FileStatus::Missing);

        let merged = report.merged(MergePolicy::LastWriteWins);
        assert_eq!(merged.get("server.port"), Some(&PropertyValue::Integer(9090)));
        let merged = report.merged(MergePolicy::FirstWriteWins);
        assert_eq!(merged.get("server.port"), Some(&PropertyValue::from("8080")));
        Ok(())
    });
}

#[test]
fn deny_from_environment() {
    Jail::expect_with(|jail| {
        jail.create_file("app.yaml", "name: ''\n")?;
        jail.set_env("PROPCHECK_CHECK__POLICY", "deny");
        jail.set_env("PROPCHECK_CHECK__LOCATIONS", "[app.yaml]");

        let config = ConfigLoader::new()
            .search_path(jail.directory())
            .load()
            .unwrap();
        assert_eq!(config.check.policy, CheckPolicy::Deny);

        let result = StartupCheck::from_config(&config.check).unwrap().run();
        assert!(matches!(result, Err(RuntimeError::EmptyValues { count: 1 })));
        Ok(())
    });
}

#[test]
fn malformed_file_fails_the_check() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "a: [1, 2\n").unwrap();

    let result = StartupCheck::discover().location(&path).run();
    assert!(matches!(result, Err(RuntimeError::Load(ref e)) if e.is_parse()));
}
