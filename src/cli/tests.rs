//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;

const MANIFEST: &str = r#"
routes:
  - key: home
    path: /
    handler: Home@index
  - key: page
    path: '/page/{id}'
    handler: Page@show
    where: { id: '\d+' }
  - key: page.update
    method: PUT
    path: '/page/{id}'
    handler: Page@update
    where: { id: '\d+' }
"#;

fn manifest_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    execute(&cli.command, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_match_command_parses_flags() {
    let cli = Cli::try_parse_from([
        "routeway",
        "match",
        "--manifest",
        "routes.yaml",
        "--method",
        "post",
        "--override",
        "PUT",
        "/page/1",
    ])
    .unwrap();

    match cli.command {
        Commands::Match {
            manifest,
            method,
            method_override,
            path,
        } => {
            assert_eq!(manifest.to_string_lossy(), "routes.yaml");
            assert_eq!(method, "post");
            assert_eq!(method_override.as_deref(), Some("PUT"));
            assert_eq!(path, "/page/1");
        }
        _ => panic!("Expected Match command"),
    }
    assert_eq!(cli.log_level, "warn");
}

#[test]
fn test_generate_command_args() {
    let cli = Cli::try_parse_from([
        "routeway", "generate", "-m", "r.yaml", "page", "--arg", "id=4", "--arg", "q=a=b",
    ])
    .unwrap();
    match cli.command {
        Commands::Generate {
            name,
            args,
            partial,
            ..
        } => {
            assert_eq!(name, "page");
            assert_eq!(
                args,
                vec![
                    ("id".to_string(), "4".to_string()),
                    ("q".to_string(), "a=b".to_string())
                ]
            );
            assert!(!partial);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_rejects_malformed_arg() {
    let result = Cli::try_parse_from(["routeway", "generate", "-m", "r.yaml", "page", "--arg", "id"]);
    assert!(result.is_err());
}

#[test]
fn test_routes_output() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();
    let output = run(&["routeway", "routes", "--manifest", path]);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines[0], "GET / -> home (Home@index)");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_match_output() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();

    let output = run(&["routeway", "match", "-m", path, "/page/42"]);
    assert_eq!(output, "page\n  id = 42\n");

    let output = run(&[
        "routeway", "match", "-m", path, "--method", "POST", "--override", "put", "/page/42",
    ]);
    assert!(output.starts_with("page.update\n"));

    let output = run(&["routeway", "match", "-m", path, "/missing"]);
    assert_eq!(output, "no route\n");
}

#[test]
fn test_generate_output() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();

    assert_eq!(
        run(&["routeway", "generate", "-m", path, "page", "--arg", "id=42"]),
        "/page/42\n"
    );
    assert_eq!(
        run(&["routeway", "generate", "-m", path, "page", "--partial"]),
        "/page/{id}\n"
    );

    let cli = Cli::try_parse_from(["routeway", "generate", "-m", path, "page"]).unwrap();
    let err = execute(&cli.command, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("id"));
}
