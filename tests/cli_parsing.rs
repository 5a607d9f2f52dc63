use chrono::{Local, TimeZone};
use clap::Parser;
use plugconf::cli::{Cli, Commands, PluginCommands};
use std::path::PathBuf;

fn local_millis(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    Local
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .earliest()
        .unwrap()
        .timestamp_millis()
}

#[test]
fn test_parse_show() {
    let cli = Cli::try_parse_from(["plugconf", "show"]).unwrap();
    assert!(matches!(cli.command, Commands::Show));
    assert!(!cli.json);
    assert_eq!(cli.run.config, None);
    assert_eq!(cli.run.start_time, None);
}

#[test]
fn test_parse_get_with_global_flags() {
    let cli = Cli::try_parse_from([
        "plugconf",
        "get",
        "server_port",
        "--json",
        "--config",
        "app.yaml",
    ])
    .unwrap();

    match cli.command {
        Commands::Get { path } => assert_eq!(path, "server_port"),
        _ => panic!("Wrong top-level command"),
    }
    assert!(cli.json);
    assert_eq!(cli.run.config, Some(PathBuf::from("app.yaml")));
}

#[test]
fn test_parse_plugins_list() {
    let cli = Cli::try_parse_from(["plugconf", "plugins", "list"]).unwrap();
    assert!(matches!(cli.command, Commands::Plugins(PluginCommands::List)));
}

#[test]
fn test_parse_run_times() {
    let cli = Cli::try_parse_from([
        "plugconf",
        "show",
        "--start-time",
        "2024-03-01",
        "--end-time",
        "2024-03-01 12:30:00",
    ])
    .unwrap();

    assert_eq!(cli.run.start_time, Some(local_millis(2024, 3, 1, 0, 0, 0)));
    assert_eq!(cli.run.end_time, Some(local_millis(2024, 3, 1, 12, 30, 0)));
}

#[test]
fn test_parse_rejects_bad_time() {
    let result = Cli::try_parse_from(["plugconf", "show", "--start-time", "2024/03/01"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_log_and_upload_paths() {
    let cli = Cli::try_parse_from([
        "plugconf",
        "--log-path",
        "/tmp/run.log",
        "--upload",
        "/data/out",
        "show",
    ])
    .unwrap();

    assert_eq!(cli.run.log_path, Some(PathBuf::from("/tmp/run.log")));
    assert_eq!(cli.run.upload_path, Some(PathBuf::from("/data/out")));
}

#[test]
fn test_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["plugconf"]).is_err());
}
