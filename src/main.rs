#![deny(unsafe_code)]

mod api;
mod config;
mod engine;
mod protocol;
mod terminal;

use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process,
};

use config::{FleetConfig, CONFIG_ENV_VAR};

const USAGE: &str = r#"ore-fleet

Reads the judge's turns on stdin and answers one command per robot on stdout.
Diagnostics go to stderr, filtered by RUST_LOG (default: info).

USAGE:
    ore-fleet [--config FILE] [--debug-map]

OPTIONS:
    -c, --config FILE    YAML configuration file (or set ORE_FLEET_CONFIG)
    -d, --debug-map      Draw the belief grid on stderr every turn
    -h, --help           Print this help
"#;

#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    debug_map: bool,
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("{USAGE}");
                process::exit(0);
            }
            "--config" | "-c" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --config");
                    process::exit(1);
                }
                parsed.config_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--debug-map" | "-d" => {
                parsed.debug_map = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option: {other}");
                eprintln!("Run `ore-fleet --help` for usage.");
                process::exit(1);
            }
        }
    }

    parsed
}

fn load_config(args: &Args) -> FleetConfig {
    let path = args
        .config_path
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let mut config = match path {
        Some(path) => match FleetConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load config {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => FleetConfig::default(),
    };

    if args.debug_map {
        config.debug_map = true;
    }
    config
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = load_config(&parse_args(&args));

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = engine::driver::run(stdin.lock(), stdout.lock(), &config) {
        log::error!("{e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&["--config", "fleet.yaml", "-d"]));

        assert_eq!(Some(PathBuf::from("fleet.yaml")), parsed.config_path);
        assert!(parsed.debug_map);
    }

    #[test]
    fn test_no_args_means_defaults() {
        let parsed = parse_args(&[]);
        assert!(parsed.config_path.is_none());
        assert!(!parsed.debug_map);
    }
}
