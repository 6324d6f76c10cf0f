use presence_analyzer::{Config, DatasetCache, PersonId, logging, report};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn print_help() {
    println!("Commands:");
    println!("  help                 Show this help");
    println!("  users                List known users");
    println!("  presence <user_id>   Total presence per weekday");
    println!("  mean <user_id>       Mean presence per weekday");
    println!("  median <user_id>     Median presence per weekday");
    println!("  start_end <user_id>  Mean start and end time per weekday");
    println!("  quit | exit          Leave");
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(text) => println!("{text}"),
        Err(e) => println!("Error: {e}"),
    }
}

fn parse_user_id(arg: Option<&str>, cmd: &str) -> Option<PersonId> {
    match arg.map(str::parse::<PersonId>) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => {
            println!("Invalid user_id");
            None
        }
        None => {
            println!("Usage: {cmd} <user_id>");
            None
        }
    }
}

fn main() {
    logging::init_tracing();

    let config = Config::from_env();
    let source = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_csv.clone());
    let cache = DatasetCache::new(source, config.cache_ttl());

    println!(
        "Presence Analyzer (CLI) - reading {} - type 'help' for commands\n",
        cache.source().display()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        if matches!(cmd, "quit" | "exit") {
            break;
        }
        if cmd == "help" {
            print_help();
            continue;
        }
        if !matches!(cmd, "users" | "presence" | "mean" | "median" | "start_end") {
            println!("Unknown command. Type 'help'.");
            continue;
        }

        let dataset = match cache.dataset() {
            Ok(dataset) => dataset,
            Err(e) => {
                println!("Error: {e}");
                continue;
            }
        };

        match cmd {
            "users" => print_json(&report::users(&dataset)),
            "presence" => {
                if let Some(id) = parse_user_id(parts.next(), cmd) {
                    print_json(&report::presence_weekday_for(&dataset, id));
                }
            }
            "mean" => {
                if let Some(id) = parse_user_id(parts.next(), cmd) {
                    print_json(&report::mean_time_weekday_for(&dataset, id));
                }
            }
            "median" => {
                if let Some(id) = parse_user_id(parts.next(), cmd) {
                    print_json(&report::median_weekday_for(&dataset, id));
                }
            }
            _ => {
                if let Some(id) = parse_user_id(parts.next(), cmd) {
                    print_json(&report::presence_start_end_for(&dataset, id));
                }
            }
        }
    }
}
