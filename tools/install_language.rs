/// Install Language — fetches, trains, and caches a language profile.
///
/// Usage: install_language --dict <data-dir> --store <profile-dir> --language <name> [--levels <L>] [--end-bias <B>]
use std::env;
use std::process;

use simlish::core::dict::DirSource;
use simlish::core::profile::ProfileStore;

const USAGE: &str = "Usage: install_language --dict <data-dir> --store <profile-dir> --language <name> [--levels <L>] [--end-bias <B>]";

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut dict = None;
    let mut store = None;
    let mut language = None;
    let mut levels = 1usize;
    let mut end_bias = 0u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dict" => {
                i += 1;
                dict = Some(args[i].clone());
            }
            "--store" => {
                i += 1;
                store = Some(args[i].clone());
            }
            "--language" => {
                i += 1;
                language = Some(args[i].clone());
            }
            "--levels" => {
                i += 1;
                levels = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --levels must be a positive integer");
                    process::exit(1);
                });
            }
            "--end-bias" => {
                i += 1;
                end_bias = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --end-bias must be a non-negative integer");
                    process::exit(1);
                });
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let dict_dir = dict.unwrap_or_else(|| {
        eprintln!("Error: --dict is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });
    let store_dir = store.unwrap_or_else(|| {
        eprintln!("Error: --store is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });
    let language = language.unwrap_or_else(|| {
        eprintln!("Error: --language is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });
    if levels < 1 {
        eprintln!("Error: --levels must be at least 1");
        process::exit(1);
    }

    let source = DirSource::new(&dict_dir);
    let store = ProfileStore::new(&store_dir).with_end_bias(end_bias);

    println!("Installing '{}' into '{}'...", language, store_dir);
    let profile = store
        .load_profile(&language, levels, &source)
        .unwrap_or_else(|e| {
            eprintln!("Error installing '{}': {}", language, e);
            process::exit(1);
        });

    println!(
        "Profile ready: {} words, levels 1..={}",
        profile.corpus().len(),
        profile.levels()
    );
    for table in profile.tables() {
        println!("  level {}: {} contexts", table.level(), table.len());
    }
}
