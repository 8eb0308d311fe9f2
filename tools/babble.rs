/// Babble — prints random Simlish sentences from an installed profile.
///
/// Usage: babble --store <profile-dir> --language <name> [--levels <L>] [--words <N>] [--seed <S>] [--dict <data-dir>]
use std::env;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use simlish::core::dict::DirSource;
use simlish::core::profile::ProfileStore;

const USAGE: &str = "Usage: babble --store <profile-dir> --language <name> [--levels <L>] [--words <N>] [--seed <S>] [--dict <data-dir>]";

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut store = None;
    let mut language = None;
    let mut dict = None;
    let mut levels = 1usize;
    let mut words = 10usize;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--store" => {
                i += 1;
                store = Some(args[i].clone());
            }
            "--language" => {
                i += 1;
                language = Some(args[i].clone());
            }
            "--dict" => {
                i += 1;
                dict = Some(args[i].clone());
            }
            "--levels" => {
                i += 1;
                levels = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --levels must be a positive integer");
                    process::exit(1);
                });
            }
            "--words" => {
                i += 1;
                words = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --words must be a non-negative integer");
                    process::exit(1);
                });
            }
            "--seed" => {
                i += 1;
                seed = Some(args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --seed must be an integer");
                    process::exit(1);
                }));
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

    // Without --dict, only cached profiles can be loaded
    let source = DirSource::new(dict.unwrap_or_else(|| store_dir.clone()));
    let store = ProfileStore::new(&store_dir);

    let profile = store
        .load_profile(&language, levels, &source)
        .unwrap_or_else(|e| {
            eprintln!("Error loading '{}': {}", language, e);
            process::exit(1);
        });

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    match profile.random_sentence(&mut rng, words) {
        Ok(sentence) => println!("{}", sentence),
        Err(e) => {
            eprintln!("Error generating sentence: {}", e);
            process::exit(1);
        }
    }
}
