use std::env;
use std::fs;
use std::process;

use rtttl::{NoteEvent, Songbook};
use tracing::info;

const USAGE: &str = "Usage: rtttl <input.rtttl> [output.yaml]
       rtttl --track <n> [--songbook <book.yaml>] [output.yaml]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let mut track: Option<usize> = None;
    let mut songbook_path: Option<&String> = None;
    let mut positional: Vec<&String> = Vec::new();

    // Parse flags
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--track" => {
                let value = iter.next().and_then(|v| v.parse().ok());
                match value {
                    Some(n) => track = Some(n),
                    None => {
                        eprintln!("--track expects a track number\n{}", USAGE);
                        process::exit(1);
                    }
                }
            }
            "--songbook" => match iter.next() {
                Some(path) => songbook_path = Some(path),
                None => {
                    eprintln!("--songbook expects a file path\n{}", USAGE);
                    process::exit(1);
                }
            },
            _ => positional.push(arg),
        }
    }

    // Read input
    let (source, output_path) = match track {
        Some(n) => {
            let book = match songbook_path {
                Some(path) => {
                    let content = read_file(path);
                    Songbook::from_yaml(&content).unwrap_or_else(|e| fail(e))
                }
                None => Songbook::builtin(),
            };
            let entry = book.track(n).unwrap_or_else(|e| fail(e));
            (entry.rtttl.clone(), positional.first().copied())
        }
        None => {
            let Some(input_path) = positional.first() else {
                eprintln!("{}", USAGE);
                process::exit(1);
            };
            (read_file(input_path), positional.get(1).copied())
        }
    };

    // Decode
    let song = rtttl::load(source.trim()).unwrap_or_else(|e| fail(e));
    info!(
        name = song.name(),
        default_duration_class = song.default_duration_class(),
        default_octave = song.default_octave(),
        bpm = song.bpm(),
        first_note_offset = song.first_note_offset(),
        note_count = song.note_count(),
        ms_per_unit = song.ms_per_unit(),
        "song header"
    );

    let notes: Vec<NoteEvent> = song
        .notes()
        .collect::<Result<_, _>>()
        .unwrap_or_else(|e| fail(e));

    let yaml = match serde_yaml::to_string(&notes) {
        Ok(yaml) => yaml,
        Err(e) => fail(e),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &yaml) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            info!("Wrote {} notes to {}", notes.len(), path);
        }
        None => {
            println!("{}", yaml);
        }
    }
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn fail<E: std::fmt::Display, T>(e: E) -> T {
    eprintln!("Error: {}", e);
    process::exit(1);
}
