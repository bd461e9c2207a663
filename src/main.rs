use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage();
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    let mut style_filter: Option<String> = None;
    let mut yaml = false;

    // Parse flags
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--style" => {
                i += 1;
                match args.get(i) {
                    Some(filter) => style_filter = Some(filter.clone()),
                    None => usage(),
                }
            }
            "--yaml" => yaml = true,
            path => paths.push(PathBuf::from(path)),
        }
        i += 1;
    }
    if paths.is_empty() {
        usage();
    }

    // Read the catalog
    let mut songs = Vec::new();
    for path in &paths {
        for file in catalog_files(path) {
            let text = match fs::read_to_string(&file) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", file.display(), e);
                    process::exit(1);
                }
            };
            for parsed in leadsheet::parse_songbook(&text) {
                match parsed {
                    Ok(song) => songs.push(song),
                    Err(e) => eprintln!("Skipping song in '{}': {}", file.display(), e),
                }
            }
        }
    }

    if let Some(filter) = &style_filter {
        songs.retain(|song| song.style.contains(filter.as_str()));
    }

    // Output
    if yaml {
        match serde_yaml::to_string(&songs) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error serializing songs: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", leadsheet::catalog_csv(&songs));
    }
}

fn usage() -> ! {
    eprintln!("Usage: leadsheet <catalog>... [--style <filter>] [--yaml]");
    eprintln!("       <catalog> is an .irealb file or a directory of them");
    process::exit(1);
}

/// Expand a path into the `.irealb` files it names.
fn catalog_files(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = match fs::read_dir(path) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|file| file.extension().is_some_and(|ext| ext == "irealb"))
            .collect(),
        Err(e) => {
            eprintln!("Error reading directory '{}': {}", path.display(), e);
            process::exit(1);
        }
    };
    files.sort();
    files
}
