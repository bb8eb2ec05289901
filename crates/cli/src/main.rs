use std::path::PathBuf;
use std::process;

use clap::Parser;

/// DirectX .x text format parser.
#[derive(Parser)]
#[command(name = "xof", version, about = "Parse a .x text file and print its instances as JSON")]
struct Cli {
    /// Path to the .x text source file
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let src = match std::fs::read_to_string(&cli.file) {
        Ok(src) => src,
        Err(e) => {
            eprintln!("cannot read {}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };
    let filename = cli.file.display().to_string();
    match xof_core::parse_source(&src, &filename) {
        Ok(instances) => {
            let dump: Vec<serde_json::Value> = instances
                .iter()
                .map(|(label, record)| {
                    serde_json::json!({
                        "label": label,
                        "record": record,
                    })
                })
                .collect();
            let pretty = serde_json::to_string_pretty(&dump)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
