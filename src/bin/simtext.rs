//! Command-line driver for the `simtext` near-duplicate detection engine.
//!
//! `add --title T [--author A] [--category C] <file>`; `check <file>`;
//! `list`; `delete <id>`. Exit 0 on success, 1 on user error, 2 on store
//! error. Configuration loads from the path in `SIMTEXT_CONFIG` if set,
//! falling back to [`OrchestratorConfig::default`].

use std::env;
use std::process::ExitCode;

use simtext::{Orchestrator, OrchestratorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = env::args().skip(1).collect();
    ExitCode::from(run(&args) as u8)
}

fn run(args: &[String]) -> i32 {
    match args.first().map(String::as_str) {
        Some("add") => cmd_add(&args[1..]),
        Some("check") => cmd_check(&args[1..]),
        Some("list") => cmd_list(),
        Some("delete") => cmd_delete(&args[1..]),
        _ => {
            eprintln!("usage: simtext <add|check|list|delete> ...");
            1
        }
    }
}

fn load_config() -> Result<OrchestratorConfig, i32> {
    match env::var("SIMTEXT_CONFIG") {
        Ok(path) => OrchestratorConfig::from_yaml_path(&path).map_err(|e| {
            eprintln!("config error: {e}");
            1
        }),
        Err(_) => Ok(OrchestratorConfig::default()),
    }
}

fn open_orchestrator() -> Result<Orchestrator, i32> {
    let cfg = load_config()?;
    Orchestrator::open(cfg).map_err(|e| {
        eprintln!("store error: {e}");
        2
    })
}

fn cmd_add(args: &[String]) -> i32 {
    let mut title = None;
    let mut author = None;
    let mut category = None;
    let mut file = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--title" => {
                i += 1;
                title = args.get(i).cloned();
            }
            "--author" => {
                i += 1;
                author = args.get(i).cloned();
            }
            "--category" => {
                i += 1;
                category = args.get(i).cloned();
            }
            other => file = Some(other.to_string()),
        }
        i += 1;
    }

    let (Some(title), Some(file)) = (title, file) else {
        eprintln!("usage: simtext add --title T [--author A] [--category C] <file>");
        return 1;
    };

    let content = match std::fs::read_to_string(&file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("failed to read {file}: {err}");
            return 1;
        }
    };

    let orchestrator = match open_orchestrator() {
        Ok(orchestrator) => orchestrator,
        Err(code) => return code,
    };

    match orchestrator.add(title, content, author, Some(file), category) {
        Ok(id) => {
            println!("added document {id}");
            0
        }
        Err(err) => {
            eprintln!("store error: {err}");
            2
        }
    }
}

fn cmd_check(args: &[String]) -> i32 {
    let Some(file) = args.first() else {
        eprintln!("usage: simtext check <file>");
        return 1;
    };

    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("failed to read {file}: {err}");
            return 1;
        }
    };

    let orchestrator = match open_orchestrator() {
        Ok(orchestrator) => orchestrator,
        Err(code) => return code,
    };

    match orchestrator.check(&content, None) {
        Ok(report) => {
            println!("uniqueness score: {:.2}%", report.uniqueness_score);
            println!("candidates found: {}", report.candidates_found);
            println!("documents checked: {}", report.total_documents_checked);
            for doc in &report.similar_documents {
                println!("  - #{} {:?} similarity={:.2}%", doc.document_id, doc.title, doc.similarity);
                for fragment in &doc.matching_fragments {
                    println!("      fragment: {:?}", fragment.text);
                }
            }
            0
        }
        Err(err) => {
            eprintln!("store error: {err}");
            2
        }
    }
}

fn cmd_list() -> i32 {
    let orchestrator = match open_orchestrator() {
        Ok(orchestrator) => orchestrator,
        Err(code) => return code,
    };

    match orchestrator.list() {
        Ok(docs) => {
            for doc in docs {
                println!("{}\t{}\t{}", doc.id, doc.title, doc.upload_date);
            }
            0
        }
        Err(err) => {
            eprintln!("store error: {err}");
            2
        }
    }
}

fn cmd_delete(args: &[String]) -> i32 {
    let Some(id) = args.first().and_then(|s| s.parse::<u64>().ok()) else {
        eprintln!("usage: simtext delete <id>");
        return 1;
    };

    let orchestrator = match open_orchestrator() {
        Ok(orchestrator) => orchestrator,
        Err(code) => return code,
    };

    match orchestrator.delete(id) {
        Ok(true) => {
            println!("deleted document {id}");
            0
        }
        Ok(false) => {
            println!("document {id} not found");
            0
        }
        Err(err) => {
            eprintln!("store error: {err}");
            2
        }
    }
}
