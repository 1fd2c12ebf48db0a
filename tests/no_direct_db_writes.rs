// tests/no_direct_db_writes.rs
// Fails if SQLite calls appear outside the durable store adapter.
// Everything else must go through the `TableStore` trait.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn is_whitelisted(path: &Path) -> bool {
    let p = path.to_string_lossy();
    p.contains("/tables/database/") || p.contains("\\tables\\database\\")
}

#[test]
fn sqlite_access_lives_only_in_the_store_adapter() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let src_dir = Path::new(manifest_dir).join("src");

    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);
    assert!(!files.is_empty(), "no sources found under {:?}", src_dir);

    let bad_patterns = [
        "rusqlite::",
        "conn.execute(",
        ".execute_batch(",
        "stmt.execute(",
        "Connection::open",
    ];

    let mut offenders: Vec<(String, String)> = Vec::new();

    for file in files {
        if is_whitelisted(&file) { continue; }
        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(_) => continue,
        };

        for pat in &bad_patterns {
            if content.contains(pat) {
                offenders.push((file.to_string_lossy().to_string(), pat.to_string()));
            }
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::from("Direct SQLite calls found outside src/tables/database:\n");
        for (file, pat) in offenders {
            msg.push_str(&format!("  {} contains pattern '{}': use a TableStore instead\n", file, pat));
        }
        panic!("{}", msg);
    }
}
