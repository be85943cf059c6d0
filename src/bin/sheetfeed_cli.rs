//! CLI tool for sheetfeed - renders table feed documents to HTML
//!
//! Usage:
//!   sheetfeed_cli render <document.json> [-o out.html] [--escaped]
//!   sheetfeed_cli fingerprint <document.json> [--length]
//!   sheetfeed_cli sync <cache-dir> [-o out.html] [--config config.json]

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::env;
    use std::fs;
    use std::io::{self, Write};

    use sheetfeed::cache::FileStore;
    use sheetfeed::fetch::ReqwestFetcher;
    use sheetfeed::{
        fingerprint, logging, parse_document, render_table, ContentMode, FingerprintKind, HtmlSink,
        LoadResult, Loader, ViewerConfig,
    };

    const USAGE: &str = "Usage:\n  \
        sheetfeed_cli render <document.json> [-o out.html] [--escaped]\n  \
        sheetfeed_cli fingerprint <document.json> [--length]\n  \
        sheetfeed_cli sync <cache-dir> [-o out.html] [--config config.json]";

    fn fail(message: &str) -> ! {
        eprintln!("{message}");
        std::process::exit(1);
    }

    fn option_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
    }

    fn has_flag(args: &[String], flag: &str) -> bool {
        args.iter().any(|a| a == flag)
    }

    fn read_document(path: &str) -> sheetfeed::TableDocument {
        let json = match fs::read_to_string(path) {
            Ok(j) => j,
            Err(e) => fail(&format!("Error reading {}: {}", path, e)),
        };
        match parse_document(&json) {
            Ok(doc) => doc,
            Err(e) => fail(&format!("Error parsing {}: {}", path, e)),
        }
    }

    fn write_output(output_path: Option<&String>, content: &str) {
        match output_path {
            Some(path) => {
                if let Err(e) = fs::write(path, content) {
                    fail(&format!("Error writing {}: {}", path, e));
                }
                eprintln!("Written: {}", path);
            }
            None => {
                io::stdout().write_all(content.as_bytes()).unwrap();
            }
        }
    }

    fn cmd_render(input_path: &str, args: &[String]) {
        let doc = read_document(input_path);
        if let Some(message) = &doc.error {
            fail(&format!("Error in data: {}", message));
        }
        let mode = if has_flag(args, "--escaped") {
            ContentMode::Escaped
        } else {
            ContentMode::TrustedHtml
        };
        let page = render_table(&doc, mode).to_page(input_path, sheetfeed::config::DEFAULT_TABLE_ID);
        write_output(option_value(args, "-o"), &page);
    }

    fn cmd_fingerprint(input_path: &str, args: &[String]) {
        let doc = read_document(input_path);
        let kind = if has_flag(args, "--length") {
            FingerprintKind::Length
        } else {
            FingerprintKind::Crc32
        };
        match fingerprint(&doc.table_data, kind) {
            Ok(fp) => println!("{}", fp),
            Err(e) => fail(&format!("Error computing fingerprint: {}", e)),
        }
    }

    fn cmd_sync(cache_dir: &str, args: &[String]) {
        let config = match option_value(args, "--config") {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .unwrap_or_else(|e| fail(&format!("Error reading {}: {}", path, e)));
                ViewerConfig::from_json(&json).unwrap_or_else(|e| fail(&e.to_string()))
            }
            None => ViewerConfig::default(),
        };
        logging::init(config.level_filter().unwrap_or(log::LevelFilter::Info));

        let store = FileStore::open(cache_dir)
            .unwrap_or_else(|e| fail(&format!("Error opening cache {}: {}", cache_dir, e)));
        let fetcher = ReqwestFetcher::new(config.endpoint.clone());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|e| fail(&format!("Error starting runtime: {}", e)));
        let mut loader = Loader::new(&config, store, fetcher, HtmlSink::new());
        let outcome = runtime.block_on(loader.run());

        let (_, _, sink) = loader.into_parts();
        write_output(
            option_value(args, "-o"),
            &sink.to_page(&config.endpoint, &config.table_id),
        );
        eprintln!("{}", outcome.result.name());
        if let LoadResult::Failed(e) = outcome.result {
            fail(&e.to_string());
        }
    }

    pub fn main() {
        let args: Vec<String> = env::args().collect();

        if args.len() < 3 {
            fail(USAGE);
        }

        let rest = &args[3..];
        match args[1].as_str() {
            "render" => cmd_render(&args[2], rest),
            "fingerprint" => cmd_fingerprint(&args[2], rest),
            "sync" => cmd_sync(&args[2], rest),
            _ => fail(USAGE),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
