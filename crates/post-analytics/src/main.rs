mod bootstrap;

use std::io::Write;

use analytics_core::settings::{Command, Settings};
use analytics_data::analysis::analyze_posts;
use analytics_data::mongo::MongoStore;
use analytics_data::reader::store_posts;
use analytics_data::store::PostStore;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("post-analytics v{} starting", env!("CARGO_PKG_VERSION"));

    // Reject bad report options before touching the store.
    if let Command::Analyze(args) = &settings.command {
        args.windows()?;
    }

    let store =
        MongoStore::connect(&settings.mongo_uri, &settings.database, &settings.collection).await?;

    let outcome = run(&store, &settings.command, &mut std::io::stdout().lock()).await;
    store.close().await;

    outcome
}

/// Execute one batch job against an open store.
async fn run<S: PostStore, W: Write>(store: &S, command: &Command, out: &mut W) -> Result<()> {
    match command {
        Command::Load(args) => {
            tracing::info!("Loading {} input path(s)...", args.paths.len());
            let summary = store_posts(store, &args.paths).await?;
            tracing::info!(
                "Load complete: {} posts from {} files",
                summary.posts,
                summary.files
            );
        }

        Command::Analyze(args) => {
            let windows = args.windows()?;
            let report = analyze_posts(store, args.top, &windows).await?;
            for line in report.render() {
                writeln!(out, "{}", line)?;
            }
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_data::store::MemoryStore;
    use tempfile::TempDir;

    fn settings(args: &[&str]) -> Settings {
        let mut argv = vec!["post-analytics"];
        argv.extend_from_slice(args);
        Settings::try_parse_from(argv).expect("arguments should parse")
    }

    fn write_export(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, export_json()).expect("write export");
        path
    }

    fn export_json() -> &'static str {
        r#"[
            {"id": 1, "user": {"id": 7, "name": "alice"},
             "entities": {"hashtags": [{"text": "conf"}, {"text": "rust"}]},
             "created_at": "Sat Feb 14 10:30:00 +0000 2015"},
            {"id": 2, "user": {"id": 7, "name": "alice"},
             "entities": {"hashtags": [{"text": "conf"}]},
             "created_at": "Sat Feb 14 11:05:00 +0000 2015"},
            {"id": 3, "user": {"id": 9, "name": "bob"},
             "entities": {"hashtags": []},
             "created_at": "Sun Feb 15 15:00:00 +0000 2015"}
        ]"#
    }

    #[tokio::test]
    async fn test_load_then_analyze() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_export(dir.path(), "day.json");
        let store = MemoryStore::new();

        let load = settings(&["load", path.to_str().expect("utf-8 path")]);
        let mut sink: Vec<u8> = Vec::new();
        run(&store, &load.command, &mut sink).await.expect("load");
        assert!(sink.is_empty(), "load prints nothing to stdout");
        assert_eq!(store.posts().len(), 3);

        let analyze = settings(&["analyze"]);
        let mut out: Vec<u8> = Vec::new();
        run(&store, &analyze.command, &mut out).await.expect("analyze");

        let text = String::from_utf8(out).expect("utf-8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], "3 posts stored in the collection");
        assert_eq!(lines[1], "alice posted the most during the conference");
        assert_eq!(lines[2], "The top 2 hashtags were: conf, rust");
        assert_eq!(lines[3], "1 posts in the 9 o'clock hour on 2015-02-14");
        assert_eq!(lines[4], "1 posts in the 10 o'clock hour on 2015-02-14");
        assert_eq!(lines[15], "1 posts in the 14 o'clock hour on 2015-02-15");
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_day() {
        let store = MemoryStore::new();
        let analyze = settings(&["analyze", "--day", "tomorrow"]);

        let mut out: Vec<u8> = Vec::new();
        assert!(run(&store, &analyze.command, &mut out).await.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("absent.json");
        let store = MemoryStore::new();
        let load = settings(&["load", missing.to_str().expect("utf-8 path")]);

        let err = run(&store, &load.command, &mut Vec::<u8>::new()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
