//! # commentpack CLI
//!
//! Command-line interface for the commentpack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use commentpack::CommentpackError;
use commentpack::cli::Args;
use commentpack::core::ThreadStats;
use commentpack::extract::Extractor;
use commentpack::format::write_to_format;
use commentpack::store::{SqliteStore, import_with};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CommentpackError> {
    let total_start = Instant::now();
    let config = args.extract_config();

    // Print header
    println!("📦 commentpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if let Some(ref output) = args.output {
        println!("💾 Output:  {} ({})", output, args.output_format(output));
    }
    if let Some(ref db) = args.db {
        println!("🗄️  Store:   {}", db.display());
    }
    println!();

    // Step 1: Extract
    println!("⏳ Extracting comments...");
    let extract_start = Instant::now();
    let extraction = Extractor::with_config(config.clone()).extract_file(&args.input)?;
    println!(
        "   Found {} comments ({:.2}s)",
        extraction.len(),
        extract_start.elapsed().as_secs_f64()
    );
    if !extraction.warnings.is_empty() {
        println!("⚠️  {} warnings", extraction.warnings.len());
        for warning in &extraction.warnings {
            println!("   - {}", warning);
        }
    }

    // Step 2: Store
    if let Some(ref db) = args.db {
        println!("🗄️  Storing comments...");
        let mut store = SqliteStore::open(db)?;
        let stored = import_with(&extraction, &mut store, &config)?;
        println!("   Stored {} comments ({} in database)", stored.len(), store.count()?);
    }

    // Step 3: Write
    if let Some(ref output) = args.output {
        let format = args.output_format(output);
        println!("💾 Writing {}...", format);
        write_to_format(&extraction, output, format, &args.output_config())?;
        println!("✅ Output saved to {}", output);
    }

    // Summary
    let stats = ThreadStats::from_comments(&extraction.comments);
    println!();
    println!("📊 Summary:");
    println!("   Post:        {}", extraction.post.client_post_id);
    println!("   Comments:    {}", stats.total);
    println!("   Top-level:   {}", stats.top_level);
    println!("   Replies:     {} ({:.1}%)", stats.replies, stats.reply_ratio());
    println!("   Commenters:  {}", stats.unique_commenters);
    if stats.anonymous > 0 {
        println!("   Anonymous:   {}", stats.anonymous);
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
