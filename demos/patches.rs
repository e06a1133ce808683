//! Parsing, inspecting and rewriting a patch list.
//!
//! Run with: RUST_LOG=easyconfig_convert=debug cargo run --example patches

use easyconfig_convert::{parse, to_string, to_value, Convert, Patch, Patches};
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easyconfig_convert=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let text = "zlib-1.2.11_fix.patch, filename:zlib-cmake.patch;level:1 ; dest:build";
    let patches: Patches = parse(text)?;

    for (idx, patch) in patches.iter().enumerate() {
        println!(
            "#{} {} (level {:?}, dest {:?})",
            idx, patch.filename, patch.level, patch.dest
        );
    }

    // Canonical form: positional filename, no stray whitespace
    let canonical = to_string(&patches);
    println!("\nCanonical: {}", canonical);
    assert_eq!(Patches::parse(&canonical)?, patches);

    // Structured form, as a JSON-ish tree
    println!("Structured: {}", to_value(&patches));

    // Values with separators are escaped on the way out
    let mut all = patches.into_inner();
    all.push(Patch::new("http://example.org/extra,1.patch").with_level(0));
    let patches = Patches::from(all);
    println!("With escapes: {}", patches);

    // Rejections carry the offending input
    if let Err(err) = Patches::parse("good.patch,bad.patch;strip:1") {
        println!("\nRejected ({:?}): {}", err.kind(), err);
    }

    Ok(())
}
