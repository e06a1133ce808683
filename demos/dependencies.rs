//! Dependency descriptors and the version constraints inside them.
//!
//! Run with: cargo run --example dependencies

use easyconfig_convert::{Convert, Dependency, ListOfStrings};
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, serde::Deserialize)]
struct Recipe {
    name: String,
    dependencies: Vec<Dependency>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easyconfig_convert=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let recipe: Recipe = serde_json::from_str(
        r#"{
            "name": "HDF5",
            "dependencies": ["1.2.11", ">=1.0.6;GCC >=8.2", "!=3.0;foss"]
        }"#,
    )?;

    println!("{} depends on:", recipe.name);
    for dep in &recipe.dependencies {
        let toolchain = dep
            .tc_versop
            .as_ref()
            .map_or_else(|| "any toolchain".to_string(), ToString::to_string);
        println!("  {} with {}", dep.versop, toolchain);
    }

    let dep = &recipe.dependencies[1];
    for version in ["0.9", "1.0.6", "1.2"] {
        println!("  >=1.0.6 accepts {}: {}", version, dep.versop.test(version));
    }
    if let Some(tc_versop) = &dep.tc_versop {
        println!("  GCC 10.2.0 ok: {}", tc_versop.test("GCC", "10.2.0"));
        println!("  GCC 7.3.0 ok: {}", tc_versop.test("GCC", "7.3.0"));
    }

    // A plain list of them, written compactly
    let deps: ListOfStrings<Dependency> = recipe.dependencies.into_iter().collect();
    println!("\nCompact: {}", deps.serialize());

    for bad in ["", "1;2;3", ">=", "1.0;GCC >"] {
        match <Dependency>::parse(bad) {
            Ok(dep) => println!("{:?} parsed as {}", bad, dep),
            Err(err) => println!("{:?} rejected: {}", bad, err),
        }
    }

    Ok(())
}
