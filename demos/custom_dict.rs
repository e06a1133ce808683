//! Declaring a new `key:value` grammar with a field table.
//!
//! Run with: RUST_LOG=easyconfig_convert=trace cargo run --example custom_dict

use easyconfig_convert::{
    Convert, Dependency, DictOfStrings, DictSchema, DictSpec, FieldSpec, FieldType,
    ListOfStrings, Separators,
};
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SOURCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("url").keyless().required(),
    FieldSpec::string("filename").keyless(),
    FieldSpec::integer("retries"),
    FieldSpec::new("requires", FieldType::convert::<Dependency>()),
];

/// `url;filename;retries:N;requires:<dependency>`
struct Source;

impl DictSchema for Source {
    const SPEC: DictSpec = DictSpec::new(SOURCE_FIELDS);
}

const ENV_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("name").keyless().required(),
    FieldSpec::string("value"),
];

/// `NAME|value=...`, for values that are full of `;` and `:`
struct EnvVar;

impl DictSchema for EnvVar {
    const SPEC: DictSpec = DictSpec::new(ENV_FIELDS)
        .with_separators(Separators::DEFAULT.with_dict('|').with_key_value('='));
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easyconfig_convert=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sources = ListOfStrings::<DictOfStrings<Source>>::parse(
        r"https\://example.org/zlib.tar.gz;zlib-1.2.11.tar.gz;retries:3, mirror.tar.gz;requires:>=1.2\;GCC",
    )?;

    for source in &sources {
        println!(
            "url={:?} filename={:?} retries={:?} requires={}",
            source.get_str("url"),
            source.get_str("filename"),
            source.get_i64("retries"),
            source
                .get("requires")
                .map_or_else(|| "-".to_string(), ToString::to_string),
        );
    }
    println!("Canonical: {}", sources.serialize());

    let env = DictOfStrings::<EnvVar>::parse("PATH|value=/opt/bin:/usr/bin")?;
    println!(
        "\n{} = {}",
        env.get_str("name").unwrap_or_default(),
        env.get_str("value").unwrap_or_default()
    );
    println!("Canonical: {}", env.serialize());

    let allowed = Source::SPEC.allowed_keys().join(", ");
    if let Err(err) = DictOfStrings::<Source>::parse("a.tar.gz;checksum:abc") {
        println!("\nRejected: {}\nAllowed keys: {}", err, allowed);
    }

    Ok(())
}
