//! Check a few VAT numbers and show how each verdict was reached.
//!
//! Run with: `RUST_LOG=vatin=trace cargo run --example vat_check -- [NUMBER ...]`

use tracing_subscriber::EnvFilter;
use vatin::{VatValidator, Verdict};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let defaults = [
        "ATU37675002",
        "ATU37675003",
        "  at u 37675002 ",
        "DE 136 695 976",
        "NL004495445B01",
        "CHE-116.281.710 MWST",
        "GBGD001",
        "XX1234567",
        "11",
    ];
    let inputs: Vec<&str> = if args.is_empty() {
        defaults.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    println!("=== Standard table ===\n");
    let validator = VatValidator::new();
    for input in &inputs {
        print_verdict(input, &validator.verdict(Some(input)));
    }

    println!("\n=== With extra_vat hook (two digits) ===\n");
    let hooked = match VatValidator::builder().extra_vat_pattern(r"^\d{2}$").build() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(2);
        }
    };
    for input in &inputs {
        print_verdict(input, &hooked.verdict(Some(input)));
    }

    println!("\n=== Broken hook configuration ===\n");
    match VatValidator::builder().extra_vat_pattern("[").build() {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  rejected at build time: {e}"),
    }
}

fn print_verdict(input: &str, verdict: &Verdict) {
    let detail = match verdict {
        Verdict::Empty => "empty, nothing to check".to_string(),
        Verdict::AcceptedByHook => "accepted by hook".to_string(),
        Verdict::NoMatch => "no scheme matches".to_string(),
        Verdict::ChecksumFailed(m) => format!("{} payload {} fails checksum", m.country, m.payload),
        Verdict::Valid(m) => format!("{} payload {} ok", m.country, m.payload),
    };
    let mark = if verdict.is_accepted() { "valid" } else { "INVALID" };
    println!("  {input:?} => {mark} ({detail})");
}
