// ctydb command-line front end
//
// Resolves each callsign given on the command line and prints its DXCC
// entity. Engine initialization failure is fatal; an unknown callsign is
// just reported and the remaining arguments still resolve.
//
// Exit codes: 0 all resolved, 1 engine failure, 2 usage, 3 some
// callsigns had no matching entity.

use ctydb::{CtyConfig, CtyError, CtyResolver};

const EXIT_ENGINE_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_NOT_FOUND: i32 = 3;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("ctydb=info"))
        .init();

    let calls: Vec<String> = std::env::args().skip(1).collect();
    if calls.is_empty() {
        eprintln!("usage: ctydb CALLSIGN [CALLSIGN ...]");
        std::process::exit(EXIT_USAGE);
    }

    let resolver = match CtyResolver::new(CtyConfig::default()).await {
        Ok(resolver) => resolver,
        Err(e) => {
            log::error!("Failed to initialize cty resolver: {}", e);
            std::process::exit(EXIT_ENGINE_FAILURE);
        }
    };

    let mut missing = 0;
    for call in &calls {
        match resolver.lookup(call).await {
            Ok(rec) => {
                println!(
                    "{:<12} {:<30} ADIF {:>3}  CQ {:>2}  ITU {:>2}  {}",
                    call.to_uppercase(),
                    rec.country,
                    rec.adif,
                    rec.cqzone,
                    rec.ituzone,
                    rec.continent
                );
            }
            Err(CtyError::NotFound(_)) => {
                println!("{:<12} not found", call.to_uppercase());
                missing += 1;
            }
            Err(e) => {
                log::error!("Lookup failed for {}: {}", call, e);
                std::process::exit(EXIT_ENGINE_FAILURE);
            }
        }
    }

    let stats = resolver.cache_stats();
    log::debug!(
        "cache: {} hits, {} misses, {}/{} entries",
        stats.hits,
        stats.misses,
        stats.size,
        stats.capacity
    );

    if missing > 0 {
        std::process::exit(EXIT_NOT_FOUND);
    }
}
