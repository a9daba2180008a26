//! spendlog
//!
//! Interactive terminal front end for the expense ledger. All ledger
//! mutations live in spendlog-core; this binary only renders notices,
//! asks the confirmation questions, and wires persistence write-through.

use std::sync::Once;

mod output;
mod shell;

static INIT_TRACING: Once = Once::new();

fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("spendlog=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

fn main() {
    init_tracing();

    if let Err(err) = shell::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
