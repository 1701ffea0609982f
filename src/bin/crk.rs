//! The crk binary: argv in, exit code out.

use crk::cli;

#[tokio::main]
async fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(cli::run_cli(&tokens).await);
}
