//! `civic` binary entrypoint.

#[tokio::main]
async fn main() {
    let code = civic_cli::run().await;
    std::process::exit(code);
}
