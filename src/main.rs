use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = subscription_ledger::run().await {
        error!("subscription-ledger exited with error: {:?}", error);
        std::process::exit(1);
    }
}
