#[tokio::main]
async fn main() {
    portal_backend::run().await;
}
