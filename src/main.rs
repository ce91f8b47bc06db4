#[tokio::main]
async fn main() {
    directory_backend::run().await;
}
