#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    zdrofit_api::run().await
}
