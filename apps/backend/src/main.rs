#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flashcard_generator_backend::run().await
}
