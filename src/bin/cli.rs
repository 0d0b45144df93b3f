use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    taskforge::cli::run().await
}
