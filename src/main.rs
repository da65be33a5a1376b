#[actix_web::main]
async fn main() -> std::io::Result<()> {
    harmonizer_lib::run().await
}
