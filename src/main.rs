//! Writes every stored item to stdout as JSON lines.

use item_store::{
    infra::{config, database, logging, pagination::PaginationParams},
    repository::{GetAllItemsParams, ItemQuerier, PgItemRepository},
};
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = config::load_config()?;
    let _guard = logging::init_logging(&config.logging)?;
    let db = database::init_db(&config.database);

    let mut conn = db.acquire().await?;
    let mut params = GetAllItemsParams {
        owner_id: config.dump.owner_id,
        pagination: PaginationParams::new(0, config.dump.page_size),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut total = 0;
    loop {
        let items = PgItemRepository.get_all_items(&mut *conn, params).await?;
        for item in &items {
            serde_json::to_writer(&mut out, item)?;
            writeln!(out)?;
        }
        total += items.len();
        if (items.len() as i64) < params.pagination.limit() || items.is_empty() {
            break;
        }
        params.pagination = params.pagination.next();
    }
    out.flush()?;

    tracing::info!("Dumped {} items", total);
    Ok(())
}
