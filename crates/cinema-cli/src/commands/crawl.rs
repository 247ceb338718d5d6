use super::user_error;
use crate::app::App;
use crate::console::Output;
use crate::render;
use anyhow::Result;

pub async fn search(app: &App, out: Output, query: &str) -> Result<()> {
    let result = app.crawl.search(query).await.map_err(user_error)?;
    out.emit(&result, render::crawl_candidates(&result))
}

/// Imports by candidate id when one is given, otherwise by title.
pub async fn fetch(app: &App, out: Output, movie_id: Option<&str>, title: &str) -> Result<()> {
    let outcome = match movie_id {
        Some(id) => app.crawl.crawl_by_id(id, title).await,
        None => app.crawl.crawl_by_title(title).await,
    }
    .map_err(user_error)?;
    out.emit(&outcome, vec![render::crawl_outcome(&outcome)])
}
