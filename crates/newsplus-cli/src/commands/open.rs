use anyhow::{anyhow, bail, Result};

use newsplus_core::FetchOutcome;

use super::Context;

pub async fn run(ctx: &Context, index: usize) -> Result<()> {
    if let FetchOutcome::Failed = ctx.view_model.fetch_headlines().await {
        bail!("Could not load headlines (see log output above)");
    }

    let articles = ctx.view_model.articles().await;
    let article = index
        .checked_sub(1)
        .and_then(|i| articles.get(i))
        .ok_or_else(|| anyhow!("No headline at position {} ({} loaded)", index, articles.len()))?;

    let Some(url) = article.url() else {
        bail!("'{}' has no link to open", article.display_title());
    };

    println!("Opening: {}", url);
    open::that(url)?;

    Ok(())
}
