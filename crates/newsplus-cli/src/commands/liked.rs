use anyhow::Result;

use super::Context;

pub async fn run(ctx: &Context) -> Result<()> {
    let liked = ctx.view_model.liked_ids().await?;

    if liked.is_empty() {
        println!("No liked articles yet.");
        println!("\nTo like an article, run:");
        println!("  newsplus like <url>");
        return Ok(());
    }

    println!("Liked articles ({}):\n", liked.len());
    for url in liked.iter() {
        println!("  {}", url);
    }

    Ok(())
}
