use anyhow::Result;

use super::Context;

pub async fn run(ctx: &Context, url: &str, liked: bool) -> Result<()> {
    let url = url.trim();
    ctx.view_model.set_liked(url, liked).await?;

    if liked {
        println!("Liked: {}", url);
    } else {
        println!("Unliked: {}", url);
    }

    Ok(())
}
