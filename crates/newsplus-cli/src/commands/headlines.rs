use anyhow::{bail, Result};

use newsplus_core::FetchOutcome;

use super::{render_article, Context};

pub async fn run(ctx: &Context, liked_only: bool) -> Result<()> {
    ctx.view_model.set_on_articles_changed(move |articles| {
        let shown: Vec<_> = articles
            .iter()
            .enumerate()
            .filter(|(_, a)| !liked_only || a.is_liked)
            .collect();

        if shown.is_empty() {
            if liked_only {
                println!("None of the current headlines are liked.");
            } else {
                println!("No headlines right now.");
            }
            return;
        }

        println!("Top headlines ({}):\n", shown.len());
        for (index, article) in shown {
            render_article(index + 1, article);
        }
    });

    match ctx.view_model.fetch_headlines().await {
        FetchOutcome::Replaced { .. } => Ok(()),
        FetchOutcome::Failed => bail!("Could not load headlines (see log output above)"),
        FetchOutcome::AlreadyInFlight => Ok(()),
    }
}
