use tracing::info;

use super::AppContext;
use crate::cli::RenderArgs;
use crate::models::pages::PAGE_SETTINGS;

/// `render [FILE]` - print the settings page or write it to a file
pub async fn execute(ctx: &mut AppContext, args: RenderArgs) -> Result<(), String> {
    let html = ctx.view.render();
    ctx.pages.insert(PAGE_SETTINGS, html.clone());

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &html)
                .await
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            info!("Settings page written to {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}
