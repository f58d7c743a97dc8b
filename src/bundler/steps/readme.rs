//! Readme rendering.
//!
//! Renderer arguments are handlebars templates so any markdown tool can be
//! plugged in from `release.toml`:
//!
//! ```toml
//! [render]
//! program = "pandoc"
//! args = ["{{input}}", "-s", "-o", "{{output}}"]
//! ```

use crate::bundler::{
    builder::ToolInvocation,
    error::{Context, Result},
    settings::Settings,
    utils::fs,
};
use handlebars::Handlebars;
use std::{collections::BTreeMap, path::PathBuf, time::Duration};

/// Renderer command with every argument template expanded.
///
/// Strict mode is on: a misspelled variable is an error, not an empty string.
pub fn invocation(settings: &Settings) -> Result<ToolInvocation> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    let mut data = BTreeMap::new();
    data.insert("input", settings.readme().display().to_string());
    data.insert("output", settings.html_path().display().to_string());
    data.insert("output_dir", settings.output_dir().display().to_string());
    data.insert("root", settings.root().display().to_string());

    let render = settings.render();
    let args = render
        .args
        .iter()
        .map(|template| {
            handlebars
                .render_template(template, &data)
                .context(format!("rendering renderer argument `{template}`"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ToolInvocation::new(
        render.program.clone(),
        settings.root(),
        Duration::from_secs(render.timeout_secs),
    )
    .args(args))
}

/// Run the renderer and return the path of the HTML file.
pub async fn run(settings: &Settings) -> Result<PathBuf> {
    log::info!("Rendering {}", settings.readme().display());

    let html = settings.html_path();
    fs::remove_file(&html).await?;

    invocation(settings)?
        .run()
        .await
        .context("rendering readme")?;

    let size = fs::require_artifact("HTML readme", &html).await?;
    log::info!("✓ Rendered {} ({} bytes)", html.display(), size);

    Ok(html)
}
