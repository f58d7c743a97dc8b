//! Markdown renderer configuration.

/// Settings for the `[render]` table.
///
/// Arguments are handlebars templates. Available variables: `input` (readme
/// path), `output` (HTML path), `output_dir` and `root`.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Program to execute.
    pub program: String,

    /// Argument templates.
    pub args: Vec<String>,

    /// HTML file name inside the output directory.
    ///
    /// Default: readme stem with an `.html` extension.
    pub html: Option<String>,

    /// Seconds to wait for the renderer before giving up.
    pub timeout_secs: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            program: "python".into(),
            args: ["-m", "markdown", "-f", "{{output}}", "{{input}}"]
                .into_iter()
                .map(String::from)
                .collect(),
            html: None,
            timeout_secs: 120,
        }
    }
}
