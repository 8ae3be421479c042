use tera::{Context, Tera};

use crate::error::{PsaError, Result};

/// Render a single template source. Autoescaping is off: none of the outputs are HTML.
pub fn render_file_content(template_name: &str, source: &str, context: &Context) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(template_name, source)
        .and_then(|_| tera.render(template_name, context))
        .map_err(|e| PsaError::RenderError {
            file: template_name.to_string(),
            source: e,
        })
}

/// Render template expressions in a path (e.g. `{{ name }}.desktop`).
pub fn render_path_component(component: &str, context: &Context) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template("__path__", component).map_err(|e| {
        PsaError::FilenameRenderError {
            filename: component.to_string(),
            source: e,
        }
    })?;

    tera.render("__path__", context)
        .map_err(|e| PsaError::FilenameRenderError {
            filename: component.to_string(),
            source: e,
        })
}
