pub mod errors;
pub mod value;
pub mod context;
pub mod escape;
pub mod buffer;
pub mod partials;
pub mod template;
pub mod program;    // data-driven rendering units

pub use errors::{RenderError, Result};
pub use value::{Lambda, Value};
pub use context::{ContextStack, Scope};
pub use buffer::Buffer;
pub use partials::Partials;
pub use template::{Code, Template};
pub use program::{Node, Program};
pub use escape::{escape, escape_html, stringify};

/// Convenience: render a program given as JSON against a JSON context, no partials.
pub fn render_json(program_json: &str, context_json: &str) -> Result<String> {
    let template = Template::from_program_json(program_json)?;
    let context: serde_json::Value = serde_json::from_str(context_json)?;
    template.render_default(context)
}
