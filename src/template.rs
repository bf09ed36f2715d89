use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::context::ContextStack;
use crate::errors::Result;
use crate::escape;
use crate::partials::Partials;
use crate::program::Program;
use crate::value::Value;

/// Compiled rendering logic.
///
/// Implementations call back into the primitives of the [`Template`] they are
/// given (`get`, `section`, `render_section`, `render_partial`, `escape`, ...)
/// in the order the source template dictates, and return the produced text.
/// An `Err` here is a broken rendering unit; the runtime passes it through untouched.
pub trait Code: Send + Sync {
    fn run(&self, tpl: &Template, ctx: &mut ContextStack, partials: &Partials) -> Result<String>;
}

impl<F> Code for F
where
    F: Fn(&Template, &mut ContextStack, &Partials) -> Result<String> + Send + Sync,
{
    fn run(&self, tpl: &Template, ctx: &mut ContextStack, partials: &Partials) -> Result<String> {
        self(tpl, ctx, partials)
    }
}

// Base render function: renders nothing.
struct Blank;

impl Code for Blank {
    fn run(&self, _: &Template, _: &mut ContextStack, _: &Partials) -> Result<String> {
        Ok(String::new())
    }
}

/// A rendering unit: compiled code plus the source text it came from.
/// Immutable, so one instance can serve any number of renders, concurrently too.
#[derive(Clone)]
pub struct Template {
    code: Arc<dyn Code>,
    text: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::new(Blank, "")
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").field("text", &self.text).finish_non_exhaustive()
    }
}

impl Template {
    pub fn new<C: Code + 'static>(code: C, text: impl Into<String>) -> Self {
        Self { code: Arc::new(code), text: text.into() }
    }

    /// Hand-written rendering unit without source text.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Template, &mut ContextStack, &Partials) -> Result<String> + Send + Sync + 'static,
    {
        Self::new(f, "")
    }

    pub fn from_program(program: Program, text: impl Into<String>) -> Self {
        Self::new(program, text)
    }

    /// Parse a program's JSON form; the JSON itself is kept as the source text.
    pub fn from_program_json(source: &str) -> Result<Self> {
        let program = Program::from_json(source)?;
        Ok(Self::from_program(program, source))
    }

    /// Source text, kept for diagnostics only.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render against `context` as the single root frame.
    pub fn render(&self, context: impl Into<Value>, partials: &Partials) -> Result<String> {
        let mut ctx = ContextStack::new(context.into());
        self.run(&mut ctx, partials)
    }

    /// [`Template::render`] with no partials.
    pub fn render_default(&self, context: impl Into<Value>) -> Result<String> {
        self.render(context, &Partials::new())
    }

    /// Run the compiled code on an existing stack.
    pub fn run(&self, ctx: &mut ContextStack, partials: &Partials) -> Result<String> {
        self.code.run(self, ctx, partials)
    }

    /// Render the partial `name` at the caller's stack position.
    /// Unknown partials render as nothing.
    pub fn render_partial(
        &self,
        name: &str,
        ctx: &mut ContextStack,
        partials: &Partials,
    ) -> Result<String> {
        match partials.get(name) {
            Some(partial) => partial.run(ctx, partials),
            None => {
                debug!(partial = name, "partial not found, skipping");
                Ok(String::new())
            }
        }
    }

    /// Render a section body whose value `section` already pushed.
    ///
    /// An array on top of the stack runs the body once per element with that
    /// element pushed; anything else runs it exactly once. The stack depth is
    /// the same on return as on entry, whether or not the body failed.
    pub fn render_section<F>(
        &self,
        ctx: &mut ContextStack,
        partials: &Partials,
        mut body: F,
    ) -> Result<()>
    where
        F: FnMut(&mut ContextStack, &Partials, &Template) -> Result<()>,
    {
        let items = match ctx.top() {
            Some(Value::Array(items)) => Arc::clone(items),
            _ => return body(ctx, partials, self),
        };

        for item in items.iter() {
            let mut scope = ctx.scope();
            scope.push(item.clone());
            body(&mut *scope, partials, self)?;
        }
        Ok(())
    }

    /// Decide whether a section renders.
    ///
    /// Empty arrays fail; the empty string passes; everything else passes when truthy.
    /// A passing normal section pushes its value if it is an object or array and
    /// otherwise re-pushes the current top frame, so the caller always has exactly
    /// one frame to pop. Inverted sections never push.
    pub fn section(&self, value: Value, ctx: Option<&mut ContextStack>, inverted: bool) -> bool {
        let pass = match &value {
            Value::Array(items) if items.is_empty() => false,
            Value::String(s) if s.is_empty() => true,
            other => other.is_truthy(),
        };

        if !inverted && pass {
            if let Some(ctx) = ctx {
                let frame = match value {
                    Value::Object(_) | Value::Array(_) => value,
                    _ => ctx.top().cloned().unwrap_or_default(),
                };
                ctx.push(frame);
                trace!(depth = ctx.len(), "section entered");
            }
        }

        pass
    }

    /// Resolve a plain name, innermost frame first.
    ///
    /// Missing names give `false` for existence checks (`return_found`) and ""
    /// for interpolation. Lambdas are called unless this is an existence check;
    /// whatever a lambda pushes is popped again before the lookup returns.
    pub fn get(
        &self,
        key: &str,
        ctx: &mut ContextStack,
        partials: &Partials,
        return_found: bool,
    ) -> Value {
        let found = ctx.frames().iter().rev().find_map(|frame| frame.lookup(key)).cloned();

        let Some(val) = found else {
            return if return_found { Value::Bool(false) } else { Value::from("") };
        };

        if !return_found {
            if let Value::Lambda(f) = &val {
                let mut scope = ctx.scope();
                return f.call(&mut *scope, partials);
            }
        }
        val
    }

    /// Resolve `a.b.c` paths and the current-element token `.`.
    ///
    /// Segments after the first descend only through own keys; a broken path
    /// yields "". A lambda at the end of the path is called with its parent
    /// container pushed as a temporary frame.
    pub fn get_dotted(
        &self,
        key: &str,
        ctx: &mut ContextStack,
        partials: &Partials,
        return_found: bool,
    ) -> Value {
        if key == "." && ctx.parent().is_some_and(Value::is_array) {
            return ctx.top().cloned().unwrap_or_default();
        }

        let mut names = key.split('.');
        let head = names.next().unwrap_or_default();
        let mut val = self.get(head, ctx, partials, return_found);
        let mut parent = Value::Null;

        for name in names {
            match val.lookup(name).cloned() {
                Some(next) => parent = std::mem::replace(&mut val, next),
                None => val = Value::from(""),
            }
        }

        if return_found && !val.is_truthy() {
            return Value::Bool(false);
        }

        if !return_found {
            if let Value::Lambda(f) = &val {
                let mut scope = ctx.scope();
                scope.push(parent);
                return f.call(&mut *scope, partials);
            }
        }
        val
    }

    /// Escaped interpolation.
    pub fn escape(&self, value: &Value) -> String {
        escape::escape(value)
    }

    /// Unescaped interpolation.
    pub fn stringify(&self, value: &Value) -> String {
        escape::stringify(value)
    }
}
