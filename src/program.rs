// src/program.rs
use serde::{Deserialize, Serialize};

use crate::buffer::Buffer;
use crate::context::ContextStack;
use crate::errors::{RenderError, Result};
use crate::partials::Partials;
use crate::template::{Code, Template};
use crate::value::Value;

/// One instruction of a compiled template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Literal text
    Text { text: String },
    /// `{{name}}`, HTML-escaped
    Var { name: String },
    /// `{{&name}}`, unescaped
    Raw { name: String },
    /// `{{#name}}...{{/name}}`
    Section { name: String, nodes: Vec<Node> },
    /// `{{^name}}...{{/name}}`
    Inverted { name: String, nodes: Vec<Node> },
    /// `{{>name}}`
    Partial { name: String },
}

/// Data form of the code a template compiler would generate: a tree of
/// [`Node`]s replayed against the runtime primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Program {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Parse a program from its JSON form (an array of nodes).
    pub fn from_json(input: &str) -> Result<Self> {
        let program: Program = serde_json::from_str(input)?;
        program.validate()?;
        Ok(program)
    }

    /// Every tag must name something; literal text may be empty.
    pub fn validate(&self) -> Result<()> {
        validate_nodes(&self.nodes)
    }
}

fn validate_nodes(nodes: &[Node]) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text { .. } => {}
            Node::Var { name } | Node::Raw { name } | Node::Partial { name } => check_name(name)?,
            Node::Section { name, nodes } | Node::Inverted { name, nodes } => {
                check_name(name)?;
                validate_nodes(nodes)?;
            }
        }
    }
    Ok(())
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RenderError::Program("tag with empty name".into()));
    }
    Ok(())
}

impl Code for Program {
    fn run(&self, tpl: &Template, ctx: &mut ContextStack, partials: &Partials) -> Result<String> {
        let mut buf = Buffer::new();
        eval_nodes(&self.nodes, tpl, ctx, partials, &mut buf)?;
        Ok(buf.finish())
    }
}

// Dotted names (and ".") need path resolution; plain names take the fast lookup.
fn lookup(
    tpl: &Template,
    name: &str,
    ctx: &mut ContextStack,
    partials: &Partials,
    return_found: bool,
) -> Value {
    if name.contains('.') {
        tpl.get_dotted(name, ctx, partials, return_found)
    } else {
        tpl.get(name, ctx, partials, return_found)
    }
}

fn eval_nodes(
    nodes: &[Node],
    tpl: &Template,
    ctx: &mut ContextStack,
    partials: &Partials,
    buf: &mut Buffer,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text { text } => buf.push_str(text),
            Node::Var { name } => {
                let val = lookup(tpl, name, ctx, partials, false);
                buf.push_str(&tpl.escape(&val));
            }
            Node::Raw { name } => {
                let val = lookup(tpl, name, ctx, partials, false);
                buf.push_str(&tpl.stringify(&val));
            }
            Node::Section { name, nodes } => {
                let val = lookup(tpl, name, ctx, partials, true);
                // the scope pops the frame `section` pushes
                let mut scope = ctx.scope();
                if tpl.section(val, Some(&mut *scope), false) {
                    tpl.render_section(&mut *scope, partials, |ctx, partials, tpl| {
                        eval_nodes(nodes, tpl, ctx, partials, buf)
                    })?;
                }
            }
            Node::Inverted { name, nodes } => {
                let val = lookup(tpl, name, ctx, partials, true);
                if !tpl.section(val, Some(&mut *ctx), true) {
                    eval_nodes(nodes, tpl, ctx, partials, buf)?;
                }
            }
            Node::Partial { name } => {
                let out = tpl.render_partial(name, ctx, partials)?;
                buf.push_str(&out);
            }
        }
    }
    Ok(())
}
