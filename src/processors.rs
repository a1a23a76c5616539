//! Source preprocessors and template-list postprocessors.
//!
//! Processors are looked up by name in a [`ProcessorRegistry`] or handed over
//! directly as closures. An unknown name is a configuration error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Result, bail};

use crate::core::parsers::json::{Indent, to_json_string};
use crate::core::templates::Template;

/// Transforms raw source text before it is parsed.
pub trait Preprocessor: Send + Sync {
    fn process(&self, source: &str) -> Result<String>;
}

impl<F> Preprocessor for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn process(&self, source: &str) -> Result<String> {
        self(source)
    }
}

/// Renders the final template list as text.
pub trait Postprocessor: Send + Sync {
    fn process(&self, templates: &[Template]) -> Result<String>;
}

impl<F> Postprocessor for F
where
    F: Fn(&[Template]) -> Result<String> + Send + Sync,
{
    fn process(&self, templates: &[Template]) -> Result<String> {
        self(templates)
    }
}

/// A processor given either by registered name or as a concrete value.
pub enum ProcessorRef<P: ?Sized> {
    Named(String),
    Direct(Arc<P>),
}

impl<P: ?Sized> Clone for ProcessorRef<P> {
    fn clone(&self) -> Self {
        match self {
            ProcessorRef::Named(name) => ProcessorRef::Named(name.clone()),
            ProcessorRef::Direct(processor) => ProcessorRef::Direct(Arc::clone(processor)),
        }
    }
}

impl<P: ?Sized> fmt::Debug for ProcessorRef<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            ProcessorRef::Direct(_) => f.write_str("Direct(..)"),
        }
    }
}

impl<P: ?Sized> From<&str> for ProcessorRef<P> {
    fn from(name: &str) -> Self {
        ProcessorRef::Named(name.to_string())
    }
}

pub type PreprocessorRef = ProcessorRef<dyn Preprocessor>;
pub type PostprocessorRef = ProcessorRef<dyn Postprocessor>;

pub const STRIP_BOM: &str = "strip-bom";
pub const JSON: &str = "json";
pub const PO: &str = "po";

pub struct ProcessorRegistry {
    preprocessors: HashMap<String, Arc<dyn Preprocessor>>,
    postprocessors: HashMap<String, Arc<dyn Postprocessor>>,
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ProcessorRegistry {
    /// Registry without any processors.
    pub fn empty() -> Self {
        Self {
            preprocessors: HashMap::new(),
            postprocessors: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register_preprocessor(STRIP_BOM, Arc::new(strip_bom));
        registry.register_postprocessor(JSON, Arc::new(render_json));
        registry.register_postprocessor(PO, Arc::new(render_po));
        registry
    }

    pub fn register_preprocessor(&mut self, name: &str, processor: Arc<dyn Preprocessor>) {
        self.preprocessors.insert(name.to_string(), processor);
    }

    pub fn register_postprocessor(&mut self, name: &str, processor: Arc<dyn Postprocessor>) {
        self.postprocessors.insert(name.to_string(), processor);
    }

    pub fn resolve_preprocessor(&self, reference: &PreprocessorRef) -> Result<Arc<dyn Preprocessor>> {
        match reference {
            ProcessorRef::Direct(processor) => Ok(Arc::clone(processor)),
            ProcessorRef::Named(name) => match self.preprocessors.get(name) {
                Some(processor) => Ok(Arc::clone(processor)),
                None => bail!("cannot find preprocessor '{}'. check if it is registered.", name),
            },
        }
    }

    pub fn resolve_postprocessor(
        &self,
        reference: &PostprocessorRef,
    ) -> Result<Arc<dyn Postprocessor>> {
        match reference {
            ProcessorRef::Direct(processor) => Ok(Arc::clone(processor)),
            ProcessorRef::Named(name) => match self.postprocessors.get(name) {
                Some(processor) => Ok(Arc::clone(processor)),
                None => bail!("cannot find postprocessor '{}'. check if it is registered.", name),
            },
        }
    }

    pub fn preprocessor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.preprocessors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn postprocessor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.postprocessors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

pub fn strip_bom(source: &str) -> Result<String> {
    Ok(source.strip_prefix('\u{feff}').unwrap_or(source).to_string())
}

/// The template list as tab-indented JSON.
pub fn render_json(templates: &[Template]) -> Result<String> {
    to_json_string(templates, Indent::Tabs)
}

/// The template list as a gettext PO catalog with empty translations.
pub fn render_po(templates: &[Template]) -> Result<String> {
    let mut entries = Vec::new();
    for template in templates {
        match template {
            Template::Key(key) => {
                entries.push(format!("msgid {}\nmsgstr \"\"\n", po_string(key)?));
            }
            Template::Group(group) => {
                let context = po_string(&group.group)?;
                for item in &group.items {
                    entries.push(format!(
                        "msgctxt {}\nmsgid {}\nmsgstr \"\"\n",
                        context,
                        po_string(item)?
                    ));
                }
            }
        }
    }
    Ok(entries.join("\n"))
}

fn po_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
