//! The [`Template`] type: a template file bound to its variables.
//!
//! ```no_run
//! use stencil::template::Template;
//!
//! # fn main() -> stencil::error::Result<()> {
//! Template::factory("blog/templates/backend/index", [("title", "Dashboard")])?
//!     .assign("msg", "Some message...", false)
//!     .display()?;
//! # Ok(())
//! # }
//! ```

use crate::config::template_ext;
use crate::error::{Error, Result};
use crate::globals::{assign_global, globals};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use indexmap::IndexMap;
use log::{debug, error, trace};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A template file together with its local variables and rendered output.
///
/// Converting a `Template` to a string through `Display` renders it, but a
/// failed render is only logged and yields an empty string. Call
/// [`Template::render`] when an empty output must be told apart from an error.
pub struct Template {
    /// Base path with the template extension appended
    template_file: PathBuf,
    /// Local variables, shadowing globals of the same name
    vars: IndexMap<String, Value>,
    /// Output of the first render, replaced by every filter applied since
    output: RefCell<Option<String>>,
    renderer: Box<dyn TemplateRenderer>,
}

/// Appends the configured extension to `template` as plain text, so
/// `page.html` with extension `.j2` becomes `page.html.j2`.
fn resolve_template_file(template: &Path) -> PathBuf {
    let mut file = template.as_os_str().to_os_string();
    file.push(template_ext());
    PathBuf::from(file)
}

impl Template {
    /// Creates a template from a base path and an initial set of local variables.
    ///
    /// # Arguments
    /// * `template` - Path of the template file without its extension
    /// * `variables` - Initial local variables
    ///
    /// # Errors
    /// * `Error::TemplateNotFoundError` if `template` plus the configured
    ///   extension is not an existing file
    pub fn new<P, I, K, V>(template: P, variables: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let template_file = resolve_template_file(template.as_ref());
        if !template_file.is_file() {
            return Err(Error::TemplateNotFoundError {
                template: template.as_ref().display().to_string(),
            });
        }

        debug!("Using template file '{}'.", template_file.display());

        Ok(Self {
            template_file,
            vars: variables.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            output: RefCell::new(None),
            renderer: Box::new(MiniJinjaRenderer::new()),
        })
    }

    /// Same as [`Template::new`], reads better at the head of a call chain.
    pub fn factory<P, I, K, V>(template: P, variables: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::new(template, variables)
    }

    /// Creates a template without local variables.
    pub fn open<P: AsRef<Path>>(template: P) -> Result<Self> {
        Self::new(template, IndexMap::<String, Value>::new())
    }

    /// Replaces the engine used to evaluate the template file.
    pub fn with_renderer<R: TemplateRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Assigns a variable to this template, or to every template in the
    /// process when `global` is set.
    pub fn assign<K: Into<String>, V: Into<Value>>(
        &mut self,
        key: K,
        value: V,
        global: bool,
    ) -> &mut Self {
        if global {
            assign_global(key, value);
        } else {
            self.vars.insert(key.into(), value.into());
        }
        self
    }

    /// Renders the template file and returns what it produced.
    ///
    /// The file is evaluated once; later calls return the stored output,
    /// including whatever filters have been applied to it.
    ///
    /// # Errors
    /// * `Error::IoError` if the file can no longer be read
    /// * `Error::MinijinjaError` if the file fails to parse or evaluate
    pub fn render(&self) -> Result<String> {
        if let Some(output) = self.output.borrow().as_ref() {
            trace!("Using stored output of '{}'.", self.template_file.display());
            return Ok(output.clone());
        }

        let output = self.evaluate()?;
        *self.output.borrow_mut() = Some(output.clone());
        Ok(output)
    }

    /// Renders the template, passes the output through `filter` and stores
    /// the filtered text in place of the previous output. Filters applied by
    /// successive calls therefore compose.
    pub fn render_with<F>(&self, filter: F) -> Result<String>
    where
        F: FnOnce(&str) -> String,
    {
        let output = filter(&self.render()?);
        trace!("Filtered output of '{}'.", self.template_file.display());
        *self.output.borrow_mut() = Some(output.clone());
        Ok(output)
    }

    /// Renders the template to standard output.
    pub fn display(&self) -> Result<()> {
        self.display_to(io::stdout().lock())
    }

    /// Renders the template to `writer`.
    pub fn display_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let output = self.render()?;
        writer.write_all(output.as_bytes()).map_err(Error::IoError)?;
        writer.flush().map_err(Error::IoError)
    }

    /// Returns a local variable. Keys bound to `null` count as unset.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key).filter(|value| !value.is_null())
    }

    /// Sets a local variable.
    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.vars.insert(key.into(), value.into());
    }

    /// Checks whether a local variable is set to something other than `null`.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a local variable and returns its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.vars.shift_remove(key)
    }

    /// Path of the template file, extension included.
    pub fn path(&self) -> &Path {
        &self.template_file
    }

    /// Local variables in assignment order.
    pub fn vars(&self) -> &IndexMap<String, Value> {
        &self.vars
    }

    /// Globals first, then locals on top so a local wins on a shared name.
    fn context(&self) -> Value {
        let mut scope: serde_json::Map<String, Value> = globals().into_iter().collect();
        for (key, value) in &self.vars {
            scope.insert(key.clone(), value.clone());
        }
        Value::Object(scope)
    }

    fn evaluate(&self) -> Result<String> {
        debug!("Rendering template '{}'.", self.template_file.display());
        let source = fs::read_to_string(&self.template_file).map_err(Error::IoError)?;
        let name = self.template_file.display().to_string();
        self.renderer.render(&name, &source, &self.context())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("template_file", &self.template_file)
            .field("vars", &self.vars)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Writes the rendered output. A render failure is logged and writes nothing,
/// since `Display` cannot carry the error.
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(output) => f.write_str(&output),
            Err(e) => {
                error!("{}", e);
                Ok(())
            }
        }
    }
}
