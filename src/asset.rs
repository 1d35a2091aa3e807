//! Asset model: the units of generated output.
//!
//! An asset is a directory, symlink, or file scheduled for creation under
//! the output root. Asset paths start out as token-bearing patterns
//! (`src/{class}.php`) and become literal relative paths once token
//! substitution has run.

use crate::constants::TEMPLATE_EXTENSION;
use crate::error::Result;
use crate::tokens::replace_tokens;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;

/// What to do when a file already exists at the asset path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Overwrite the existing content
    #[default]
    Replace,
    /// Put the generated content before the existing content
    Prepend,
    /// Put the generated content after the existing content
    Append,
    /// Leave the existing file untouched
    Skip,
}

/// A callable responsible for resolving content.
///
/// Receives the content currently on disk (`None` when the file does not
/// exist yet) and the generated content, and returns the bytes to write.
/// Returning `None` means nothing is written.
pub type ContentResolver = dyn Fn(Option<&str>, &str) -> Option<String> + Send + Sync;

/// Policy for combining generated content with a pre-existing file: one of
/// the built-in actions, or a custom resolver that overrides them entirely.
///
/// A file carries exactly one policy, so the write resolution step has a
/// single dispatch point and the last `with_action`/`with_resolver` call
/// wins.
pub enum WritePolicy {
    Action(Action),
    Resolver(Box<ContentResolver>),
}

impl Default for WritePolicy {
    fn default() -> Self {
        WritePolicy::Action(Action::Replace)
    }
}

impl fmt::Debug for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WritePolicy::Action(action) => f.debug_tuple("Action").field(action).finish(),
            WritePolicy::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// A directory to be created under the output root.
#[derive(Debug)]
pub struct Directory {
    path: String,
    mode: u32,
}

impl Directory {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), mode: 0o755 }
    }

    /// Sets the access permissions applied on creation.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    fn replace_tokens(&mut self, vars: &IndexMap<String, String>) -> Result<()> {
        self.path = replace_tokens(&self.path, vars)?;
        Ok(())
    }
}

/// A symbolic link to be created under the output root.
#[derive(Debug)]
pub struct Symlink {
    path: String,
    target: String,
}

impl Symlink {
    pub fn new(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self { path: path.into(), target: target.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Link target, relative to the link's parent directory.
    pub fn target(&self) -> &str {
        &self.target
    }

    fn replace_tokens(&mut self, vars: &IndexMap<String, String>) -> Result<()> {
        self.path = replace_tokens(&self.path, vars)?;
        self.target = replace_tokens(&self.target, vars)?;
        Ok(())
    }
}

/// A file to be written under the output root.
///
/// Content comes from exactly one source: a named template, an inline
/// template string, or literal content, in that order of precedence.
/// Rendering populates `content` before write resolution runs. Verbatim
/// byte content sidesteps both steps and is written as-is.
#[derive(Debug)]
pub struct File {
    path: String,
    mode: u32,
    content: Option<String>,
    content_bytes: Option<Vec<u8>>,
    template: Option<String>,
    header_template: Option<String>,
    inline_template: Option<String>,
    vars: serde_json::Map<String, serde_json::Value>,
    header_size: usize,
    policy: WritePolicy,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: 0o644,
            content: None,
            content_bytes: None,
            template: None,
            header_template: None,
            inline_template: None,
            vars: serde_json::Map::new(),
            header_size: 0,
            policy: WritePolicy::default(),
        }
    }

    /// Sets literal content, bypassing template rendering.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets verbatim bytes for copying a file that is not UTF-8 text.
    /// Rendering and write resolution do not apply; the bytes always land
    /// on disk as-is.
    pub fn with_content_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.content_bytes = Some(bytes.into());
        self
    }

    /// Sets the named template rendered as the file body.
    ///
    /// The identifier is normalized to carry the canonical template file
    /// extension if it does not already.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(ensure_template_extension(template.into()));
        self
    }

    /// Sets the named template rendered and concatenated before the body.
    pub fn with_header_template(mut self, header_template: impl Into<String>) -> Self {
        self.header_template = Some(ensure_template_extension(header_template.into()));
        self
    }

    /// Sets a literal template string rendered in place of a named template.
    pub fn with_inline_template(mut self, inline_template: impl Into<String>) -> Self {
        self.inline_template = Some(inline_template.into());
        self
    }

    /// Sets template-local variables, merged over the global variables at
    /// render time.
    pub fn with_vars(mut self, vars: serde_json::Map<String, serde_json::Value>) -> Self {
        self.vars = vars;
        self
    }

    /// Sets the built-in action taken when the file already exists.
    pub fn with_action(mut self, action: Action) -> Self {
        self.policy = WritePolicy::Action(action);
        self
    }

    /// Sets a custom resolver, overriding any built-in action.
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(Option<&str>, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.policy = WritePolicy::Resolver(Box::new(resolver));
        self
    }

    /// Declares that the first `lines` lines of existing content are a
    /// previously generated header to drop before combining old and new
    /// content. Unset (the default) means no header stripping.
    pub fn with_header_size(mut self, lines: NonZeroUsize) -> Self {
        self.header_size = lines.get();
        self
    }

    /// Sets the access permissions applied on write.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Rendered content, or the bytes actually written once the file has
    /// been persisted (`None` for skipped files).
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Verbatim byte content, set only for non-text copies.
    pub fn content_bytes(&self) -> Option<&[u8]> {
        self.content_bytes.as_deref()
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn header_template(&self) -> Option<&str> {
        self.header_template.as_deref()
    }

    pub fn inline_template(&self) -> Option<&str> {
        self.inline_template.as_deref()
    }

    pub fn vars(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.vars
    }

    pub fn header_size(&self) -> usize {
        self.header_size
    }

    pub fn policy(&self) -> &WritePolicy {
        &self.policy
    }

    pub(crate) fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }

    fn replace_tokens(&mut self, vars: &IndexMap<String, String>) -> Result<()> {
        self.path = replace_tokens(&self.path, vars)?;
        if let Some(template) = &self.template {
            self.template = Some(replace_tokens(template, vars)?);
        }
        if let Some(header_template) = &self.header_template {
            self.header_template = Some(replace_tokens(header_template, vars)?);
        }
        Ok(())
    }
}

/// A unit of generated output: a directory, symlink, or file.
#[derive(Debug)]
pub enum Asset {
    Directory(Directory),
    Symlink(Symlink),
    File(File),
}

impl Asset {
    /// Relative path of the asset under the output root.
    pub fn path(&self) -> &str {
        match self {
            Asset::Directory(directory) => directory.path(),
            Asset::Symlink(symlink) => symlink.path(),
            Asset::File(file) => file.path(),
        }
    }

    /// Label used when reporting the asset.
    pub fn kind(&self) -> &'static str {
        match self {
            Asset::Directory(_) => "directory",
            Asset::Symlink(_) => "symlink",
            Asset::File(_) => "file",
        }
    }

    /// Applies token substitution to the asset's own fields: the path for
    /// every variant, plus template and header template identifiers for
    /// files and the target for symlinks. Literal content, inline templates
    /// and template-local variables are left for the rendering engine.
    ///
    /// Call exactly once, after all variables are finalized; calling again
    /// with a different mapping has undefined results.
    pub fn replace_tokens(&mut self, vars: &IndexMap<String, String>) -> Result<()> {
        match self {
            Asset::Directory(directory) => directory.replace_tokens(vars),
            Asset::Symlink(symlink) => symlink.replace_tokens(vars),
            Asset::File(file) => file.replace_tokens(vars),
        }
    }
}

impl From<Directory> for Asset {
    fn from(directory: Directory) -> Self {
        Asset::Directory(directory)
    }
}

impl From<Symlink> for Asset {
    fn from(symlink: Symlink) -> Self {
        Asset::Symlink(symlink)
    }
}

impl From<File> for Asset {
    fn from(file: File) -> Self {
        Asset::File(file)
    }
}

/// Adds the canonical template extension if needed.
fn ensure_template_extension(template: String) -> String {
    if template.is_empty() {
        return template;
    }
    let already_suffixed = Path::new(&template)
        .extension()
        .map_or(false, |extension| extension == TEMPLATE_EXTENSION);
    if already_suffixed {
        template
    } else {
        format!("{}.{}", template, TEMPLATE_EXTENSION)
    }
}
