//! Generation runs.
//!
//! A [`Generator`] owns the finalized answers for one run, accumulates the
//! assets to produce, and executes the pipeline: token substitution over
//! every asset, template rendering for file content, then persistence.

use crate::asset::{Asset, Directory, File, Symlink};
use crate::collection::AssetCollection;
use crate::config::{AssetManifest, DirectorySpec, FileSpec};
use crate::error::{Error, Result};
use crate::processor::persist_assets;
use crate::renderer::TemplateRenderer;
use crate::tokens::string_vars;
use indexmap::IndexMap;
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// A single generation run.
pub struct Generator {
    answers: serde_json::Map<String, serde_json::Value>,
    vars: IndexMap<String, String>,
    assets: Vec<Asset>,
}

impl Generator {
    /// Creates a run over finalized answers. The answers drive both token
    /// substitution (stringified) and template rendering (as-is).
    pub fn new(answers: serde_json::Map<String, serde_json::Value>) -> Self {
        let vars = string_vars(&answers);
        Self {
            answers,
            vars,
            assets: Vec::new(),
        }
    }

    /// Answer values exposed to templates.
    pub fn answers(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.answers
    }

    /// String variables driving token substitution.
    pub fn vars(&self) -> &IndexMap<String, String> {
        &self.vars
    }

    /// Schedules an asset for generation. Its token-bearing fields are
    /// substituted when the run executes.
    pub fn add(&mut self, asset: impl Into<Asset>) {
        self.assets.push(asset.into());
    }

    /// Schedules every asset declared by a manifest.
    pub fn add_manifest_assets(&mut self, assets: &AssetManifest) {
        for spec in &assets.directories {
            self.add(directory_from_spec(spec));
        }
        for spec in &assets.files {
            self.add(file_from_spec(spec));
        }
        for spec in &assets.symlinks {
            self.add(Symlink::new(&spec.path, &spec.target));
        }
    }

    /// Schedules every entry under `static_dir`, keyed by its path relative
    /// to that directory. The relative paths may carry tokens. Missing
    /// directories are fine; a generator without a static tree is the
    /// common case.
    pub fn add_static_tree(&mut self, static_dir: &Path) -> Result<()> {
        if !static_dir.is_dir() {
            return Ok(());
        }

        debug!("Collecting static assets from {}", static_dir.display());

        for entry in WalkDir::new(static_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let path = entry.path();
            let relative_path = path
                .strip_prefix(static_dir)
                .map_err(|e| Error::ConfigError(e.to_string()))?;
            let relative_path = relative_path
                .to_str()
                .ok_or_else(|| Error::ConfigError("Invalid path".to_string()))?;

            // The walk root itself.
            if relative_path.is_empty() {
                continue;
            }

            if path.is_dir() {
                self.add(Directory::new(relative_path));
            } else {
                let bytes = std::fs::read(path).map_err(Error::IoError)?;
                // Text files keep the full write machinery; anything else
                // is copied byte for byte.
                let file = match String::from_utf8(bytes) {
                    Ok(content) => File::new(relative_path).with_content(content),
                    Err(error) => {
                        File::new(relative_path).with_content_bytes(error.into_bytes())
                    }
                };
                self.add(file);
            }
        }
        Ok(())
    }

    /// Executes the run: substitutes tokens, registers every asset under
    /// its resolved path, renders file content, persists everything under
    /// `output_dir`, and returns the finalized collection for reporting.
    pub fn generate(
        self,
        renderer: &dyn TemplateRenderer,
        output_dir: &Path,
    ) -> Result<AssetCollection> {
        let Generator {
            answers,
            vars,
            assets,
        } = self;

        let mut collection = AssetCollection::new();
        for mut asset in assets {
            asset.replace_tokens(&vars)?;
            collection.add(asset)?;
        }

        for asset in collection.iter_mut() {
            if let Asset::File(file) = asset {
                render_file(file, &answers, renderer)?;
            }
        }

        persist_assets(&mut collection, output_dir)?;
        Ok(collection)
    }
}

/// Renders a file's content in place. Named templates win over inline
/// templates, which win over literal content; a header template, when set,
/// is rendered and concatenated before the body with no extra separator.
fn render_file(
    file: &mut File,
    answers: &serde_json::Map<String, serde_json::Value>,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    let mut context = answers.clone();
    for (key, value) in file.vars() {
        context.insert(key.clone(), value.clone());
    }
    let context = serde_json::Value::Object(context);

    let body = if let Some(template) = file.template() {
        renderer.render(template, &context)?
    } else if let Some(inline_template) = file.inline_template() {
        renderer.render_inline(inline_template, &context)?
    } else if file.header_template().is_some() {
        file.content().unwrap_or("").to_string()
    } else {
        // Literal content stands as-is.
        return Ok(());
    };

    let content = match file.header_template() {
        Some(header_template) => renderer.render(header_template, &context)? + &body,
        None => body,
    };

    file.set_content(Some(content));
    Ok(())
}

fn directory_from_spec(spec: &DirectorySpec) -> Directory {
    let mut directory = Directory::new(&spec.path);
    if let Some(mode) = spec.mode {
        directory = directory.with_mode(mode);
    }
    directory
}

fn file_from_spec(spec: &FileSpec) -> File {
    let mut file = File::new(&spec.path);
    if let Some(template) = &spec.template {
        file = file.with_template(template);
    }
    if let Some(header_template) = &spec.header_template {
        file = file.with_header_template(header_template);
    }
    if let Some(inline_template) = &spec.inline_template {
        file = file.with_inline_template(inline_template);
    }
    if let Some(content) = &spec.content {
        file = file.with_content(content);
    }
    if !spec.vars.is_empty() {
        file = file.with_vars(spec.vars.clone());
    }
    if let Some(action) = spec.action {
        file = file.with_action(action);
    }
    if let Some(header_size) = spec.header_size {
        file = file.with_header_size(header_size);
    }
    if let Some(mode) = spec.mode {
        file = file.with_mode(mode);
    }
    file
}
