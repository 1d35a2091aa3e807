//! Scribe's main application entry point and orchestration logic.
//! Handles command-line argument parsing and coordinates the generation
//! flow between modules.

use scribe::{
    cli::{get_args, Args},
    config::get_manifest,
    constants::{STATIC_DIR, TEMPLATES_DIR},
    error::{default_error_handler, Error, Result},
    generator::Generator,
    parser::{get_answers, get_answers_from},
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    report,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Arguments
/// * `args` - Parsed command line arguments
///
/// # Returns
/// * `Result<()>` - Success or error status of the generation run
///
/// # Flow
/// 1. Loads and parses the generator manifest
/// 2. Collects answers for the manifest's questions
/// 3. Schedules the declared assets and the static tree
/// 4. Substitutes tokens, renders and persists everything
/// 5. Prints the result summary
fn run(args: Args) -> Result<()> {
    let generator_dir = args.generator.as_path();
    if !generator_dir.is_dir() {
        return Err(Error::GeneratorDoesNotExistError {
            generator_dir: generator_dir.display().to_string(),
        });
    }

    let manifest = get_manifest(generator_dir)?;
    if !manifest.name.is_empty() {
        log::debug!("Running generator: {}", manifest.name);
    }

    let prompt = DialoguerPrompter;
    let preloaded_answers = get_answers_from(args.stdin)?;
    let answers = get_answers(&prompt, &manifest.questions, preloaded_answers)?;

    let mut generator = Generator::new(answers);
    generator.add_manifest_assets(&manifest.assets);
    generator.add_static_tree(&generator_dir.join(STATIC_DIR))?;

    let renderer = MiniJinjaRenderer::from_dir(&generator_dir.join(TEMPLATES_DIR));
    let assets = generator.generate(&renderer, &args.output_dir)?;

    if args.verbose {
        report::print_verbose_summary(&assets);
    } else {
        report::print_summary(&assets);
    }

    Ok(())
}
