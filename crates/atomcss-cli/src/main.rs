use atomcss_compiler::{CompilationContext, CompilerOptions, CompilerOutput, StyleResolution};
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atomcss")]
#[command(about = "atomcss: compile style objects to atomic CSS")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log compiler activity (overrides ATOMCSS_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a .json style document to CSS + class name map
    Build {
        /// Input .json file
        path: String,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Check a .json style document for errors without writing output
    Check {
        /// Input .json file
        path: String,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Compiler options file (.json)
    #[arg(long)]
    config: Option<String>,

    /// Readable class names (`color-x1e2nbdu`)
    #[arg(long)]
    dev: bool,

    /// Emit `<namespace>__<key>` placeholders instead of classes
    #[arg(long)]
    test: bool,

    /// Convert px font sizes to rem
    #[arg(long)]
    rem: bool,

    /// Class name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// application-order, property-specificity or legacy-expand-shorthands
    #[arg(long)]
    style_resolution: Option<StyleResolution>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build { path, options } => cmd_build(&path, &options),
        Command::Check { path, options } => cmd_check(&path, &options),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("ATOMCSS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn read_file(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Options from `--config`, then flags on top.
fn load_options(args: &OptionArgs) -> CompilerOptions {
    let mut options = match &args.config {
        Some(path) => match serde_json::from_str::<CompilerOptions>(&read_file(path)) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Config error in {path}: {e}");
                std::process::exit(1);
            }
        },
        None => CompilerOptions::default(),
    };

    options.dev |= args.dev;
    options.test |= args.test;
    options.use_rem_for_font_size |= args.rem;
    if let Some(prefix) = &args.prefix {
        options.class_name_prefix = prefix.clone();
    }
    if let Some(resolution) = args.style_resolution {
        options.style_resolution = resolution;
    }
    options
}

fn compile_file(path: &str, options: &CompilerOptions) -> CompilerOutput {
    let source = read_file(path);

    let doc = match atomcss_parser::Parser::parse(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        }
    };

    match atomcss_compiler::compile(&doc, options, &CompilationContext::new()) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Compile error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_build(path: &str, args: &OptionArgs) {
    let options = load_options(args);
    let output = compile_file(path, &options);

    // Write output files next to the source
    let input = Path::new(path);
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("styles");
    let dir = input.parent().unwrap_or(Path::new("."));

    let css_path = dir.join(format!("{stem}.css"));
    let classes_path = dir.join(format!("{stem}.classes.json"));

    if let Err(e) = std::fs::write(&css_path, format!("{}\n", output.css)) {
        eprintln!("Error writing {}: {e}", css_path.display());
        std::process::exit(1);
    }

    // Everything a front end needs to rewrite its style references
    let classes = serde_json::json!({
        "namespaces": output.namespaces,
        "keyframes": output.keyframes,
        "vars": output.vars,
        "themes": output.themes,
        "constants": output.constants,
    });
    let classes = match serde_json::to_string_pretty(&classes) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing class map: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&classes_path, classes) {
        eprintln!("Error writing {}: {e}", classes_path.display());
        std::process::exit(1);
    }

    eprintln!("Built: {} ({} rules)", css_path.display(), output.styles.len());
}

fn cmd_check(path: &str, args: &OptionArgs) {
    let options = load_options(args);
    let output = compile_file(path, &options);

    if !output.warnings.is_empty() {
        eprintln!("{path}: {} warning(s)", output.warnings.len());
    }
    eprintln!("OK: {path}");
}
