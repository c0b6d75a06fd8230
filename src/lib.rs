//! Staffseq: linearizes handwritten music notation annotations.
//!
//! Staffseq reads symbol-level annotations of music pages (bounding boxes,
//! category labels and a directed relationship graph) and turns every staff
//! into a left-to-right sequence of elementary graphemes. Each grapheme
//! placement is then encoded as a (situation, intent, action) triple in
//! staff-relative coordinates, ready for training sequence models.
//!
//! # Modules
//!
//! - [`ir`]: Annotation graph types (ObjectUniverse, AnnotatedObject, BBox, etc.)
//! - [`grapheme`]: Grapheme vocabulary, classification and staff linearization
//! - [`encoding`]: Coordinate normalization and the sequence encoder
//! - [`validation`]: Universe validation and error reporting
//! - [`error`]: Error types for staffseq operations

pub mod encoding;
pub mod error;
pub mod grapheme;
pub mod ir;
pub mod validation;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use encoding::{EncodeOptions, EncodeReport, StaffEncoding, StaffErrorPolicy};
use ir::{ObjectId, ObjectUniverse};

pub use error::StaffSeqError;

/// The staffseq CLI application.
#[derive(Parser)]
#[command(name = "staffseq")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Encode every staff as a (situation, intent, action) sequence.
    Encode(EncodeArgs),
    /// Validate an annotation universe for errors and warnings.
    Validate(ValidateArgs),
    /// Print the linearized grapheme sequence of every staff.
    Inspect(InspectArgs),
}

/// Arguments for the encode subcommand.
#[derive(clap::Args)]
struct EncodeArgs {
    /// Input file, or a directory of MUSCIMA++ XML documents.
    input: PathBuf,

    /// Input format ('muscima' or 'json').
    #[arg(long, default_value = "muscima")]
    format: String,

    /// Encode only the staff with this object id.
    #[arg(long)]
    staff: Option<u64>,

    /// What to do when a staff fails to encode ('skip' or 'abort').
    #[arg(long, default_value = "skip")]
    on_error: String,

    /// Output format ('text', 'json' or 'csv').
    #[arg(long, default_value = "text")]
    output: String,

    /// Write the encoding to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Input file, or a directory of MUSCIMA++ XML documents.
    input: PathBuf,

    /// Input format ('muscima' or 'json').
    #[arg(long, default_value = "muscima")]
    format: String,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Input file, or a directory of MUSCIMA++ XML documents.
    input: PathBuf,

    /// Input format ('muscima' or 'json').
    #[arg(long, default_value = "muscima")]
    format: String,
}

/// An input document with the label used for it in reports.
struct Document {
    label: String,
    universe: ObjectUniverse,
}

/// Run the staffseq CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), StaffSeqError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Encode(args)) => run_encode(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("staffseq {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Linearizes handwritten music notation annotations.");
            println!();
            println!("Run 'staffseq --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // A logger may already be installed when embedded; keep it.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Load the input as one or more documents.
fn load_documents(input: &Path, format: &str) -> Result<Vec<Document>, StaffSeqError> {
    let label = input.display().to_string();
    match format {
        "muscima" | "muscima-xml" if input.is_dir() => {
            let documents = ir::io_muscima_xml::read_muscima_dir(input)?;
            log::info!("read {} document(s) from {}", documents.len(), label);
            Ok(documents
                .into_iter()
                .map(|doc| Document {
                    label: doc.path.display().to_string(),
                    universe: doc.universe,
                })
                .collect())
        }
        "muscima" | "muscima-xml" => Ok(vec![Document {
            universe: ir::io_muscima_xml::read_muscima_xml(input)?,
            label,
        }]),
        "json" | "universe-json" => Ok(vec![Document {
            universe: ir::io_json::read_universe_json(input)?,
            label,
        }]),
        other => Err(StaffSeqError::UnsupportedFormat(format!(
            "'{}' (supported: muscima, json)",
            other
        ))),
    }
}

/// Writer for `--out`, or stdout.
fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>, StaffSeqError> {
    match out {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[derive(Serialize)]
struct EncodedDocument<'a> {
    document: &'a str,
    staves: &'a [StaffEncoding<'a>],
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    documents: Vec<EncodedDocument<'a>>,
    report: &'a EncodeReport,
}

/// Execute the encode subcommand.
fn run_encode(args: EncodeArgs) -> Result<(), StaffSeqError> {
    let on_error: StaffErrorPolicy = args.on_error.parse()?;
    if !matches!(args.output.as_str(), "text" | "json" | "csv") {
        return Err(StaffSeqError::UnsupportedFormat(format!(
            "output '{}' (supported: text, json, csv)",
            args.output
        )));
    }

    let documents = load_documents(&args.input, &args.format)?;

    let mut report = EncodeReport::new();
    let mut per_document = Vec::with_capacity(documents.len());
    for document in &documents {
        let opts = EncodeOptions {
            on_error,
            staff: args.staff.map(ObjectId::new),
            document: Some(document.label.clone()),
        };
        let result = encoding::encode_universe(&document.universe, &opts)?;
        report.merge(result.report);
        per_document.push((document.label.as_str(), result.encodings));
    }

    let mut out = open_output(args.out.as_deref())?;
    match args.output.as_str() {
        "json" => {
            let output = EncodeOutput {
                documents: per_document
                    .iter()
                    .map(|(document, staves)| EncodedDocument {
                        document,
                        staves: staves.as_slice(),
                    })
                    .collect(),
                report: &report,
            };
            serde_json::to_writer_pretty(&mut out, &output)
                .map_err(|err| StaffSeqError::Io(err.into()))?;
            writeln!(out)?;
            log::info!("{}", report.to_string().trim_end());
        }
        "csv" => {
            let rows: Vec<(&str, &StaffEncoding<'_>)> = per_document
                .iter()
                .flat_map(|(document, staves)| staves.iter().map(move |staff| (*document, staff)))
                .collect();
            encoding::features::write_feature_csv(&mut out, &rows)?;
            log::info!("{}", report.to_string().trim_end());
        }
        _ => {
            for (document, staves) in &per_document {
                for encoding in staves {
                    write_encoding_text(&mut *out, document, encoding)?;
                }
            }
            write!(out, "{}", report)?;
        }
    }
    out.flush()?;

    Ok(())
}

fn write_encoding_text(
    out: &mut dyn Write,
    document: &str,
    encoding: &StaffEncoding<'_>,
) -> io::Result<()> {
    writeln!(
        out,
        "{} staff {}: {} step(s)",
        document,
        encoding.staff,
        encoding.len()
    )?;
    for (step, (intent, action)) in encoding.intents.iter().zip(&encoding.actions).enumerate() {
        writeln!(
            out,
            "  {:>4}  {:<16} {:<9} jump ({:+.4}, {:+.4})",
            step,
            intent.grapheme,
            intent.anchor_type,
            action.position_jump.x,
            action.position_jump.y
        )?;
    }
    writeln!(out)
}

#[derive(Serialize)]
struct DocumentValidation<'a> {
    document: &'a str,
    error_count: usize,
    warning_count: usize,
    issues: &'a [validation::ValidationIssue],
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), StaffSeqError> {
    let documents = load_documents(&args.input, &args.format)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let reports: Vec<(&str, validation::ValidationReport)> = documents
        .iter()
        .map(|doc| {
            (
                doc.label.as_str(),
                validation::validate_universe(&doc.universe, &opts),
            )
        })
        .collect();

    match args.output.as_str() {
        "json" => {
            let output: Vec<DocumentValidation<'_>> = reports
                .iter()
                .map(|(document, report)| DocumentValidation {
                    document,
                    error_count: report.error_count(),
                    warning_count: report.warning_count(),
                    issues: &report.issues,
                })
                .collect();
            let json = serde_json::to_string_pretty(&output)
                .map_err(|err| StaffSeqError::Io(err.into()))?;
            println!("{}", json);
        }
        "text" => {
            for (document, report) in &reports {
                if reports.len() > 1 {
                    println!("{}:", document);
                }
                print!("{}", report);
            }
        }
        other => {
            return Err(StaffSeqError::UnsupportedFormat(format!(
                "output '{}' (supported: text, json)",
                other
            )));
        }
    }

    let mut combined = validation::ValidationReport::new();
    for (_, report) in reports {
        combined.issues.extend(report.issues);
    }

    let has_errors = combined.error_count() > 0;
    let has_warnings = combined.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(StaffSeqError::ValidationFailed {
            error_count: combined.error_count(),
            warning_count: combined.warning_count(),
            report: combined,
        })
    } else {
        Ok(())
    }
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), StaffSeqError> {
    let documents = load_documents(&args.input, &args.format)?;

    for document in &documents {
        let universe = &document.universe;
        println!(
            "{}: {} object(s), {} staff/staves",
            document.label,
            universe.len(),
            universe.staves().count()
        );

        for staff in universe.staves() {
            match grapheme::linearize_staff(staff, universe) {
                Ok(graphemes) => {
                    println!("  staff {}: {} grapheme(s)", staff.id, graphemes.len());
                    for grapheme in &graphemes {
                        let source = grapheme.source();
                        println!(
                            "    {:<16} <- {} ({})",
                            grapheme.grapheme_type(),
                            source.class_name,
                            source.id
                        );
                    }
                }
                Err(err) => {
                    log::warn!("cannot linearize staff {}: {}", staff.id, err);
                    println!("  staff {}: error: {}", staff.id, err);
                }
            }
        }
    }

    Ok(())
}
