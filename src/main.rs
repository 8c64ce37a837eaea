use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use arbor_id3::{DecisionTree, Id3Config, TieBreak};
use arbor_io::{AttributeReader, ExampleReader, ExperimentName, ResultWriter};

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "ID3 decision tree induction for categorical datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for batch classification (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Induce a decision tree from an attribute file and an example file
    Train {
        /// Path to the attribute file (one comma-separated header line, class last)
        #[arg(long)]
        attributes: PathBuf,

        /// Path to the example file (one comma-separated row per example, label last)
        #[arg(long)]
        examples: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: ExperimentName,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Majority-label tie-break: "first-seen" or "lexicographic"
        #[arg(long, default_value = "first-seen")]
        tie_break: String,
    },

    /// Classify labeled examples with a saved model and report accuracy
    Evaluate {
        /// Path to the trained model binary
        #[arg(long)]
        model: PathBuf,

        /// Path to the example file
        #[arg(long)]
        examples: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: ExperimentName,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Print a saved tree in indented text form
    Show {
        /// Path to the trained model binary
        #[arg(long)]
        model: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct TrainOutput {
    experiment: String,
    n_examples: usize,
    n_features: usize,
    n_classes: usize,
    n_nodes: usize,
    n_leaves: usize,
    depth: usize,
    training_accuracy: f64,
}

#[derive(Serialize)]
struct EvaluateOutput {
    experiment: String,
    n_examples: usize,
    accuracy: f64,
    n_unclassified: usize,
    model_n_nodes: usize,
    model_n_classes: usize,
}

fn parse_tie_break(s: &str) -> Result<TieBreak> {
    match s {
        "first-seen" => Ok(TieBreak::FirstSeen),
        "lexicographic" => Ok(TieBreak::Lexicographic),
        other => bail!("unknown tie-break \"{other}\": expected \"first-seen\" or \"lexicographic\""),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Train {
            attributes,
            examples,
            experiment,
            output_dir,
            tie_break,
        } => {
            let tie_break = parse_tie_break(&tie_break)?;

            // 1. Read inputs
            let schema = AttributeReader::new(&attributes)
                .read()
                .context("failed to read attribute file")?;
            let examples = ExampleReader::new(&examples, &schema)
                .read()
                .context("failed to read example file")?;

            // 2. Induce
            let tree = Id3Config::new()
                .with_tie_break(tie_break)
                .fit(&schema, &examples)
                .context("tree induction failed")?;

            let training = tree
                .evaluate(&examples)
                .context("failed to score training examples")?;
            info!(accuracy = training.accuracy(), "training accuracy computed");

            // 3. Save model and artifacts
            let writer = ResultWriter::new(&output_dir, experiment.clone())?;
            tree.save(writer.model_path())
                .context("failed to save model")?;
            writer.write_tree(&tree)?;
            writer.write_dot(&tree)?;

            // 4. Print tree and summary
            print!("{tree}");
            let output = TrainOutput {
                experiment: experiment.to_string(),
                n_examples: examples.len(),
                n_features: schema.n_features(),
                n_classes: tree.class_labels().len(),
                n_nodes: tree.n_nodes(),
                n_leaves: tree.n_leaves(),
                depth: tree.depth(),
                training_accuracy: training.accuracy(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Evaluate {
            model,
            examples,
            experiment,
            output_dir,
        } => {
            // 1. Load model
            let tree = DecisionTree::load(&model).context("failed to load model")?;
            info!(
                n_nodes = tree.n_nodes(),
                n_classes = tree.class_labels().len(),
                "model loaded"
            );

            // 2. Read examples against the model's schema
            let examples = ExampleReader::new(&examples, tree.schema())
                .read()
                .context("failed to read example file")?;

            // 3. Classify
            let confusion = tree
                .evaluate(&examples)
                .context("evaluation failed")?;
            info!(
                accuracy = confusion.accuracy(),
                n_unclassified = confusion.n_unclassified(),
                "evaluation complete"
            );

            // 4. Write evaluation JSON
            let writer = ResultWriter::new(&output_dir, experiment.clone())?;
            writer.write_evaluation(examples.len(), &confusion)?;

            // 5. Print summary
            let output = EvaluateOutput {
                experiment: experiment.to_string(),
                n_examples: examples.len(),
                accuracy: confusion.accuracy(),
                n_unclassified: confusion.n_unclassified(),
                model_n_nodes: tree.n_nodes(),
                model_n_classes: tree.class_labels().len(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Show { model } => {
            let tree = DecisionTree::load(&model).context("failed to load model")?;
            print!("{tree}");
        }
    }

    Ok(())
}
