//! Learns interview question values from catalog, tree, and rule files.

use std::path::PathBuf;

use anamnesis_core::Catalog;
use anamnesis_engine::InterviewSession;
use anamnesis_rules::RuleSet;
use anamnesis_training::{evaluate_policy, Trainer, TrainerConfig};
use anamnesis_tree::{QuestionTree, TreeLayout};
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "anamnesis-train",
    about = "Learn interview question values by simulated self-play"
)]
#[command(version)]
struct Cli {
    /// Hypothesis catalog JSON.
    #[arg(long, default_value = "data.json")]
    catalog: PathBuf,

    /// Question tree layout JSON.
    #[arg(long, default_value = "question_tree.json")]
    tree: PathBuf,

    /// Inference rules JSON; omit to train without rules.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Where the learned value table is written.
    #[arg(long, default_value = "question_values.json")]
    output: PathBuf,

    /// Optional path for the evaluation report JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Training episodes.
    #[arg(long, default_value_t = 5_000)]
    epochs: usize,

    /// Rng seed for respondents and exploration.
    #[arg(long, default_value_t = 120)]
    seed: u64,

    /// Keep general-specific rules instead of relying on tree expansion.
    #[arg(long)]
    keep_general_specific: bool,

    /// Skip the evaluation pass after training.
    #[arg(long)]
    skip_eval: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("loading catalog from {}", cli.catalog.display()))?;
    let layout = TreeLayout::load(&cli.tree)
        .with_context(|| format!("loading tree layout from {}", cli.tree.display()))?;
    let tree = QuestionTree::build(&layout)?;
    let rules = match &cli.rules {
        Some(path) => {
            let rules = RuleSet::load(path)
                .with_context(|| format!("loading rules from {}", path.display()))?;
            if cli.keep_general_specific {
                rules
            } else {
                // tree expansion already folds taxonomy edges into the catalog
                rules.without_general_specific()
            }
        }
        None => RuleSet::new(),
    };
    info!(
        hypotheses = catalog.len(),
        rules = rules.rule_count(),
        "training inputs loaded"
    );

    let session = InterviewSession::new(catalog, tree, rules)?;
    let trainer = Trainer::new(session).with_config(TrainerConfig {
        epochs: cli.epochs,
        seed: cli.seed,
        ..TrainerConfig::default()
    });
    let result = trainer.train()?;

    result.values.save(&cli.output)?;
    info!(
        path = %cli.output.display(),
        actions = result.values.len(),
        "value table written"
    );

    let mut ranked: Vec<(String, f64)> = result.values.to_flat_map().into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (key, value) in ranked.iter().take(10) {
        info!(action = %key, value = *value, "top action");
    }

    if !cli.skip_eval {
        let mut rng = StdRng::seed_from_u64(cli.seed);
        let report = evaluate_policy(trainer.session(), &result.values, &mut rng)?;
        info!(
            hit_rate = report.hit_rate(),
            average_questions = report.average_questions(),
            runs = report.outcomes.len(),
            "evaluation finished"
        );
        if let Some(path) = &cli.report {
            std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
            info!(path = %path.display(), "evaluation report written");
        }
    }

    Ok(())
}
