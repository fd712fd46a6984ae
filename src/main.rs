//! Eligibility Planner binary.
//!
//! Loads configuration, the catalog and an optional answer script, runs the
//! configured planning strategy and reports the verdicts.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use eligibility_planner::adapters::{AnswerScript, FileCatalogStore, ScriptedAnswerSource, TracingReporter};
use eligibility_planner::application::{
    BuildDecisionTreeCommand, BuildDecisionTreeHandler, LoadCatalogCommand, LoadCatalogHandler,
    RunGreedyInterviewCommand, RunGreedyInterviewHandler, WalkDecisionTreeCommand, WalkDecisionTreeHandler,
};
use eligibility_planner::config::{AppConfig, Strategy};
use eligibility_planner::domain::foundation::{DomainError, ErrorCode};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {}", err);
        return ExitCode::FAILURE;
    }
    if let Err(err) = config.logging.init() {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = %err.code, "{}", err.message);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), DomainError> {
    let store = Arc::new(FileCatalogStore::new("."));
    let reporter = Arc::new(TracingReporter::new());

    let catalog = LoadCatalogHandler::new(store)
        .handle(LoadCatalogCommand {
            key: config.catalog.path.clone(),
        })
        .await?
        .catalog;

    let script = match &config.interview.answers_path {
        Some(path) => AnswerScript::load(Path::new(path))
            .await
            .map_err(|e| DomainError::new(ErrorCode::StorageError, e.to_string()))?,
        None => AnswerScript::new(),
    };
    let answers = Arc::new(ScriptedAnswerSource::new(script));

    match config.planner.strategy {
        Strategy::Greedy => {
            let result = RunGreedyInterviewHandler::new(answers, reporter)
                .handle(RunGreedyInterviewCommand { catalog })
                .await?;
            info!(questions = ?result.questions, "Interview finished");
        }
        Strategy::DecisionTree => {
            let built = BuildDecisionTreeHandler::new(reporter.clone())
                .handle(BuildDecisionTreeCommand {
                    catalog: catalog.clone(),
                    max_depth: config.planner.max_depth,
                    max_relation_rows: config.planner.max_relation_rows,
                })
                .await?;
            let result = WalkDecisionTreeHandler::new(answers, reporter)
                .handle(WalkDecisionTreeCommand {
                    tree: built.tree,
                    catalog,
                })
                .await?;
            info!(eligible = ?result.eligible, pruned = result.pruned, depth = result.depth, "Walk finished");
        }
    }

    Ok(())
}
