//! Brand conflict research CLI.
//!
//! Usage:
//!     brandcheck analyze "Luminara" --category Streetwear --results hits.json
//!     brandcheck variants "Luminara"
//!     brandcheck precedents --category Streetwear --jurisdiction India
//!     brandcheck classify --category Streetwear

use anyhow::{Context, Result};
use brandcheck_engine::{select_precedents, EngineConfig, ResearchEngine};
use brandcheck_features::generate_variants;
use brandcheck_model::{ResearchRequest, ResearchResult, SearchResultSet};
use brandcheck_prompt::{render_prompt, summarize_risk};
use brandcheck_reference::{ReferenceTables, DEFAULT_JURISDICTION};
use brandcheck_search::{
    collect_results, queries_for_request, FixtureBackend, FixtureConfig, RecoverableGap,
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "brandcheck")]
#[command(about = "Research trademark, company and common-law conflicts for a brand name")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reference data JSON (defaults to the built-in tables)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full research pipeline for a brand
    Analyze {
        /// Brand name to research
        brand: String,

        /// Industry of the brand
        #[arg(short, long, default_value = "General")]
        industry: String,

        /// Product category
        #[arg(short, long, default_value = "General")]
        category: String,

        /// Target jurisdiction (repeatable; first is primary)
        #[arg(short, long = "jurisdiction")]
        jurisdictions: Vec<String>,

        /// Known competitor name (repeatable)
        #[arg(long = "competitor")]
        competitors: Vec<String>,

        /// Product keyword used to widen search queries (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Pre-fetched search results JSON
        #[arg(short, long)]
        results: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show spelling variants of a name
    Variants {
        /// Name to vary
        name: String,
    },

    /// Show precedents selected for a category and jurisdiction
    Precedents {
        #[arg(short, long, default_value = "General")]
        category: String,

        #[arg(short, long, default_value = "General")]
        industry: String,

        #[arg(short, long, default_value = "India")]
        jurisdiction: String,
    },

    /// Map a category or industry to a Nice class
    Classify {
        #[arg(short, long, default_value = "")]
        category: String,

        #[arg(short, long, default_value = "")]
        industry: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Prompt,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("brandcheck=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tables = load_tables(cli.reference.as_deref())?;

    match cli.command {
        Commands::Analyze {
            brand,
            industry,
            category,
            jurisdictions,
            competitors,
            keywords,
            results,
            format,
        } => {
            let mut request = ResearchRequest::new(brand)
                .with_industry(industry)
                .with_category(category)
                .with_competitors(competitors)
                .with_product_keywords(keywords);
            if !jurisdictions.is_empty() {
                request = request.with_jurisdictions(jurisdictions);
            }
            run_analyze(tables, &request, results, format).await?;
        }
        Commands::Variants { name } => {
            run_variants(&name);
        }
        Commands::Precedents {
            category,
            industry,
            jurisdiction,
        } => {
            run_precedents(&tables, &category, &industry, &jurisdiction);
        }
        Commands::Classify { category, industry } => {
            let nice = tables.classify(&category, &industry);
            println!(
                "Class {}: {} (matched: {})",
                nice.class_number, nice.description, nice.matched_term
            );
        }
    }

    Ok(())
}

fn load_tables(path: Option<&Path>) -> Result<ReferenceTables> {
    match path {
        Some(path) => ReferenceTables::from_path(path)
            .with_context(|| format!("loading reference data from {}", path.display())),
        None => ReferenceTables::builtin().context("loading built-in reference data"),
    }
}

async fn fetch_results(
    request: &ResearchRequest,
    path: Option<PathBuf>,
) -> Result<(SearchResultSet, Vec<RecoverableGap>)> {
    let Some(path) = path else {
        tracing::info!("No search results supplied, using reference cache only");
        return Ok((SearchResultSet::default(), Vec::new()));
    };

    let backend = FixtureBackend::load(&FixtureConfig { path }).await?;
    let queries = queries_for_request(request);
    let outcome = collect_results(&backend, &queries).await;
    tracing::info!(
        queries = queries.len(),
        results = outcome.results.len(),
        gaps = outcome.gaps.len(),
        "Collected search results"
    );
    Ok((outcome.results, outcome.gaps))
}

async fn run_analyze(
    tables: ReferenceTables,
    request: &ResearchRequest,
    results_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let (results, gaps) = fetch_results(request, results_path).await?;

    let engine = ResearchEngine::new(tables, EngineConfig::default());
    let result = engine.research(request, &results)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "result": result,
                "gaps": gaps,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Prompt => {
            print!("{}", render_prompt(&result, Utc::now()));
        }
        OutputFormat::Text => print_report(&result, &gaps),
    }

    Ok(())
}

fn print_report(result: &ResearchResult, gaps: &[RecoverableGap]) {
    let nice = &result.nice_classification;
    println!("Brand: {}", result.brand_name);
    println!("Nice class {}: {}", nice.class_number, nice.description);
    println!("Jurisdictions: {}", result.jurisdictions.join(", "));
    println!("---");
    println!("{}", summarize_risk(&result.risk_profile));
    println!(
        "Registration success: {}% | Opposition: {}%",
        result.risk_profile.registration_success_probability,
        result.risk_profile.opposition_probability
    );

    if !result.trademark_conflicts.is_empty() {
        println!("\nTrademarks:");
        for t in &result.trademark_conflicts {
            let status = t.status.map(|s| s.label()).unwrap_or("Unknown");
            println!("  [{}] {} ({}, {})", t.risk_level.label(), t.name, status, t.source);
        }
    }
    if !result.company_conflicts.is_empty() {
        println!("\nCompanies:");
        for c in &result.company_conflicts {
            println!(
                "  [{}] {} ({}, {})",
                c.risk_level.label(),
                c.name,
                c.status.label(),
                c.source
            );
        }
    }
    if !result.common_law_conflicts.is_empty() {
        println!("\nCommon-law usage:");
        for c in &result.common_law_conflicts {
            println!("  [{}] {} on {}", c.risk_level.label(), c.name, c.platform);
        }
    }
    if !result.legal_precedents.is_empty() {
        println!("\nPrecedents:");
        for p in &result.legal_precedents {
            println!("  {}", p.case_name);
        }
    }
    if !gaps.is_empty() {
        println!("\nSearch gaps:");
        for gap in gaps {
            println!("  {} [{:?}] ({}): {}", gap.query, gap.kind, gap.backend, gap.reason);
        }
    }
}

fn run_variants(name: &str) {
    let variants = generate_variants(name);
    if variants.is_empty() {
        println!("No variants for {:?}", name);
        return;
    }
    for variant in variants {
        println!("{}", variant);
    }
}

fn run_precedents(tables: &ReferenceTables, category: &str, industry: &str, jurisdiction: &str) {
    match tables.resolve_jurisdiction(jurisdiction) {
        Some(key) => println!("Jurisdiction: {} -> {}", jurisdiction, key),
        None => {
            let known: Vec<&str> = tables.jurisdictions().collect();
            println!(
                "Jurisdiction: {} not covered (known: {}), using {}",
                jurisdiction,
                known.join(", "),
                DEFAULT_JURISDICTION
            );
        }
    }
    println!("---");

    let precedents = select_precedents(tables, category, industry, &[jurisdiction.to_string()]);
    for (i, p) in precedents.iter().enumerate() {
        println!("\n{}. {}", i + 1, p.case_name);
        if let Some(court) = &p.court {
            println!("   Court: {}", court);
        }
        if let Some(year) = &p.year {
            println!("   Year: {}", year);
        }
        println!("   {}", p.relevance);
    }
}
