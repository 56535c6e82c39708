//! Prompt assembly for generation and evolution

use super::budget::{cap_documents, TokenEstimator};
use super::engine::{EvolutionMode, SeedStrategy};

/// Context gathered before generation: company profile plus retrieved
/// reference text
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub services: Vec<String>,
    pub assets: Vec<String>,
    pub constraints: Vec<String>,
    pub reference_docs: Vec<String>,
}

/// Output contract shared by every generation prompt
const OUTPUT_CONTRACT: &str = r#"Respond with a single JSON object and no extra text:
{
  "strategies": [
    {
      "name": "short unique name",
      "reason": "why this strategy can win",
      "howToObtain": "concrete steps to execute",
      "metrics": "how success is measured",
      "confidence": "high | medium | low",
      "tags": ["free-text labels"],
      "scores": {
        "revenuePotential": 1-5,
        "timeToRevenue": 1-5,
        "competitiveAdvantage": 1-5,
        "executionFeasibility": 1-5,
        "hqContribution": 1-5,
        "mergerSynergy": 1-5
      }
    }
  ],
  "thinkingProcess": "brief narrative of your reasoning"
}"#;

fn push_section(prompt: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    prompt.push_str("\n\n");
    prompt.push_str(title);
    prompt.push('\n');
    for item in items {
        prompt.push_str("- ");
        prompt.push_str(item);
        prompt.push('\n');
    }
}

/// Build the prompt for a fresh exploration
///
/// Reference text is capped by the token budget; whole documents are kept
/// in retrieval order until the budget runs out.
pub fn build_exploration_prompt(
    question: &str,
    context: &str,
    prompt_context: &PromptContext,
    reference_token_budget: usize,
    estimator: &dyn TokenEstimator,
) -> String {
    let mut prompt = String::from(
        "You are a corporate strategy advisor. Propose winning strategies for the question below.",
    );

    prompt.push_str("\n\nQuestion:\n");
    prompt.push_str(question);

    if !context.is_empty() {
        prompt.push_str("\n\nAdditional context:\n");
        prompt.push_str(context);
    }

    push_section(&mut prompt, "Company services:", &prompt_context.services);
    push_section(&mut prompt, "Company assets:", &prompt_context.assets);
    push_section(&mut prompt, "Constraints:", &prompt_context.constraints);

    let reference = cap_documents(
        prompt_context.reference_docs.clone(),
        reference_token_budget,
        estimator,
    );
    push_section(&mut prompt, "Reference material:", &reference);

    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}

/// Build the prompt for evolving a set of seed strategies
pub fn build_evolution_prompt(seeds: &[SeedStrategy], mode: EvolutionMode) -> String {
    let mut prompt = String::from(match mode {
        EvolutionMode::Mutate => {
            "You are a corporate strategy advisor. Mutate each seed strategy below into a \
             stronger variant: keep its core thesis, change the weakest element."
        }
        EvolutionMode::Crossover => {
            "You are a corporate strategy advisor. Combine the seed strategies below into new \
             hybrid strategies that inherit the strongest elements of each parent."
        }
        EvolutionMode::Refute => {
            "You are a corporate strategy advisor. For each seed strategy below, assume its \
             premise fails, and propose counter-strategies that win where it loses."
        }
    });

    prompt.push_str("\n\nSeed strategies:\n");
    for (i, seed) in seeds.iter().enumerate() {
        prompt.push_str(&format!("\n{}. {}\n", i + 1, seed.name));
        if !seed.reason.is_empty() {
            prompt.push_str(&format!("   Rationale: {}\n", seed.reason));
        }
        if !seed.how_to_obtain.is_empty() {
            prompt.push_str(&format!("   Execution: {}\n", seed.how_to_obtain));
        }
        if let Some(score) = seed.total_score {
            prompt.push_str(&format!("   Weighted score: {:.2}\n", score));
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}
