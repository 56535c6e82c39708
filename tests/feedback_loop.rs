//! Integration tests for the scoring, ranking, and feedback loop
//!
//! These drive the wired engine end-to-end over the in-memory store: seed
//! exploration history, then exercise ranking, archival, baselines, and
//! seed selection the way the surrounding application would.

use async_trait::async_trait;
use std::sync::Arc;
use strategy_engine::{
    Decision, EngineConfig, Exploration, ExplorationStatus, GenerationOracle, InMemoryStore,
    Judgment, OracleError, RankingQuery, StrategyEngine, StrategyStore, WeightVector,
};
use uuid::Uuid;

struct CannedOracle(String);

#[async_trait]
impl GenerationOracle for CannedOracle {
    async fn generate(&self, _prompt: &str) -> Result<String, OracleError> {
        Ok(self.0.clone())
    }
}

fn engine_with(store: Arc<InMemoryStore>, oracle_content: &str) -> StrategyEngine {
    StrategyEngine::new(
        store,
        Arc::new(CannedOracle(oracle_content.to_string())),
        EngineConfig::default(),
    )
}

async fn seed_completed(store: &InMemoryStore, question: &str, payload: serde_json::Value) -> Uuid {
    let exploration = Exploration::new(question.to_string(), String::new());
    let id = exploration.id;
    store.insert_exploration(exploration).await.unwrap();
    store
        .finish_exploration(id, ExplorationStatus::Completed, Some(payload), None)
        .await
        .unwrap();
    id
}

fn scores(values: [u8; 6]) -> serde_json::Value {
    serde_json::json!({
        "revenuePotential": values[0],
        "timeToRevenue": values[1],
        "competitiveAdvantage": values[2],
        "executionFeasibility": values[3],
        "hqContribution": values[4],
        "mergerSynergy": values[5]
    })
}

#[tokio::test]
async fn end_to_end_ranking_with_gate_and_priority() {
    let store = Arc::new(InMemoryStore::new());
    seed_completed(
        &store,
        "Where should we invest?",
        serde_json::json!({
            "strategies": [
                { "name": "A", "scores": scores([5, 5, 5, 5, 5, 5]) },
                // Revenue gate fires regardless of the other axes.
                { "name": "B", "scores": scores([1, 3, 3, 3, 3, 3]) }
            ]
        }),
    )
    .await;

    let engine = engine_with(store, "{}");
    let weights = engine.weights.weights_for("strategist").await.unwrap();
    let page = engine
        .ranking
        .ranking(&RankingQuery::top(10), &weights)
        .await
        .unwrap();

    assert_eq!(page.strategies.len(), 2);
    assert_eq!(page.strategies[0].strategy.name, "A");
    assert_eq!(page.strategies[0].rank, 1);
    assert_eq!(page.strategies[0].strategy.judgment, Judgment::Priority);
    assert_eq!(page.strategies[1].strategy.name, "B");
    assert_eq!(page.strategies[1].rank, 2);
    assert_eq!(page.strategies[1].strategy.judgment, Judgment::Decline);

    assert_eq!(page.stats.top_score, 5.0);
    assert_eq!(page.stats.decline_count, 1);
    assert_eq!(page.stats.priority_count, 1);
}

#[tokio::test]
async fn archive_pass_is_idempotent_and_key_deduplicated() {
    let store = Arc::new(InMemoryStore::new());
    seed_completed(
        &store,
        "q",
        serde_json::json!({
            "strategies": [
                { "name": "winner", "scores": scores([5, 4, 5, 4, 4, 4]) },
                { "name": "loser", "scores": scores([3, 3, 3, 3, 3, 3]) }
            ]
        }),
    )
    .await;

    let engine = engine_with(store.clone(), "{}");
    let weights = WeightVector::default();
    let min_score = engine.config.scoring.archive_min_score;

    let first = engine
        .archive
        .archive_top_strategies(min_score, &weights)
        .await
        .unwrap();
    assert_eq!(first.archived, 1);
    assert_eq!(first.total, 1);

    let second = engine
        .archive
        .archive_top_strategies(min_score, &weights)
        .await
        .unwrap();
    assert_eq!(second.archived, 0);
    assert_eq!(second.total, 1);
    assert_eq!(store.top_strategy_count().await, 1);
}

#[tokio::test]
async fn baseline_improvement_tracks_top_score_delta() {
    let store = Arc::new(InMemoryStore::new());
    let engine = engine_with(store.clone(), "{}");
    let weights = WeightVector::default();

    // Empty population: nothing recorded.
    assert!(engine
        .baselines
        .record_baseline(None, &weights)
        .await
        .unwrap()
        .is_none());

    // Uniform 3s give a 3.0 top score.
    seed_completed(
        &store,
        "q1",
        serde_json::json!({ "strategies": [{ "name": "base", "scores": scores([3, 3, 3, 3, 3, 3]) }] }),
    )
    .await;
    let first = engine
        .baselines
        .record_baseline(Some("run-1".to_string()), &weights)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.top_score, 3.0);
    assert!(first.improvement.is_none());

    // {4,4,3,3,4,3} under default weights is exactly 3.6.
    seed_completed(
        &store,
        "q2",
        serde_json::json!({ "strategies": [{ "name": "better", "scores": scores([4, 4, 3, 3, 4, 3]) }] }),
    )
    .await;
    let second = engine
        .baselines
        .record_baseline(None, &weights)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.top_score, 3.6);
    let improvement = second.improvement.unwrap();
    assert!((improvement - 20.0).abs() < 1e-9);

    let history = engine.baselines.baseline_history(10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].top_score, 3.6);
}

#[tokio::test]
async fn one_corrupt_exploration_never_blocks_the_loop() {
    let store = Arc::new(InMemoryStore::new());
    seed_completed(
        &store,
        "good-1",
        serde_json::json!({ "strategies": [{ "name": "A", "scores": scores([4, 4, 4, 4, 4, 4]) }] }),
    )
    .await;
    seed_completed(&store, "corrupt", serde_json::json!({ "strategies": 42 })).await;
    seed_completed(
        &store,
        "good-2",
        serde_json::json!({ "strategies": [{ "name": "B", "scores": scores([3, 3, 3, 3, 3, 3]) }] }),
    )
    .await;

    let engine = engine_with(store, "{}");
    let page = engine
        .ranking
        .ranking(&RankingQuery::top(10), &WeightVector::default())
        .await
        .unwrap();

    let names: Vec<&str> = page
        .strategies
        .iter()
        .map(|r| r.strategy.name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn adopted_decisions_outrank_archive_in_seed_selection() {
    let store = Arc::new(InMemoryStore::new());
    let exploration_id = seed_completed(
        &store,
        "q",
        serde_json::json!({
            "strategies": [
                { "name": "human-pick", "scores": scores([4, 4, 4, 4, 4, 4]) },
                { "name": "machine-pick", "scores": scores([5, 5, 5, 5, 5, 5]) }
            ]
        }),
    )
    .await;

    let engine = engine_with(store.clone(), "{}");
    let weights = WeightVector::default();

    // Archive both; machine-pick scores higher.
    engine
        .archive
        .archive_top_strategies(4.0, &weights)
        .await
        .unwrap();

    // Without adoption, the archive ordering decides.
    let seeds = engine
        .evolution
        .select_seed_strategies(5, &weights)
        .await
        .unwrap();
    assert_eq!(seeds[0].name, "machine-pick");

    // An explicit adoption of the lower-scoring strategy takes precedence.
    engine
        .decisions
        .record(strategy_engine::curation::DecisionRequest {
            exploration_id,
            strategy_name: "human-pick".to_string(),
            decision: "adopt".to_string(),
            reason: Some("Fits our portfolio".to_string()),
            feasibility_note: None,
        })
        .await
        .unwrap();

    let seeds = engine
        .evolution
        .select_seed_strategies(5, &weights)
        .await
        .unwrap();
    assert_eq!(seeds.len(), 1);
    assert_eq!(seeds[0].name, "human-pick");
}

#[tokio::test]
async fn generation_pipeline_feeds_the_ranking() {
    let store = Arc::new(InMemoryStore::new());
    store
        .seed_profile(
            vec!["Consulting arm".to_string()],
            vec!["Brand".to_string()],
            vec![],
        )
        .await;

    let payload = r#"Based on the company profile:
{"strategies": [{
    "name": "Productize consulting",
    "reason": "Margins",
    "howToObtain": "Package the top three engagements",
    "metrics": "ARR",
    "confidence": "high",
    "tags": ["services"],
    "scores": {
        "revenuePotential": 4, "timeToRevenue": 4, "competitiveAdvantage": 4,
        "executionFeasibility": 4, "hqContribution": 4, "mergerSynergy": 4
    }
}], "thinkingProcess": "weighed margins against execution risk"}"#;

    let engine = engine_with(store, payload);
    let exploration = engine
        .runner
        .explore(strategy_engine::ExploreRequest {
            question: "How do we scale services revenue?".to_string(),
            context: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(exploration.status, ExplorationStatus::Completed);

    let page = engine
        .ranking
        .ranking(&RankingQuery::top(10), &WeightVector::default())
        .await
        .unwrap();
    assert_eq!(page.strategies.len(), 1);
    assert_eq!(page.strategies[0].strategy.name, "Productize consulting");
    assert_eq!(
        page.strategies[0].strategy.question,
        "How do we scale services revenue?"
    );
    assert_eq!(page.stats.top_score, 4.0);
}

#[tokio::test]
async fn rejected_decisions_never_become_seeds() {
    let store = Arc::new(InMemoryStore::new());
    let exploration_id = seed_completed(
        &store,
        "q",
        serde_json::json!({ "strategies": [{ "name": "S", "scores": scores([4, 4, 4, 4, 4, 4]) }] }),
    )
    .await;

    let engine = engine_with(store, "{}");
    let service = &engine.decisions;
    service
        .record(strategy_engine::curation::DecisionRequest {
            exploration_id,
            strategy_name: "S".to_string(),
            decision: "reject".to_string(),
            reason: None,
            feasibility_note: None,
        })
        .await
        .unwrap();

    let adopted = service.list(Some(Decision::Adopt)).await.unwrap();
    assert!(adopted.is_empty());

    let seeds = engine
        .evolution
        .select_seed_strategies(5, &WeightVector::default())
        .await
        .unwrap();
    assert!(seeds.is_empty());
}
