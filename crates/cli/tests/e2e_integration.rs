//! End-to-end integration tests for Tata.
//!
//! These tests wire the real dependency graph, registry, processors and
//! in-memory store behind a scripted LLM endpoint, and drive them through
//! the executor and the orchestration loop.

use std::sync::Arc;

use serde_json::json;
use tata_agent::{
    AgentLoop, ConversationHistory, ENDPOINT_FAILURE_MESSAGE, SessionContext, SessionManager,
    TaskExecutor,
};
use tata_core::artifact::ArtifactStore;
use tata_core::error::{ProviderError, TaskError};
use tata_core::event::EventBus;
use tata_core::message::{Role, TaskInvocation};
use tata_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use tata_core::session::SessionId;
use tata_core::task::ArtifactKind;
use tata_memory::InMemoryArtifactStore;
use tata_tools::{DocumentProcessor, ToolRegistry};
use tata_workflow::DependencyGraph;

// ── Mock Providers ───────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence.
struct ScriptedProvider {
    responses: std::sync::Mutex<Vec<ProviderResponse>>,
    call_count: std::sync::Mutex<usize>,
}

impl ScriptedProvider {
    fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            call_count: std::sync::Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        if *count >= responses.len() {
            panic!(
                "ScriptedProvider exhausted: call #{}, have {}",
                *count,
                responses.len()
            );
        }
        let resp = responses[*count].clone();
        *count += 1;
        Ok(resp)
    }
}

/// A provider whose endpoint is always down.
struct DownProvider {
    call_count: std::sync::Mutex<usize>,
}

#[async_trait::async_trait]
impl Provider for DownProvider {
    fn name(&self) -> &str {
        "down"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.call_count.lock().unwrap() += 1;
        Err(ProviderError::Network("connection refused".into()))
    }
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock".into(),
        ..ProviderResponse::text(text)
    }
}

fn make_call(id: &str, name: &str, args: serde_json::Value) -> TaskInvocation {
    TaskInvocation::new(id, name, serde_json::to_string(&args).unwrap())
}

fn profile_args() -> serde_json::Value {
    json!({
        "position_title": "Field Service Technician",
        "startup_notes": "- Must have: electrical certification\n- Driver's license\n- Will maintain fiber installations\n- Nice to have: Swedish"
    })
}

// ── Wiring ───────────────────────────────────────────────────────────────

fn executor() -> Arc<TaskExecutor> {
    let graph = Arc::new(DependencyGraph::standard().expect("standard graph is valid"));
    let registry = Arc::new(ToolRegistry::new(&graph).expect("registry schemas are valid"));
    Arc::new(TaskExecutor::new(registry, graph, Arc::new(DocumentProcessor)))
}

fn session_with(store: Arc<dyn ArtifactStore>) -> SessionContext {
    SessionContext::new(SessionId::new(), store, ConversationHistory::default()).unwrap()
}

fn fresh_session() -> SessionContext {
    session_with(Arc::new(InMemoryArtifactStore::new()))
}

fn agent(provider: Arc<dyn Provider>) -> AgentLoop {
    AgentLoop::new(provider, "mock", 0.7, executor(), Arc::new(EventBus::default()))
}

// ── E2E: Executor scenarios ──────────────────────────────────────────────

#[tokio::test]
async fn e2e_standalone_task_on_fresh_session() {
    let session = fresh_session();
    let invite = make_call(
        "call_1",
        "create_calendar_invite",
        json!({
            "position_name": "Project Manager",
            "hiring_manager_name": "Kim Berg",
            "hiring_manager_title": "Head of Delivery",
            "recruiter_name": "Alex",
            "location_type": "teams",
            "interview_type": "hiring_manager",
            "duration": 60,
            "booking_method": "jobylon"
        }),
    );

    let result = executor().execute(&session, &invite).await;

    assert!(result.success, "unexpected failure: {:?}", result.error);
    assert!(
        session
            .store()
            .has(session.id(), ArtifactKind::CalendarInvite)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn e2e_missing_prerequisite_is_named() {
    let session = fresh_session();

    let result = executor()
        .execute(&session, &make_call("call_1", "create_ta_screening_template", json!({})))
        .await;

    assert!(!result.success);
    let message = result.error.unwrap().to_string();
    assert!(message.contains("Requirement Profile"));
    assert!(message.contains("to be created first"));
    assert!(session.store().all(session.id()).await.is_empty());
}

#[tokio::test]
async fn e2e_prerequisite_then_dependent_task() {
    let session = fresh_session();
    let executor = executor();

    let profile = executor
        .execute(&session, &make_call("call_1", "create_requirement_profile", profile_args()))
        .await;
    assert!(profile.success, "{:?}", profile.error);

    let screening = executor
        .execute(
            &session,
            &make_call(
                "call_2",
                "create_ta_screening_template",
                json!({"include_role_intro": true}),
            ),
        )
        .await;
    assert!(screening.success, "{:?}", screening.error);

    let report = executor
        .execute(
            &session,
            &make_call(
                "call_3",
                "create_candidate_report",
                json!({
                    "candidate_name": "Robin Ek",
                    "interview_date": "2024-03-15",
                    "transcript": "Robin has held an electrical certification for six years and maintained fiber installations across Stockholm."
                }),
            ),
        )
        .await;
    assert!(report.success, "{:?}", report.error);

    let stored = session.store().all(session.id()).await;
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn e2e_prerequisite_in_other_session_does_not_count() {
    let store: Arc<dyn ArtifactStore> = Arc::new(InMemoryArtifactStore::new());
    let first = session_with(Arc::clone(&store));
    let second = session_with(Arc::clone(&store));
    let executor = executor();

    assert!(
        executor
            .execute(&first, &make_call("call_1", "create_requirement_profile", profile_args()))
            .await
            .success
    );

    let result = executor
        .execute(&second, &make_call("call_2", "create_job_ad", json!({})))
        .await;
    assert!(matches!(result.error, Some(TaskError::UnsatisfiedDependency(_))));
}

// ── E2E: Orchestration loop ──────────────────────────────────────────────

#[tokio::test]
async fn e2e_two_task_rounds_then_text() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        ProviderResponse::with_invocations(vec![make_call(
            "call_1",
            "create_requirement_profile",
            profile_args(),
        )]),
        ProviderResponse::with_invocations(vec![make_call("call_2", "create_job_ad", json!({}))]),
        text_response("Your requirement profile and job ad are ready."),
    ]));
    let agent = agent(provider.clone());
    let session = fresh_session();

    let reply = agent
        .chat(&session, "Create a profile and a job ad for a field technician")
        .await;

    assert_eq!(reply, "Your requirement profile and job ad are ready.");
    assert_eq!(provider.calls(), 3);
    let store = session.store();
    assert!(store.has(session.id(), ArtifactKind::RequirementProfile).await.unwrap());
    assert!(store.has(session.id(), ArtifactKind::JobAd).await.unwrap());

    // user, round 1 (call + result), round 2 (call + result), final answer
    let messages = session.history().lock().await.messages();
    assert_eq!(messages.len(), 7);
    assert_eq!(messages.last().unwrap().text(), reply);
}

#[tokio::test]
async fn e2e_endpoint_down_on_every_call() {
    let provider = Arc::new(DownProvider {
        call_count: std::sync::Mutex::new(0),
    });
    let agent = agent(provider.clone());
    let session = fresh_session();

    let reply = agent.chat(&session, "Hello").await;
    assert_eq!(reply, ENDPOINT_FAILURE_MESSAGE);
    assert!(!reply.contains("connection refused"));
    assert_eq!(*provider.call_count.lock().unwrap(), 1);

    let messages = session.history().lock().await.messages();
    assert!(messages.iter().all(|t| t.role != Role::Assistant));

    // The session stays usable
    let reply = agent.chat(&session, "Hello again").await;
    assert_eq!(reply, ENDPOINT_FAILURE_MESSAGE);
    assert_eq!(session.history().lock().await.message_count(), 3);
}

#[tokio::test]
async fn e2e_same_kind_twice_in_one_round_last_write_wins() {
    let review = |id: &str, text: &str| {
        make_call(id, "review_di_compliance", json!({"job_ad_text": text}))
    };
    let provider = Arc::new(ScriptedProvider::new(vec![
        ProviderResponse::with_invocations(vec![
            review("call_1", "We are looking for a young rockstar ninja"),
            review("call_2", "We welcome applicants of every background"),
        ]),
        text_response("Both versions reviewed."),
    ]));
    let agent = agent(provider);
    let session = fresh_session();

    agent.chat(&session, "Review both drafts").await;

    let stored = session
        .store()
        .retrieve(session.id(), ArtifactKind::DiReview)
        .await
        .unwrap();
    let json = stored.to_json().unwrap();
    assert!(!json.contains("rockstar"));
}

#[tokio::test]
async fn e2e_concurrent_sessions_are_isolated() {
    let store: Arc<dyn ArtifactStore> = Arc::new(InMemoryArtifactStore::new());
    let manager = Arc::new(SessionManager::new(Arc::clone(&store)));
    let executor = executor();

    let mut handles = Vec::new();
    for i in 0..8 {
        let manager = Arc::clone(&manager);
        let executor = Arc::clone(&executor);
        handles.push(tokio::spawn(async move {
            let session = manager.create().await;
            let provider = Arc::new(ScriptedProvider::new(if i % 2 == 0 {
                vec![
                    ProviderResponse::with_invocations(vec![make_call(
                        "call_1",
                        "create_requirement_profile",
                        profile_args(),
                    )]),
                    text_response("Profile created."),
                ]
            } else {
                vec![text_response("Hello!")]
            }));
            let bus = Arc::new(EventBus::default());
            let agent = AgentLoop::new(provider, "mock", 0.7, executor, bus);
            agent.chat(&session, "Start").await;
            (i, session)
        }));
    }

    let results = futures::future::join_all(handles).await;
    assert_eq!(manager.len().await, 8);
    for joined in results {
        let (i, session) = joined.unwrap();
        let has_profile = store
            .has(session.id(), ArtifactKind::RequirementProfile)
            .await
            .unwrap();
        assert_eq!(has_profile, i % 2 == 0, "session {i} saw another session's artifacts");
    }
}

#[tokio::test]
async fn e2e_reset_then_continue_with_stored_work() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        ProviderResponse::with_invocations(vec![make_call(
            "call_1",
            "create_requirement_profile",
            profile_args(),
        )]),
        text_response("Profile created."),
        ProviderResponse::with_invocations(vec![make_call(
            "call_2",
            "create_hm_screening_template",
            json!({}),
        )]),
        text_response("Screening template created."),
    ]));
    let agent = agent(provider);
    let session = fresh_session();

    agent.chat(&session, "Create a profile").await;
    agent.reset(&session).await;
    assert_eq!(session.history().lock().await.message_count(), 1);

    // The profile survives the reset, so the dependent task can run
    let reply = agent.chat(&session, "Now an HM screening template").await;
    assert_eq!(reply, "Screening template created.");
    assert!(
        session
            .store()
            .has(session.id(), ArtifactKind::HmScreeningTemplate)
            .await
            .unwrap()
    );
}
