//! Built-in probe flows the CLI runs against the scripted page engine.
//!
//! Each flow composes the helper crates end to end: retry-verified actions,
//! dialog interception, generated test data, and screenshot artifacts.

use std::sync::Arc;

use action_retry::{execute, Action, Outcome};
use anyhow::{bail, Result};
use artifact_store::ArtifactStore;
use dialog_guard::{DialogGuard, GuardAction};
use page_port::{DialogKind, PagePort, Selector};
use page_sim::{FillFault, PageSim, SimNode};
use pageprobe_test_data::fixtures::{self, urls};
use pageprobe_test_data::{with_timestamp_suffix, DataGen};
use serde_json::{Map, Value};
use tracing::info;

use crate::config::ProbeConfig;

/// Names accepted by `pageprobe run --flow`.
pub const FLOWS: &[&str] = &["form", "dialog", "todo"];

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct FlowReport {
    pub flow: String,
    pub steps: Vec<StepOutcome>,
}

impl FlowReport {
    fn new(flow: &str) -> Self {
        Self {
            flow: flow.to_string(),
            steps: Vec::new(),
        }
    }

    fn record(&mut self, name: &str, outcome: &Outcome) {
        let detail = if outcome.ok {
            format!(
                "ok in {} attempt(s){}",
                outcome.attempts,
                outcome
                    .value
                    .as_deref()
                    .map(|v| format!(", observed {v:?}"))
                    .unwrap_or_default()
            )
        } else {
            outcome
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown failure".to_string())
        };
        self.steps.push(StepOutcome {
            name: name.to_string(),
            ok: outcome.ok,
            detail,
        });
    }

    fn note(&mut self, name: &str, ok: bool, detail: impl Into<String>) {
        self.steps.push(StepOutcome {
            name: name.to_string(),
            ok,
            detail: detail.into(),
        });
    }

    pub fn passed(&self) -> usize {
        self.steps.iter().filter(|s| s.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.steps.len() - self.passed()
    }

    pub fn is_ok(&self) -> bool {
        self.failed() == 0
    }
}

/// Run one named flow.
pub async fn run_flow(
    name: &str,
    cfg: &ProbeConfig,
    data: &mut DataGen,
    store: &ArtifactStore,
) -> Result<FlowReport> {
    match name {
        "form" => form_flow(cfg, data, store).await,
        "dialog" => dialog_flow(cfg, store).await,
        "todo" => todo_flow(cfg, store).await,
        other => bail!("unknown flow {other:?}; known flows: {FLOWS:?}"),
    }
}

/// Fill a contact form on a page whose name field drops the first fill, then
/// submit and read the confirmation back.
async fn form_flow(
    cfg: &ProbeConfig,
    data: &mut DataGen,
    store: &ArtifactStore,
) -> Result<FlowReport> {
    let mut report = FlowReport::new("form");
    let page = PageSim::builder()
        .title("Text Box")
        .route(format!("{}/text-box", urls::FORMS_DEMO), "Text Box")
        .node("#userName", SimNode::input())
        .node("#userEmail", SimNode::input())
        .node("#currentAddress", SimNode::input())
        .node("#submit", SimNode::input())
        .fill_fault("#userName", FillFault::GarbleValue, 1)
        .click_installs(
            "#submit",
            vec![("#output".to_string(), SimNode::text("submission received"))],
        )
        .build();
    let policy = cfg.retry_policy();

    page.navigate(&format!("{}/text-box", urls::FORMS_DEMO), policy.timeout())
        .await?;

    let contact = stamped_contact()?;
    let name = contact["name"].as_str().unwrap_or_default().to_string();
    let email = data.random_email();
    info!(name = %name, email = %email, "submitting contact form");

    let fill_name = execute(
        &page,
        &Action::fill(Selector::css("#userName"), name),
        &policy,
    )
    .await;
    report.record("fill name", &fill_name);

    let fill_email = execute(
        &page,
        &Action::fill(Selector::css("#userEmail"), email),
        &policy,
    )
    .await;
    report.record("fill email", &fill_email);

    let fill_address = execute(
        &page,
        &Action::fill(
            Selector::css("#currentAddress"),
            contact["message"].as_str().unwrap_or_default(),
        ),
        &policy,
    )
    .await;
    report.record("fill address", &fill_address);

    let submit = execute(&page, &Action::click(Selector::css("#submit")), &policy).await;
    report.record("submit", &submit);

    let confirmation = execute(
        &page,
        &Action::read_text(Selector::css("#output")),
        &policy,
    )
    .await;
    report.record("read confirmation", &confirmation);

    let shot = store.capture(&page, "form-submission").await?;
    report.note("screenshot", true, shot.display().to_string());

    Ok(report)
}

/// Trigger a prompt dialog, accept it through a one-shot guard, and verify
/// the injected text landed on the page.
async fn dialog_flow(cfg: &ProbeConfig, store: &ArtifactStore) -> Result<FlowReport> {
    let mut report = FlowReport::new("dialog");
    let page: Arc<PageSim> = Arc::new(
        PageSim::builder()
            .title("Alerts")
            .node("#promptButton", SimNode::input())
            .dialog_on_click(
                "#promptButton",
                DialogKind::Prompt,
                "Please enter your name",
                Some("#promptResult"),
            )
            .build(),
    );
    let policy = cfg.retry_policy();
    let injected = "PageProbe";

    let guard = DialogGuard::arm(page.clone(), GuardAction::accept_with(injected));
    let click = execute(
        page.as_ref(),
        &Action::click(Selector::css("#promptButton")),
        &policy,
    )
    .await;
    report.record("trigger prompt", &click);

    match guard.wait().await {
        Ok(handled) => report.note("intercept dialog", true, handled.message),
        Err(err) => report.note("intercept dialog", false, err.to_string()),
    }

    let result = execute(
        page.as_ref(),
        &Action::read_text(Selector::css("#promptResult")),
        &policy,
    )
    .await;
    let matches = result.value.as_deref() == Some(injected);
    report.record("read prompt result", &result);
    report.note(
        "verify injected text",
        matches,
        format!("expected {injected:?}, got {:?}", result.value),
    );

    let shot = store.capture(page.as_ref(), "dialog-resolved").await?;
    report.note("screenshot", true, shot.display().to_string());

    Ok(report)
}

/// Add fixture todos through fill-then-Enter and read the list back.
async fn todo_flow(cfg: &ProbeConfig, store: &ArtifactStore) -> Result<FlowReport> {
    let mut report = FlowReport::new("todo");
    let page = PageSim::builder()
        .title("TodoMVC")
        .route(urls::TODO_APP, "TodoMVC")
        .node(".new-todo", SimNode::input())
        .node(".todo-list", SimNode::text(""))
        .enter_appends(".new-todo", ".todo-list")
        .build();
    let policy = cfg.retry_policy();

    page.navigate(urls::TODO_APP, policy.timeout()).await?;

    let todos = fixtures::todos();
    for todo in todos.iter().take(3) {
        let fill = execute(
            &page,
            &Action::fill(Selector::css(".new-todo"), todo.clone()),
            &policy,
        )
        .await;
        report.record(&format!("type todo {todo:?}"), &fill);

        let submit = execute(
            &page,
            &Action::press(Selector::css(".new-todo"), "Enter"),
            &policy,
        )
        .await;
        report.record(&format!("enter todo {todo:?}"), &submit);
    }

    let list = execute(&page, &Action::read_text(Selector::css(".todo-list")), &policy).await;
    let all_present = list
        .value
        .as_deref()
        .map(|text| todos.iter().take(3).all(|todo| text.contains(todo)))
        .unwrap_or(false);
    report.record("read todo list", &list);
    report.note(
        "verify todos present",
        all_present,
        format!("list: {:?}", list.value),
    );

    let shot = store.capture(&page, "todo-list").await?;
    report.note("screenshot", true, shot.display().to_string());

    Ok(report)
}

/// Contact fixture with every string field timestamp-suffixed, as the demo
/// pages expect unique submissions.
fn stamped_contact() -> Result<Map<String, Value>> {
    let value = serde_json::to_value(fixtures::contact_form())?;
    match value {
        Value::Object(map) => Ok(with_timestamp_suffix(&map)),
        other => bail!("contact fixture serialized to non-object {other:?}"),
    }
}
