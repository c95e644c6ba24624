use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use page_port::{
    event_bus, ConsoleLevel, DialogDecision, DialogEvent, DialogId, DialogKind, ElementState,
    EventReceiver, EventSender, FilePayload, PageEvent, PagePort, PortError, Selector,
};
use pageprobe_core_types::Viewport;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::debug;

use crate::model::{DialogScript, FaultScript, FillFault, SimNode};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

struct PendingDialog {
    id: DialogId,
    script: DialogScript,
    reply: oneshot::Sender<DialogDecision>,
}

struct SimState {
    nodes: HashMap<String, SimNode>,
    url: String,
    title: String,
    routes: HashMap<String, String>,
    viewport: Viewport,
    fill_faults: HashMap<String, FaultScript>,
    click_faults: HashMap<String, FaultScript>,
    dialogs: HashMap<String, DialogScript>,
    click_installs: HashMap<String, Vec<(String, SimNode)>>,
    enter_appends: HashMap<String, String>,
    upload_echoes: HashMap<String, String>,
    pending: Option<PendingDialog>,
}

/// Scripted in-memory page implementing [`PagePort`].
pub struct PageSim {
    state: Mutex<SimState>,
    fill_calls: DashMap<String, u32>,
    click_calls: DashMap<String, u32>,
    events: EventSender,
}

/// Builds a [`PageSim`] one script at a time.
pub struct PageSimBuilder {
    state: SimState,
}

impl PageSimBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.state.title = title.into();
        self
    }

    pub fn node(mut self, selector: impl Into<String>, node: SimNode) -> Self {
        self.state.nodes.insert(selector.into(), node);
        self
    }

    /// Register a navigable URL and the title it installs.
    pub fn route(mut self, url: impl Into<String>, title: impl Into<String>) -> Self {
        self.state.routes.insert(url.into(), title.into());
        self
    }

    /// Misbehave for the first `count` fills of `selector`.
    pub fn fill_fault(
        mut self,
        selector: impl Into<String>,
        fault: FillFault,
        count: u32,
    ) -> Self {
        self.state.fill_faults.insert(
            selector.into(),
            FaultScript {
                fault,
                remaining: count,
            },
        );
        self
    }

    /// Reject the first `count` clicks of `selector`.
    pub fn click_fault(mut self, selector: impl Into<String>, count: u32) -> Self {
        self.state.click_faults.insert(
            selector.into(),
            FaultScript {
                fault: FillFault::RejectInteraction,
                remaining: count,
            },
        );
        self
    }

    /// Clicking `selector` opens a dialog; its resolution is recorded as the
    /// text of `result_target` when given.
    pub fn dialog_on_click(
        mut self,
        selector: impl Into<String>,
        kind: DialogKind,
        message: impl Into<String>,
        result_target: Option<&str>,
    ) -> Self {
        self.state.dialogs.insert(
            selector.into(),
            DialogScript {
                kind,
                message: message.into(),
                default_text: None,
                result_target: result_target.map(str::to_string),
            },
        );
        self
    }

    /// Clicking `selector` installs or replaces the given nodes (e.g. a form
    /// submit revealing its output block).
    pub fn click_installs(
        mut self,
        selector: impl Into<String>,
        installs: Vec<(String, SimNode)>,
    ) -> Self {
        self.state.click_installs.insert(selector.into(), installs);
        self
    }

    /// Pressing Enter in `input` appends its value as a line of `list`'s
    /// text and clears the input (todo-list style).
    pub fn enter_appends(mut self, input: impl Into<String>, list: impl Into<String>) -> Self {
        self.state.enter_appends.insert(input.into(), list.into());
        self
    }

    /// Uploading to `input` writes the file name into `target`'s text.
    pub fn upload_echo(mut self, input: impl Into<String>, target: impl Into<String>) -> Self {
        self.state.upload_echoes.insert(input.into(), target.into());
        self
    }

    pub fn build(self) -> PageSim {
        let (events, _) = event_bus(64);
        PageSim {
            state: Mutex::new(self.state),
            fill_calls: DashMap::new(),
            click_calls: DashMap::new(),
            events,
        }
    }
}

impl PageSim {
    pub fn builder() -> PageSimBuilder {
        PageSimBuilder {
            state: SimState {
                nodes: HashMap::new(),
                url: "about:blank".to_string(),
                title: String::new(),
                routes: HashMap::new(),
                viewport: Viewport::new(1280, 720),
                fill_faults: HashMap::new(),
                click_faults: HashMap::new(),
                dialogs: HashMap::new(),
                click_installs: HashMap::new(),
                enter_appends: HashMap::new(),
                upload_echoes: HashMap::new(),
                pending: None,
            },
        }
    }

    /// How many times `selector` has been filled.
    pub fn fill_count(&self, selector: &str) -> u32 {
        self.fill_calls.get(selector).map(|c| *c).unwrap_or(0)
    }

    /// How many times `selector` has been clicked.
    pub fn click_count(&self, selector: &str) -> u32 {
        self.click_calls.get(selector).map(|c| *c).unwrap_or(0)
    }

    /// Current text of a node, for test assertions.
    pub fn node_text(&self, selector: &str) -> Option<String> {
        self.state
            .lock()
            .nodes
            .get(selector)
            .map(|n| n.text.clone())
    }

    pub fn viewport(&self) -> Viewport {
        self.state.lock().viewport
    }

    fn emit(&self, event: PageEvent) {
        let _ = self.events.send(event);
    }

    /// Resolve a selector to a node key. Text selectors scan node text; role
    /// selectors are not modeled by the simulator.
    fn resolve_key(state: &SimState, target: &Selector) -> Result<String, PortError> {
        match target {
            Selector::Css(css) => Ok(css.clone()),
            Selector::Text { content, exact } => state
                .nodes
                .iter()
                .find(|(_, node)| {
                    if *exact {
                        node.text == *content
                    } else {
                        node.text.contains(content.as_str())
                    }
                })
                .map(|(key, _)| key.clone())
                .ok_or_else(|| PortError::TargetNotFound(format!("no node with text {content:?}"))),
            Selector::Role { .. } => Err(PortError::Unsupported(
                "role selectors are not modeled by the simulator".into(),
            )),
        }
    }

    fn interactable<'a>(
        state: &'a mut SimState,
        key: &str,
    ) -> Result<&'a mut SimNode, PortError> {
        let node = state
            .nodes
            .get_mut(key)
            .ok_or_else(|| PortError::TargetNotFound(key.to_string()))?;
        if !node.visible {
            return Err(PortError::NotInteractable(format!("{key} is hidden")));
        }
        if !node.enabled {
            return Err(PortError::NotInteractable(format!("{key} is disabled")));
        }
        Ok(node)
    }

    fn take_fault(
        faults: &mut HashMap<String, FaultScript>,
        key: &str,
    ) -> Option<FillFault> {
        let script = faults.get_mut(key)?;
        if script.remaining == 0 {
            return None;
        }
        script.remaining -= 1;
        Some(script.fault)
    }

    fn bump(calls: &DashMap<String, u32>, key: &str) {
        *calls.entry(key.to_string()).or_insert(0) += 1;
    }

    fn record_resolution(state: &mut SimState, script: &DialogScript, decision: &DialogDecision) {
        let Some(target) = script.result_target.as_deref() else {
            return;
        };
        let text = match (script.kind, decision) {
            (DialogKind::Prompt, DialogDecision::Accept { text }) => text
                .clone()
                .or_else(|| script.default_text.clone())
                .unwrap_or_default(),
            (_, DialogDecision::Accept { .. }) => "accepted".to_string(),
            (_, DialogDecision::Dismiss) => "dismissed".to_string(),
        };
        state
            .nodes
            .entry(target.to_string())
            .or_insert_with(SimNode::default)
            .text = text;
    }
}

#[async_trait]
impl PagePort for PageSim {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), PortError> {
        {
            let mut state = self.state.lock();
            state.title = state
                .routes
                .get(url)
                .cloned()
                .unwrap_or_else(|| url.to_string());
            state.url = url.to_string();
        }
        debug!(url, "sim navigate");
        self.emit(PageEvent::Response {
            url: url.to_string(),
            status: 200,
        });
        self.emit(PageEvent::Console {
            level: ConsoleLevel::Log,
            text: format!("navigated to {url}"),
        });
        Ok(())
    }

    async fn fill(
        &self,
        target: &Selector,
        value: &str,
        _timeout: Duration,
    ) -> Result<(), PortError> {
        let mut state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        Self::bump(&self.fill_calls, &key);
        match Self::take_fault(&mut state.fill_faults, &key) {
            Some(FillFault::RejectInteraction) => {
                return Err(PortError::NotInteractable(format!(
                    "{key} rejected the fill"
                )))
            }
            Some(FillFault::GarbleValue) => {
                Self::interactable(&mut state, &key)?.value = format!("{value}~");
                return Ok(());
            }
            None => {}
        }
        Self::interactable(&mut state, &key)?.value = value.to_string();
        Ok(())
    }

    async fn clear(&self, target: &Selector, _timeout: Duration) -> Result<(), PortError> {
        let mut state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        state
            .nodes
            .get_mut(&key)
            .ok_or_else(|| PortError::TargetNotFound(key.clone()))?
            .value
            .clear();
        Ok(())
    }

    async fn click(&self, target: &Selector, deadline: Duration) -> Result<(), PortError> {
        let (dialog_rx, dialog_id) = {
            let mut state = self.state.lock();
            let key = Self::resolve_key(&state, target)?;
            Self::bump(&self.click_calls, &key);
            if let Some(FillFault::RejectInteraction) =
                Self::take_fault(&mut state.click_faults, &key)
            {
                return Err(PortError::NotInteractable(format!(
                    "{key} rejected the click"
                )));
            }
            {
                let node = Self::interactable(&mut state, &key)?;
                node.checked = !node.checked;
            }
            if let Some(installs) = state.click_installs.get(&key).cloned() {
                for (sel, node) in installs {
                    state.nodes.insert(sel, node);
                }
            }
            match state.dialogs.get(&key).cloned() {
                Some(script) => {
                    if state.pending.is_some() {
                        return Err(PortError::Io(
                            "a dialog is already pending on this page".into(),
                        ));
                    }
                    let id = DialogId::new();
                    let (reply_tx, reply_rx) = oneshot::channel();
                    let event = DialogEvent {
                        id: id.clone(),
                        kind: script.kind,
                        message: script.message.clone(),
                        default_text: script.default_text.clone(),
                    };
                    state.pending = Some(PendingDialog {
                        id: id.clone(),
                        script,
                        reply: reply_tx,
                    });
                    drop(state);
                    self.emit(PageEvent::Dialog(event));
                    (reply_rx, id)
                }
                None => return Ok(()),
            }
        };

        // The click does not resolve until the dialog does.
        match timeout(deadline, dialog_rx).await {
            Ok(Ok(_decision)) => Ok(()),
            Ok(Err(_)) => Err(PortError::Io("dialog resolution channel dropped".into())),
            Err(_) => {
                let mut state = self.state.lock();
                if state
                    .pending
                    .as_ref()
                    .map(|p| p.id == dialog_id)
                    .unwrap_or(false)
                {
                    state.pending = None;
                }
                Err(PortError::WaitTimeout(
                    "dialog was never resolved".to_string(),
                ))
            }
        }
    }

    async fn press(&self, target: &Selector, key: &str, _timeout: Duration) -> Result<(), PortError> {
        let mut state = self.state.lock();
        let node_key = Self::resolve_key(&state, target)?;
        Self::interactable(&mut state, &node_key)?;
        if key != "Enter" {
            return Ok(());
        }
        let Some(list_key) = state.enter_appends.get(&node_key).cloned() else {
            return Ok(());
        };
        let value = {
            let node = Self::interactable(&mut state, &node_key)?;
            std::mem::take(&mut node.value)
        };
        if value.is_empty() {
            return Ok(());
        }
        let list = state
            .nodes
            .entry(list_key)
            .or_insert_with(SimNode::default);
        if list.text.is_empty() {
            list.text = value;
        } else {
            list.text = format!("{}\n{}", list.text, value);
        }
        Ok(())
    }

    async fn select_option(
        &self,
        target: &Selector,
        value: &str,
        _timeout: Duration,
    ) -> Result<(), PortError> {
        let mut state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        let node = Self::interactable(&mut state, &key)?;
        node.value = value.to_string();
        Ok(())
    }

    async fn text_content(
        &self,
        target: &Selector,
        _timeout: Duration,
    ) -> Result<Option<String>, PortError> {
        let state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        let node = state
            .nodes
            .get(&key)
            .ok_or_else(|| PortError::TargetNotFound(key.clone()))?;
        Ok(Some(node.text.clone()))
    }

    async fn input_value(&self, target: &Selector, _timeout: Duration) -> Result<String, PortError> {
        let state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        let node = state
            .nodes
            .get(&key)
            .ok_or_else(|| PortError::TargetNotFound(key.clone()))?;
        Ok(node.value.clone())
    }

    async fn is_checked(&self, target: &Selector, _timeout: Duration) -> Result<bool, PortError> {
        let state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        let node = state
            .nodes
            .get(&key)
            .ok_or_else(|| PortError::TargetNotFound(key.clone()))?;
        Ok(node.checked)
    }

    async fn wait_for(
        &self,
        target: &Selector,
        element_state: ElementState,
        _timeout: Duration,
    ) -> Result<(), PortError> {
        let state = self.state.lock();
        let key = match Self::resolve_key(&state, target) {
            Ok(key) => key,
            Err(PortError::TargetNotFound(detail)) => {
                return match element_state {
                    ElementState::Hidden => Ok(()),
                    _ => Err(PortError::WaitTimeout(detail)),
                }
            }
            Err(other) => return Err(other),
        };
        let node = state.nodes.get(&key);
        let satisfied = match element_state {
            ElementState::Attached => node.is_some(),
            ElementState::Visible => node.map(|n| n.visible).unwrap_or(false),
            ElementState::Hidden => node.map(|n| !n.visible).unwrap_or(true),
        };
        if satisfied {
            Ok(())
        } else {
            Err(PortError::WaitTimeout(format!(
                "{key} never reached {element_state:?}"
            )))
        }
    }

    async fn wait_network_idle(&self, _timeout: Duration) -> Result<(), PortError> {
        Ok(())
    }

    async fn scroll_into_view(&self, target: &Selector, _timeout: Duration) -> Result<(), PortError> {
        let state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        if state.nodes.contains_key(&key) {
            Ok(())
        } else {
            Err(PortError::TargetNotFound(key))
        }
    }

    async fn set_input_files(
        &self,
        target: &Selector,
        files: &[FilePayload],
        _timeout: Duration,
    ) -> Result<(), PortError> {
        let mut state = self.state.lock();
        let key = Self::resolve_key(&state, target)?;
        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        Self::interactable(&mut state, &key)?.files = names.clone();
        if let Some(echo_key) = state.upload_echoes.get(&key).cloned() {
            if let Some(first) = names.first() {
                state
                    .nodes
                    .entry(echo_key)
                    .or_insert_with(SimNode::default)
                    .text = format!("C:\\fakepath\\{first}");
            }
        }
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, PortError> {
        let state = self.state.lock();
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(state.title.as_bytes());
        bytes.extend_from_slice(state.viewport.to_string().as_bytes());
        Ok(bytes)
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<(), PortError> {
        self.state.lock().viewport = viewport;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, PortError> {
        Ok(self.state.lock().url.clone())
    }

    async fn title(&self) -> Result<String, PortError> {
        Ok(self.state.lock().title.clone())
    }

    fn events(&self) -> EventReceiver {
        self.events.subscribe()
    }

    async fn handle_dialog(
        &self,
        id: &DialogId,
        decision: DialogDecision,
    ) -> Result<(), PortError> {
        let pending = {
            let mut state = self.state.lock();
            let pending = match state.pending.take() {
                Some(pending) if pending.id == *id => pending,
                other => {
                    state.pending = other;
                    return Err(PortError::Io(format!(
                        "no pending dialog with id {}",
                        id.0
                    )));
                }
            };
            Self::record_resolution(&mut state, &pending.script, &decision);
            pending
        };
        let _ = pending.reply.send(decision);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    const T: Duration = Duration::from_millis(200);

    #[tokio::test]
    async fn fill_and_read_back() {
        let sim = PageSim::builder()
            .node("#userName", SimNode::input())
            .build();
        sim.fill(&Selector::css("#userName"), "John", T).await.unwrap();
        let value = sim.input_value(&Selector::css("#userName"), T).await.unwrap();
        assert_eq!(value, "John");
        assert_eq!(sim.fill_count("#userName"), 1);
    }

    #[tokio::test]
    async fn garbled_fill_corrupts_read_back_once() {
        let sim = PageSim::builder()
            .node("#email", SimNode::input())
            .fill_fault("#email", FillFault::GarbleValue, 1)
            .build();
        let sel = Selector::css("#email");
        sim.fill(&sel, "a@b.com", T).await.unwrap();
        assert_eq!(sim.input_value(&sel, T).await.unwrap(), "a@b.com~");
        sim.fill(&sel, "a@b.com", T).await.unwrap();
        assert_eq!(sim.input_value(&sel, T).await.unwrap(), "a@b.com");
    }

    #[tokio::test]
    async fn click_blocks_until_dialog_resolution() {
        let sim = Arc::new(
            PageSim::builder()
                .node("#promptButton", SimNode::input())
                .dialog_on_click(
                    "#promptButton",
                    DialogKind::Prompt,
                    "Please enter a value",
                    Some("#promptResult"),
                )
                .build(),
        );

        let mut events = sim.events();
        let resolver = {
            let sim = Arc::clone(&sim);
            tokio::spawn(async move {
                loop {
                    if let Ok(PageEvent::Dialog(dialog)) = events.recv().await {
                        sim.handle_dialog(&dialog.id, DialogDecision::accept_with("Test Input"))
                            .await
                            .unwrap();
                        break;
                    }
                }
            })
        };

        sim.click(&Selector::css("#promptButton"), Duration::from_secs(1))
            .await
            .unwrap();
        resolver.await.unwrap();
        assert_eq!(sim.node_text("#promptResult").as_deref(), Some("Test Input"));
    }

    #[tokio::test]
    async fn unresolved_dialog_times_out_the_click() {
        let sim = PageSim::builder()
            .node("#alertButton", SimNode::input())
            .dialog_on_click("#alertButton", DialogKind::Alert, "Hi", None)
            .build();
        let err = sim
            .click(&Selector::css("#alertButton"), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::WaitTimeout(_)));
    }

    #[tokio::test]
    async fn enter_appends_to_list() {
        let sim = PageSim::builder()
            .node(".new-todo", SimNode::input())
            .node(".todo-list", SimNode::text(""))
            .enter_appends(".new-todo", ".todo-list")
            .build();
        let input = Selector::css(".new-todo");
        sim.fill(&input, "Buy groceries", T).await.unwrap();
        sim.press(&input, "Enter", T).await.unwrap();
        sim.fill(&input, "Walk the dog", T).await.unwrap();
        sim.press(&input, "Enter", T).await.unwrap();

        assert_eq!(
            sim.node_text(".todo-list").as_deref(),
            Some("Buy groceries\nWalk the dog")
        );
        assert_eq!(sim.input_value(&input, T).await.unwrap(), "");
    }

    #[tokio::test]
    async fn navigate_emits_response_and_console_events() {
        let sim = PageSim::builder()
            .route("https://playwright.dev/", "Playwright")
            .build();
        let mut events = sim.events();

        sim.navigate("https://playwright.dev/", T).await.unwrap();
        assert_eq!(sim.title().await.unwrap(), "Playwright");

        match events.recv().await.unwrap() {
            PageEvent::Response { url, status } => {
                assert_eq!(url, "https://playwright.dev/");
                assert_eq!(status, 200);
            }
            other => panic!("expected response event, got {other:?}"),
        }
        match events.recv().await.unwrap() {
            PageEvent::Console { level, text } => {
                assert_eq!(level, ConsoleLevel::Log);
                assert!(text.contains("playwright.dev"));
            }
            other => panic!("expected console event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn role_selectors_are_unsupported() {
        let sim = PageSim::builder().build();
        let err = sim
            .click(&Selector::role("button", "Save"), T)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Unsupported(_)));
    }

    #[tokio::test]
    async fn text_selector_resolution() {
        let sim = PageSim::builder()
            .node("#banner", SimNode::text("Welcome back"))
            .build();
        let text = sim
            .text_content(&Selector::text("Welcome"), T)
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("Welcome back"));
    }
}
