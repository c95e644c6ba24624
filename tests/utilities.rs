//! Combined helper demo: stamped fixture data, generated addresses,
//! retry-wrapped fills and reads against a deliberately flaky page, and a
//! closing screenshot.

use std::time::Duration;

use action_retry::{execute, Action, Backoff, RetryPolicy};
use artifact_store::ArtifactStore;
use page_port::{ElementState, PagePort, Selector};
use page_sim::{FillFault, PageSim, SimNode};
use pageprobe_test_data::fixtures;
use pageprobe_test_data::{with_timestamp_suffix, DataGen};
use serde_json::Value;

const T: Duration = Duration::from_millis(500);

fn quick_policy() -> RetryPolicy {
    RetryPolicy::new().backoff(Backoff::Constant(Duration::from_millis(1)))
}

#[tokio::test]
async fn full_helper_walkthrough() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::new(dir.path());
    let mut data = DataGen::seeded(2026);

    // the name field drops the first two fills, the output appears on submit
    let page = PageSim::builder()
        .title("Text Box")
        .node("#userName", SimNode::input())
        .node("#userEmail", SimNode::input())
        .node("#submit", SimNode::input())
        .fill_fault("#userName", FillFault::RejectInteraction, 2)
        .click_installs(
            "#submit",
            vec![("#output".to_string(), SimNode::text("submission received"))],
        )
        .build();
    let policy = quick_policy();

    let contact = serde_json::to_value(fixtures::contact_form()).expect("fixture to json");
    let stamped = match contact {
        Value::Object(map) => with_timestamp_suffix(&map),
        other => panic!("unexpected fixture shape {other:?}"),
    };
    let name = stamped["name"].as_str().expect("stamped name").to_string();
    assert!(name.starts_with("John Doe_"));

    let fill_name = execute(
        &page,
        &Action::fill(Selector::css("#userName"), name.clone()),
        &policy,
    )
    .await;
    assert!(fill_name.ok);
    assert_eq!(fill_name.attempts, 3, "two rejections then success");
    assert_eq!(page.fill_count("#userName"), 3);

    let email = data.random_email();
    execute(
        &page,
        &Action::fill(Selector::css("#userEmail"), email),
        &policy,
    )
    .await
    .into_result()
    .expect("email filled");

    execute(&page, &Action::click(Selector::css("#submit")), &policy)
        .await
        .into_result()
        .expect("submitted");

    let output = execute(&page, &Action::read_text(Selector::css("#output")), &policy)
        .await
        .into_result()
        .expect("output readable");
    assert_eq!(output.as_deref(), Some("submission received"));

    let shot = store.capture(&page, "helper-walkthrough").await.expect("shot");
    assert!(shot.exists());
}

#[tokio::test]
async fn element_presence_checks() {
    let page = PageSim::builder()
        .node("#visible", SimNode::text("here"))
        .node("#hidden", SimNode::text("ghost").hidden())
        .build();

    page.wait_for(&Selector::css("#visible"), ElementState::Visible, T)
        .await
        .expect("visible element waits ok");
    page.wait_for(&Selector::css("#hidden"), ElementState::Hidden, T)
        .await
        .expect("hidden element satisfies hidden wait");
    page.wait_for(&Selector::css("#absent"), ElementState::Hidden, T)
        .await
        .expect("absent element satisfies hidden wait");

    let err = page
        .wait_for(&Selector::css("#absent"), ElementState::Visible, T)
        .await
        .unwrap_err();
    assert!(matches!(err, page_port::PortError::WaitTimeout(_)));
}

#[tokio::test]
async fn obscured_button_click_recovers_on_retry() {
    let page = PageSim::builder()
        .node("#submit", SimNode::input())
        .click_fault("#submit", 1)
        .build();

    let outcome = execute(
        &page,
        &Action::click(Selector::css("#submit")),
        &quick_policy(),
    )
    .await;

    assert!(outcome.ok);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(page.click_count("#submit"), 2);
}

#[tokio::test]
async fn generated_identities_are_unique_per_draw() {
    let mut data = DataGen::seeded(7);
    let first = data.random_email();
    let second = data.random_email();
    assert_ne!(first, second);
}
