//! Todo-app suite: add items through fill-then-Enter and read them back.
//!
//! Submission uses `Action::Press` with Enter on purpose; clicking is a
//! different interaction and the two are never interchangeable.

use std::time::Duration;

use action_retry::{execute, Action, RetryPolicy};
use page_port::{PagePort, Selector};
use page_sim::{PageSim, SimNode};
use pageprobe_test_data::fixtures;

const T: Duration = Duration::from_millis(500);

fn todo_page() -> PageSim {
    PageSim::builder()
        .title("TodoMVC")
        .route(fixtures::urls::TODO_APP, "TodoMVC")
        .node(".new-todo", SimNode::input())
        .node(".todo-list", SimNode::text(""))
        .enter_appends(".new-todo", ".todo-list")
        .build()
}

#[tokio::test]
async fn adds_all_fixture_todos() {
    let page = todo_page();
    let policy = RetryPolicy::new();
    let input = Selector::css(".new-todo");

    page.navigate(fixtures::urls::TODO_APP, T).await.expect("navigate");

    for todo in fixtures::todos() {
        execute(&page, &Action::fill(input.clone(), todo.clone()), &policy)
            .await
            .into_result()
            .expect("todo typed");
        execute(&page, &Action::press(input.clone(), "Enter"), &policy)
            .await
            .into_result()
            .expect("todo submitted");
    }

    let list = execute(
        &page,
        &Action::read_text(Selector::css(".todo-list")),
        &policy,
    )
    .await
    .into_result()
    .expect("list readable")
    .unwrap_or_default();

    for todo in fixtures::todos() {
        assert!(list.contains(&todo), "missing {todo:?} in {list:?}");
    }
    assert_eq!(list.lines().count(), fixtures::todos().len());
}

#[tokio::test]
async fn input_clears_after_submission() {
    let page = todo_page();
    let policy = RetryPolicy::new();
    let input = Selector::css(".new-todo");

    execute(&page, &Action::fill(input.clone(), "Buy groceries"), &policy)
        .await
        .into_result()
        .expect("typed");
    execute(&page, &Action::press(input.clone(), "Enter"), &policy)
        .await
        .into_result()
        .expect("submitted");

    let value = page.input_value(&input, T).await.expect("readable");
    assert_eq!(value, "");
}

#[tokio::test]
async fn empty_submission_adds_nothing() {
    let page = todo_page();
    let policy = RetryPolicy::new();
    let input = Selector::css(".new-todo");

    execute(&page, &Action::press(input, "Enter"), &policy)
        .await
        .into_result()
        .expect("press on empty input is fine");

    let list = page
        .text_content(&Selector::css(".todo-list"), T)
        .await
        .expect("list readable")
        .unwrap_or_default();
    assert!(list.is_empty());
}
