//! Visual/responsive suite: named-viewport sweep with timestamped
//! screenshot artifacts per viewport.

use std::fs;
use std::time::Duration;

use artifact_store::ArtifactStore;
use page_port::PagePort;
use page_sim::PageSim;
use pageprobe_test_data::fixtures;

const T: Duration = Duration::from_millis(500);

#[tokio::test]
async fn sweeps_viewports_with_screenshots() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::new(dir.path());
    let page = PageSim::builder().title("Docs").build();

    page.navigate(fixtures::urls::DOCS, T).await.expect("navigate");

    for (name, viewport) in fixtures::viewports() {
        page.set_viewport(viewport).await.expect("resize");
        page.wait_network_idle(T).await.expect("settle");
        assert_eq!(page.viewport(), viewport);

        let path = store
            .capture(&page, &format!("responsive-{name}"))
            .await
            .expect("capture");
        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with(&format!("responsive-{name}-")));
        assert!(file_name.ends_with(".png"));
    }

    let shots = fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(shots, fixtures::viewports().len());
}

#[tokio::test]
async fn artifact_names_are_filesystem_safe() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::new(dir.path());
    let page = PageSim::builder().title("Docs").build();

    let path = store.capture(&page, "homepage").await.expect("capture");
    let file_name = path.file_name().unwrap().to_str().unwrap();

    let stem = file_name.strip_suffix(".png").expect("png extension");
    assert!(!stem.contains(':'));
    assert!(!stem.contains('.'));
}

#[tokio::test]
async fn screenshots_differ_across_viewports() {
    let page = PageSim::builder().title("Docs").build();

    page.set_viewport(fixtures::viewports()[0].1).await.unwrap();
    let mobile = page.screenshot().await.expect("mobile shot");

    page.set_viewport(fixtures::viewports()[2].1).await.unwrap();
    let desktop = page.screenshot().await.expect("desktop shot");

    assert_ne!(mobile, desktop);
}
