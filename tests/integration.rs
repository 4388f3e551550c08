// SPDX-License-Identifier: MPL-2.0
use humane::config::{self, AnimationMode, Config};
use humane::notifications::{ActivityHub, ActivityKind, Event, NotificationCenter, Phase};
use humane::surface::SharedSurface;
use std::time::Duration;
use tempfile::tempdir;
use tokio::time::Instant;

fn markup(event: &Event) -> String {
    match event {
        Event::Shown(notice) | Event::Hidden(notice) => notice.content().to_markup(),
        Event::Idle => String::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn error_then_success_with_default_config() {
    let hub = ActivityHub::new();
    let center = NotificationCenter::new(hub.clone());
    let surface = SharedSurface::new(true);
    center.attach(surface.clone());
    let mut events = center.subscribe();
    let start = Instant::now();

    center.error("disk full");
    center.success("saved");

    let mut timeline = Vec::new();
    loop {
        let event = events.recv().await.expect("event channel closed");
        let at = start.elapsed();
        let done = event == Event::Idle;
        timeline.push((event, at));
        if done {
            break;
        }
    }

    let labels: Vec<_> = timeline
        .iter()
        .map(|(event, _)| match event {
            Event::Shown(_) => format!("shown {}", markup(event)),
            Event::Hidden(_) => format!("hidden {}", markup(event)),
            Event::Idle => "idle".to_string(),
        })
        .collect();
    assert_eq!(
        labels,
        vec![
            "shown disk full",
            "hidden disk full",
            "shown saved",
            "hidden saved",
            "idle"
        ]
    );

    // "saved" only renders after "disk full" is gone and settled.
    let hidden_first = timeline[1].1;
    let shown_second = timeline[2].1;
    assert!(shown_second >= hidden_first + Duration::from_millis(500));

    let total = timeline[4].1;
    assert!(total >= Duration::from_millis(6000), "{total:?}");
    assert!(total <= Duration::from_millis(6010), "{total:?}");

    assert_eq!(center.queued_count(), 0);
    assert_eq!(center.run_state().phase, Phase::Idle);
    assert!(!surface.snapshot().is_shown());
    assert_eq!(surface.snapshot().severity(), Some(humane::Severity::Success));
}

#[tokio::test(start_paused = true)]
async fn list_content_renders_as_bulleted_markup() {
    let center = NotificationCenter::new(ActivityHub::new());
    let surface = SharedSurface::new(true);
    center.attach(surface.clone());

    center.info(vec!["a", "b"]);
    tokio::task::yield_now().await;

    let snapshot = surface.snapshot();
    assert_eq!(snapshot.markup(), "<ul><li>a<li>b</ul>");
    assert_eq!(snapshot.class_name, "humane humane-info humane-show");

    center.notify("hello");
    center.wait_idle().await;
    assert_eq!(surface.snapshot().markup(), "hello");
    assert_eq!(surface.snapshot().class_name, "humane humane-log");
}

#[tokio::test(start_paused = true)]
async fn activity_dismisses_waiting_notice_from_iced_events() {
    let hub = ActivityHub::new();
    let center = NotificationCenter::builder()
        .config(Config {
            wait_for_activity: true,
            animation: AnimationMode::Manual,
            ..Config::default()
        })
        .activity(hub.clone())
        .build();
    let surface = SharedSurface::new(true);
    center.attach(surface.clone());

    center.log("move the mouse");
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(center.run_state().listeners_attached);
    assert_eq!(surface.snapshot().opacity, 1.0);

    let key = iced::Event::Mouse(iced::mouse::Event::CursorMoved {
        position: iced::Point::new(10.0, 10.0),
    });
    assert!(hub.dispatch_event(&key));
    assert_eq!(hub.listener_count(ActivityKind::Click), 0);

    center.wait_idle().await;
    let snapshot = surface.snapshot();
    assert_eq!(snapshot.opacity, 0.0);
    assert!(!snapshot.is_shown());
}

#[tokio::test(start_paused = true)]
async fn center_runs_with_settings_loaded_from_disk() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let saved = Config {
        dwell_timeout_ms: 200,
        settle_delay_ms: 100,
        animation: AnimationMode::Native,
        ..Config::default()
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let center = NotificationCenter::builder().config(loaded).build();
    center.attach(SharedSurface::new(false));
    let start = Instant::now();

    center.log("quick");
    center.log("quicker");
    center.wait_idle().await;

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(600), "{elapsed:?}");
    assert!(elapsed <= Duration::from_millis(610), "{elapsed:?}");

    dir.close().expect("Failed to close temporary directory");
}
