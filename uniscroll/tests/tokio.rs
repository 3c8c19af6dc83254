use std::rc::Rc;
use std::time::Duration;

use tokio::task::LocalSet;
use uniscroll::{
    Axis, DocumentEvents, ResizeHub, ScrollContainer, ScrollPosition, ScrollbarOptions,
    SelectionFlag, SelectionSuppressor, Services, Size, TokioScheduler, VisibilityTimer,
};

fn services(scheduler: &TokioScheduler, resize: &ResizeHub) -> Services {
    Services {
        document: DocumentEvents::new(),
        selection: SelectionSuppressor::new(Rc::new(SelectionFlag::new())),
        scheduler: Rc::new(scheduler.clone()),
        resize: Rc::new(resize.clone()),
    }
}

#[tokio::test(start_paused = true)]
async fn test_timer_hides_after_delay() {
    LocalSet::new()
        .run_until(async {
            let scheduler = TokioScheduler::new();
            let timer = VisibilityTimer::new(
                Rc::new(scheduler.clone()),
                false,
                Duration::from_millis(1000),
            );

            timer.activity();
            assert!(!timer.is_hidden());
            assert_eq!(scheduler.pending_count(), 1);

            tokio::time::sleep(Duration::from_millis(999)).await;
            assert!(!timer.is_hidden());

            tokio::time::sleep(Duration::from_millis(2)).await;
            assert!(timer.is_hidden());
            assert_eq!(scheduler.pending_count(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_activity_restarts_countdown() {
    LocalSet::new()
        .run_until(async {
            let scheduler = TokioScheduler::new();
            let timer =
                VisibilityTimer::new(Rc::new(scheduler.clone()), false, Duration::from_millis(300));

            timer.activity();
            tokio::time::sleep(Duration::from_millis(200)).await;
            timer.activity();
            tokio::time::sleep(Duration::from_millis(200)).await;
            assert!(!timer.is_hidden());
            assert_eq!(scheduler.pending_count(), 1);

            tokio::time::sleep(Duration::from_millis(101)).await;
            assert!(timer.is_hidden());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_timer_never_fires() {
    LocalSet::new()
        .run_until(async {
            let scheduler = TokioScheduler::new();
            let timer =
                VisibilityTimer::new(Rc::new(scheduler.clone()), false, Duration::from_millis(500));

            timer.activity();
            timer.cancel();
            assert_eq!(scheduler.pending_count(), 0);

            tokio::time::sleep(Duration::from_secs(2)).await;
            assert!(!timer.is_hidden());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_container_teardown_cancels_hide() {
    LocalSet::new()
        .run_until(async {
            let scheduler = TokioScheduler::new();
            let resize = ResizeHub::new();
            let container =
                ScrollContainer::new(ScrollbarOptions::default(), services(&scheduler, &resize), |_, _| {});
            resize.notify(container.viewport_element(), Size::new(100.0, 100.0));
            resize.notify(container.content_element(), Size::new(100.0, 400.0));

            container.handle_scroll(ScrollPosition::new(0.0, 50.0));
            assert!(!container.thumb(Axis::Vertical).hidden);
            assert_eq!(scheduler.pending_count(), 1);

            drop(container);
            assert_eq!(scheduler.pending_count(), 0);
            assert_eq!(resize.observer_count(), 0);
        })
        .await;
}
