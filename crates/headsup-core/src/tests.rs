#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::locals::*;
    use crate::overlay::*;
    use crate::{Rect, Size, Vec2};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::time::Instant;

    fn viewport() -> Viewport {
        Viewport {
            screen: Size::new(400.0, 800.0),
            safe_area_top: 0.0,
        }
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::EaseOutCubic,
        ] {
            assert_eq!(easing.interpolate(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.interpolate(1.0), 1.0, "{easing:?}");
        }
        // Out of range input is clamped.
        assert_eq!(Easing::EaseOutCubic.interpolate(1.5), 1.0);
        assert!((Easing::EaseOutCubic.interpolate(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_tween_transform() {
        let tween = Tween::new(-20.0f32, 0.0, Easing::Linear);
        assert_eq!(tween.transform(0.0), -20.0);
        assert!((tween.transform(0.25) + 15.0).abs() < 1e-6);
        assert_eq!(tween.transform(1.0), 0.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
        assert!(rect.intersects_screen(Size::new(400.0, 800.0)));
        let above = Rect { y: -60.0, ..rect };
        assert!(!above.intersects_screen(Size::new(400.0, 800.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_forward_completes() {
        let progress = AnimationController::new(Duration::from_millis(300));
        let started = Instant::now();

        assert_eq!(progress.forward(None).await, AnimationOutcome::Completed);
        assert_eq!(progress.value(), 1.0);
        assert_eq!(progress.status(), AnimationStatus::Completed);
        assert!(!progress.is_animating());
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_reverse_is_proportional() {
        let progress = AnimationController::new(Duration::from_millis(300));
        progress.set_value(0.5);
        let started = Instant::now();

        assert!(progress.reverse(None).await.is_completed());
        assert!(progress.is_dismissed());
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(150), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(250), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_run_supersedes_older() {
        let progress = AnimationController::new(Duration::from_millis(300));

        let first = progress.forward(Some(0.0));
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            progress.reverse(None).await
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, AnimationOutcome::Superseded);
        assert_eq!(second, AnimationOutcome::Completed);
        assert_eq!(progress.value(), 0.0);
        assert!(progress.is_dismissed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_value_stops_run() {
        let progress = AnimationController::new(Duration::from_millis(300));

        let run = progress.forward(Some(0.0));
        let jump = async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            progress.set_value(0.0);
        };
        let (outcome, ()) = tokio::join!(run, jump);

        assert_eq!(outcome, AnimationOutcome::Superseded);
        assert_eq!(progress.value(), 0.0);
        assert!(progress.is_dismissed());
        assert!(!progress.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_run_does_not_wait() {
        let progress = AnimationController::new(Duration::from_millis(300));
        progress.set_value(1.0);
        let started = Instant::now();

        assert!(progress.forward(None).await.is_completed());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listeners_see_every_tick() {
        let progress = AnimationController::new(Duration::from_millis(160));
        let ticks = Rc::new(Cell::new(0));
        progress.add_listener({
            let ticks = ticks.clone();
            move || ticks.set(ticks.get() + 1)
        });

        progress.forward(Some(0.0)).await;
        // start + roughly one per 16ms frame + settle
        assert!(ticks.get() >= 10, "{}", ticks.get());
    }

    #[test]
    fn test_overlay_insert_build_remove() {
        let layer: OverlayLayer<u32> = OverlayLayer::new(viewport());
        let a = layer.insert(|_| Some(1));
        let b = layer.insert(|vp| Some(vp.screen.width as u32));
        let _hidden = layer.insert(|_| None);

        assert_eq!(layer.len(), 3);
        assert_eq!(layer.build_all(), vec![1, 400]);

        assert!(layer.remove(a));
        assert!(!layer.remove(a));
        assert!(!layer.contains(a));
        assert!(layer.contains(b));
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn test_overlay_dirty_tracking() {
        let layer: OverlayLayer<()> = OverlayLayer::new(viewport());
        let key = layer.insert(|_| Some(()));
        assert!(layer.needs_build());

        layer.build_all();
        assert!(!layer.needs_build());

        layer.mark_needs_build(key);
        assert!(layer.needs_build());
        layer.build(key);
        assert!(!layer.needs_build());

        layer.set_viewport(Viewport {
            screen: Size::new(800.0, 400.0),
            safe_area_top: 24.0,
        });
        assert!(layer.needs_build());
        assert_eq!(layer.viewport().safe_area_top, 24.0);
    }

    #[test]
    fn test_locals_nest_and_restore() {
        #[derive(Clone, Debug, PartialEq)]
        struct Host(u8);

        assert_eq!(local::<Host>(), None);
        with_local(Host(1), || {
            assert_eq!(local::<Host>(), Some(Host(1)));
            with_local(7u32, || {
                // Unrelated types do not shadow each other.
                assert_eq!(local::<Host>(), Some(Host(1)));
                assert_eq!(local::<u32>(), Some(7));
            });
            with_local(Host(2), || assert_eq!(local::<Host>(), Some(Host(2))));
            assert_eq!(local::<Host>(), Some(Host(1)));
        });
        assert_eq!(local::<Host>(), None);
    }

    #[test]
    fn test_locals_frame_popped_on_panic() {
        #[derive(Clone, Debug, PartialEq)]
        struct Host(u8);

        let result = std::panic::catch_unwind(|| {
            with_local::<Host, ()>(Host(3), || panic!("builder failed"));
        });
        assert!(result.is_err());
        assert_eq!(local::<Host>(), None);

        with_local(Host(4), || assert_eq!(local::<Host>(), Some(Host(4))));
    }
}
