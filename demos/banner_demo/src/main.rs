//! Run with `RUST_LOG=debug cargo run -p banner_demo` to watch the lifecycle.

use std::rc::Rc;
use std::time::Duration;

use headsup::*;
use headsup_core::{OverlayLayer, Size, Vec2, Viewport};
use tokio::task::LocalSet;
use tokio::time::sleep;

type Controller = NotificationController<String>;

const FRAME: Duration = Duration::from_millis(16);
const BANNER_HEIGHT: f32 = 64.0;

/// Stand-in for a renderer: rebuilds dirty entries, "measures" them and logs
/// where they would be painted.
async fn paint_loop(layer: OverlayLayer<BannerFrame<String>>) {
    loop {
        if layer.needs_build() {
            let screen = layer.viewport().screen;
            for frame in layer.build_all() {
                frame
                    .handlers
                    .report_size(Size::new(frame.bounds.w, BANNER_HEIGHT));
                if !frame.bounds.intersects_screen(screen) {
                    continue;
                }
                log::info!(
                    "paint {:?} at x={:.1} y={:.1} ({}x{})",
                    frame.content,
                    frame.bounds.x,
                    frame.bounds.y,
                    frame.bounds.w,
                    frame.bounds.h
                );
            }
        }
        sleep(FRAME).await;
    }
}

fn handlers(layer: &OverlayLayer<BannerFrame<String>>) -> Option<BannerHandlers<String>> {
    layer.build_all().into_iter().next().map(|f| f.handlers)
}

async fn walkthrough(controller: Rc<Controller>) -> anyhow::Result<()> {
    let layer = controller.overlay().clone();

    log::info!("1. auto-dismiss after two seconds");
    provide_notifications(controller.clone(), || {
        show(
            "Build finished".to_string(),
            ShowOptions::default()
                .duration(Duration::from_secs(2))
                .on_tap(|| log::info!("banner tapped")),
        )
    })
    .await?;
    sleep(Duration::from_secs(3)).await;

    log::info!("2. swipe right to dismiss");
    provide_notifications(controller.clone(), || {
        show(
            "Swipe me away".to_string(),
            ShowOptions::default().slide_in(true).width(358.0),
        )
    })
    .await?;
    if let Some(h) = handlers(&layer) {
        h.tap_down();
        for _ in 0..6 {
            h.horizontal_drag_update(20.0);
            sleep(FRAME).await;
        }
        h.horizontal_drag_end(DragEndDetails::default());
    }
    sleep(Duration::from_secs(1)).await;

    log::info!("3. short pull up snaps back, flick up dismisses");
    provide_notifications(controller.clone(), || {
        show(
            "Pull me".to_string(),
            ShowOptions::default().duration(Duration::ZERO),
        )
    })
    .await?;
    if let Some(h) = handlers(&layer) {
        h.vertical_drag_update(-16.0);
        h.vertical_drag_end(DragEndDetails::default());
        sleep(Duration::from_millis(500)).await;

        h.vertical_drag_update(-8.0);
        h.vertical_drag_end(DragEndDetails::new(Vec2::new(0.0, -2400.0)));
    }
    sleep(Duration::from_secs(1)).await;

    log::info!("4. replaced mid-entrance, then dismissed explicitly");
    let first = tokio::task::spawn_local(provide_notifications(controller.clone(), || {
        show("First".to_string(), ShowOptions::default())
    }));
    sleep(Duration::from_millis(120)).await;
    provide_notifications(controller.clone(), || {
        show("Second".to_string(), ShowOptions::default())
    })
    .await?;
    first.await??;
    provide_notifications(controller.clone(), dismiss::<String>).await;

    log::info!("done; {} overlay entries left", layer.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = LocalSet::new();

    local.block_on(&runtime, async {
        let layer = OverlayLayer::new(Viewport {
            screen: Size::new(390.0, 844.0),
            safe_area_top: 47.0,
        });
        let controller = Controller::new(layer.clone(), NotificationConfig::default());
        let painter = tokio::task::spawn_local(paint_loop(layer));

        let result = walkthrough(controller).await;
        painter.abort();
        result
    })
}
