use tracing_forest::Processor;
use tracing_forest::tree::Tree;
use tracing_subscriber::prelude::*;

const CRATE_TARGET: &str = "alpaca_rest_client";

/// Drops spans that didn't record any events so that passing tests stay quiet.
struct SkipEmptySpans<P>(P);

fn has_events(tree: &Tree) -> bool {
    match tree {
        Tree::Span(span) => span.nodes().iter().any(has_events),
        Tree::Event(_) => true,
    }
}

impl<P: Processor> Processor for SkipEmptySpans<P> {
    fn process(&self, tree: Tree) -> tracing_forest::processor::Result {
        if has_events(&tree) {
            self.0.process(tree)
        } else {
            Ok(())
        }
    }
}

fn module_tag(event: &tracing::Event<'_>) -> Option<tracing_forest::Tag> {
    let metadata = event.metadata();
    let module = metadata
        .target()
        .strip_prefix(CRATE_TARGET)?
        .trim_start_matches("::");

    let icon = match module.split("::").next()? {
        "client" => '📡',
        "api" => '🔭',
        "discovery" => '🔍',
        "test_utils" => '🧪',
        _ => '🦙',
    };

    Some(
        tracing_forest::Tag::builder()
            .prefix(module)
            .level(*metadata.level())
            .icon(icon)
            .build(),
    )
}

#[ctor::ctor]
fn init_test_logging() {
    unsafe {
        std::env::set_var("RUST_BACKTRACE", "full");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::Targets::new().with_target(CRATE_TARGET, tracing::Level::DEBUG))
        .with(tracing_forest::ForestLayer::new(
            SkipEmptySpans(tracing_forest::printer::TestCapturePrinter::new()),
            module_tag,
        ))
        .with(tracing_error::ErrorLayer::default())
        .init();

    color_eyre::config::HookBuilder::default()
        .add_frame_filter(Box::new(|frames| {
            // Frames from dependencies only add noise to test failures.
            frames.retain(|frame| {
                frame
                    .filename
                    .as_ref()
                    .is_some_and(|filename| filename.starts_with(env!("CARGO_MANIFEST_DIR")))
            });
        }))
        .install()
        .expect("failed to install color_eyre hook");
}
