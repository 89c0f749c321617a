//! Plain-text frame output

use sv_core::{Annotation, PlaybackController, PlaybackFrame, PlaybackSubscriber, SessionSnapshot};

/// Prints one line per applied operation
pub struct TerminalRenderer {
    controller: PlaybackController,
}

impl TerminalRenderer {
    pub fn new(controller: PlaybackController) -> Self {
        Self { controller }
    }

    pub fn draw(&self) {
        println!("{}", format_snapshot(&self.controller.snapshot()));
    }
}

impl PlaybackSubscriber for TerminalRenderer {
    fn on_frame(&self, frame: &PlaybackFrame) {
        println!(
            "{:>5}/{:<5} {:<9} {}",
            frame.cursor,
            frame.trace_len,
            format!("{:?}", frame.operation.kind),
            format_snapshot(&self.controller.snapshot())
        );
    }
}

/// Marker shown after a value, by display priority
fn marker(annotation: &Annotation) -> &'static str {
    if annotation.comparing {
        "?"
    } else if annotation.swapping {
        "!"
    } else if annotation.pivot {
        "^"
    } else if annotation.current {
        ">"
    } else if annotation.sorted {
        "."
    } else {
        ""
    }
}

fn format_snapshot(snapshot: &SessionSnapshot) -> String {
    snapshot
        .working
        .iter()
        .zip(snapshot.annotations.iter())
        .map(|(value, annotation)| format!("{}{}", value, marker(annotation)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::{projection, AnnotationMap, Operation, Speed};

    #[test]
    fn test_format_snapshot_markers() {
        let controller = PlaybackController::new(vec![3, 1], Speed::default());
        let mut snapshot = controller.snapshot();
        assert_eq!(format_snapshot(&snapshot), "3 1");

        snapshot.annotations = projection::project(&Operation::compare(0, 1), &AnnotationMap::new(2));
        assert_eq!(format_snapshot(&snapshot), "3? 1?");
    }
}
